//! Arena node representation
//!
//! Nodes live in a slot vector owned by the tree and refer to each other by
//! `u32` slot index. `NIL` marks an absent relation; an absent node is always
//! treated as black. Parent links are plain back-references, so freeing a
//! subtree never has to break a reference cycle.

/// Sentinel index for an absent parent or child
pub(crate) const NIL: u32 = u32::MAX;

/// Node color tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Red node
    Red,
    /// Black node (absent children also count as black)
    Black,
}

/// Stable handle to a live node in the arena
///
/// A handle stays valid until the node it names is removed from the tree.
/// Accessors taking a handle return `None` (or `StaleHandle`) for freed or
/// out-of-range slots rather than touching reused storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Raw arena slot index, for diagnostics
    pub fn index(self) -> u32 {
        self.0
    }
}

#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) color: Color,
    pub(crate) parent: u32,
    pub(crate) left: u32,
    pub(crate) right: u32,
}

impl<T> Node<T> {
    /// Fresh leaf, colored red as required by the insertion algorithm
    pub(crate) fn new_leaf(value: T, parent: u32) -> Self {
        Self {
            value,
            color: Color::Red,
            parent,
            left: NIL,
            right: NIL,
        }
    }
}
