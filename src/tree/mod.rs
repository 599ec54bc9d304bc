//! Arena-backed red-black tree core
//!
//! This module provides [`RbTree`], an ordered set balanced by red-black
//! recoloring and rotations. Nodes live in a slot arena indexed by `u32`
//! handles instead of owning pointers, which keeps parent back-references
//! cycle-free and makes teardown deterministic: freeing a slot drops its
//! value exactly once, and freed slots are recycled through a free list.
//!
//! ## Features
//!
//! - **Ordered set semantics**: duplicate inserts are rejected, reported
//!   through the boolean result rather than an error
//! - **Iterative rebalancing**: both fixup procedures walk upward in a loop,
//!   so tree height never translates into call-stack depth
//! - **Stable handles**: [`NodeId`] values remain valid until the node they
//!   name is removed
//! - **Structural validation**: [`RbTree::check_invariants`] re-verifies
//!   ordering, red-red adjacency, black-height uniformity and the node count
//!
//! For the thread-safe wrapper see [`ConcurrentRbTree`](crate::ConcurrentRbTree).

mod debug;
mod node;
mod validate;

pub use node::{Color, NodeId};

use node::{Node, NIL};
use std::cmp::Ordering;
use std::mem;

/// Ordered set backed by a red-black tree in a slot arena
///
/// Values are kept in strict ascending order under `T`'s [`Ord`]
/// implementation. Insertion and removal rebalance the tree so its height
/// stays logarithmic in the number of nodes.
///
/// # Examples
///
/// ```rust
/// use arbora::RbTree;
///
/// let mut tree = RbTree::new();
/// assert!(tree.insert(10));
/// assert!(tree.insert(20));
/// assert!(!tree.insert(10)); // duplicate rejected
/// assert_eq!(tree.len(), 2);
///
/// tree.remove(&10);
/// assert!(tree.find(&10).is_none());
///
/// let (ok, black_height) = tree.validate();
/// assert!(ok);
/// assert!(black_height >= 0);
/// ```
pub struct RbTree<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<u32>,
    root: u32,
    len: usize,
}

impl<T> RbTree<T> {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: NIL,
            len: 0,
        }
    }

    /// Create a tree whose arena is pre-sized for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            root: NIL,
            len: 0,
        }
    }

    /// Number of values currently in the tree
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check whether the tree holds no values
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove every value, dropping each exactly once
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.root = NIL;
        self.len = 0;
    }

    /// Handle of the root node, if the tree is non-empty
    pub fn root(&self) -> Option<NodeId> {
        (self.root != NIL).then_some(NodeId(self.root))
    }

    /// Value held by `id`, or `None` for a stale handle
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.slots.get(id.0 as usize)?.as_ref().map(|n| &n.value)
    }

    /// Value held by `id`, reporting stale handles through the error type
    pub fn value(&self, id: NodeId) -> crate::Result<&T> {
        self.get(id)
            .ok_or(crate::ArboraError::StaleHandle { slot: id.0 })
    }

    /// Color of the node named by `id`, or `None` for a stale handle
    pub fn color(&self, id: NodeId) -> Option<Color> {
        self.slots.get(id.0 as usize)?.as_ref().map(|n| n.color)
    }

    /// Left child of `id`, if present
    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        let n = self.slots.get(id.0 as usize)?.as_ref()?;
        (n.left != NIL).then_some(NodeId(n.left))
    }

    /// Right child of `id`, if present
    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        let n = self.slots.get(id.0 as usize)?.as_ref()?;
        (n.right != NIL).then_some(NodeId(n.right))
    }

    /// Parent of `id`, if present
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        let n = self.slots.get(id.0 as usize)?.as_ref()?;
        (n.parent != NIL).then_some(NodeId(n.parent))
    }

    // ------------------------------------------------------------------
    // Arena plumbing. Internal indices are trusted: a dangling index here
    // is a bug in the rebalancing logic, so accessors fail fast instead of
    // propagating an error.
    // ------------------------------------------------------------------

    pub(crate) fn node(&self, id: u32) -> &Node<T> {
        self.slots[id as usize].as_ref().expect("dangling node index")
    }

    fn node_mut(&mut self, id: u32) -> &mut Node<T> {
        self.slots[id as usize].as_mut().expect("dangling node index")
    }

    fn alloc(&mut self, value: T, parent: u32) -> u32 {
        let node = Node::new_leaf(value, parent);
        match self.free.pop() {
            Some(slot) => {
                debug_assert!(self.slots[slot as usize].is_none());
                self.slots[slot as usize] = Some(node);
                slot
            }
            None => {
                assert!((self.slots.len() as u64) < NIL as u64, "node arena full");
                self.slots.push(Some(node));
                (self.slots.len() - 1) as u32
            }
        }
    }

    fn release(&mut self, id: u32) -> T {
        let node = self.slots[id as usize].take().expect("releasing a free slot");
        self.free.push(id);
        node.value
    }

    pub(crate) fn color_of(&self, id: u32) -> Color {
        if id == NIL {
            Color::Black
        } else {
            self.node(id).color
        }
    }

    fn set_color(&mut self, id: u32, color: Color) {
        self.node_mut(id).color = color;
    }

    fn parent_of(&self, id: u32) -> u32 {
        self.node(id).parent
    }

    pub(crate) fn left_of(&self, id: u32) -> u32 {
        if id == NIL {
            NIL
        } else {
            self.node(id).left
        }
    }

    pub(crate) fn right_of(&self, id: u32) -> u32 {
        if id == NIL {
            NIL
        } else {
            self.node(id).right
        }
    }

    /// The other child of `id`'s parent
    fn sibling_of(&self, id: u32) -> u32 {
        let p = self.parent_of(id);
        if p == NIL {
            return NIL;
        }
        if self.left_of(p) == id {
            self.right_of(p)
        } else {
            self.left_of(p)
        }
    }

    /// Sibling's child on the same side as `id`
    fn close_nephew_of(&self, id: u32) -> u32 {
        let p = self.parent_of(id);
        let sib = self.sibling_of(id);
        if p == NIL || sib == NIL {
            return NIL;
        }
        if self.left_of(p) == id {
            self.left_of(sib)
        } else {
            self.right_of(sib)
        }
    }

    /// Sibling's child on the opposite side from `id`
    fn distant_nephew_of(&self, id: u32) -> u32 {
        let p = self.parent_of(id);
        let sib = self.sibling_of(id);
        if p == NIL || sib == NIL {
            return NIL;
        }
        if self.left_of(p) == id {
            self.right_of(sib)
        } else {
            self.left_of(sib)
        }
    }

    fn leftmost(&self, mut id: u32) -> u32 {
        debug_assert!(id != NIL);
        while self.left_of(id) != NIL {
            id = self.left_of(id);
        }
        id
    }

    fn rightmost(&self, mut id: u32) -> u32 {
        debug_assert!(id != NIL);
        while self.right_of(id) != NIL {
            id = self.right_of(id);
        }
        id
    }

    /// Swap the values of two distinct live slots, leaving colors and
    /// relations untouched
    fn swap_values(&mut self, a: u32, b: u32) {
        debug_assert_ne!(a, b);
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.slots.split_at_mut(hi as usize);
        let lo_node = head[lo as usize].as_mut().expect("dangling node index");
        let hi_node = tail[0].as_mut().expect("dangling node index");
        mem::swap(&mut lo_node.value, &mut hi_node.value);
    }

    // ------------------------------------------------------------------
    // Rotations
    // ------------------------------------------------------------------

    //     [3]                   4
    //  1      4      ==>    3      5
    //       2   5        1    2       6
    //             6
    fn rotate_left(&mut self, node: u32) {
        let parent = self.parent_of(node);
        let pivot = self.right_of(node);
        debug_assert!(pivot != NIL, "rotate_left needs a right child");
        let inner = self.left_of(pivot);

        self.node_mut(pivot).left = node;
        self.node_mut(node).right = inner;
        self.node_mut(pivot).parent = parent;
        self.node_mut(node).parent = pivot;
        if inner != NIL {
            self.node_mut(inner).parent = node;
        }
        if parent == NIL {
            self.root = pivot;
        } else if self.left_of(parent) == node {
            self.node_mut(parent).left = pivot;
        } else {
            self.node_mut(parent).right = pivot;
        }
    }

    // Mirror image of `rotate_left`.
    fn rotate_right(&mut self, node: u32) {
        let parent = self.parent_of(node);
        let pivot = self.left_of(node);
        debug_assert!(pivot != NIL, "rotate_right needs a left child");
        let inner = self.right_of(pivot);

        self.node_mut(pivot).right = node;
        self.node_mut(node).left = inner;
        self.node_mut(pivot).parent = parent;
        self.node_mut(node).parent = pivot;
        if inner != NIL {
            self.node_mut(inner).parent = node;
        }
        if parent == NIL {
            self.root = pivot;
        } else if self.left_of(parent) == node {
            self.node_mut(parent).left = pivot;
        } else {
            self.node_mut(parent).right = pivot;
        }
    }
}

impl<T: Ord> RbTree<T> {
    /// Insert `value`, returning `true` if it was added and `false` if an
    /// equal value was already present
    ///
    /// The new node enters as a red leaf at its BST position; the fixup walk
    /// then restores the red-black invariants by recoloring and rotating.
    pub fn insert(&mut self, value: T) -> bool {
        if self.root == NIL {
            let id = self.alloc(value, NIL);
            self.root = id;
            self.len += 1;
            self.insert_fixup(id);
            return true;
        }
        let mut cur = self.root;
        loop {
            match value.cmp(&self.node(cur).value) {
                Ordering::Less => {
                    let left = self.node(cur).left;
                    if left == NIL {
                        let id = self.alloc(value, cur);
                        self.node_mut(cur).left = id;
                        self.len += 1;
                        self.insert_fixup(id);
                        return true;
                    }
                    cur = left;
                }
                Ordering::Greater => {
                    let right = self.node(cur).right;
                    if right == NIL {
                        let id = self.alloc(value, cur);
                        self.node_mut(cur).right = id;
                        self.len += 1;
                        self.insert_fixup(id);
                        return true;
                    }
                    cur = right;
                }
                Ordering::Equal => return false,
            }
        }
    }

    /// Restore the red-black invariants after linking a red leaf at `id`
    ///
    /// Walks upward iteratively. The uncle-red case recolors and moves the
    /// violation two levels up; the remaining cases resolve with at most two
    /// rotations and terminate.
    fn insert_fixup(&mut self, mut id: u32) {
        loop {
            if id == self.root {
                self.set_color(id, Color::Black);
                return;
            }
            let parent = self.parent_of(id);
            if parent == self.root {
                if self.color_of(self.root) == Color::Red {
                    self.set_color(self.root, Color::Black);
                }
                return;
            }
            if self.color_of(parent) == Color::Black {
                return;
            }
            let grand = self.parent_of(parent);
            let g_left = self.left_of(grand);
            let g_right = self.right_of(grand);

            // Uncle red: push the red pair up and re-examine from the
            // grandparent.
            if self.color_of(g_left) == Color::Red && self.color_of(g_right) == Color::Red {
                self.set_color(grand, Color::Red);
                self.set_color(g_left, Color::Black);
                self.set_color(g_right, Color::Black);
                id = grand;
                continue;
            }

            let (mut node, mut parent) = (id, parent);
            // Zig-zag: rotate at the parent so node and parent line up on
            // the same side, then relabel for the zig-zig step.
            if node == self.right_of(parent) && parent == self.left_of(grand) {
                self.rotate_left(parent);
                mem::swap(&mut node, &mut parent);
            } else if node == self.left_of(parent) && parent == self.right_of(grand) {
                self.rotate_right(parent);
                mem::swap(&mut node, &mut parent);
            }
            // Zig-zig: rotate at the grandparent away from the shared side.
            if parent == self.left_of(grand) {
                self.rotate_right(grand);
            } else {
                self.rotate_left(grand);
            }
            self.set_color(grand, Color::Red);
            self.set_color(parent, Color::Black);
            return;
        }
    }

    /// Remove the node holding `value` if present; silently does nothing
    /// otherwise
    pub fn remove(&mut self, value: &T) {
        let found = match self.find(value) {
            Some(id) => id.0,
            None => return,
        };
        let mut node = found;

        // Single-node tree.
        if self.len == 1 && node == self.root {
            let id = self.root;
            self.root = NIL;
            self.len = 0;
            self.release(id);
            return;
        }

        // Two children: swap values with the in-order predecessor and remove
        // that node's slot instead, reducing to the one-child or leaf cases.
        if self.left_of(node) != NIL && self.right_of(node) != NIL {
            let pred = self.rightmost(self.left_of(node));
            self.swap_values(node, pred);
            node = pred;
        }

        // One child: splice the child into node's position. The child is
        // forced black, which restores the black-height lost with the
        // removed black node.
        let left = self.left_of(node);
        let right = self.right_of(node);
        if left != NIL || right != NIL {
            let child = if left != NIL { left } else { right };
            let parent = self.parent_of(node);
            self.node_mut(child).parent = parent;
            self.node_mut(child).color = Color::Black;
            if parent == NIL {
                self.root = child;
            } else if self.left_of(parent) == node {
                self.node_mut(parent).left = child;
            } else {
                self.node_mut(parent).right = child;
            }
            self.len -= 1;
            self.release(node);
            return;
        }

        // Red leaf: unlink directly, no invariant is disturbed.
        if self.color_of(node) == Color::Red {
            self.unlink_leaf(node);
            self.len -= 1;
            self.release(node);
            return;
        }

        // Black leaf: resolve the double-black deficiency first, while the
        // node is still linked, then unlink.
        self.remove_fixup(node);
        self.unlink_leaf(node);
        self.len -= 1;
        self.release(node);
    }

    /// Detach a leaf from its parent. Root leaves are handled by the
    /// single-node case before this is reached.
    fn unlink_leaf(&mut self, node: u32) {
        let parent = self.parent_of(node);
        debug_assert!(parent != NIL, "unlinking an unrooted leaf");
        if self.left_of(parent) == node {
            self.node_mut(parent).left = NIL;
        } else {
            self.node_mut(parent).right = NIL;
        }
    }

    /// Restore black-height before removing the black leaf at `id`
    ///
    /// Sibling and nephew handles are re-derived from the relations after
    /// every rotation; a rotation moves all three of them.
    fn remove_fixup(&mut self, mut id: u32) {
        loop {
            if id == self.root {
                return;
            }
            let parent = self.parent_of(id);
            let mut sibling = self.sibling_of(id);
            debug_assert!(sibling != NIL, "black leaf must have a sibling");

            // Case 1: red sibling. Rotate it above the parent; the new
            // sibling is black and one of the later cases applies.
            if self.color_of(sibling) == Color::Red {
                if id == self.left_of(parent) {
                    self.rotate_left(parent);
                } else {
                    self.rotate_right(parent);
                }
                self.set_color(sibling, Color::Black);
                self.set_color(parent, Color::Red);
                sibling = self.sibling_of(id);
            }

            let nephews_black = self.color_of(self.left_of(sibling)) == Color::Black
                && self.color_of(self.right_of(sibling)) == Color::Black;
            if nephews_black {
                if self.color_of(parent) == Color::Red {
                    // Case 2: trade the parent's red for the missing black.
                    self.set_color(parent, Color::Black);
                    self.set_color(sibling, Color::Red);
                    return;
                }
                // Case 3: all black. The whole subtree under parent is one
                // black short; propagate the deficiency upward.
                self.set_color(sibling, Color::Red);
                id = parent;
                continue;
            }

            let close = self.close_nephew_of(id);
            let mut distant = self.distant_nephew_of(id);
            // Case 4: red close nephew, black distant nephew. Rotate at the
            // sibling to turn the close nephew into the new sibling.
            if self.color_of(close) == Color::Red && self.color_of(distant) == Color::Black {
                if id == self.left_of(parent) {
                    self.rotate_right(sibling);
                } else {
                    self.rotate_left(sibling);
                }
                self.set_color(sibling, Color::Red);
                self.set_color(close, Color::Black);
                sibling = self.sibling_of(id);
                distant = self.distant_nephew_of(id);
            }

            // Case 5: red distant nephew. One rotation at the parent plus a
            // color swap settles the deficiency.
            if id == self.left_of(parent) {
                self.rotate_left(parent);
            } else {
                self.rotate_right(parent);
            }
            let parent_color = self.color_of(parent);
            let sibling_color = self.color_of(sibling);
            self.set_color(parent, sibling_color);
            self.set_color(sibling, parent_color);
            self.set_color(distant, Color::Black);
            return;
        }
    }

    /// Handle of the node holding `value`, if present
    pub fn find(&self, value: &T) -> Option<NodeId> {
        let mut cur = self.root;
        while cur != NIL {
            match value.cmp(&self.node(cur).value) {
                Ordering::Less => cur = self.node(cur).left,
                Ordering::Greater => cur = self.node(cur).right,
                Ordering::Equal => return Some(NodeId(cur)),
            }
        }
        None
    }

    /// Check whether `value` is present
    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// Handle of the minimum node, if the tree is non-empty
    pub fn find_min(&self) -> Option<NodeId> {
        (self.root != NIL).then(|| NodeId(self.leftmost(self.root)))
    }
}

impl<T> Default for RbTree<T> {
    fn default() -> Self {
        Self::new()
    }
}
