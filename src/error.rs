//! Error handling for the arbora library
//!
//! Duplicate inserts and removals of absent values are *not* errors (they are
//! reported through return values); the error type covers structural
//! invariant violations found by validation and stale arena handles.

use thiserror::Error;

/// Main error type for the arbora library
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArboraError {
    /// Binary-search order violated: a value lies outside the bounds implied
    /// by its ancestors
    #[error("order violation at slot {slot}: value outside its subtree bounds")]
    OrderViolation {
        /// Arena slot of the offending node
        slot: u32,
    },

    /// A red node has a red child
    #[error("red-red adjacency at slot {slot}")]
    RedRedViolation {
        /// Arena slot of the red parent
        slot: u32,
    },

    /// Left and right subtrees of a node disagree on black-height
    #[error("black-height mismatch under slot {slot}: left {left}, right {right}")]
    BlackHeightMismatch {
        /// Arena slot of the node whose subtrees disagree
        slot: u32,
        /// Black-height of the left subtree
        left: u32,
        /// Black-height of the right subtree
        right: u32,
    },

    /// The root of a non-empty tree is red
    #[error("root is red")]
    RedRoot,

    /// Recorded node count disagrees with the number of live nodes
    #[error("node count mismatch: counted {counted}, recorded {recorded}")]
    CountMismatch {
        /// Nodes found by traversal
        counted: usize,
        /// Count recorded by the tree
        recorded: usize,
    },

    /// A node handle refers to a freed or out-of-range arena slot
    #[error("stale node handle: slot {slot}")]
    StaleHandle {
        /// Arena slot the handle pointed at
        slot: u32,
    },
}

/// Result type alias for arbora operations
pub type Result<T> = std::result::Result<T, ArboraError>;
