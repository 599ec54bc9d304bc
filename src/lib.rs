//! # Arbora: Thread-Safe Arena-Backed Red-Black Tree
//!
//! This crate provides an ordered set balanced by red-black invariants,
//! stored in a slot arena with stable integer handles instead of owning
//! pointers, plus a coarse-lock wrapper for shared use across threads.
//!
//! ## Key Features
//!
//! - **Red-black balancing**: iterative insertion and removal fixups keep
//!   the tree height logarithmic without recursion depth concerns
//! - **Arena storage**: nodes are indexed by `u32` handles; parent links are
//!   plain back-references, so teardown is deterministic and cycle-free
//! - **Duplicate-safe inserts**: inserting a present value is a rejected
//!   no-op reported through the boolean result, never an error
//! - **Structural validation**: ordering, red-red adjacency, black-height
//!   uniformity and count accuracy can be re-verified on demand
//! - **Coarse-lock concurrency**: one tree-wide mutex linearizes every
//!   operation for its full duration
//! - **Advisory statistics**: lock-free operation counters on the
//!   concurrent wrapper
//!
//! ## Quick Start
//!
//! ```rust
//! use arbora::{ConcurrentRbTree, RbTree};
//!
//! // Single-threaded core
//! let mut tree = RbTree::new();
//! assert!(tree.insert(10));
//! assert!(tree.insert(20));
//! assert!(!tree.insert(10)); // duplicate rejected
//! tree.remove(&20);
//! assert_eq!(tree.len(), 1);
//! let (ok, black_height) = tree.validate();
//! assert!(ok && black_height >= 0);
//!
//! // Shared across threads
//! let shared = ConcurrentRbTree::new();
//! shared.insert("b");
//! shared.insert("a");
//! assert_eq!(shared.find_min(), Some("a"));
//! ```

#![warn(missing_docs)]

pub mod concurrent;
pub mod error;
pub mod stats;
pub mod tree;

pub use concurrent::ConcurrentRbTree;
pub use error::{ArboraError, Result};
pub use stats::{TreeStats, TreeStatsSnapshot};
pub use tree::{Color, NodeId, RbTree};
