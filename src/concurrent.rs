//! Coarse-lock thread-safe tree wrapper
//!
//! [`ConcurrentRbTree`] serializes every operation through one tree-wide
//! mutex held for the operation's full duration, rotations and fixups
//! included. Operations are linearized by the lock: no two structural
//! mutations interleave, and a reader never observes a partially rotated
//! tree. This is a correctness-first coarse design and a known throughput
//! limitation, not a defect; callers needing scalable concurrent access
//! want a fine-grained or optimistic structure instead.
//!
//! Lookups return cloned values because arena handles must not outlive the
//! lock that made them consistent.

use crate::stats::{TreeStats, TreeStatsSnapshot};
use crate::tree::RbTree;
use crate::Result;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Thread-safe ordered set behind a single coarse mutex
///
/// All methods take `&self`; the internal lock provides mutual exclusion.
/// The lock is non-reentrant: calling back into the same tree from inside a
/// `Clone` implementation will deadlock.
///
/// # Examples
///
/// ```rust
/// use arbora::ConcurrentRbTree;
/// use std::thread;
///
/// let tree = ConcurrentRbTree::new();
/// thread::scope(|s| {
///     for chunk in 0..4 {
///         let tree = &tree;
///         s.spawn(move || {
///             for v in (chunk * 100)..(chunk * 100 + 100) {
///                 assert!(tree.insert(v));
///             }
///         });
///     }
/// });
/// assert_eq!(tree.len(), 400);
/// assert_eq!(tree.find_min(), Some(0));
/// let (ok, _) = tree.validate();
/// assert!(ok);
/// ```
pub struct ConcurrentRbTree<T> {
    inner: Mutex<RbTree<T>>,
    // Mirror of the guarded count, readable without the lock. Stale by
    // design; the authoritative count lives behind the mutex.
    len_hint: AtomicUsize,
    stats: TreeStats,
}

impl<T> ConcurrentRbTree<T> {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RbTree::new()),
            len_hint: AtomicUsize::new(0),
            stats: TreeStats::new(),
        }
    }

    /// Create a tree whose arena is pre-sized for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(RbTree::with_capacity(capacity)),
            len_hint: AtomicUsize::new(0),
            stats: TreeStats::new(),
        }
    }

    /// A poisoned lock means a mutation panicked partway through and the
    /// structure can no longer be trusted; continuing would risk silent
    /// corruption, so fail fast.
    fn lock(&self) -> MutexGuard<'_, RbTree<T>> {
        self.inner.lock().expect("tree mutex poisoned")
    }

    /// Number of values, read under the lock
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check whether the tree holds no values, read under the lock
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Advisory count read without taking the lock
    ///
    /// May lag concurrent mutations arbitrarily; use [`len`](Self::len) when
    /// the count must be consistent with the structure.
    pub fn len_relaxed(&self) -> usize {
        self.len_hint.load(Ordering::Relaxed)
    }

    /// Remove every value
    pub fn clear(&self) {
        let mut tree = self.lock();
        tree.clear();
        self.len_hint.store(0, Ordering::Relaxed);
    }

    /// Point-in-time copy of the advisory operation counters
    pub fn stats(&self) -> TreeStatsSnapshot {
        self.stats.snapshot()
    }
}

impl<T: Ord> ConcurrentRbTree<T> {
    /// Insert `value`, returning `true` if it was added and `false` if an
    /// equal value was already present
    pub fn insert(&self, value: T) -> bool {
        let mut tree = self.lock();
        let inserted = tree.insert(value);
        self.len_hint.store(tree.len(), Ordering::Relaxed);
        if inserted {
            self.stats.record_insert();
        } else {
            self.stats.record_duplicate();
        }
        inserted
    }

    /// Remove `value` if present; silently does nothing otherwise
    pub fn remove(&self, value: &T) {
        let mut tree = self.lock();
        let before = tree.len();
        tree.remove(value);
        let after = tree.len();
        self.len_hint.store(after, Ordering::Relaxed);
        if after < before {
            self.stats.record_remove();
        }
    }

    /// Check whether `value` is present
    pub fn contains(&self, value: &T) -> bool {
        let tree = self.lock();
        let hit = tree.contains(value);
        self.stats.record_find(hit);
        hit
    }

    /// Verify every structural invariant, returning the black-height
    pub fn check_invariants(&self) -> Result<u32> {
        self.lock().check_invariants()
    }

    /// Validation surface: `(true, black_height)` or `(false, -1)`
    pub fn validate(&self) -> (bool, i32) {
        self.lock().validate()
    }
}

impl<T: Ord + Clone> ConcurrentRbTree<T> {
    /// Clone of the stored value equal to `value`, if present
    pub fn find(&self, value: &T) -> Option<T> {
        let tree = self.lock();
        let found = tree.find(value).and_then(|id| tree.get(id)).cloned();
        self.stats.record_find(found.is_some());
        found
    }

    /// Clone of the minimum value, if the tree is non-empty
    pub fn find_min(&self) -> Option<T> {
        let tree = self.lock();
        tree.find_min().and_then(|id| tree.get(id)).cloned()
    }
}

impl<T: std::fmt::Debug> ConcurrentRbTree<T> {
    /// Render the tree shape and colors under the lock; debugging aid only
    pub fn render(&self) -> String {
        self.lock().render()
    }
}

impl<T> Default for ConcurrentRbTree<T> {
    fn default() -> Self {
        Self::new()
    }
}
