//! Advisory operation counters for the concurrent tree
//!
//! Counters are plain relaxed atomics updated outside any structural
//! guarantee; they exist for monitoring and tests, not for correctness.
//! A snapshot taken while other threads run may mix counts from different
//! instants.

use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free operation counters for a [`ConcurrentRbTree`]
///
/// [`ConcurrentRbTree`]: crate::ConcurrentRbTree
#[derive(Debug, Default)]
pub struct TreeStats {
    inserts: AtomicU64,
    duplicates_rejected: AtomicU64,
    removes: AtomicU64,
    finds: AtomicU64,
    find_misses: AtomicU64,
}

impl TreeStats {
    /// Create a zeroed counter set
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_duplicate(&self) {
        self.duplicates_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_remove(&self) {
        self.removes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_find(&self, hit: bool) {
        self.finds.fetch_add(1, Ordering::Relaxed);
        if !hit {
            self.find_misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Take a point-in-time copy of all counters
    pub fn snapshot(&self) -> TreeStatsSnapshot {
        TreeStatsSnapshot {
            inserts: self.inserts.load(Ordering::Relaxed),
            duplicates_rejected: self.duplicates_rejected.load(Ordering::Relaxed),
            removes: self.removes.load(Ordering::Relaxed),
            finds: self.finds.load(Ordering::Relaxed),
            find_misses: self.find_misses.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`TreeStats`] counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeStatsSnapshot {
    /// Successful insertions
    pub inserts: u64,
    /// Insertions rejected because the value was already present
    pub duplicates_rejected: u64,
    /// Removals that unlinked a node
    pub removes: u64,
    /// Total find calls
    pub finds: u64,
    /// Find calls that returned no value
    pub find_misses: u64,
}

impl TreeStatsSnapshot {
    /// Fraction of find calls that hit, or 0.0 if none were made
    pub fn hit_rate(&self) -> f64 {
        if self.finds == 0 {
            return 0.0;
        }
        (self.finds - self.find_misses) as f64 / self.finds as f64
    }
}
