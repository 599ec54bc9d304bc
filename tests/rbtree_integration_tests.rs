//! Integration tests for the red-black tree engine
//!
//! Exercises the public surface end to end: the documented example
//! scenarios, count accuracy, handle staleness and deterministic teardown.

use arbora::{ArboraError, Color, RbTree};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn assert_valid<T: Ord + std::fmt::Debug>(tree: &RbTree<T>) {
    if let Err(e) = tree.check_invariants() {
        panic!("invariant violation: {e}\n{tree:?}");
    }
}

#[test]
fn test_scenario_ascending_triple() {
    // Insert [10, 20, 30]: one left rotation at the grandparent, root 20
    // black with two red children, black-height 1.
    let mut tree = RbTree::new();
    for v in [10, 20, 30] {
        assert!(tree.insert(v));
    }
    let root = tree.root().unwrap();
    assert_eq!(tree.get(root), Some(&20));
    assert_eq!(tree.color(root), Some(Color::Black));
    assert_eq!(tree.get(tree.left(root).unwrap()), Some(&10));
    assert_eq!(tree.get(tree.right(root).unwrap()), Some(&30));
    assert_eq!(tree.color(tree.left(root).unwrap()), Some(Color::Red));
    assert_eq!(tree.color(tree.right(root).unwrap()), Some(Color::Red));
    assert_eq!(tree.validate(), (true, 1));
}

#[test]
fn test_scenario_remove_from_five() {
    let mut tree = RbTree::new();
    for v in [10, 20, 30, 40, 50] {
        assert!(tree.insert(v));
    }
    tree.remove(&10);
    assert!(tree.find(&10).is_none());
    assert_eq!(tree.len(), 4);
    let (ok, bh) = tree.validate();
    assert!(ok);
    assert!(bh >= 1);

    // 20 now holds a single red child; this removal splices the child into
    // its place and blackens it.
    tree.remove(&20);
    assert_eq!(tree.len(), 3);
    assert_valid(&tree);
}

#[test]
fn test_scenario_black_leaf_removals() {
    let mut tree = RbTree::new();
    for v in 1..=7 {
        assert!(tree.insert(v));
    }
    for v in [1, 2, 3] {
        tree.remove(&v);
        assert_valid(&tree);
    }
    assert_eq!(tree.len(), 4);
    for v in 4..=7 {
        assert!(tree.contains(&v));
    }
}

#[test]
fn test_scenario_find_on_empty() {
    let tree: RbTree<i32> = RbTree::new();
    for v in [-1, 0, 1, i32::MAX] {
        assert!(tree.find(&v).is_none());
    }
    assert!(tree.find_min().is_none());
}

#[test]
fn test_scenario_remove_on_empty() {
    let mut tree: RbTree<i32> = RbTree::new();
    tree.remove(&42);
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.validate(), (true, 0));
}

#[test]
fn test_count_accuracy() {
    // size() equals inserts minus duplicates rejected minus removes.
    let mut tree = RbTree::new();
    let mut expected = 0usize;
    for v in [4, 2, 4, 6, 2, 8, 10, 6, 12] {
        if tree.insert(v) {
            expected += 1;
        }
    }
    for v in [2, 3, 12] {
        let had = tree.contains(&v);
        tree.remove(&v);
        if had {
            expected -= 1;
        }
    }
    assert_eq!(tree.len(), expected);
    assert_valid(&tree);
}

#[test]
fn test_insert_remove_round_trip() {
    let mut tree = RbTree::new();
    for v in (0..64).map(|i| i * 3) {
        tree.insert(v);
    }
    let before = tree.len();
    assert!(tree.insert(100));
    assert!(tree.find(&100).is_some());
    tree.remove(&100);
    assert!(tree.find(&100).is_none());
    assert_eq!(tree.len(), before);
    assert_valid(&tree);
}

#[test]
fn test_handles_stay_valid_until_removal() {
    let mut tree = RbTree::new();
    for v in 0..20 {
        tree.insert(v);
    }
    let id = tree.find(&13).unwrap();
    for v in 0..10 {
        tree.remove(&v);
    }
    // 13 survived the removals; its handle still resolves.
    assert_eq!(tree.get(id), Some(&13));
    tree.remove(&13);
    assert_eq!(tree.get(id), None);
    assert!(matches!(
        tree.value(id),
        Err(ArboraError::StaleHandle { .. })
    ));
}

#[test]
fn test_string_values() {
    let mut tree = RbTree::new();
    for word in ["pear", "apple", "quince", "banana", "apple"] {
        tree.insert(word.to_string());
    }
    assert_eq!(tree.len(), 4);
    let min = tree.find_min().unwrap();
    assert_eq!(tree.get(min).map(String::as_str), Some("apple"));
    tree.remove(&"apple".to_string());
    let min = tree.find_min().unwrap();
    assert_eq!(tree.get(min).map(String::as_str), Some("banana"));
    assert_valid(&tree);
}

/// Value wrapper that counts its drops, for teardown determinism checks.
#[derive(Debug)]
struct Tracked {
    value: i32,
    drops: Arc<AtomicUsize>,
}

impl Tracked {
    fn new(value: i32, drops: &Arc<AtomicUsize>) -> Self {
        Self {
            value,
            drops: Arc::clone(drops),
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::Relaxed);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}
impl Eq for Tracked {}
impl PartialOrd for Tracked {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Tracked {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

#[test]
fn test_every_value_dropped_exactly_once() {
    let drops = Arc::new(AtomicUsize::new(0));
    {
        let mut tree = RbTree::new();
        for v in 0..100 {
            assert!(tree.insert(Tracked::new(v, &drops)));
        }
        // Duplicates are dropped on rejection.
        for v in 0..10 {
            assert!(!tree.insert(Tracked::new(v, &drops)));
        }
        assert_eq!(drops.load(Ordering::Relaxed), 10);

        // Removal drops the removed value, including through the two-child
        // value-swap path.
        for v in [50, 25, 75, 0, 99] {
            tree.remove(&Tracked::new(v, &drops));
        }
        // 5 removed values plus the 5 probe keys used to name them.
        assert_eq!(drops.load(Ordering::Relaxed), 10 + 5 + 5);
        assert_eq!(tree.len(), 95);
    }
    // Tree teardown drops the remaining 95 exactly once.
    assert_eq!(drops.load(Ordering::Relaxed), 10 + 5 + 5 + 95);
}

#[test]
fn test_clear_drops_all_values() {
    let drops = Arc::new(AtomicUsize::new(0));
    let mut tree = RbTree::new();
    for v in 0..50 {
        tree.insert(Tracked::new(v, &drops));
    }
    tree.clear();
    assert_eq!(drops.load(Ordering::Relaxed), 50);
    assert!(tree.is_empty());
}

#[test]
fn test_pretty_printer_shape() {
    let mut tree = RbTree::new();
    for v in [10, 20, 30] {
        tree.insert(v);
    }
    assert_eq!(
        tree.render(),
        "Root: 20(B)\n    L--- 10(R)\n    R--- 30(R)\n"
    );
}
