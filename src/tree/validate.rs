//! Structural invariant checking
//!
//! One traversal verifies binary-search order, red-red adjacency and
//! black-height uniformity, and cross-checks the recorded node count. A
//! violation here is an implementation bug, never a user error; tests treat
//! any occurrence as fatal.

use super::node::{Color, NIL};
use super::RbTree;
use crate::{ArboraError, Result};

impl<T: Ord> RbTree<T> {
    /// Verify every structural invariant, returning the tree's black-height
    ///
    /// Black-height counts the black nodes on any path from the root down to
    /// an absent-child position, the absent position included and the root
    /// itself excluded. The empty tree reports 0.
    pub fn check_invariants(&self) -> Result<u32> {
        let root = self.root;
        if root == NIL {
            if self.len() != 0 {
                return Err(ArboraError::CountMismatch {
                    counted: 0,
                    recorded: self.len(),
                });
            }
            return Ok(0);
        }
        if self.color_of(root) == Color::Red {
            return Err(ArboraError::RedRoot);
        }
        let mut counted = 0;
        let height = self.check_subtree(root, None, None, &mut counted)?;
        if counted != self.len() {
            return Err(ArboraError::CountMismatch {
                counted,
                recorded: self.len(),
            });
        }
        // `height` counts the root; the reported black-height excludes it.
        Ok(height - 1)
    }

    /// Black nodes from `id`'s position down to the absent-child positions,
    /// `id` itself included and the absent position counted as one black.
    /// Fails on the first violated invariant; the failure short-circuits
    /// upward.
    fn check_subtree(
        &self,
        id: u32,
        lower: Option<&T>,
        upper: Option<&T>,
        counted: &mut usize,
    ) -> Result<u32> {
        if id == NIL {
            return Ok(1);
        }
        *counted += 1;
        let node = self.node(id);

        if let Some(lo) = lower {
            if node.value <= *lo {
                return Err(ArboraError::OrderViolation { slot: id });
            }
        }
        if let Some(hi) = upper {
            if node.value >= *hi {
                return Err(ArboraError::OrderViolation { slot: id });
            }
        }
        if node.color == Color::Red
            && (self.color_of(node.left) == Color::Red || self.color_of(node.right) == Color::Red)
        {
            return Err(ArboraError::RedRedViolation { slot: id });
        }

        let left = self.check_subtree(node.left, lower, Some(&node.value), counted)?;
        let right = self.check_subtree(node.right, Some(&node.value), upper, counted)?;
        if left != right {
            return Err(ArboraError::BlackHeightMismatch {
                slot: id,
                left,
                right,
            });
        }
        Ok(left + u32::from(node.color == Color::Black))
    }

    /// Compact validation surface: `(true, black_height)` on success,
    /// `(false, -1)` on any violation
    pub fn validate(&self) -> (bool, i32) {
        match self.check_invariants() {
            Ok(height) => (true, height as i32),
            Err(_) => (false, -1),
        }
    }
}
