//! Diagnostic pretty-printer
//!
//! Renders tree shape and node colors for debugging. Not part of the
//! functional contract; tests use it to make invariant failures readable.

use super::node::{Color, NIL};
use super::RbTree;
use std::fmt;

impl<T: fmt::Debug> fmt::Debug for RbTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            None => writeln!(f, "RbTree (empty)"),
            Some(root) => self.fmt_subtree(f, root.0, 0, "Root: "),
        }
    }
}

impl<T: fmt::Debug> RbTree<T> {
    /// Render the tree as an indented shape-and-color listing
    ///
    /// ```rust
    /// use arbora::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// for v in [10, 20, 30] {
    ///     tree.insert(v);
    /// }
    /// assert_eq!(tree.render(), "Root: 20(B)\n    L--- 10(R)\n    R--- 30(R)\n");
    /// ```
    pub fn render(&self) -> String {
        format!("{self:?}")
    }

    fn fmt_subtree(
        &self,
        f: &mut fmt::Formatter<'_>,
        id: u32,
        level: usize,
        prefix: &str,
    ) -> fmt::Result {
        let node = self.node(id);
        let tag = if node.color == Color::Red { "R" } else { "B" };
        writeln!(
            f,
            "{:indent$}{}{:?}({})",
            "",
            prefix,
            node.value,
            tag,
            indent = level * 4
        )?;
        if node.left != NIL || node.right != NIL {
            let indent = (level + 1) * 4;
            match node.left {
                NIL => writeln!(f, "{:indent$}L--- None", "", indent = indent)?,
                left => self.fmt_subtree(f, left, level + 1, "L--- ")?,
            }
            match node.right {
                NIL => writeln!(f, "{:indent$}R--- None", "", indent = indent)?,
                right => self.fmt_subtree(f, right, level + 1, "R--- ")?,
            }
        }
        Ok(())
    }
}
