//! Sideways rendering for humans: the right subtree is printed above its
//! parent, the left subtree below, each level indented four columns.

use std::fmt::{self, Write};

use crate::node::Link;
use crate::tree::RBTree;

const INDENT: usize = 4;

impl<T: fmt::Display, C> RBTree<T, C> {
    /// Render the tree sideways into `out`. An empty tree renders nothing.
    pub fn print_tree<W: Write>(&self, out: &mut W) -> fmt::Result {
        // SAFETY: the tree is borrowed for the whole walk.
        unsafe { print_subtree(out, self.root, 0) }
    }

    /// [`print_tree`](Self::print_tree) into a fresh string.
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.print_tree(&mut out);
        out
    }
}

unsafe fn print_subtree<T, W>(out: &mut W, link: Link<T>, indent: usize) -> fmt::Result
where
    T: fmt::Display,
    W: Write,
{
    let Some(node) = link else {
        return Ok(());
    };
    let node = &*node.as_ptr();
    let pad = "";

    if node.right.is_some() {
        print_subtree(out, node.right, indent + INDENT)?;
        writeln!(out, "{pad:indent$}  /")?;
    }
    writeln!(out, "{pad:indent$}({}, {})", node.value, node.color.digit())?;
    if node.left.is_some() {
        writeln!(out, "{pad:indent$}  \\")?;
        print_subtree(out, node.left, indent + INDENT)?;
    }
    Ok(())
}
