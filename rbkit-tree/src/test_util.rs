//! Fixtures shared by the unit tests.

use crate::compare::NaturalOrder;
use crate::stream::{self, ReadOptions};
use crate::tree::RBTree;

/// Parse a dump that must describe a valid red-black tree.
pub(crate) fn tree(dump: &str) -> RBTree<f64> {
    match dump.parse() {
        Ok(tree) => tree,
        Err(err) => panic!("bad fixture {dump:?}: {err}"),
    }
}

/// Parse a dump without checking any red-black property.
pub(crate) fn unchecked(dump: &str) -> RBTree<f64> {
    stream::decode(dump.as_bytes(), NaturalOrder, &ReadOptions::default()).unwrap()
}

/// Values 0..=9, black height 2.
pub(crate) fn example_tree() -> RBTree<f64> {
    tree("(4, 0)(2, 1)(0, 0)N(1, 1)NN(3, 0)NN(6, 1)(5, 0)NN(8, 0)(7, 1)NN(9, 1)NN")
}

/// Values in ascending order.
pub(crate) fn in_order<T: Clone, C>(tree: &RBTree<T, C>) -> Vec<T> {
    let mut values = Vec::with_capacity(tree.size());
    let mut stack = Vec::new();
    let mut current = tree.root;
    unsafe {
        while current.is_some() || !stack.is_empty() {
            while let Some(node) = current {
                stack.push(node);
                current = (*node.as_ptr()).left;
            }
            let Some(node) = stack.pop() else { break };
            values.push((*node.as_ptr()).value.clone());
            current = (*node.as_ptr()).right;
        }
    }
    values
}

/// Preorder dump visiting the right subtree first, which is the dump of the
/// mirrored tree.
pub(crate) fn mirror_dump<T: std::fmt::Display, C>(tree: &RBTree<T, C>) -> String {
    let mut out = String::new();
    let mut pending = vec![tree.root];
    while let Some(link) = pending.pop() {
        match link {
            None => out.push('N'),
            Some(node) => unsafe {
                let node = &*node.as_ptr();
                out.push_str(&format!("({}, {})", node.value, node.color.digit()));
                pending.push(node.left);
                pending.push(node.right);
            },
        }
    }
    out
}
