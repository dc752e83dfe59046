//! Rotation primitives.
//!
//! A rotation re-links three generations at once: the rotated node, the
//! pivot child that replaces it, and the pivot's inner subtree that changes
//! hands. Every moved subtree root has its parent link rewritten in the same
//! step, and the tree root follows the pivot when the rotated node was the
//! root.

use crate::node::{NodePtr, Side};
use crate::tree::RBTree;

impl<T, C> RBTree<T, C> {
    /// Rotate `node` down toward `dir`. The child on the opposite side is the
    /// pivot and takes `node`'s place. Returns the pivot.
    ///
    /// `rotate(node, Side::Left)` is the classic left rotation (the right
    /// child rises) and `rotate(node, Side::Right)` its mirror.
    ///
    /// # Safety
    /// `node` must belong to this tree and have a child opposite to `dir`.
    pub(crate) unsafe fn rotate(&mut self, node: NodePtr<T>, dir: Side) -> NodePtr<T> {
        let n = node.as_ptr();
        let Some(pivot) = (*n).child(dir.opposite()) else {
            unreachable!("rotation without a pivot child");
        };
        let p = pivot.as_ptr();
        let parent = (*n).parent;

        // Set link between node and the pivot's inner subtree
        let inner = (*p).child(dir);
        (*n).set_child(dir.opposite(), inner);
        if let Some(inner) = inner {
            (*inner.as_ptr()).parent = Some(node);
        }

        // Set link between node and pivot
        (*p).set_child(dir, Some(node));
        (*n).parent = Some(pivot);

        // Set link between pivot and the former parent
        match parent {
            Some(parent) => {
                let parent = parent.as_ptr();
                if (*parent).left == Some(node) {
                    (*parent).left = Some(pivot);
                } else {
                    (*parent).right = Some(pivot);
                }
            }
            None => self.root = Some(pivot),
        }
        (*p).parent = parent;

        pivot
    }
}

#[cfg(test)]
mod tests {
    use crate::node::{Link, NodePtr, Side};
    use crate::test_util::unchecked;
    use crate::RBTree;

    unsafe fn value(link: Link<f64>) -> f64 {
        (*link.unwrap().as_ptr()).value
    }

    unsafe fn assert_links(node: NodePtr<f64>) {
        let n = node.as_ptr();
        for child in [(*n).left, (*n).right].into_iter().flatten() {
            assert_eq!((*child.as_ptr()).parent, Some(node));
            assert_links(child);
        }
    }

    fn rotated_left_at_root() -> RBTree<f64> {
        let mut tree = unchecked("(4, 0)(2, 0)NN(6, 1)(5, 0)NN(8, 0)NN");
        unsafe {
            let root = tree.root.unwrap();
            let pivot = tree.rotate(root, Side::Left);
            assert_eq!((*pivot.as_ptr()).value, 6.0);
        }
        tree
    }

    #[test]
    fn test_left_rotate_root() {
        let tree = rotated_left_at_root();
        assert_eq!(tree.to_string(), "(6, 1)(4, 0)(2, 0)NN(5, 0)NN(8, 0)NN");
        unsafe {
            let root = tree.root.unwrap();
            assert_eq!((*root.as_ptr()).parent, None);
            assert_links(root);
        }
    }

    #[test]
    fn test_right_rotate_undoes_left_rotate() {
        let mut tree = rotated_left_at_root();
        unsafe {
            let root = tree.root.unwrap();
            let pivot = tree.rotate(root, Side::Right);
            assert_eq!((*pivot.as_ptr()).value, 4.0);
            assert_links(tree.root.unwrap());
        }
        assert_eq!(tree.to_string(), "(4, 0)(2, 0)NN(6, 1)(5, 0)NN(8, 0)NN");
    }

    #[test]
    fn test_rotate_below_root_relinks_parent() {
        let mut tree = unchecked("(10, 0)(4, 0)(2, 0)NN(6, 1)(5, 0)NN(8, 0)NNN");
        unsafe {
            let root = tree.root.unwrap();
            let four = (*root.as_ptr()).left.unwrap();
            tree.rotate(four, Side::Left);

            assert_eq!(tree.root, Some(root));
            assert_eq!(value((*root.as_ptr()).left), 6.0);
            assert_links(root);
        }
        assert_eq!(
            tree.to_string(),
            "(10, 0)(6, 1)(4, 0)(2, 0)NN(5, 0)NN(8, 0)NNN"
        );
    }

    #[test]
    fn test_rotate_right_child_of_parent() {
        let mut tree = unchecked("(1, 0)N(4, 0)(2, 1)NN(6, 0)NN");
        unsafe {
            let root = tree.root.unwrap();
            let four = (*root.as_ptr()).right.unwrap();
            tree.rotate(four, Side::Right);
            assert_eq!(value((*root.as_ptr()).right), 2.0);
            assert_links(root);
        }
        assert_eq!(tree.to_string(), "(1, 0)N(2, 1)N(4, 0)N(6, 0)NN");
    }
}
