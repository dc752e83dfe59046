//! Full-tree verification of the red-black properties.

use crate::compare::Comparator;
use crate::node::{Color, NodePtr};
use crate::tree::RBTree;

/// A red-black or bookkeeping property that does not hold.
///
/// Depths count the root as level 1.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("Root is red")]
    RedRoot,

    #[error("Red node with a red child at depth {depth}")]
    RedRed { depth: usize },

    #[error("Black height {found} at depth {depth}, expected {expected}")]
    BlackHeight {
        depth: usize,
        expected: usize,
        found: usize,
    },

    #[error("Values out of order at in-order position {position}")]
    Order { position: usize },

    #[error("Parent link does not match the tree at depth {depth}")]
    ParentLink { depth: usize },

    #[error("Size is {recorded} but {counted} nodes are reachable")]
    Size { recorded: usize, counted: usize },
}

impl<T, C: Comparator<T>> RBTree<T, C> {
    /// Walk the whole tree and report the first broken property: root color,
    /// red-red pairs, black height on every path to an absent child, strict
    /// ordering under the tree's comparator, parent back-references and the
    /// recorded size.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let Some(root) = self.root else {
            return match self.size {
                0 => Ok(()),
                recorded => Err(InvariantViolation::Size {
                    recorded,
                    counted: 0,
                }),
            };
        };

        // SAFETY: every link reachable from `root` is live while `self` is borrowed.
        unsafe {
            if (*root.as_ptr()).is_red() {
                return Err(InvariantViolation::RedRoot);
            }
            if (*root.as_ptr()).parent.is_some() {
                return Err(InvariantViolation::ParentLink { depth: 1 });
            }
            let counted = check_shape(root)?;
            check_order(root, &self.cmp)?;
            if counted != self.size {
                return Err(InvariantViolation::Size {
                    recorded: self.size,
                    counted,
                });
            }
        }
        Ok(())
    }
}

/// Colors, black heights and parent links. Returns the node count.
unsafe fn check_shape<T>(root: NodePtr<T>) -> Result<usize, InvariantViolation> {
    let mut expected = None;
    let mut counted = 0;
    // (node, depth, black nodes from the root down to and including node)
    let mut pending = vec![(root, 1, 0)];

    while let Some((node, depth, above)) = pending.pop() {
        counted += 1;
        let n = &*node.as_ptr();
        let blacks = above + usize::from(n.color == Color::Black);

        for child in [n.left, n.right] {
            match child {
                None => match expected {
                    None => expected = Some(blacks),
                    Some(expected) if expected != blacks => {
                        return Err(InvariantViolation::BlackHeight {
                            depth,
                            expected,
                            found: blacks,
                        })
                    }
                    Some(_) => {}
                },
                Some(child) => {
                    let c = &*child.as_ptr();
                    if c.parent != Some(node) {
                        return Err(InvariantViolation::ParentLink { depth: depth + 1 });
                    }
                    if n.is_red() && c.is_red() {
                        return Err(InvariantViolation::RedRed { depth: depth + 1 });
                    }
                    pending.push((child, depth + 1, blacks));
                }
            }
        }
    }
    Ok(counted)
}

/// In-order walk asserting every value is strictly less than the next one.
unsafe fn check_order<T, C: Comparator<T>>(
    root: NodePtr<T>,
    cmp: &C,
) -> Result<(), InvariantViolation> {
    let mut stack = Vec::new();
    let mut current = Some(root);
    let mut previous: Option<&T> = None;
    let mut position = 0;

    while current.is_some() || !stack.is_empty() {
        while let Some(node) = current {
            stack.push(node);
            current = (*node.as_ptr()).left;
        }
        let Some(node) = stack.pop() else {
            break;
        };
        let n = &*node.as_ptr();
        if let Some(previous) = previous {
            if !cmp.less(previous, &n.value) {
                return Err(InvariantViolation::Order { position });
            }
        }
        previous = Some(&n.value);
        position += 1;
        current = n.right;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{example_tree, unchecked};

    #[test]
    fn test_valid_trees() {
        assert!(example_tree().check_invariants().is_ok());
        assert!(unchecked("N").check_invariants().is_ok());
        assert!(unchecked("(8, 0)(5, 1)NN(18, 1)NN").check_invariants().is_ok());
    }

    #[test]
    fn test_red_root() {
        assert_eq!(
            unchecked("(8, 1)NN").check_invariants(),
            Err(InvariantViolation::RedRoot)
        );
    }

    #[test]
    fn test_red_red() {
        assert_eq!(
            unchecked("(8, 0)(5, 1)(3, 1)NNNN").check_invariants(),
            Err(InvariantViolation::RedRed { depth: 3 })
        );
    }

    #[test]
    fn test_black_height_mismatch() {
        // Paths through 6 carry three black nodes, paths through 2 only two.
        let tree = unchecked("(4, 0)(2, 1)(0, 0)N(1, 1)NN(3, 0)NN(6, 0)(5, 0)NN(8, 1)(7, 0)NN(9, 0)NN");
        assert!(matches!(
            tree.check_invariants(),
            Err(InvariantViolation::BlackHeight { .. })
        ));
    }

    #[test]
    fn test_order() {
        assert_eq!(
            unchecked("(4, 0)(2, 1)NN(3, 1)NN").check_invariants(),
            Err(InvariantViolation::Order { position: 2 })
        );
        // Equal neighbours are not strictly ordered.
        assert_eq!(
            unchecked("(4, 0)(4, 1)NNN").check_invariants(),
            Err(InvariantViolation::Order { position: 1 })
        );
    }

    #[test]
    fn test_parent_link() {
        let tree = unchecked("(8, 0)(5, 1)NN(18, 1)NN");
        unsafe {
            let root = tree.root.unwrap();
            let right = (*root.as_ptr()).right.unwrap();
            (*right.as_ptr()).parent = None;
        }
        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::ParentLink { depth: 2 })
        );
    }

    #[test]
    fn test_size_mismatch() {
        let mut tree = example_tree();
        tree.size = 7;
        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::Size {
                recorded: 7,
                counted: 10
            })
        );
    }
}
