//! Removal and the black-height repair that follows it.

use tracing::{debug, trace};

use crate::compare::Comparator;
use crate::error::{Result, TreeError};
use crate::navigate;
use crate::node::{is_red, side_in_parent, Color, Node, NodePtr, Side};
use crate::tree::RBTree;

impl<T, C: Comparator<T>> RBTree<T, C> {
    /// Remove the value equal to `value` and hand it back.
    ///
    /// A node with two children trades values with its in-order successor,
    /// and the successor's node is the one taken out of the tree.
    pub fn remove(&mut self, value: &T) -> Result<T> {
        if self.root.is_none() {
            return Err(TreeError::TreeEmpty);
        }

        // SAFETY: the tree is non-empty and all of its links are live.
        let removed = unsafe {
            let mut target = navigate::find_in_subtree(self.root, value, &self.cmp)?;
            let t = target.as_ptr();
            if let (Some(_), Some(right)) = ((*t).left, (*t).right) {
                let successor = navigate::leftmost(right);
                std::mem::swap(&mut (*t).value, &mut (*successor.as_ptr()).value);
                target = successor;
            }
            self.delete_node(target)
        };

        self.size -= 1;
        debug!(size = self.size, "removed node");
        Ok(removed)
    }

    /// Splice out a node with at most one child and repair the black height
    /// of the side it left.
    unsafe fn delete_node(&mut self, node: NodePtr<T>) -> T {
        let n = node.as_ptr();
        let child = (*n).left.or((*n).right);
        let parent = (*n).parent;
        let side = side_in_parent(node);

        if let Some(child) = child {
            (*child.as_ptr()).parent = parent;
        }
        match (parent, side) {
            (Some(parent), Some(side)) => (*parent.as_ptr()).set_child(side, child),
            _ => self.root = child,
        }

        let was_black = (*n).color == Color::Black;
        (*n).left = None;
        (*n).right = None;
        let value = Node::free(node);

        if was_black {
            if let (Some(parent), Some(side)) = (parent, side) {
                self.fix_black_height(parent, side);
            }
        }
        self.restore_root_property();
        value
    }

    /// The subtree at `parent.child(side)` is one black node short of its
    /// sibling. Walks up until the deficit is absorbed.
    unsafe fn fix_black_height(&mut self, mut parent: NodePtr<T>, mut side: Side) {
        loop {
            let child = (*parent.as_ptr()).child(side);
            if let Some(child) = child.filter(|c| (*c.as_ptr()).is_red()) {
                trace!(?side, "remove fixup: red child absorbs the deficit");
                (*child.as_ptr()).color = Color::Black;
                return;
            }

            let Some(sibling) = (*parent.as_ptr()).child(side.opposite()) else {
                unreachable!("black-height deficit without a sibling");
            };

            if (*sibling.as_ptr()).is_red() {
                trace!(?side, "remove fixup: red sibling, rotate parent");
                self.rotate(parent, side);
                (*parent.as_ptr()).color = Color::Red;
                (*sibling.as_ptr()).color = Color::Black;
                continue;
            }

            let near = (*sibling.as_ptr()).child(side);
            let far = (*sibling.as_ptr()).child(side.opposite());

            if !is_red(near) && !is_red(far) {
                trace!(?side, "remove fixup: black nephews, push deficit up");
                (*sibling.as_ptr()).color = Color::Red;
                let (Some(grandparent), Some(parent_side)) =
                    ((*parent.as_ptr()).parent, side_in_parent(parent))
                else {
                    return;
                };
                parent = grandparent;
                side = parent_side;
                continue;
            }

            if let Some(far) = far.filter(|f| (*f.as_ptr()).is_red()) {
                trace!(?side, "remove fixup: far nephew red, rotate parent");
                self.rotate(parent, side);
                (*sibling.as_ptr()).color = (*parent.as_ptr()).color;
                (*parent.as_ptr()).color = Color::Black;
                (*far.as_ptr()).color = Color::Black;
                return;
            }

            trace!(?side, "remove fixup: near nephew red, rotate sibling");
            self.rotate(sibling, side.opposite());
            (*sibling.as_ptr()).color = Color::Red;
            if let Some(near) = near {
                (*near.as_ptr()).color = Color::Black;
            }
        }
    }
}
