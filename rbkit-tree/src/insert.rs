//! Insertion and the red-red fixup that follows it.

use tracing::{debug, trace};

use crate::compare::Comparator;
use crate::error::Result;
use crate::navigate;
use crate::node::{is_red, side_in_parent, Color, Node, NodePtr, Side};
use crate::tree::RBTree;

impl<T, C: Comparator<T>> RBTree<T, C> {
    /// Insert `value`.
    ///
    /// Fails with [`TreeError::TreeHasGivenElement`](crate::TreeError::TreeHasGivenElement)
    /// and leaves the tree untouched when an equal value is already stored.
    pub fn add(&mut self, value: T) -> Result<()> {
        if self.root.is_none() {
            self.root = Some(Node::alloc(value, Color::Black));
            self.size = 1;
            debug!("added root node");
            return Ok(());
        }

        // SAFETY: the tree is non-empty and all of its links are live.
        unsafe {
            let node = self.add_to_leaf(value)?;
            self.balance_from(node);
        }
        self.size += 1;
        debug!(size = self.size, "added node");
        Ok(())
    }

    /// Plain BST insertion of a red leaf.
    unsafe fn add_to_leaf(&mut self, value: T) -> Result<NodePtr<T>> {
        let (parent, side) = navigate::find_leaf_parent(self.root, &value, &self.cmp)?;
        let leaf = Node::alloc(value, Color::Red);
        (*leaf.as_ptr()).parent = Some(parent);
        (*parent.as_ptr()).set_child(side, Some(leaf));
        Ok(leaf)
    }

    /// Walk up from a freshly attached red node until no red node has a red
    /// parent, then make the root black.
    unsafe fn balance_from(&mut self, mut node: NodePtr<T>) {
        while (*node.as_ptr()).is_red() && is_red((*node.as_ptr()).parent) {
            let Some(parent) = (*node.as_ptr()).parent else {
                break;
            };
            let (Some(grandfather), Some(parent_side)) =
                ((*parent.as_ptr()).parent, side_in_parent(parent))
            else {
                break;
            };
            let uncle = (*grandfather.as_ptr()).child(parent_side.opposite());

            node = match uncle {
                Some(uncle) if (*uncle.as_ptr()).is_red() => {
                    trace!(?parent_side, "insert fixup: red uncle, recolor");
                    (*parent.as_ptr()).color = Color::Black;
                    (*uncle.as_ptr()).color = Color::Black;
                    (*grandfather.as_ptr()).color = Color::Red;
                    grandfather
                }
                _ => self.parent_side_case_balance(node, parent_side),
            };
        }
        self.restore_root_property();
    }

    /// Black or absent uncle. `parent_side` is the parent's side under the
    /// grandparent. An inner grandchild is first rotated outward, then the
    /// grandparent is rotated the other way. Returns the new subtree root.
    unsafe fn parent_side_case_balance(
        &mut self,
        mut node: NodePtr<T>,
        parent_side: Side,
    ) -> NodePtr<T> {
        if side_in_parent(node) == Some(parent_side.opposite()) {
            trace!(?parent_side, "insert fixup: inner grandchild, rotate parent");
            let Some(parent) = (*node.as_ptr()).parent else {
                return node;
            };
            let pivot = self.rotate(parent, parent_side);
            node = match (*pivot.as_ptr()).child(parent_side) {
                Some(former_parent) => former_parent,
                None => return pivot,
            };
        }

        trace!(?parent_side, "insert fixup: outer grandchild, rotate grandparent");
        let grandfather = recolor_parent_and_grandfather(node);
        self.rotate(grandfather, parent_side.opposite())
    }
}

/// Parent turns black, grandparent red. Returns the grandparent.
unsafe fn recolor_parent_and_grandfather<T>(node: NodePtr<T>) -> NodePtr<T> {
    let Some(parent) = (*node.as_ptr()).parent else {
        unreachable!("insert fixup node without a parent");
    };
    let Some(grandfather) = (*parent.as_ptr()).parent else {
        unreachable!("insert fixup node without a grandparent");
    };
    (*parent.as_ptr()).color = Color::Black;
    (*grandfather.as_ptr()).color = Color::Red;
    grandfather
}
