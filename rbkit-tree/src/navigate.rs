//! Ordered descent shared by lookup, insertion and removal.

use crate::compare::Comparator;
use crate::error::TreeError;
use crate::node::{Link, NodePtr, Side};

/// Failures of the internal searches. Translated into [`TreeError`] before
/// they reach a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SearchError {
    /// The descent reached an absent child without an equal value.
    NoSuchElementInSubtree,
    /// An equal value sits on the path to the insertion point.
    NoLeafParentElement,
    /// There is no root to descend from.
    TreeEmpty,
}

impl From<SearchError> for TreeError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::NoSuchElementInSubtree => TreeError::NoSuchElement,
            SearchError::NoLeafParentElement => TreeError::TreeHasGivenElement,
            SearchError::TreeEmpty => TreeError::TreeEmpty,
        }
    }
}

/// Find the node holding a value equal to `value`.
///
/// # Safety
/// Every link reachable from `root` must point to a live node.
pub(crate) unsafe fn find_in_subtree<T, C: Comparator<T>>(
    root: Link<T>,
    value: &T,
    cmp: &C,
) -> Result<NodePtr<T>, SearchError> {
    let mut current = root;
    while let Some(node) = current {
        let stored = &*node.as_ptr();
        if cmp.equal_to(&stored.value, value) {
            return Ok(node);
        }
        current = if cmp.less(&stored.value, value) {
            stored.right
        } else {
            stored.left
        };
    }
    Err(SearchError::NoSuchElementInSubtree)
}

/// Find the node whose absent child slot is where `value` belongs, together
/// with the side of that slot.
///
/// # Safety
/// Every link reachable from `root` must point to a live node.
pub(crate) unsafe fn find_leaf_parent<T, C: Comparator<T>>(
    root: Link<T>,
    value: &T,
    cmp: &C,
) -> Result<(NodePtr<T>, Side), SearchError> {
    let mut node = root.ok_or(SearchError::TreeEmpty)?;
    loop {
        let stored = &*node.as_ptr();
        if cmp.equal_to(&stored.value, value) {
            return Err(SearchError::NoLeafParentElement);
        }
        let side = if cmp.less(&stored.value, value) {
            Side::Right
        } else {
            Side::Left
        };
        match stored.child(side) {
            Some(child) => node = child,
            None => return Ok((node, side)),
        }
    }
}

/// Leftmost node of the subtree rooted at `node`.
///
/// # Safety
/// `node` and its left spine must be live.
pub(crate) unsafe fn leftmost<T>(mut node: NodePtr<T>) -> NodePtr<T> {
    while let Some(left) = (*node.as_ptr()).left {
        node = left;
    }
    node
}
