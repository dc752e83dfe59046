//! The tree facade: ownership of the node graph, lookup, equality and cloning.

use std::fmt;
use std::marker::PhantomData;

use crate::compare::{Comparator, NaturalOrder};
use crate::error::Result;
use crate::navigate;
use crate::node::{Color, Link, Node};

/// Ordered set of values kept in a red-black tree.
///
/// Values are unique under the tree's [`Comparator`]; adding an equal value
/// fails with [`TreeError::TreeHasGivenElement`](crate::TreeError::TreeHasGivenElement).
///
/// ```
/// use rbkit_tree::RBTree;
///
/// let mut tree = RBTree::new();
/// for v in [8, 18, 5, 15, 17, 25, 40, 80] {
///     tree.add(v).unwrap();
/// }
/// assert_eq!(tree.size(), 8);
/// assert_eq!(tree.find(&40), Ok(&40));
/// assert_eq!(tree.remove(&17), Ok(17));
/// assert!(tree.check_invariants().is_ok());
/// ```
pub struct RBTree<T, C = NaturalOrder> {
    pub(crate) root: Link<T>,
    pub(crate) size: usize,
    pub(crate) cmp: C,
    marker: PhantomData<Box<Node<T>>>,
}

// SAFETY: the tree exclusively owns every node reachable from `root`, exactly
// like a `Box` would, and parent links never escape the tree. Moving the tree
// to another thread moves all values with it.
unsafe impl<T: Send, C: Send> Send for RBTree<T, C> {}
// SAFETY: `&RBTree` only hands out `&T` and never mutates through shared
// references.
unsafe impl<T: Sync, C: Sync> Sync for RBTree<T, C> {}

impl<T> RBTree<T, NaturalOrder> {
    /// Create an empty tree ordered by the value type's `==` and `<`.
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T, C> RBTree<T, C> {
    /// Create an empty tree ordered by `cmp`.
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            root: None,
            size: 0,
            cmp,
            marker: PhantomData,
        }
    }

    /// The comparator this tree was built with.
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of stored values.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Drop every value.
    pub fn clear(&mut self) {
        let root = self.root.take();
        self.size = 0;
        // SAFETY: `root` was owned by this tree and is now detached from it.
        unsafe { free_subtree(root) };
    }

    /// Number of black nodes on every path from the root to an absent
    /// child, root included. Zero for an empty tree.
    pub fn black_height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root;
        while let Some(node) = current {
            // SAFETY: every link reachable from `root` points to a live node.
            let node = unsafe { &*node.as_ptr() };
            if node.color == Color::Black {
                height += 1;
            }
            current = node.left;
        }
        height
    }

    /// Force the root black after a mutation.
    pub(crate) fn restore_root_property(&mut self) {
        if let Some(root) = self.root {
            // SAFETY: the root is live and no reference into it is held.
            unsafe { (*root.as_ptr()).color = Color::Black };
        }
    }
}

impl<T, C: Comparator<T>> RBTree<T, C> {
    /// Look up the stored value equal to `value`.
    pub fn find(&self, value: &T) -> Result<&T> {
        // SAFETY: `root` and everything below it is live for the duration of `&self`.
        unsafe {
            let node = navigate::find_in_subtree(self.root, value, &self.cmp)?;
            Ok(&(*node.as_ptr()).value)
        }
    }

    /// Whether a value equal to `value` is stored.
    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_ok()
    }
}

impl<T> Default for RBTree<T, NaturalOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> Drop for RBTree<T, C> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Release a detached subtree without recursing, so decoded trees of any
/// shape can be dropped.
///
/// # Safety
/// `root` must own its subtree and nothing else may refer to it afterwards.
pub(crate) unsafe fn free_subtree<T>(root: Link<T>) {
    let mut pending: Vec<_> = root.into_iter().collect();
    while let Some(node) = pending.pop() {
        let (left, right) = ((*node.as_ptr()).left, (*node.as_ptr()).right);
        pending.extend(left);
        pending.extend(right);
        drop(Node::free(node));
    }
}

impl<T: Clone, C: Clone> Clone for RBTree<T, C> {
    fn clone(&self) -> Self {
        // SAFETY: the source subtree is live; the copy is freshly allocated.
        let root = unsafe { clone_subtree(self.root, None) };
        Self {
            root,
            size: self.size,
            cmp: self.cmp.clone(),
            marker: PhantomData,
        }
    }
}

unsafe fn clone_subtree<T: Clone>(link: Link<T>, parent: Link<T>) -> Link<T> {
    let source = &*link?.as_ptr();
    let copy = Node::alloc(source.value.clone(), source.color);
    (*copy.as_ptr()).parent = parent;
    (*copy.as_ptr()).left = clone_subtree(source.left, Some(copy));
    (*copy.as_ptr()).right = clone_subtree(source.right, Some(copy));
    Some(copy)
}

/// Structural equality: same shape, same colors, and values equal under this
/// tree's comparator at every aligned position.
impl<T, C: Comparator<T>> PartialEq for RBTree<T, C> {
    fn eq(&self, other: &Self) -> bool {
        // SAFETY: both trees are live for the duration of the borrow.
        unsafe { subtrees_equal(self.root, other.root, &self.cmp) }
    }
}

unsafe fn subtrees_equal<T, C: Comparator<T>>(a: Link<T>, b: Link<T>, cmp: &C) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => {
            let (a, b) = (&*a.as_ptr(), &*b.as_ptr());
            a.color == b.color
                && cmp.equal_to(&a.value, &b.value)
                && subtrees_equal(a.left, b.left, cmp)
                && subtrees_equal(a.right, b.right, cmp)
        }
        _ => false,
    }
}

impl<T: fmt::Debug, C> fmt::Debug for RBTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RBTree")
            .field("size", &self.size)
            .field("root", &DebugLink(self.root))
            .finish()
    }
}

struct DebugLink<T>(Link<T>);

impl<T: fmt::Debug> fmt::Debug for DebugLink<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            None => f.write_str("N"),
            Some(node) => {
                // SAFETY: only built from links of a live tree borrowed by `RBTree::fmt`.
                let node = unsafe { &*node.as_ptr() };
                f.debug_struct("Node")
                    .field("value", &node.value)
                    .field("color", &node.color)
                    .field("left", &DebugLink(node.left))
                    .field("right", &DebugLink(node.right))
                    .finish()
            }
        }
    }
}
