//! Tree vertices and the raw links between them.
//!
//! A node owns its `left` and `right` children: they are allocated by
//! [`Node::alloc`] and released exactly once, either by the removal path or
//! by the tree's `Drop`. The `parent` link is a plain back-reference used for
//! upward traversal and never keeps anything alive.

use std::ptr::NonNull;

/// Red-black node color.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Color {
    Black = 0,
    Red = 1,
}

impl Color {
    /// Digit written for this color by the text dump.
    pub fn digit(self) -> char {
        match self {
            Color::Black => '0',
            Color::Red => '1',
        }
    }

    /// `0` is black, any other decimal digit is red.
    pub(crate) fn from_digit(byte: u8) -> Option<Color> {
        match byte {
            b'0' => Some(Color::Black),
            b'1'..=b'9' => Some(Color::Red),
            _ => None,
        }
    }
}

/// Child slot of a node.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

pub(crate) type NodePtr<T> = NonNull<Node<T>>;

/// Optional link to a node. As a child slot it owns the target; as a parent
/// slot it only refers to it.
pub(crate) type Link<T> = Option<NodePtr<T>>;

pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) color: Color,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
    pub(crate) parent: Link<T>,
}

impl<T> Node<T> {
    /// Allocate a detached node and hand its ownership to the caller.
    pub(crate) fn alloc(value: T, color: Color) -> NodePtr<T> {
        let node = Box::new(Node {
            value,
            color,
            left: None,
            right: None,
            parent: None,
        });
        NonNull::from(Box::leak(node))
    }

    /// Release a node and return its value.
    ///
    /// # Safety
    /// `ptr` must come from [`Node::alloc`], must already be unlinked from
    /// every other node, and must not be used again.
    pub(crate) unsafe fn free(ptr: NodePtr<T>) -> T {
        let node = Box::from_raw(ptr.as_ptr());
        node.value
    }

    pub(crate) fn child(&self, side: Side) -> Link<T> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Link<T>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }
}

/// Whether `link` is a red node. Absent children count as black.
///
/// # Safety
/// A present `link` must point to a live node.
pub(crate) unsafe fn is_red<T>(link: Link<T>) -> bool {
    match link {
        Some(node) => (*node.as_ptr()).is_red(),
        None => false,
    }
}

/// Which child slot of its parent `node` occupies, `None` for the root.
///
/// # Safety
/// `node` and its parent must be live and correctly linked.
pub(crate) unsafe fn side_in_parent<T>(node: NodePtr<T>) -> Option<Side> {
    let parent = (*node.as_ptr()).parent?;
    if (*parent.as_ptr()).left == Some(node) {
        Some(Side::Left)
    } else {
        Some(Side::Right)
    }
}
