//! Red-black tree with parent back-references
//!
//! This crate provides an ordered set built on a red-black tree. Children are
//! owned by their parent node, every node keeps a non-owning link back to its
//! parent for the upward walks of the rebalancing fixups, and the ordering is
//! supplied per tree through a [`Comparator`].
//!
//! Trees can be dumped to and read back from a compact preorder text format:
//!
//! ```text
//! (8, 0)(5, 1)NN(18, 1)NN
//! ```
//!
//! Each present node is written as `(value, color)` with `0` for black and
//! `1` for red, and `N` marks an absent subtree.
//!
//! The tree is single-threaded: it never locks, so concurrent users must wrap
//! the whole tree in their own mutex.

pub mod compare;
pub mod error;
mod insert;
mod navigate;
mod node;
mod print;
mod remove;
mod rotate;
pub mod stream;
#[cfg(test)]
mod test_util;
mod tree;
pub mod validate;

pub use compare::{comparator, Comparator, FnComparator, NaturalOrder};
pub use error::{Result, TreeError};
pub use node::Color;
pub use stream::{ReadError, ReadOptions, DEFAULT_MAX_DEPTH};
pub use tree::RBTree;
pub use validate::InvariantViolation;
