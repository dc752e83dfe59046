//! Errors reported by the public tree operations.

/// Result type for tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;

/// Errors that can occur in [`find`](crate::RBTree::find),
/// [`add`](crate::RBTree::add) and [`remove`](crate::RBTree::remove).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The operation needs at least one node.
    #[error("Tree is empty")]
    TreeEmpty,

    /// No value in the tree is equal to the requested one.
    #[error("No such element in tree")]
    NoSuchElement,

    /// An equal value is already stored.
    #[error("Tree already has the given element")]
    TreeHasGivenElement,
}
