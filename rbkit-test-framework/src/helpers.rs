//! Fixture helpers shared by the scenario steps.

use rbkit_tree::{RBTree, ReadError};

/// Tree type every scenario works with.
pub type ScenarioTree = RBTree<i64>;

/// Load a tree from its preorder dump.
pub fn load(dump: &str) -> Result<ScenarioTree, ReadError> {
    dump.parse()
}

/// Whitespace-separated integers, as written in a step.
pub fn parse_values(text: &str) -> Result<Vec<i64>, std::num::ParseIntError> {
    text.split_whitespace().map(str::parse).collect()
}
