//! Command layer of the rbkit tool.
//!
//! Each [`Command`] runs against a stored tree, collecting the lines to
//! print.

use clap::Subcommand;
use tracing::{debug, warn};

use crate::store::StoredTree;

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Insert values
    Add {
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<i64>,
    },

    /// Remove values
    Remove {
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<i64>,
    },

    /// Look values up
    Find {
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<i64>,
    },

    /// Print the tree sideways
    Show,

    /// Print the preorder dump
    Dump,

    /// Verify the red-black invariants
    Check,

    /// Remove every value
    Clear,
}

/// Result of running one command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Lines for stdout.
    pub lines: Vec<String>,
    /// Whether the tree changed and must be saved.
    pub modified: bool,
    /// Number of values or checks that failed.
    pub failures: usize,
}

impl Command {
    /// Run the command against `tree`.
    pub fn execute(&self, tree: &mut StoredTree) -> Outcome {
        let mut outcome = Outcome::default();
        match self {
            Command::Add { values } => {
                for &v in values {
                    match tree.add(v) {
                        Ok(()) => {
                            outcome.lines.push(format!("added {v}"));
                            outcome.modified = true;
                        }
                        Err(err) => outcome.fail(v, err),
                    }
                }
            }
            Command::Remove { values } => {
                for v in values {
                    match tree.remove(v) {
                        Ok(removed) => {
                            outcome.lines.push(format!("removed {removed}"));
                            outcome.modified = true;
                        }
                        Err(err) => outcome.fail(*v, err),
                    }
                }
            }
            Command::Find { values } => {
                for v in values {
                    match tree.find(v) {
                        Ok(found) => outcome.lines.push(format!("found {found}")),
                        Err(err) => outcome.fail(*v, err),
                    }
                }
            }
            Command::Show => {
                if tree.is_empty() {
                    outcome.lines.push("(empty)".to_string());
                } else {
                    outcome.lines.extend(tree.pretty().lines().map(str::to_string));
                }
            }
            Command::Dump => outcome.lines.push(tree.to_string()),
            Command::Check => match tree.check_invariants() {
                Ok(()) => outcome.lines.push(format!(
                    "ok: {} values, black height {}",
                    tree.size(),
                    tree.black_height()
                )),
                Err(violation) => {
                    warn!(%violation, "tree check failed");
                    outcome.lines.push(format!("invalid: {violation}"));
                    outcome.failures += 1;
                }
            },
            Command::Clear => {
                outcome.modified = !tree.is_empty();
                outcome.lines.push(format!("cleared {} values", tree.size()));
                tree.clear();
            }
        }
        debug!(command = ?self, modified = outcome.modified, failures = outcome.failures, "command executed");
        outcome
    }
}

impl Outcome {
    fn fail(&mut self, value: i64, err: impl std::fmt::Display) {
        self.lines.push(format!("{value}: {err}"));
        self.failures += 1;
    }
}
