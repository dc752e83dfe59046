//! Acceptance tests for the red-black tree
//!
//! The Gherkin scenarios under `features/` drive `rbkit-tree` through its
//! public API. This crate only carries the fixture helpers they share.

pub mod helpers;
