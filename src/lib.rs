//! rbkit - red-black tree toolkit
//!
//! Re-exports the [`rbkit_tree`] library and adds the pieces the `rbkit`
//! command-line tool is built from: configuration, a dump-file store and the
//! command layer with its argument parser.

pub mod cli;
pub mod commands;
pub mod config;
pub mod store;
pub mod utils;

pub use rbkit_tree::*;
