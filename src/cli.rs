//! Command-line arguments of the rbkit tool.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Command;

#[derive(Debug, Parser)]
#[command(name = "rbkit", about = "Red-black tree kept in a dump file", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to config file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
