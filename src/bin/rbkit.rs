//! rbkit: command-line front end for a red-black tree kept in a dump file
//!
//! ## Usage
//! ```text
//! rbkit [--config <FILE>] add 8 18 5
//! rbkit find 18
//! rbkit show
//! rbkit --help
//! ```
//!
//! ## Configuration
//! - rbkit.yaml in the working directory, `--config <FILE>`, RBKIT_CONFIG
//! - RBKIT__STORE__PATH: dump file (default: ./tree.rbt)
//! - RBKIT__STORE__MAX_DEPTH: depth guard when reading the dump (default: 128)
//! - RBKIT_LOG: log filter (default: info)

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use rbkit::cli::Cli;
use rbkit::commands::Command;
use rbkit::config::Config;
use rbkit::store::TreeStore;
use rbkit::utils::bootstrap::init_tracing;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(cli.config.as_deref(), &cli.command) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failures) => {
            info!(failures, "command finished with failures");
            ExitCode::FAILURE
        }
        Err(err) => {
            error!(error = %err, "rbkit failed");
            eprintln!("rbkit: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Load, execute, save. Returns the number of failed values.
fn run(config_path: Option<&Path>, command: &Command) -> Result<usize, Box<dyn std::error::Error>> {
    let config = Config::load(config_path)?;
    let store = TreeStore::from_config(&config.store);
    let mut tree = store.load()?;

    let outcome = command.execute(&mut tree);
    for line in &outcome.lines {
        println!("{line}");
    }

    if outcome.modified {
        store.save(&tree)?;
    }
    Ok(outcome.failures)
}
