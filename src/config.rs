//! Configuration for the rbkit command-line tool.
//!
//! Supports YAML files and environment variable overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use rbkit_tree::{ReadOptions, DEFAULT_MAX_DEPTH};

/// Config file looked up in the working directory (`rbkit.yaml`).
pub const DEFAULT_CONFIG_FILE: &str = "rbkit";

/// Environment variable naming an extra config file.
pub const CONFIG_ENV_VAR: &str = "RBKIT_CONFIG";

/// Prefix of override variables, e.g. `RBKIT__STORE__PATH`.
pub const CONFIG_ENV_PREFIX: &str = "RBKIT";

/// Tool configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dump-file store.
    pub store: StoreConfig,
}

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path to the tree dump.
    pub path: PathBuf,
    /// Deepest node level accepted when reading the dump.
    pub max_depth: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./tree.rbt"),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl StoreConfig {
    /// Decoder settings for this store.
    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            max_depth: self.max_depth,
        }
    }
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. `RBKIT__*` environment variables
    /// 2. The file named by `RBKIT_CONFIG`
    /// 3. The `path` argument
    /// 4. `rbkit.yaml` in the working directory
    /// 5. Defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        use ::config::{Config as ConfigLib, Environment, File, FileFormat};

        let mut builder = ConfigLib::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(config_path) = path {
            builder = builder.add_source(
                File::from(config_path)
                    .format(FileFormat::Yaml)
                    .required(true),
            );
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        tracing::debug!(store = %config.store.path.display(), "configuration loaded");
        Ok(config)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] ::config::ConfigError),
}
