//! Configuration for gofacts.
//!
//! Loads settings from `.gofacts.toml` and `GOFACTS_*` environment variables.
//! Uses figment for layered configuration with provenance tracking.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the per-project configuration file.
pub const CONFIG_FILE_NAME: &str = ".gofacts.toml";

/// Prefix for environment variable overrides (`GOFACTS_MAX_FILE_SIZE`).
pub const ENV_PREFIX: &str = "GOFACTS_";

/// gofacts configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Files larger than this many bytes are rejected before reading (default: 16 MiB).
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Maximum syntax tree depth the walker descends into (default: 500).
    #[serde(default = "default_recursion_depth")]
    pub max_recursion_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
            max_recursion_depth: default_recursion_depth(),
        }
    }
}

fn default_max_file_size() -> u64 {
    16 * 1024 * 1024
}

fn default_recursion_depth() -> usize {
    500
}

impl Config {
    /// Load configuration from `.gofacts.toml` in the given directory.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load(dir: &Path) -> Self {
        Self::load_file(&dir.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from an explicit TOML file, then apply environment overrides.
    ///
    /// Invalid configuration is reported and replaced by defaults.
    pub fn load_file(config_path: &Path) -> Self {
        // Build layered config: defaults <- toml file <- environment
        let figment = Figment::from(Serialized::defaults(Config::default()));

        let figment = if config_path.exists() {
            figment.merge(Toml::file(config_path))
        } else {
            figment
        };
        let figment = figment.merge(Env::prefixed(ENV_PREFIX));

        match figment.extract() {
            Ok(config) => {
                if config_path.exists() {
                    tracing::info!("Loaded config from {:?}", config_path);
                }
                config
            }
            Err(e) => {
                tracing::warn!("Config error: {}", e);
                Self::default()
            }
        }
    }
}
