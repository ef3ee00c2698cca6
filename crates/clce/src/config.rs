//! Process configuration, read from a TOML file.

use std::path::{Path, PathBuf};

use chess_core::DEFAULT_ZOBRIST_SEED;
use classical_engine::SearchConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming a config file when `--config` is not given.
pub const CONFIG_ENV: &str = "CLCE_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Everything the binary can be told before it prints `READY`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClceConfig {
    /// Seed for the zobrist key generator.
    pub zobrist_seed: u64,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub search: SearchConfig,
}

impl Default for ClceConfig {
    fn default() -> Self {
        Self {
            zobrist_seed: DEFAULT_ZOBRIST_SEED,
            log_filter: "warn".to_string(),
            search: SearchConfig::default(),
        }
    }
}

impl ClceConfig {
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// Load from `explicit`, else from `$CLCE_CONFIG`, else use defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        match path {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
