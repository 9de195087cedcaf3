//! Configuration loading for chess-play.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Locations searched for a config file when none is given explicitly.
pub const SEARCH_PATHS: [&str; 2] = ["chess.toml", "../chess.toml"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Draw pieces with Unicode chess glyphs instead of FEN letters.
    pub unicode: bool,
    /// List the legal moves after every turn.
    pub show_legal_moves: bool,
    /// Starting position; the standard setup when unset.
    pub start_fen: Option<String>,
    /// Default log filter, overridden by `RUST_LOG`.
    pub log_level: String,
    /// File the config was read from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            unicode: false,
            show_legal_moves: false,
            start_fen: None,
            log_level: default_log_level(),
            source: None,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Loads `explicit` if given, otherwise the first of [`SEARCH_PATHS`]
    /// that exists. Falls back to defaults when no file is found.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::read(path);
        }

        for path in SEARCH_PATHS {
            let path = Path::new(path);
            if path.exists() {
                return Self::read(path);
            }
        }

        Ok(Config::default())
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
