//! Error types for the fallible loaders
//!
//! The simulation itself never fails; only startup loading of settings,
//! level files and sound assets can, and every caller recovers with a default.

use std::path::PathBuf;

use thiserror::Error;

/// Settings or level definition loading failure
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("level list is empty")]
    NoLevels,

    #[error("level {level} has zero rows or columns")]
    EmptyLevel { level: usize },
}

/// Sound asset loading failure
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("missing sound asset {path}: {source}")]
    MissingAsset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
