use std::path::PathBuf;

use thiserror::Error;

/// Failures of board lookups and card moves.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    #[error("unknown column '{column}' in category '{category}'")]
    UnknownColumn { category: String, column: String },

    #[error("index {index} out of range for column '{column}' in '{category}' ({len} tasks)")]
    IndexOutOfRange {
        category: String,
        column: String,
        index: usize,
        len: usize,
    },

    #[error("no drag in progress")]
    NoDragInProgress,
}

/// Failures while reading or validating seed data.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid seed JSON")]
    Json(#[from] serde_json::Error),

    #[error("seed contains no categories")]
    Empty,

    #[error("duplicate category '{0}'")]
    DuplicateCategory(String),

    #[error("duplicate column '{column}' in category '{category}'")]
    DuplicateColumn { category: String, column: String },

    #[error("task id {0} appears more than once")]
    DuplicateTask(u32),

    #[error("task {id} has status '{status}' but sits in column '{column}'")]
    StatusMismatch {
        id: u32,
        status: String,
        column: String,
    },
}

/// Failures while loading the TOML config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
