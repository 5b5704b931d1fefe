use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the corrlog crates.
pub type Result<T> = std::result::Result<T, CorrlogError>;

/// Top-level error type for corrlog.
///
/// Only construction can fail. Leveled log calls never return an error.
#[derive(Debug, Error)]
pub enum CorrlogError {
    #[error("failed to create log directory at {}: {source}", path.display())]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to open log file {}: {message}", path.display())]
    OpenLogFile { path: PathBuf, message: String },

    #[error("invalid severity: {0:?}")]
    InvalidSeverity(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("the process-wide logger is already initialized")]
    AlreadyInitialized,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
