//! Error types for sink writes.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing a record set to a sink.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to create the destination directory.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a temporary file next to the destination.
    #[error("failed to create temp file in {dir}: {source}")]
    TempFile {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write flat-file content.
    #[error("failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },

    /// Failed to move the finished temp file over the destination.
    #[error("failed to replace {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// SQLite sink failure.
    #[error("failed to write table '{table}': {message}")]
    Sqlite { table: String, message: String },
}

/// Result type for sink operations.
pub type Result<T> = std::result::Result<T, OutputError>;
