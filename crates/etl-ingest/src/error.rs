//! Error types for source ingestion.

use std::path::PathBuf;
use thiserror::Error;

use crate::format::SourceFormat;

/// Errors that can occur while reading source files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Source availability ===
    /// Source directory not found or not a directory.
    #[error("source directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source file not found.
    #[error("source file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read a source file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Format errors ===
    /// Malformed content for the declared format.
    #[error("failed to parse {format} file {path}: {message}")]
    Parse {
        path: PathBuf,
        format: SourceFormat,
        message: String,
    },

    /// A declared field is absent from the source.
    #[error("missing field '{field}' in {path}")]
    MissingField { path: PathBuf, field: String },

    /// Record field set does not match the job's declared schema.
    #[error("schema mismatch in {path}: {message}")]
    SchemaMismatch { path: PathBuf, message: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

/// Map an open/metadata io error to the right availability variant.
pub(crate) fn open_error(path: &std::path::Path, error: std::io::Error) -> IngestError {
    if error.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: error,
        }
    }
}
