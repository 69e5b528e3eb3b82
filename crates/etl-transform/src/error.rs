//! Error types for the transform step.

use thiserror::Error;

/// Errors that can occur while applying transform rules.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A rule targets a field that is not in the job's schema.
    #[error("transform rule targets unknown field '{field}'")]
    UnknownField { field: String },
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;
