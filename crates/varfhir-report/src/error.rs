//! Document output error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while writing sample documents.
#[derive(Debug, Error)]
pub enum ReportError {
    /// File I/O error.
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document could not be rendered as JSON.
    #[error("failed to serialize document for sample {sample}: {source}")]
    Serialization {
        sample: String,
        #[source]
        source: serde_json::Error,
    },

    /// Two samples would be written to the same file.
    #[error("samples {first} and {second} both map to {path}")]
    PathCollision {
        path: PathBuf,
        first: String,
        second: String,
    },

    /// The finished temp file could not be moved into place.
    #[error("failed to move {temp_path} to {target_path}: {source}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ReportError>;
