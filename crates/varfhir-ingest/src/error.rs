//! Error types for annotation datastore access.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading the annotation datastore.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Database file missing or not a readable SQLite database.
    #[error("failed to open annotation database {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A query against the datastore failed.
    #[error("query failed ({query}): {source}")]
    Query {
        query: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// A required provenance key is absent from the info table.
    #[error("missing provenance entry '{key}' in info table")]
    MissingProvenance { key: &'static str },

    /// A column held a value that cannot be interpreted.
    #[error("invalid value '{value}' in column {column}")]
    InvalidValue { column: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, IngestError>;
