//! Error types for report setup and row mapping.

use std::path::PathBuf;

use thiserror::Error;
use varfhir_ingest::IngestError;
use varfhir_standards::LookupError;

/// Errors raised while discovering samples or mapping rows.
#[derive(Debug, Error)]
pub enum MapError {
    /// The datastore could not be read.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// A code table miss while mapping a row. Fatal for the run.
    #[error("cannot map variant {variant}: {source}")]
    Lookup {
        variant: String,
        #[source]
        source: LookupError,
    },
}

/// Errors raised while loading [`crate::ReportOptions`].
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("failed to read options file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid options file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, MapError>;
