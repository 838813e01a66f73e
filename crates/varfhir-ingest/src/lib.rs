//! Annotation datastore ingestion.
//!
//! Exposes the [`AnnotationStore`] seam used by the report pipeline and its
//! two implementations: [`SqliteStore`] for result databases on disk and
//! [`MemoryStore`] for fixtures.

pub mod error;
pub mod row;
pub mod sqlite;
pub mod store;

pub use error::{IngestError, Result};
pub use row::{Provenance, VariantRow, non_blank};
pub use sqlite::SqliteStore;
pub use store::{AnnotationStore, MemoryStore};
