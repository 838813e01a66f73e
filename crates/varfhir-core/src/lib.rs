//! Report core: deterministic identifiers, sample registry and row mapping.
//!
//! A run moves through three stages owned by [`ReportContext`]:
//!
//! 1. **Setup**: derive the [`RunContext`] seed from datastore provenance and
//!    build the [`SampleRegistry`] (one subject and document per sample).
//! 2. **Map**: feed every annotation row through the [`RowMapper`], which
//!    appends a variant observation, a primary molecular consequence and,
//!    with `all_transcripts`, one consequence per transcript mapping to each
//!    sample named on the row.
//! 3. **Finalize**: hand the registry to the document writer.
//!
//! Every identifier is an MD5 digest of seed material ([`make_id`]).

pub mod error;
pub mod identity;
pub mod mapper;
pub mod mapping;
pub mod observations;
pub mod options;
pub mod pipeline_context;
pub mod registry;
pub mod run_context;

pub use error::{MapError, OptionsError, Result};
pub use identity::make_id;
pub use mapper::{MapStats, RowMapper, RowOutcome};
pub use mapping::{ExpandedConsequence, Expansion, TranscriptMapping, expand};
pub use observations::{ConsequenceFields, GeneStudied};
pub use options::{DocumentIdScheme, ReportLevel, ReportOptions};
pub use pipeline_context::ReportContext;
pub use registry::{SampleRecord, SampleRegistry};
pub use run_context::{RunContext, SeedBuilder, derive_seed};
