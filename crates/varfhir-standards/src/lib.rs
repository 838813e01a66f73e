//! Code tables for the variant report.
//!
//! Static, read-only vocabulary mappings consulted while building
//! observations:
//!
//! - **Consequence codes**: Sequence Ontology term name -> SO accession
//! - **Chromosome codes**: chromosome name -> LOINC answer code
//! - **Fixed codes**: LOINC component codes, code system URIs, profiles
//!
//! Tables are built on first use and live for the rest of the process.

pub mod chromosome;
pub mod codes;
pub mod consequence;
pub mod error;

pub use chromosome::{chromosome_code, chromosome_codes, chromosome_display, chromosome_label};
pub use codes::LoincCode;
pub use consequence::{UNKNOWN_CONSEQUENCE, consequence_code, consequence_codes};
pub use error::{LookupError, Result};
