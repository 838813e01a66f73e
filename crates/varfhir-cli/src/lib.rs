//! CLI library components for the variant FHIR reporter.

pub mod logging;
pub mod pipeline;
pub mod types;
