//! Document finalization for variant reports.
//!
//! Turns the per-sample entry lists accumulated by `varfhir-core` into one
//! `collection` bundle per sample and writes each as pretty-printed JSON.

pub mod error;
pub mod writer;

pub use error::{ReportError, Result};
pub use writer::{OutputConfig, WrittenDocument, finalize, write_atomic};
