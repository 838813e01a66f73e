//! Code table lookup errors.

use thiserror::Error;

/// A vocabulary term has no entry in its code table.
///
/// Never substituted with a default: an incorrect clinical code is worse
/// than a failed run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("unknown chromosome '{0}' (no LOINC answer code)")]
    UnknownChromosome(String),

    #[error("unknown sequence ontology term '{0}'")]
    UnknownConsequence(String),
}

pub type Result<T> = std::result::Result<T, LookupError>;
