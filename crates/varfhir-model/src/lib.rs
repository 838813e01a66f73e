//! Resource model for genomics reporting documents.
//!
//! A deliberately small subset of FHIR R4: the datatypes, `Observation`,
//! `Patient` and `Bundle` shapes that the variant reporter produces, plus the
//! [`StableId`] type used for every content-derived identifier.

pub mod datatypes;
pub mod error;
pub mod ids;
pub mod observation;
pub mod resource;

pub use datatypes::{
    CodeableConcept, Coding, HumanName, Identifier, Meta, NameUse, Quantity, Range, Reference,
};
pub use error::{ModelError, Result};
pub use ids::StableId;
pub use observation::{ComponentValue, Observation, ObservationComponent, ObservationStatus};
pub use resource::{Bundle, BundleEntry, BundleType, Patient, Resource};
