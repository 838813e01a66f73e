use serde::{Deserialize, Serialize};

use crate::datatypes::{HumanName, Identifier};
use crate::observation::Observation;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Patient {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<HumanName>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleType {
    Document,
    #[default]
    Collection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntry {
    pub full_url: String,
    pub resource: Resource,
}

/// A per-sample document container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    #[serde(rename = "type")]
    pub kind: BundleType,
    pub identifier: Identifier,
    #[serde(default)]
    pub entry: Vec<BundleEntry>,
}

impl Bundle {
    pub fn collection(identifier: impl Into<String>) -> Self {
        Self {
            kind: BundleType::Collection,
            identifier: Identifier {
                value: identifier.into(),
            },
            entry: Vec::new(),
        }
    }
}

/// Any resource that may appear at the top level or inside a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "resourceType")]
pub enum Resource {
    Patient(Patient),
    Observation(Box<Observation>),
    Bundle(Bundle),
}

impl Resource {
    pub fn resource_type(&self) -> &'static str {
        match self {
            Self::Patient(_) => "Patient",
            Self::Observation(_) => "Observation",
            Self::Bundle(_) => "Bundle",
        }
    }

    pub fn as_observation(&self) -> Option<&Observation> {
        match self {
            Self::Observation(observation) => Some(observation),
            _ => None,
        }
    }
}

impl From<Observation> for Resource {
    fn from(value: Observation) -> Self {
        Self::Observation(Box::new(value))
    }
}

impl From<Patient> for Resource {
    fn from(value: Patient) -> Self {
        Self::Patient(value)
    }
}
