use serde::{Deserialize, Serialize};

use crate::datatypes::{CodeableConcept, Meta, Range, Reference};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObservationStatus {
    Registered,
    Preliminary,
    #[default]
    Final,
    Amended,
}

/// The typed value of an observation component.
///
/// Serialized inline as `valueString`, `valueCodeableConcept` or `valueRange`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentValue {
    #[serde(rename = "valueString")]
    String(String),
    #[serde(rename = "valueCodeableConcept")]
    CodeableConcept(CodeableConcept),
    #[serde(rename = "valueRange")]
    Range(Range),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationComponent {
    pub code: CodeableConcept,
    #[serde(flatten)]
    pub value: ComponentValue,
}

impl ObservationComponent {
    pub fn string(code: CodeableConcept, value: impl Into<String>) -> Self {
        Self {
            code,
            value: ComponentValue::String(value.into()),
        }
    }

    pub fn coded(code: CodeableConcept, value: CodeableConcept) -> Self {
        Self {
            code,
            value: ComponentValue::CodeableConcept(value),
        }
    }

    pub fn range(code: CodeableConcept, value: Range) -> Self {
        Self {
            code,
            value: ComponentValue::Range(value),
        }
    }

    /// Returns the first coding code of the component's own `code`.
    pub fn code_value(&self) -> Option<&str> {
        self.code
            .coding
            .first()
            .and_then(|coding| coding.code.as_deref())
    }
}

/// A measurement or assertion about a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    pub status: ObservationStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<CodeableConcept>,
    pub code: CodeableConcept,
    pub subject: Reference,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub derived_from: Vec<Reference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub component: Vec<ObservationComponent>,
}

impl Observation {
    pub fn new(code: CodeableConcept, subject: Reference) -> Self {
        Self {
            meta: None,
            status: ObservationStatus::Final,
            category: Vec::new(),
            code,
            subject,
            derived_from: Vec::new(),
            component: Vec::new(),
        }
    }

    /// Components whose code matches `code` (e.g. a LOINC code).
    pub fn components_with_code<'a>(
        &'a self,
        code: &'a str,
    ) -> impl Iterator<Item = &'a ObservationComponent> + 'a {
        self.component
            .iter()
            .filter(move |component| component.code_value() == Some(code))
    }
}
