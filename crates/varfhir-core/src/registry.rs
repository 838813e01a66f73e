//! Per-sample subjects, documents and entry accumulators.

use std::collections::HashMap;

use tracing::{debug, warn};
use varfhir_ingest::AnnotationStore;
use varfhir_model::{BundleEntry, HumanName, NameUse, Patient, Reference, Resource, StableId};

use crate::error::Result;
use crate::options::DocumentIdScheme;
use crate::run_context::RunContext;

/// Separator that marks a sample key as a multi-sample composite.
const COMPOSITE_SEPARATOR: char = ',';

/// One sample's report state: its subject, document id and entries so far.
#[derive(Debug, Clone)]
pub struct SampleRecord {
    name: String,
    subject_id: StableId,
    document_id: StableId,
    entries: Vec<BundleEntry>,
}

impl SampleRecord {
    fn new(name: String, run: &RunContext, scheme: DocumentIdScheme) -> Self {
        let subject_id = run.subject_id(&name);
        let document_id = run.document_id(&name, scheme);
        let patient = Patient {
            name: vec![HumanName {
                name_use: NameUse::Official,
                given: vec![name.clone()],
            }],
        };
        let mut record = Self {
            name,
            subject_id,
            document_id,
            entries: Vec::new(),
        };
        record.push(subject_id, patient);
        record
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subject_id(&self) -> StableId {
        self.subject_id
    }

    pub fn document_id(&self) -> StableId {
        self.document_id
    }

    /// Reference used as the `subject` of this sample's observations.
    pub fn subject_reference(&self) -> Reference {
        Reference::to("Patient", self.subject_id.urn())
    }

    /// Entries in document order. The subject is always first.
    pub fn entries(&self) -> &[BundleEntry] {
        &self.entries
    }

    /// Append a resource under its `urn:uuid` full URL.
    pub fn push(&mut self, id: StableId, resource: impl Into<Resource>) {
        self.entries.push(BundleEntry {
            full_url: id.urn(),
            resource: resource.into(),
        });
    }

    pub fn into_entries(self) -> Vec<BundleEntry> {
        self.entries
    }
}

/// All samples of a run, in datastore order.
#[derive(Debug, Clone, Default)]
pub struct SampleRegistry {
    samples: Vec<SampleRecord>,
    index: HashMap<String, usize>,
}

impl SampleRegistry {
    /// Read the sample table and register every single-sample key.
    pub fn discover<S: AnnotationStore>(
        store: &S,
        run: &RunContext,
        scheme: DocumentIdScheme,
    ) -> Result<Self> {
        let ids = store.sample_ids()?;
        let registry = Self::from_names(ids, run, scheme);
        debug!(samples = registry.len(), "sample registry built");
        Ok(registry)
    }

    /// Register samples by name. Composite keys and repeats are skipped.
    pub fn from_names<I, S>(names: I, run: &RunContext, scheme: DocumentIdScheme) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if scheme == DocumentIdScheme::Legacy {
            warn!("legacy document identifiers do not depend on dataset provenance");
        }
        let mut registry = Self::default();
        let mut composites = 0usize;
        for name in names {
            let name = name.into();
            if name.contains(COMPOSITE_SEPARATOR) {
                composites += 1;
                continue;
            }
            if registry.index.contains_key(&name) {
                continue;
            }
            registry.index.insert(name.clone(), registry.samples.len());
            registry.samples.push(SampleRecord::new(name, run, scheme));
        }
        if composites > 0 {
            debug!(composites, "skipped composite sample keys");
        }
        registry
    }

    pub fn get(&self, name: &str) -> Option<&SampleRecord> {
        self.index.get(name).map(|&idx| &self.samples[idx])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut SampleRecord> {
        self.index.get(name).map(|&idx| &mut self.samples[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SampleRecord> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Total entries across every sample, subjects included.
    pub fn entry_count(&self) -> usize {
        self.samples.iter().map(|sample| sample.entries.len()).sum()
    }

    pub fn into_samples(self) -> Vec<SampleRecord> {
        self.samples
    }
}
