//! The annotation datastore seam.

use crate::error::{IngestError, Result};
use crate::row::{Provenance, VariantRow};

/// Read access to an annotation result set.
///
/// Implementations hand out provenance and samples once, then stream variant
/// rows to a visitor in datastore order.
pub trait AnnotationStore {
    /// Provenance strings recorded by the annotation run.
    fn provenance(&self) -> Result<Provenance>;

    /// Distinct sample identifiers, composite keys included.
    fn sample_ids(&self) -> Result<Vec<String>>;

    /// Number of rows in the variant table.
    fn variant_count(&self) -> Result<u64>;

    /// Feeds every variant row to `visit`, stopping at the first error.
    ///
    /// Returns the number of rows visited.
    fn visit_variants<F, E>(&self, visit: F) -> std::result::Result<u64, E>
    where
        F: FnMut(VariantRow) -> std::result::Result<(), E>,
        E: From<IngestError>;
}

/// A fully materialized store, mainly for tests and small fixtures.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub provenance: Provenance,
    pub samples: Vec<String>,
    pub rows: Vec<VariantRow>,
}

impl MemoryStore {
    pub fn new(provenance: Provenance) -> Self {
        Self {
            provenance,
            samples: Vec::new(),
            rows: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_samples<I, S>(mut self, samples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.samples.extend(samples.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_row(mut self, row: VariantRow) -> Self {
        self.rows.push(row);
        self
    }
}

impl AnnotationStore for MemoryStore {
    fn provenance(&self) -> Result<Provenance> {
        Ok(self.provenance.clone())
    }

    fn sample_ids(&self) -> Result<Vec<String>> {
        let mut seen = Vec::with_capacity(self.samples.len());
        for sample in &self.samples {
            if !seen.contains(sample) {
                seen.push(sample.clone());
            }
        }
        Ok(seen)
    }

    fn variant_count(&self) -> Result<u64> {
        Ok(self.rows.len() as u64)
    }

    fn visit_variants<F, E>(&self, mut visit: F) -> std::result::Result<u64, E>
    where
        F: FnMut(VariantRow) -> std::result::Result<(), E>,
        E: From<IngestError>,
    {
        let mut visited = 0u64;
        for row in &self.rows {
            visit(row.clone())?;
            visited += 1;
        }
        Ok(visited)
    }
}
