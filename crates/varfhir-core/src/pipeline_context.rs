//! Pipeline context for one report run.
//!
//! Owns everything that lives between setup and finalize:
//!
//! - **Run seed**: derived once from datastore provenance
//! - **Sample registry**: subjects and per-sample entry lists
//! - **Row mapper**: identifier derivation and observation building
//! - **Row count**: queried once at setup for progress reporting
//!
//! The stages run strictly in order. [`ReportContext::into_registry`]
//! consumes the context, so no row can be mapped once finalization starts.

use tracing::{debug, info, info_span};
use varfhir_ingest::{AnnotationStore, VariantRow};

use crate::error::{MapError, Result};
use crate::mapper::{MapStats, RowMapper, RowOutcome};
use crate::options::{ReportLevel, ReportOptions};
use crate::registry::SampleRegistry;
use crate::run_context::RunContext;

/// Rows between progress events.
const PROGRESS_INTERVAL: u64 = 10_000;

#[derive(Debug)]
pub struct ReportContext<'s, S> {
    store: &'s S,
    options: ReportOptions,
    mapper: RowMapper,
    registry: SampleRegistry,
    variant_count: u64,
}

impl<'s, S: AnnotationStore> ReportContext<'s, S> {
    /// Derive the run seed, build the sample registry and count rows.
    pub fn setup(store: &'s S, options: ReportOptions) -> Result<Self> {
        let span = info_span!("setup", all_transcripts = options.all_transcripts);
        let _guard = span.enter();

        let provenance = store.provenance()?;
        let run = RunContext::from_provenance(&provenance);
        let registry = SampleRegistry::discover(store, &run, options.document_id_scheme())?;
        let variant_count = store.variant_count()?;
        info!(
            samples = registry.len(),
            variants = variant_count,
            "report setup complete"
        );

        Ok(Self {
            store,
            mapper: RowMapper::new(run, &options),
            options,
            registry,
            variant_count,
        })
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    pub fn run_context(&self) -> &RunContext {
        self.mapper.run_context()
    }

    pub fn registry(&self) -> &SampleRegistry {
        &self.registry
    }

    /// Row count of the variant table, as of setup.
    pub fn variant_count(&self) -> u64 {
        self.variant_count
    }

    pub fn stats(&self) -> MapStats {
        self.mapper.stats()
    }

    /// Map every row of the datastore, in datastore order.
    ///
    /// Does nothing when the variant level is not selected; documents are
    /// still written with their subjects only.
    pub fn map_rows(&mut self) -> Result<MapStats> {
        let span = info_span!("map", variants = self.variant_count);
        let _guard = span.enter();

        if !self.options.writes_level(ReportLevel::Variant) {
            info!("variant level not selected; no rows mapped");
            return Ok(self.mapper.stats());
        }

        let total = self.variant_count;
        let store = self.store;
        let mapper = &mut self.mapper;
        let registry = &mut self.registry;
        let visited = store.visit_variants(|row| -> std::result::Result<(), MapError> {
            mapper.map_row(registry, &row)?;
            let done = mapper.stats().rows;
            if done % PROGRESS_INTERVAL == 0 {
                debug!(done, total, "mapping progress");
            }
            Ok(())
        })?;

        let stats = self.mapper.stats();
        info!(
            rows = visited,
            entries = stats.entries,
            unattached_rows = stats.unattached_rows,
            skipped_mappings = stats.skipped_mappings,
            "rows mapped"
        );
        Ok(stats)
    }

    /// Map a single row outside of the datastore walk.
    pub fn map_row(&mut self, row: &VariantRow) -> Result<RowOutcome> {
        self.mapper.map_row(&mut self.registry, row)
    }

    /// Finish mapping and hand the accumulated samples to the finalizer.
    pub fn into_registry(self) -> SampleRegistry {
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use varfhir_ingest::{MemoryStore, Provenance};

    fn store() -> MemoryStore {
        MemoryStore::new(Provenance {
            input_paths: "/data/in.vcf".to_string(),
            annotators: "[\"clinvar\"]".to_string(),
            mapper: "hg38".to_string(),
        })
        .with_samples(["S1", "S2", "S1,S2"])
        .with_row(VariantRow {
            samples: Some("S1,S2".to_string()),
            ..VariantRow::snv("chr2", 5, "C", "G")
        })
    }

    #[test]
    fn setup_derives_seed_and_samples() {
        let store = store();
        let context = ReportContext::setup(&store, ReportOptions::default()).unwrap();
        assert_eq!(context.run_context().seed(), "data/in.vcf\"clinvarhg38");
        assert_eq!(context.registry().len(), 2);
        assert_eq!(context.variant_count(), 1);
    }

    #[test]
    fn map_rows_fills_each_sample() {
        let store = store();
        let mut context = ReportContext::setup(&store, ReportOptions::default()).unwrap();
        let stats = context.map_rows().unwrap();
        assert_eq!(stats.rows, 1);
        assert_eq!(stats.sample_hits, 2);
        assert_eq!(stats.entries, 4);

        let registry = context.into_registry();
        assert_eq!(registry.get("S1").unwrap().entries().len(), 3);
        assert_eq!(registry.get("S2").unwrap().entries().len(), 3);
    }

    #[test]
    fn unselected_variant_level_maps_nothing() {
        let store = store();
        let options = ReportOptions::default().with_levels([ReportLevel::Gene]);
        let mut context = ReportContext::setup(&store, options).unwrap();
        assert_eq!(context.map_rows().unwrap().rows, 0);
        assert_eq!(context.into_registry().entry_count(), 2);
    }
}
