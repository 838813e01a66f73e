//! Row mapping: one annotation row into per-sample observations.

use tracing::{trace, warn};
use varfhir_ingest::VariantRow;
use varfhir_model::StableId;
use varfhir_standards::LookupError;

use crate::error::{MapError, Result};
use crate::mapping::{Expansion, expand};
use crate::observations::{
    ConsequenceFields, consequence_observation, variant_components, variant_observation,
};
use crate::options::ReportOptions;
use crate::registry::SampleRegistry;
use crate::run_context::RunContext;

/// Seed text distinguishing the primary consequence from the variant.
const PRIMARY_CONSEQUENCE_TAG: &str = "molecular consequence 1";

/// What mapping one row produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowOutcome {
    /// Registered samples the row was attached to.
    pub samples: usize,
    /// Sample names on the row with no registry entry.
    pub unknown_samples: usize,
    /// Entries appended across all samples.
    pub entries: usize,
    /// Mapping records dropped by the expansion, per row.
    pub skipped_mappings: usize,
}

/// Running totals over every mapped row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MapStats {
    pub rows: u64,
    /// Rows that named no registered sample.
    pub unattached_rows: u64,
    pub sample_hits: u64,
    pub unknown_samples: u64,
    pub entries: u64,
    pub skipped_mappings: u64,
}

impl MapStats {
    fn record(&mut self, outcome: &RowOutcome) {
        self.rows += 1;
        if outcome.samples == 0 {
            self.unattached_rows += 1;
        }
        self.sample_hits += outcome.samples as u64;
        self.unknown_samples += outcome.unknown_samples as u64;
        self.entries += outcome.entries as u64;
        self.skipped_mappings += outcome.skipped_mappings as u64;
    }
}

/// Maps rows into the sample registry.
#[derive(Debug, Clone)]
pub struct RowMapper {
    run: RunContext,
    all_transcripts: bool,
    stats: MapStats,
}

impl RowMapper {
    pub fn new(run: RunContext, options: &ReportOptions) -> Self {
        Self {
            run,
            all_transcripts: options.all_transcripts,
            stats: MapStats::default(),
        }
    }

    pub fn run_context(&self) -> &RunContext {
        &self.run
    }

    pub fn stats(&self) -> MapStats {
        self.stats
    }

    /// Map one row, appending its observations to every sample it names.
    ///
    /// Per sample the order is: variant, primary consequence, then one
    /// consequence per kept transcript mapping. A code table miss aborts
    /// with [`MapError::Lookup`].
    pub fn map_row(
        &mut self,
        registry: &mut SampleRegistry,
        row: &VariantRow,
    ) -> Result<RowOutcome> {
        let mut outcome = RowOutcome::default();

        let mut targets: Vec<&str> = Vec::new();
        for name in row.sample_names() {
            if !registry.contains(name) {
                outcome.unknown_samples += 1;
                continue;
            }
            if !targets.contains(&name) {
                targets.push(name);
            }
        }
        if outcome.unknown_samples > 0 {
            warn!(
                chrom = %row.chrom,
                pos = row.pos,
                unknown = outcome.unknown_samples,
                "row names unregistered samples; skipping them"
            );
        }
        if targets.is_empty() {
            self.stats.record(&outcome);
            return Ok(outcome);
        }

        let lookup = |source: LookupError| MapError::Lookup {
            variant: format!("{}:{} {}>{}", row.chrom, row.pos, row.ref_base, row.alt_base),
            source,
        };

        let variant_id = self.variant_id(row);
        let primary_id = self.primary_consequence_id(row);
        let variant = variant_components(row).map_err(lookup)?;
        let primary = ConsequenceFields::primary(row).components().map_err(lookup)?;
        let expansion = if self.all_transcripts {
            expand(row, &self.run).map_err(lookup)?
        } else {
            Expansion::default()
        };
        outcome.skipped_mappings = expansion.skipped();

        for name in targets {
            let Some(sample) = registry.get_mut(name) else {
                continue;
            };
            let subject = sample.subject_reference();

            sample.push(
                variant_id,
                variant_observation(variant.clone(), subject.clone()),
            );
            sample.push(
                primary_id,
                consequence_observation(primary.clone(), subject.clone(), variant_id),
            );
            for consequence in &expansion.consequences {
                sample.push(
                    consequence.id,
                    consequence_observation(
                        consequence.components.clone(),
                        subject.clone(),
                        variant_id,
                    ),
                );
            }

            outcome.samples += 1;
            outcome.entries += 2 + expansion.consequences.len();
        }

        trace!(
            chrom = %row.chrom,
            pos = row.pos,
            samples = outcome.samples,
            entries = outcome.entries,
            "row mapped"
        );
        self.stats.record(&outcome);
        Ok(outcome)
    }

    /// `seed + chrom + pos + ref + alt + seed`, chromosome without `chr`.
    pub fn variant_id(&self, row: &VariantRow) -> StableId {
        self.run.variant_material(row).finish()
    }

    /// `seed + chrom + pos + ref + alt + "molecular consequence 1" + seed`
    pub fn primary_consequence_id(&self, row: &VariantRow) -> StableId {
        self.run
            .variant_material(row)
            .part(PRIMARY_CONSEQUENCE_TAG)
            .finish()
    }
}
