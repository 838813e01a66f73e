//! Alternate transcript mappings for the all-transcripts expansion.
//!
//! The mapping field lists one record per transcript, separated by `;`.
//! Each record is `:`-separated:
//!
//! ```text
//! transcript:uniprot:gene:so_terms:amino_acid_change:dna_change
//! ```
//!
//! `so_terms` is itself a `,`-separated list.

use tracing::debug;
use varfhir_ingest::{VariantRow, non_blank};
use varfhir_model::{ObservationComponent, StableId};
use varfhir_standards::{LookupError, UNKNOWN_CONSEQUENCE};

use crate::observations::{ConsequenceFields, GeneStudied, consequence_terms};
use crate::run_context::RunContext;

const RECORD_SEPARATOR: char = ';';
const FIELD_SEPARATOR: char = ':';
const MIN_FIELDS: usize = 6;

/// Counter value of the primary consequence; mappings count on from here.
const PRIMARY_COUNTER: u32 = 1;

/// One parsed mapping record, fields trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptMapping<'a> {
    pub transcript: &'a str,
    pub uniprot: &'a str,
    pub consequences: &'a str,
    pub amino_acid_change: &'a str,
    pub dna_change: &'a str,
}

impl<'a> TranscriptMapping<'a> {
    /// Parse one record. `None` when it has fewer than six fields.
    pub fn parse(record: &'a str) -> Option<Self> {
        let fields: Vec<&str> = record.split(FIELD_SEPARATOR).map(str::trim).collect();
        if fields.len() < MIN_FIELDS {
            return None;
        }
        Some(Self {
            transcript: fields[0],
            uniprot: fields[1],
            consequences: fields[3],
            amino_acid_change: fields[4],
            dna_change: fields[5],
        })
    }

    /// True when the record lists consequences and every one is `unknown`.
    pub fn is_unknown(&self) -> bool {
        let mut terms = self
            .consequences
            .split(',')
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .peekable();
        terms.peek().is_some() && terms.all(|term| term == UNKNOWN_CONSEQUENCE)
    }

    /// Consequence fields for this mapping. The RefSeq transcript comes from
    /// the row, mapping records do not carry one.
    pub fn fields(&self, refseq: Option<&'a str>) -> ConsequenceFields<'a> {
        ConsequenceFields {
            gene: non_blank(Some(self.uniprot)).map(GeneStudied::Uniprot),
            transcript: non_blank(Some(self.transcript)),
            refseq,
            consequences: consequence_terms(self.consequences),
            amino_acid_change: non_blank(Some(self.amino_acid_change)),
            dna_change: non_blank(Some(self.dna_change)),
        }
    }
}

/// An additional molecular consequence produced by the expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedConsequence {
    pub id: StableId,
    /// Position of the record in the mapping counter sequence (first is 2).
    pub counter: u32,
    pub components: Vec<ObservationComponent>,
}

/// Result of expanding one row's mapping field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    pub consequences: Vec<ExpandedConsequence>,
    /// Records with fewer than six fields.
    pub short_records: usize,
    /// Records whose consequences were all `unknown`.
    pub unknown_records: usize,
    /// Records without an Ensembl transcript.
    pub untranscribed_records: usize,
}

impl Expansion {
    pub fn skipped(&self) -> usize {
        self.short_records + self.unknown_records + self.untranscribed_records
    }
}

/// Expand every mapping record of `row` into a consequence.
///
/// The counter advances for every record, skipped or not, so identifiers of
/// kept records do not shift when a neighbour is dropped.
pub fn expand(row: &VariantRow, run: &RunContext) -> Result<Expansion, LookupError> {
    let mut expansion = Expansion::default();
    let Some(field) = non_blank(row.all_mappings.as_deref()) else {
        return Ok(expansion);
    };
    let refseq = non_blank(row.refseq.as_deref());

    let mut counter = PRIMARY_COUNTER;
    for record in field.split(RECORD_SEPARATOR) {
        counter += 1;
        let Some(mapping) = TranscriptMapping::parse(record) else {
            debug!(counter, "skipping short transcript mapping record");
            expansion.short_records += 1;
            continue;
        };
        if mapping.is_unknown() {
            expansion.unknown_records += 1;
            continue;
        }
        if mapping.transcript.is_empty() {
            debug!(counter, "skipping transcript mapping record without transcript");
            expansion.untranscribed_records += 1;
            continue;
        }

        let id = run
            .variant_material(row)
            .part(mapping.transcript)
            .part(counter)
            .finish();
        let components = mapping.fields(refseq).components()?;
        expansion.consequences.push(ExpandedConsequence {
            id,
            counter,
            components,
        });
    }
    Ok(expansion)
}
