//! Builders for variant and molecular consequence observations.
//!
//! Component content depends only on the row, so it is built once per row
//! and stamped into one observation per sample with that sample's subject.

use varfhir_ingest::{VariantRow, non_blank};
use varfhir_model::{
    CodeableConcept, Coding, Meta, Observation, ObservationComponent, Range, Reference, StableId,
};
use varfhir_standards::codes::{self, LoincCode};
use varfhir_standards::{
    LookupError, UNKNOWN_CONSEQUENCE, chromosome_code, chromosome_display, consequence_code,
};

fn loinc(code: LoincCode) -> CodeableConcept {
    CodeableConcept::from_coding(Coding::new(codes::LOINC, code.code).with_display(code.display))
}

fn coded(system: &str, code: &str) -> CodeableConcept {
    CodeableConcept::from_coding(Coding::new(system, code).with_display(code))
}

/// `prefix:change`, or the bare change when no reference sequence is known.
fn qualified(prefix: Option<&str>, change: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}:{change}"),
        None => change.to_string(),
    }
}

/// Components of the variant observation: alleles, chromosome, coordinate
/// system and start-end range.
pub fn variant_components(row: &VariantRow) -> Result<Vec<ObservationComponent>, LookupError> {
    let chromosome = Coding::new(codes::LOINC, chromosome_code(&row.chrom)?)
        .with_display(chromosome_display(&row.chrom));
    let counting = Coding::new(codes::LOINC, codes::ONE_BASED_COUNTING.code)
        .with_display(codes::ONE_BASED_COUNTING.display);

    Ok(vec![
        ObservationComponent::string(loinc(codes::REF_ALLELE), row.ref_base.clone()),
        ObservationComponent::string(loinc(codes::ALT_ALLELE), row.alt_base.clone()),
        ObservationComponent::coded(
            loinc(codes::CHROMOSOME),
            CodeableConcept::from_coding(chromosome),
        ),
        ObservationComponent::coded(
            loinc(codes::COORDINATE_SYSTEM),
            CodeableConcept::from_coding(counting),
        ),
        ObservationComponent::range(
            loinc(codes::ALLELE_START_END),
            Range::new(row.pos, row.pos_end),
        ),
    ])
}

/// The variant observation for one sample.
pub fn variant_observation(
    components: Vec<ObservationComponent>,
    subject: Reference,
) -> Observation {
    let mut observation = Observation::new(loinc(codes::GENETIC_VARIANT_ASSESSMENT), subject);
    observation.meta = Some(Meta::profile(codes::VARIANT_PROFILE));
    observation.category = vec![CodeableConcept::from_coding(Coding::new(
        codes::OBSERVATION_CATEGORY,
        codes::CATEGORY_LABORATORY,
    ))];
    observation.component = components;
    observation
}

/// A molecular consequence observation for one sample, derived from the
/// variant observation `variant_id`.
pub fn consequence_observation(
    components: Vec<ObservationComponent>,
    subject: Reference,
    variant_id: StableId,
) -> Observation {
    let code = CodeableConcept::from_coding(
        Coding::new(codes::GENOMICS_TBD_CODES, codes::MOLECULAR_CONSEQUENCE)
            .with_display(codes::MOLECULAR_CONSEQUENCE_DISPLAY),
    );
    let mut observation = Observation::new(code, subject);
    observation.meta = Some(Meta::profile(codes::MOLECULAR_CONSEQUENCE_PROFILE));
    observation.category = vec![CodeableConcept::from_codings(vec![
        Coding::new(codes::OBSERVATION_CATEGORY, codes::CATEGORY_LABORATORY),
        Coding::new(codes::DIAGNOSTIC_SERVICE_SECTION, codes::SECTION_GENETICS),
    ])];
    observation.derived_from = vec![
        Reference::to("Observation", variant_id.urn()).with_identifier(variant_id.to_string()),
    ];
    observation.component = components;
    observation
}

/// How the gene studied is identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneStudied<'a> {
    /// HGNC symbol from the primary annotation.
    Symbol(&'a str),
    /// UniProt accession from a transcript mapping, carried as text.
    Uniprot(&'a str),
}

/// Source fields of one molecular consequence. Blank values are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsequenceFields<'a> {
    pub gene: Option<GeneStudied<'a>>,
    pub transcript: Option<&'a str>,
    pub refseq: Option<&'a str>,
    /// Sequence Ontology term names.
    pub consequences: Vec<&'a str>,
    pub amino_acid_change: Option<&'a str>,
    pub dna_change: Option<&'a str>,
}

impl<'a> ConsequenceFields<'a> {
    /// Fields of the primary consequence recorded on the row itself.
    pub fn primary(row: &'a VariantRow) -> Self {
        Self {
            gene: non_blank(row.hugo.as_deref()).map(GeneStudied::Symbol),
            transcript: non_blank(row.transcript.as_deref()),
            refseq: non_blank(row.refseq.as_deref()),
            consequences: consequence_terms(row.so.as_deref().unwrap_or_default()),
            amino_acid_change: non_blank(row.achange.as_deref()),
            dna_change: non_blank(row.cchange.as_deref()),
        }
    }

    /// Build the observation components, in document order.
    ///
    /// Fails when a consequence term has no Sequence Ontology accession.
    pub fn components(&self) -> Result<Vec<ObservationComponent>, LookupError> {
        let mut components = Vec::new();

        match self.gene {
            Some(GeneStudied::Symbol(symbol)) => components.push(ObservationComponent::coded(
                loinc(codes::GENE_STUDIED),
                CodeableConcept::from_coding(Coding::new(codes::HGNC_GENE_ID, symbol)),
            )),
            Some(GeneStudied::Uniprot(accession)) => {
                components.push(ObservationComponent::coded(
                    loinc(codes::GENE_STUDIED),
                    CodeableConcept::from_text(accession),
                ));
            }
            None => {}
        }

        if let Some(transcript) = self.transcript {
            components.push(ObservationComponent::coded(
                loinc(codes::TRANSCRIPT_REFERENCE),
                coded(codes::ENSEMBL, transcript),
            ));
        }
        if let Some(refseq) = self.refseq {
            components.push(ObservationComponent::coded(
                loinc(codes::TRANSCRIPT_REFERENCE),
                coded(codes::REFSEQ, refseq),
            ));
        }

        if !self.consequences.is_empty() {
            let coding = self
                .consequences
                .iter()
                .map(|term| {
                    consequence_code(term).map(|accession| {
                        Coding::new(codes::SEQUENCE_ONTOLOGY, accession).with_display(*term)
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            components.push(ObservationComponent::coded(
                CodeableConcept::from_coding(Coding::new(
                    codes::GENOMICS_TBD_CODES,
                    codes::FEATURE_CONSEQUENCE,
                )),
                CodeableConcept::from_codings(coding),
            ));
        }

        if let Some(change) = self.amino_acid_change {
            components.push(ObservationComponent::coded(
                loinc(codes::AMINO_ACID_CHANGE),
                coded(codes::ENSEMBL, &qualified(self.transcript, change)),
            ));
            components.push(ObservationComponent::coded(
                loinc(codes::AMINO_ACID_CHANGE),
                coded(codes::HGVS, &qualified(self.refseq, change)),
            ));
        }

        if let Some(change) = self.dna_change {
            components.push(ObservationComponent::coded(
                loinc(codes::DNA_CHANGE),
                coded(codes::ENSEMBL, &qualified(self.transcript, change)),
            ));
            components.push(ObservationComponent::coded(
                loinc(codes::DNA_CHANGE),
                coded(codes::HGVS, &qualified(self.refseq, change)),
            ));
        }

        Ok(components)
    }
}

/// Split a `,`-separated consequence list, dropping blanks and the
/// `unknown` placeholder.
pub fn consequence_terms(field: &str) -> Vec<&str> {
    field
        .split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty() && *term != UNKNOWN_CONSEQUENCE)
        .collect()
}
