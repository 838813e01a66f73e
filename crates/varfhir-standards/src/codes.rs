//! Fixed code systems, codes and profiles used by the genomics report.

/// LOINC.
pub const LOINC: &str = "http://loinc.org";

/// FHIR observation category code system.
pub const OBSERVATION_CATEGORY: &str =
    "http://terminology.hl7.org/CodeSystem/observation-category";

/// HL7 v2 diagnostic service section (table 0074).
pub const DIAGNOSTIC_SERVICE_SECTION: &str = "http://terminology.hl7.org/CodeSystem/v2-0074";

/// Genomics reporting IG "to be determined" codes.
pub const GENOMICS_TBD_CODES: &str =
    "http://hl7.org/fhir/uv/genomics-reporting/CodeSystem/tbd-codes-cs";

pub const SEQUENCE_ONTOLOGY: &str = "http://sequenceontology.org";
pub const HGNC_GENE_ID: &str = "https://www.genenames.org/geneId";
pub const ENSEMBL: &str = "http://www.ensembl.org";
pub const REFSEQ: &str = "http://www.ncbi.nlm.nih.gov/refseq";
pub const HGVS: &str = "http://varnomen.hgvs.org";

pub const VARIANT_PROFILE: &str =
    "http://hl7.org/fhir/uv/genomics-reporting/StructureDefinition/variant";
pub const MOLECULAR_CONSEQUENCE_PROFILE: &str =
    "http://hl7.org/fhir/uv/genomics-reporting/StructureDefinition/molecular-consequence";

pub const CATEGORY_LABORATORY: &str = "laboratory";
pub const SECTION_GENETICS: &str = "GE";
pub const MOLECULAR_CONSEQUENCE: &str = "molecular-consequence";
pub const MOLECULAR_CONSEQUENCE_DISPLAY: &str = "Molecular Consequence";
pub const FEATURE_CONSEQUENCE: &str = "feature-consequence";

/// A LOINC observation or component code with its display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoincCode {
    pub code: &'static str,
    pub display: &'static str,
}

pub const GENETIC_VARIANT_ASSESSMENT: LoincCode = LoincCode {
    code: "69548-6",
    display: "Genetic variant assessment",
};
pub const REF_ALLELE: LoincCode = LoincCode {
    code: "69547-8",
    display: "Ref nucleotide",
};
pub const ALT_ALLELE: LoincCode = LoincCode {
    code: "69551-0",
    display: "Alt allele",
};
pub const CHROMOSOME: LoincCode = LoincCode {
    code: "48000-4",
    display: "Chromosome",
};
pub const COORDINATE_SYSTEM: LoincCode = LoincCode {
    code: "92822-6",
    display: "Genomic coordinate system",
};
pub const ALLELE_START_END: LoincCode = LoincCode {
    code: "81254-5",
    display: "Genomic allele start-end",
};
pub const GENE_STUDIED: LoincCode = LoincCode {
    code: "48018-6",
    display: "Gene studied [ID]",
};
pub const TRANSCRIPT_REFERENCE: LoincCode = LoincCode {
    code: "51958-7",
    display: "Transcript reference sequence [ID]",
};
pub const AMINO_ACID_CHANGE: LoincCode = LoincCode {
    code: "48005-3",
    display: "Amino acid change (pHGVS)",
};
pub const DNA_CHANGE: LoincCode = LoincCode {
    code: "48004-6",
    display: "DNA change (c.HGVS)",
};

/// Answer for [`COORDINATE_SYSTEM`]: positions are 1-based.
pub const ONE_BASED_COUNTING: LoincCode = LoincCode {
    code: "LA30102-0",
    display: "1-based character counting",
};
