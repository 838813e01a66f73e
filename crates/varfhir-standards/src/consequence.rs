//! Sequence Ontology lookups for molecular consequence terms.
//!
//! Annotation rows carry SO term names (`missense_variant`); the report
//! codes them by SO accession (`SO:0001583`).

use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::error::{LookupError, Result};

/// Placeholder the annotator writes when no consequence could be assigned.
pub const UNKNOWN_CONSEQUENCE: &str = "unknown";

static CONSEQUENCE_CODES: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();

    // Coding sequence consequences
    map.insert("missense_variant", "SO:0001583");
    map.insert("synonymous_variant", "SO:0001819");
    map.insert("stop_gained", "SO:0001587");
    map.insert("stop_lost", "SO:0001578");
    map.insert("stop_retained_variant", "SO:0001567");
    map.insert("start_lost", "SO:0002012");
    map.insert("start_retained_variant", "SO:0002019");
    map.insert("frameshift_elongation", "SO:0001909");
    map.insert("frameshift_truncation", "SO:0001910");
    map.insert("inframe_insertion", "SO:0001821");
    map.insert("inframe_deletion", "SO:0001822");
    map.insert("complex_substitution", "SO:1000005");
    map.insert("exon_loss_variant", "SO:0001572");
    map.insert("transcript_ablation", "SO:0001893");

    // Non-coding and flanking consequences
    map.insert("intron_variant", "SO:0001627");
    map.insert("splice_site_variant", "SO:0001629");
    map.insert("5_prime_UTR_variant", "SO:0001623");
    map.insert("3_prime_UTR_variant", "SO:0001624");
    map.insert("2kb_upstream_variant", "SO:0001636");
    map.insert("2kb_downstream_variant", "SO:0002083");
    map.insert("NMD_transcript_variant", "SO:0001621");
    map.insert("retained_intron", "SO:0002113");

    // Transcript biotypes reported in place of a consequence
    map.insert("lnc_RNA", "SO:0002127");
    map.insert("misc_RNA", "SO:0000673");
    map.insert("miRNA", "SO:0000276");
    map.insert("snRNA", "SO:0000274");
    map.insert("snoRNA", "SO:0000275");
    map.insert("scaRNA", "SO:0002095");
    map.insert("scRNA", "SO:0000013");
    map.insert("sRNA", "SO:0002352");
    map.insert("rRNA", "SO:0000252");
    map.insert("Mt_tRNA", "SO:0002129");
    map.insert("Mt_rRNA", "SO:0002128");
    map.insert("vault_RNA", "SO:0000404");
    map.insert("ribozyme", "SO:0000374");
    map.insert("processed_transcript", "SO:0001503");
    map.insert("unconfirmed_transcript", "SO:0002139");
    map.insert("NSD_transcript", "SO:0002130");

    // Pseudogenes
    map.insert("pseudogene", "SO:0000336");
    map.insert("processed_pseudogene", "SO:0000043");
    map.insert("unprocessed_pseudogene", "SO:0001760");
    map.insert("unitary_pseudogene", "SO:0001759");
    map.insert("polymorphic_pseudogene", "SO:0001841");
    map.insert("pseudogene_rRNA", "SO:0002111");
    map.insert("transcribed_processed_pseudogene", "SO:0002109");
    map.insert("transcribed_unprocessed_pseudogene", "SO:0002107");
    map.insert("transcribed_unitary_pseudogene", "SO:0002108");
    map.insert("translated_processed_pseudogene", "SO:0002105");
    map.insert("translated_unprocessed_pseudogene", "SO:0002106");

    // Immunoglobulin and T-cell receptor segments
    map.insert("IG_C_gene", "SO:0002123");
    map.insert("IG_D_gene", "SO:0002124");
    map.insert("IG_J_gene", "SO:0002125");
    map.insert("IG_V_gene", "SO:0002126");
    map.insert("IG_C_pseudogene", "SO:0002100");
    map.insert("IG_J_pseudogene", "SO:0002101");
    map.insert("IG_V_pseudogene", "SO:0002102");
    map.insert("TR_C_gene", "SO:0002134");
    map.insert("TR_D_gene", "SO:0002135");
    map.insert("TR_J_gene", "SO:0002136");
    map.insert("TR_V_gene", "SO:0002137");
    map.insert("TR_J_pseudogene", "SO:0002104");
    map.insert("TR_V_pseudogene", "SO:0002103");

    map
});

/// Look up the SO accession for a consequence term (case-sensitive).
///
/// # Examples
///
/// ```
/// use varfhir_standards::consequence_code;
///
/// assert_eq!(consequence_code("missense_variant"), Ok("SO:0001583"));
/// assert!(consequence_code("not_a_term").is_err());
/// ```
pub fn consequence_code(term: &str) -> Result<&'static str> {
    CONSEQUENCE_CODES
        .get(term)
        .copied()
        .ok_or_else(|| LookupError::UnknownConsequence(term.to_string()))
}

/// All known `(term, accession)` pairs, ordered by term.
pub fn consequence_codes() -> impl Iterator<Item = (&'static str, &'static str)> {
    CONSEQUENCE_CODES.iter().map(|(term, code)| (*term, *code))
}
