//! LOINC answer codes for human chromosomes (answer list LL2938-0).

use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::error::{LookupError, Result};

static CHROMOSOME_CODES: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    BTreeMap::from([
        ("chr1", "LA21254-0"),
        ("chr2", "LA21255-7"),
        ("chr3", "LA21256-5"),
        ("chr4", "LA21257-3"),
        ("chr5", "LA21258-1"),
        ("chr6", "LA21259-9"),
        ("chr7", "LA21260-7"),
        ("chr8", "LA21261-5"),
        ("chr9", "LA21262-3"),
        ("chr10", "LA21263-1"),
        ("chr11", "LA21264-9"),
        ("chr12", "LA21265-6"),
        ("chr13", "LA21266-4"),
        ("chr14", "LA21267-2"),
        ("chr15", "LA21268-0"),
        ("chr16", "LA21269-8"),
        ("chr17", "LA21270-6"),
        ("chr18", "LA21271-4"),
        ("chr19", "LA21272-2"),
        ("chr20", "LA21273-0"),
        ("chr21", "LA21274-8"),
        ("chr22", "LA21275-5"),
        ("chrX", "LA21276-3"),
        ("chrY", "LA21277-1"),
    ])
});

/// Look up the LOINC answer code for a `chr`-prefixed chromosome name.
pub fn chromosome_code(name: &str) -> Result<&'static str> {
    CHROMOSOME_CODES
        .get(name)
        .copied()
        .ok_or_else(|| LookupError::UnknownChromosome(name.to_string()))
}

/// Chromosome name without its `chr` prefix, e.g. `7` for `chr7`.
pub fn chromosome_label(name: &str) -> &str {
    name.strip_prefix("chr").unwrap_or(name)
}

/// Display text for a chromosome answer, e.g. `Chromosome 7`.
pub fn chromosome_display(name: &str) -> String {
    format!("Chromosome {}", chromosome_label(name))
}

/// All known `(name, code)` pairs, ordered by name.
pub fn chromosome_codes() -> impl Iterator<Item = (&'static str, &'static str)> {
    CHROMOSOME_CODES.iter().map(|(name, code)| (*name, *code))
}
