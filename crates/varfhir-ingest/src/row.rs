//! Variant rows and run provenance as read from the datastore.

/// Provenance strings recorded by the annotation run.
///
/// These feed the run seed, so identical provenance yields identical
/// identifiers across re-runs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Provenance {
    /// `input_paths` info value.
    pub input_paths: String,
    /// `annotators` info value (a bracketed list rendering).
    pub annotators: String,
    /// `mapper` info value.
    pub mapper: String,
}

/// One row of the variant table.
///
/// Text fields are `None` when the column is NULL. Empty or whitespace-only
/// values are kept as-is here; [`non_blank`] decides absence at mapping time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VariantRow {
    pub chrom: String,
    /// 1-based start position.
    pub pos: i64,
    pub pos_end: i64,
    pub ref_base: String,
    pub alt_base: String,
    /// Comma-separated names of samples carrying the variant.
    pub samples: Option<String>,
    /// HGNC gene symbol.
    pub hugo: Option<String>,
    /// Ensembl transcript of the primary consequence.
    pub transcript: Option<String>,
    /// RefSeq transcript of the primary consequence.
    pub refseq: Option<String>,
    /// Sequence Ontology term of the primary consequence.
    pub so: Option<String>,
    pub achange: Option<String>,
    pub cchange: Option<String>,
    /// `;`-separated alternate transcript mappings, fields split by `:`.
    pub all_mappings: Option<String>,
}

impl VariantRow {
    /// A single-base variant with no annotations beyond its coordinates.
    pub fn snv(
        chrom: impl Into<String>,
        pos: i64,
        ref_base: impl Into<String>,
        alt_base: impl Into<String>,
    ) -> Self {
        Self {
            chrom: chrom.into(),
            pos,
            pos_end: pos,
            ref_base: ref_base.into(),
            alt_base: alt_base.into(),
            ..Self::default()
        }
    }

    /// Sample names listed in the membership field, trimmed, blanks dropped.
    pub fn sample_names(&self) -> Vec<&str> {
        let Some(samples) = self.samples.as_deref() else {
            return Vec::new();
        };
        samples
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect()
    }
}

/// Returns the value unless it is missing, empty, or whitespace only.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
