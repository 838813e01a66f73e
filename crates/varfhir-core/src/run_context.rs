//! Run-scoped seed and identifier derivation.
//!
//! The run seed is computed once from the provenance recorded in the
//! datastore. Every identifier of a run is then a digest of seed material
//! built around that seed, so re-running over the same dataset reproduces
//! every Subject, Document and Observation identifier.

use std::fmt::{self, Display, Write as _};

use varfhir_ingest::{Provenance, VariantRow};
use varfhir_model::StableId;
use varfhir_standards::chromosome_label;

use crate::identity::make_id;
use crate::options::DocumentIdScheme;

/// Number of trailing characters of path + annotators kept in the seed.
const SEED_TAIL_CHARS: usize = 32;

/// Literal text the earlier reporter hashed in place of the run seed.
const LEGACY_DOCUMENT_SEED: &str = "self.str_id";

/// The run seed shared by every identifier of one execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    seed: String,
}

impl RunContext {
    /// Use an explicit seed.
    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self { seed: seed.into() }
    }

    pub fn from_provenance(provenance: &Provenance) -> Self {
        Self::from_seed(derive_seed(provenance))
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Start seed material of the form `seed + parts... + seed`.
    pub fn seeded(&self) -> SeedBuilder<'_> {
        SeedBuilder {
            seed: &self.seed,
            material: self.seed.clone(),
        }
    }

    /// Seed material of a row's variant: `seed + chrom + pos + ref + alt`.
    ///
    /// The chromosome enters without its `chr` prefix, so `chr1` at 100 A>T
    /// reads `seedval1100AT`. Every row-level identifier starts here.
    pub fn variant_material(&self, row: &VariantRow) -> SeedBuilder<'_> {
        self.seeded()
            .part(chromosome_label(&row.chrom))
            .part(row.pos)
            .part(&row.ref_base)
            .part(&row.alt_base)
    }

    /// Subject (Patient) identifier for a sample.
    pub fn subject_id(&self, sample: &str) -> StableId {
        make_id(&format!("{} + {sample}", self.seed))
    }

    /// Document (Bundle) identifier for a sample.
    pub fn document_id(&self, sample: &str, scheme: DocumentIdScheme) -> StableId {
        let seed = match scheme {
            DocumentIdScheme::Provenance => self.seed.as_str(),
            DocumentIdScheme::Legacy => LEGACY_DOCUMENT_SEED,
        };
        make_id(&format!("bundle + {sample} + {seed}"))
    }
}

impl Display for RunContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.seed)
    }
}

/// Accumulates identifier seed material between two copies of the run seed.
#[derive(Debug, Clone)]
pub struct SeedBuilder<'a> {
    seed: &'a str,
    material: String,
}

impl SeedBuilder<'_> {
    /// Append the display form of `part`.
    #[must_use]
    pub fn part(mut self, part: impl Display) -> Self {
        // Writing into a String cannot fail.
        let _ = write!(self.material, "{part}");
        self
    }

    /// Close the material with the run seed and hash it.
    pub fn finish(mut self) -> StableId {
        self.material.push_str(self.seed);
        make_id(&self.material)
    }
}

/// Build the run seed from datastore provenance.
///
/// 1. drop `input_paths` up to and including its first space;
/// 2. append `annotators` without its enclosing brackets;
/// 3. drop the first and last character;
/// 4. keep the last 32 characters;
/// 5. append `mapper`.
///
/// Cuts are by character and saturate on short input.
pub fn derive_seed(provenance: &Provenance) -> String {
    let path = provenance
        .input_paths
        .split_once(' ')
        .map_or(provenance.input_paths.as_str(), |(_, rest)| rest);

    let mut seed = String::from(path);
    seed.push_str(&strip_ends(&provenance.annotators));
    let seed = last_chars(&strip_ends(&seed), SEED_TAIL_CHARS);

    seed + &provenance.mapper
}

fn strip_ends(value: &str) -> String {
    let len = value.chars().count();
    value.chars().skip(1).take(len.saturating_sub(2)).collect()
}

fn last_chars(value: &str, n: usize) -> String {
    let len = value.chars().count();
    value.chars().skip(len.saturating_sub(n)).collect()
}
