//! Configuration options for report generation.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::OptionsError;

/// Report levels the reporter knows about.
///
/// Only [`ReportLevel::Variant`] produces content; the others exist so that
/// level selections written for the wider reporting framework still parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportLevel {
    Variant,
    Gene,
    Sample,
    Mapping,
}

impl ReportLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Variant => "variant",
            Self::Gene => "gene",
            Self::Sample => "sample",
            Self::Mapping => "mapping",
        }
    }
}

/// How document (bundle) identifiers are seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentIdScheme {
    /// `bundle + <sample> + <run seed>`: varies with dataset provenance.
    #[default]
    Provenance,
    /// `bundle + <sample> + self.str_id`: reproduces identifiers written by
    /// the earlier reporter, which depend on the sample name only.
    Legacy,
}

/// Options controlling report generation.
///
/// Loaded from TOML; every field has a default so an empty file is valid.
///
/// ```toml
/// all_transcripts = true
/// levels = ["variant"]
/// legacy_document_ids = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportOptions {
    /// Emit one molecular consequence per alternate transcript mapping.
    pub all_transcripts: bool,

    /// Levels to write. An empty set selects every level.
    pub levels: BTreeSet<ReportLevel>,

    /// Seed document identifiers the way the earlier reporter did.
    pub legacy_document_ids: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            all_transcripts: false,
            levels: BTreeSet::from([ReportLevel::Variant]),
            legacy_document_ids: false,
        }
    }
}

impl ReportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_all_transcripts(mut self, enable: bool) -> Self {
        self.all_transcripts = enable;
        self
    }

    #[must_use]
    pub fn with_levels(mut self, levels: impl IntoIterator<Item = ReportLevel>) -> Self {
        self.levels = levels.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_legacy_document_ids(mut self, enable: bool) -> Self {
        self.legacy_document_ids = enable;
        self
    }

    /// Whether `level` is selected for output.
    pub fn writes_level(&self, level: ReportLevel) -> bool {
        self.levels.is_empty() || self.levels.contains(&level)
    }

    pub fn document_id_scheme(&self) -> DocumentIdScheme {
        if self.legacy_document_ids {
            DocumentIdScheme::Legacy
        } else {
            DocumentIdScheme::Provenance
        }
    }

    /// Parse options from TOML text. `path` is only used for error context.
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, OptionsError> {
        toml::from_str(text).map_err(|source| OptionsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and parse an options file.
    pub fn load(path: &Path) -> Result<Self, OptionsError> {
        let text = fs::read_to_string(path).map_err(|source| OptionsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_select_variant_level_only() {
        let options = ReportOptions::default();
        assert!(!options.all_transcripts);
        assert!(options.writes_level(ReportLevel::Variant));
        assert!(!options.writes_level(ReportLevel::Gene));
        assert_eq!(options.document_id_scheme(), DocumentIdScheme::Provenance);
    }

    #[test]
    fn empty_level_set_selects_everything() {
        let options = ReportOptions::default().with_levels([]);
        assert!(options.writes_level(ReportLevel::Variant));
        assert!(options.writes_level(ReportLevel::Mapping));
    }

    #[test]
    fn parses_toml() {
        let options = ReportOptions::from_toml_str(
            "all_transcripts = true\nlevels = [\"variant\", \"gene\"]\nlegacy_document_ids = true\n",
            Path::new("report.toml"),
        )
        .unwrap();
        assert!(options.all_transcripts);
        assert!(options.writes_level(ReportLevel::Gene));
        assert_eq!(options.document_id_scheme(), DocumentIdScheme::Legacy);
    }

    #[test]
    fn empty_toml_is_default() {
        let options = ReportOptions::from_toml_str("", Path::new("report.toml")).unwrap();
        assert_eq!(options, ReportOptions::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ReportOptions::from_toml_str("all_transcript = true", Path::new("x.toml"))
            .unwrap_err();
        assert!(matches!(err, OptionsError::Parse { .. }));
    }

    #[test]
    fn unknown_level_is_rejected() {
        let result = ReportOptions::from_toml_str("levels = [\"page\"]", Path::new("x.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.toml");
        fs::write(&path, "all_transcripts = true\n").unwrap();
        assert!(ReportOptions::load(&path).unwrap().all_transcripts);

        let missing = ReportOptions::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, OptionsError::Read { .. }));
    }
}
