use std::path::PathBuf;

use varfhir_core::MapStats;
use varfhir_report::WrittenDocument;

/// Outcome of one `report` run.
#[derive(Debug)]
pub struct ReportResult {
    pub database: PathBuf,
    pub output_prefix: PathBuf,
    pub all_transcripts: bool,
    /// Variant table size at setup.
    pub variant_count: u64,
    pub stats: MapStats,
    pub documents: Vec<WrittenDocument>,
}

impl ReportResult {
    pub fn written_paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.documents.iter().map(|document| &document.path)
    }

    pub fn total_entries(&self) -> usize {
        self.documents.iter().map(|document| document.entries).sum()
    }
}
