//! The report pipeline: setup, row mapping and document output.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use varfhir_core::{ReportContext, ReportOptions};
use varfhir_ingest::SqliteStore;
use varfhir_report::{OutputConfig, finalize};

use crate::logging::redact_value;
use crate::types::ReportResult;

/// Everything needed to run one report.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    /// Annotation result database.
    pub database: PathBuf,
    /// Output path prefix; defaults to the database path without extension.
    pub output_prefix: Option<PathBuf>,
    pub options: ReportOptions,
}

impl ReportRequest {
    pub fn new(database: impl Into<PathBuf>, options: ReportOptions) -> Self {
        Self {
            database: database.into(),
            output_prefix: None,
            options,
        }
    }

    #[must_use]
    pub fn with_output_prefix(mut self, prefix: Option<PathBuf>) -> Self {
        self.output_prefix = prefix;
        self
    }

    pub fn resolved_prefix(&self) -> PathBuf {
        self.output_prefix
            .clone()
            .unwrap_or_else(|| default_prefix(&self.database))
    }
}

/// `run.sqlite` -> `run`, next to the database.
pub fn default_prefix(database: &Path) -> PathBuf {
    database.with_extension("")
}

/// Run the whole pipeline against a SQLite result database.
pub fn run_report(request: &ReportRequest) -> Result<ReportResult> {
    let span = info_span!("report", database = %request.database.display());
    let _guard = span.enter();

    let store = SqliteStore::open(&request.database)
        .with_context(|| format!("open annotation database {}", request.database.display()))?;

    let mut context =
        ReportContext::setup(&store, request.options.clone()).context("report setup")?;
    debug!(seed = context.run_context().seed(), "run seed derived");

    let stats = context.map_rows().context("map variant rows")?;
    let variant_count = context.variant_count();

    let output_prefix = request.resolved_prefix();
    let config = OutputConfig::new(&output_prefix, &request.options);
    let documents =
        finalize(context.into_registry(), &config).context("write sample documents")?;

    // Document paths embed the sample name, so only the prefix is logged.
    for document in &documents {
        info!(
            sample = redact_value(&document.sample),
            entries = document.entries,
            "document written"
        );
    }
    info!(
        prefix = %output_prefix.display(),
        scope = config.scope(),
        documents = documents.len(),
        "report complete"
    );

    Ok(ReportResult {
        database: request.database.clone(),
        output_prefix,
        all_transcripts: request.options.all_transcripts,
        variant_count,
        stats,
        documents,
    })
}
