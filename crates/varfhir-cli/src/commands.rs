use anyhow::{Context, Result};
use comfy_table::Table;

use varfhir_cli::pipeline::{ReportRequest, run_report as run_pipeline};
use varfhir_cli::types::ReportResult;
use varfhir_core::{ReportLevel, ReportOptions};
use varfhir_standards::{chromosome_codes, consequence_codes};

use crate::cli::{CodeTableArg, CodesArgs, ReportArgs};
use crate::summary::{apply_table_style, header_cell};

pub fn run_report(args: &ReportArgs) -> Result<ReportResult> {
    let options = resolve_options(args)?;
    let request = ReportRequest::new(&args.database, options)
        .with_output_prefix(args.output_prefix.clone());
    run_pipeline(&request)
}

/// Options file first, then flags. Flags can only switch features on.
fn resolve_options(args: &ReportArgs) -> Result<ReportOptions> {
    let mut options = match &args.config {
        Some(path) => ReportOptions::load(path)
            .with_context(|| format!("load options from {}", path.display()))?,
        None => ReportOptions::default(),
    };
    if args.all_transcripts {
        options.all_transcripts = true;
    }
    if !args.levels.is_empty() {
        options.levels = args.levels.iter().map(|&level| ReportLevel::from(level)).collect();
    }
    if args.legacy_document_ids {
        options.legacy_document_ids = true;
    }
    Ok(options)
}

pub fn run_codes(args: &CodesArgs) -> Result<()> {
    if matches!(args.table, CodeTableArg::Consequence | CodeTableArg::All) {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Consequence"), header_cell("SO accession")]);
        apply_table_style(&mut table);
        for (term, code) in consequence_codes() {
            table.add_row(vec![term, code]);
        }
        println!("{table}");
    }
    if matches!(args.table, CodeTableArg::Chromosome | CodeTableArg::All) {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Chromosome"), header_cell("LOINC answer")]);
        apply_table_style(&mut table);
        for (name, code) in chromosome_codes() {
            table.add_row(vec![name, code]);
        }
        println!("{table}");
    }
    Ok(())
}
