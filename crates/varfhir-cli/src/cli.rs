//! CLI argument definitions for the variant FHIR reporter.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use varfhir_core::ReportLevel;

#[derive(Parser)]
#[command(
    name = "varfhir",
    version,
    about = "Turn annotated variants into per-sample FHIR genomics documents",
    long_about = "Read an annotation result database and write one FHIR bundle per sample.\n\n\
                  Each variant row becomes a variant observation and a molecular consequence\n\
                  observation with deterministic identifiers, so re-runs reproduce their output."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow sample names in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write per-sample documents for an annotation database.
    Report(ReportArgs),

    /// Print the consequence and chromosome code tables.
    Codes(CodesArgs),
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Annotation result database (SQLite).
    #[arg(value_name = "DB")]
    pub database: PathBuf,

    /// Output path prefix (default: <DB> without its extension).
    #[arg(long = "output-prefix", short = 'o', value_name = "PREFIX")]
    pub output_prefix: Option<PathBuf>,

    /// TOML options file; flags below override its values.
    #[arg(long = "config", short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Emit one molecular consequence per alternate transcript mapping.
    #[arg(long = "all-transcripts")]
    pub all_transcripts: bool,

    /// Report levels to write (repeatable).
    #[arg(long = "level", value_enum, value_name = "LEVEL")]
    pub levels: Vec<LevelArg>,

    /// Seed document identifiers the way earlier reporter versions did.
    ///
    /// Those identifiers depend on the sample name only, so two datasets with
    /// the same sample names share document identifiers.
    #[arg(long = "legacy-document-ids")]
    pub legacy_document_ids: bool,
}

#[derive(Parser)]
pub struct CodesArgs {
    /// Which table to print.
    #[arg(value_enum, default_value = "all")]
    pub table: CodeTableArg,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CodeTableArg {
    Consequence,
    Chromosome,
    All,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LevelArg {
    Variant,
    Gene,
    Sample,
    Mapping,
}

impl From<LevelArg> for ReportLevel {
    fn from(value: LevelArg) -> Self {
        match value {
            LevelArg::Variant => ReportLevel::Variant,
            LevelArg::Gene => ReportLevel::Gene,
            LevelArg::Sample => ReportLevel::Sample,
            LevelArg::Mapping => ReportLevel::Mapping,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
