//! CLI argument definitions for the strategy determination tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dyh",
    version,
    about = "Determine the tailored strategy for a profiler questionnaire",
    long_about = "Determine the tailored strategy for a profiler questionnaire.\n\n\
                  Critical questions answered \"no\" are matched against a versioned\n\
                  rule catalog; the highest-priority eligible strategy is selected."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Rule catalog TOML (default: $DYH_CATALOG, then the built-in catalog).
    #[arg(long = "catalog", value_name = "PATH", global = true)]
    pub catalog: Option<PathBuf>,

    /// Refuse to start unless the catalog file has this SHA-256 digest.
    #[arg(long = "catalog-sha256", value_name = "HEX", global = true)]
    pub catalog_sha256: Option<String>,

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

    /// Include respondent answer values in debug logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Determine the strategy for a form-state JSON object.
    Determine(DetermineArgs),

    /// Show the loaded catalog: header, counts, critical questions, overlaps.
    Catalog(ReportArgs),

    /// List strategies in priority order.
    Strategies(ReportArgs),
}

#[derive(Parser)]
pub struct DetermineArgs {
    /// JSON file with raw form fields, or `-` to read stdin.
    #[arg(value_name = "ANSWERS_JSON")]
    pub input: PathBuf,

    /// UI field-schema version the answers were captured with.
    #[arg(long = "schema-version", value_name = "N")]
    pub schema_version: Option<u32>,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct ReportArgs {
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
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
