//! CLI argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "nbi",
    version,
    about = "Bridge inventory submission validator",
    long_about = "Validate bridge inventory submissions.\n\n\
                  Removes duplicates, evaluates the inventory rules and safety cross-checks,\n\
                  decides which entities are excluded from staging and writes sanitized records."
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

    /// Allow submitted field values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Reference data directory (default: $NBI_REFERENCE_DIR or the bundled reference/).
    #[arg(long = "reference-dir", value_name = "DIR", global = true)]
    pub reference_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a submission file and write the results.
    Validate(ValidateArgs),

    /// List rules or workflows.
    Rules(RulesArgs),

    /// Verify the reference data directory and summarize it.
    Reference,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Submission JSON file.
    #[arg(value_name = "SUBMISSION")]
    pub submission: PathBuf,

    /// Output directory for result files (default: <SUBMISSION dir>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Submitting state code, overriding the one declared in the file.
    #[arg(long = "submitter-state", value_name = "CODE")]
    pub submitter_state: Option<String>,

    /// Reference date for future-date checks, as YYYYMMDD (default: today).
    #[arg(long = "as-of", value_name = "DATE", value_parser = parse_as_of)]
    pub as_of: Option<NaiveDate>,

    /// Rule bundle CSV replacing the default workflows it names.
    #[arg(long = "bundles", value_name = "CSV")]
    pub bundles: Option<PathBuf>,

    /// Validate and report without writing result files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Hide the progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// List workflows instead of rules.
    #[arg(long = "workflows")]
    pub workflows: bool,

    /// Only show one dataset (name or slug, e.g. "Elements" or "span-sets").
    #[arg(long = "dataset", value_name = "NAME")]
    pub dataset: Option<String>,

    /// Rule bundle CSV merged over the default workflows.
    #[arg(long = "bundles", value_name = "CSV")]
    pub bundles: Option<PathBuf>,
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

fn parse_as_of(value: &str) -> Result<NaiveDate, String> {
    nbi_model::parse_date(value).ok_or_else(|| format!("expected a YYYYMMDD date, got {value:?}"))
}
