//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use regcheck_cli::inputs::RegistryArg;

#[derive(Parser)]
#[command(
    name = "regcheck",
    version,
    about = "Reconcile a customer roster against healthcare establishment registries",
    long_about = "Match customer rows against one or more official registries of healthcare\n\
                  establishments and classify each match as ALTA, REVISAR or SIN.\n\n\
                  Registry files may be header-less CSV exports or JSON arrays of rows;\n\
                  the header row is located automatically."
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

    /// Log output format (pretty for humans, json for machines).
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

    /// Allow customer and registry values (names, addresses) in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Match customers against registry sources and write reports.
    Match(MatchArgs),

    /// Show which row of a registry file is taken as the header.
    Headers(HeadersArgs),

    /// Print the effective configuration as JSON.
    Config(ConfigArgs),
}

#[derive(Parser)]
pub struct MatchArgs {
    /// Customer file: CSV with a header row, or a JSON array of objects.
    #[arg(long = "customers", value_name = "FILE")]
    pub customers: PathBuf,

    /// Registry source as PATH or LABEL=PATH (repeatable).
    #[arg(long = "registry", value_name = "[LABEL=]FILE", required = true)]
    pub registry: Vec<RegistryArg>,

    /// Output directory for reports (default: <customers dir>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// JSON configuration file; missing keys keep their defaults.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Score at or above which a match is ALTA.
    #[arg(long = "alta", value_name = "SCORE")]
    pub alta: Option<f64>,

    /// Score at or above which a match is REVISAR.
    #[arg(long = "baja", value_name = "SCORE")]
    pub baja: Option<f64>,

    /// Report files to write.
    #[arg(long = "format", value_enum, default_value = "both")]
    pub format: OutputFormatArg,

    /// Match and summarize without writing reports.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Log the score breakdown of every best match (debug level).
    #[arg(long = "explain")]
    pub explain: bool,
}

#[derive(Parser)]
pub struct HeadersArgs {
    /// Registry file (CSV or JSON).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// JSON configuration file (header keywords and scan limit).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ConfigArgs {
    /// JSON configuration file to merge over the defaults.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Json,
    Csv,
    Both,
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
