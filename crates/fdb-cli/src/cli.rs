//! CLI argument definitions for the catalog generator.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

/// Default static-asset directory the web front end fetches from.
pub const DEFAULT_DATA_DIR: &str = "public/foomatic-db";

#[derive(Parser)]
#[command(
    name = "fdb-catalog",
    version,
    about = "Foomatic catalog generator - Convert printer database XML to static JSON",
    long_about = "Convert a foomatic-db XML source tree into the static JSON artifacts\n\
                  served to the catalog browser: per-entity JSON mirrors, the combined\n\
                  printers collection, a searchable drivers index, and per-printer\n\
                  shard files with a lightweight summary index."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert the XML source tree into per-entity JSON files.
    Ingest(IngestArgs),

    /// Join printer and driver records into the combined catalog.
    Combine(DataDirArgs),

    /// Project driver records into the searchable drivers index.
    Drivers(DataDirArgs),

    /// Shard the combined catalog into per-printer files plus a summary index.
    Split(DataDirArgs),

    /// Run the full pipeline: ingest, combine, drivers, split.
    Generate(IngestArgs),
}

#[derive(Args)]
pub struct IngestArgs {
    /// Path to the foomatic-db `db/source` tree (contains printer/ and driver/).
    #[arg(value_name = "SOURCE_DIR")]
    pub source: PathBuf,

    #[command(flatten)]
    pub data: DataDirArgs,
}

#[derive(Args)]
pub struct DataDirArgs {
    /// Directory the JSON artifacts are written to and read from.
    #[arg(long = "data-dir", value_name = "DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,
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
