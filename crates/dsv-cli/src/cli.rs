//! CLI argument definitions for the `dsv` tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dsv",
    version,
    about = "Stream, inspect, and convert delimiter-separated tables",
    long_about = "Stream delimiter-separated plain-text tables record by record.\n\n\
                  Supports configurable delimiter and enclosure characters with\n\
                  RFC 4180 quoting, an optional header line, and lazy conversion\n\
                  between format configurations."
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

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Stream a table's records to stdout.
    Cat(CatArgs),

    /// Re-encode a table from one format configuration into another.
    Convert(ConvertArgs),
}

#[derive(Parser)]
pub struct CatArgs {
    /// Path to the input table.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Field delimiter (single character).
    #[arg(long, value_name = "CHAR", default_value = ",")]
    pub delimiter: String,

    /// Enclosure/quote character (single character).
    #[arg(long, value_name = "CHAR", default_value = "\"")]
    pub enclosure: String,

    /// Treat the first line as a header naming each column.
    #[arg(long)]
    pub header: bool,

    /// Output encoding for records.
    #[arg(long = "output", value_enum, default_value = "plain")]
    pub output: OutputArg,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Path to the input table.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Path for the converted output table.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Input field delimiter (single character).
    #[arg(long, value_name = "CHAR", default_value = ",")]
    pub delimiter: String,

    /// Input enclosure character (single character).
    #[arg(long, value_name = "CHAR", default_value = "\"")]
    pub enclosure: String,

    /// Treat the first input line as a header (carried to the output).
    #[arg(long)]
    pub header: bool,

    /// Output delimiter (defaults to the input delimiter).
    #[arg(long = "out-delimiter", value_name = "CHAR")]
    pub out_delimiter: Option<String>,

    /// Output enclosure (defaults to the input enclosure).
    #[arg(long = "out-enclosure", value_name = "CHAR")]
    pub out_enclosure: Option<String>,
}

/// Record output encodings for `cat`.
#[derive(Clone, Copy, ValueEnum)]
pub enum OutputArg {
    /// Re-serialized table lines in the input configuration.
    Plain,
    /// One JSON value per record (array, or object with a header).
    Json,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
