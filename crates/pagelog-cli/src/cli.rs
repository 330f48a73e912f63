//! Command-line interface definition.
//!
//! - `pagelog capture` - classify a recorded console stream and write the report
//! - `pagelog check` - validate configuration and print the effective settings

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default report location, next to the working directory.
pub const DEFAULT_OUTPUT: &str = "console_output.json";

/// Pagelog - browser console output as a CI signal
#[derive(Parser, Debug)]
#[command(
    name = "pagelog",
    version,
    about = "Classify browser console output and fail CI on noisy pages",
    long_about = "Pagelog reads console events captured while a page loads, groups them by\n\
                  severity, scrubs known-benign noise with per-level patterns, writes a JSON\n\
                  report and exits non-zero when anything above the allowed severity remains."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Process a console event stream into a report
    ///
    /// Events are newline-delimited JSON objects such as
    /// {"type": "warning", "text": "..."}, read from --input or stdin.
    Capture(CaptureArgs),

    /// Validate configuration without processing events
    Check(CheckArgs),
}

/// Configuration flags shared by every subcommand.
///
/// Flags override environment variables, which override the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// TOML config file (defaults to ./pagelog.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Minimum severity to capture [env: MIN_LOG_LEVEL]
    #[arg(long, value_name = "LEVEL")]
    pub min_level: Option<String>,

    /// Highest severity allowed before failing [env: MAX_LOG_LEVEL]
    #[arg(long, value_name = "LEVEL")]
    pub max_level: Option<String>,

    /// How filter patterns are encoded [env: PATTERN_ENCODING]
    #[arg(long, value_enum, value_name = "ENCODING")]
    pub pattern_encoding: Option<PatternEncoding>,
}

/// Arguments for `pagelog capture`
#[derive(Args, Debug, Clone)]
pub struct CaptureArgs {
    /// Configuration sources
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Event file (newline-delimited JSON); reads stdin when omitted
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Where to write the JSON report
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Always exit 0; only log whether the threshold was exceeded
    #[arg(long)]
    pub report_only: bool,
}

/// Arguments for `pagelog check`
#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Configuration sources
    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Transport encoding applied to filter patterns before they reach pagelog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternEncoding {
    /// Patterns are used as written
    #[default]
    #[value(name = "plain")]
    Plain,

    /// Patterns are standard base64 of the UTF-8 pattern text
    #[value(name = "base64")]
    Base64,
}
