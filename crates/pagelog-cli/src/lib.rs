//! Pagelog CLI - browser console output as a CI signal.
//!
//! Wraps the [`pagelog`] pipeline with everything a CI step needs: layered
//! configuration (file, environment, flags), newline-delimited JSON input,
//! the JSON report artifact and a colored summary.
//!
//! - [`cli`] - argument definitions
//! - [`config`] - settings layering and pattern decoding
//! - [`ingest`] - event input on a producer thread
//! - [`report`] - the report sink
//! - [`error`] - error types and `miette` conversion
//! - [`logger`] - `tracing` setup
//! - [`ui`] - terminal output
//! - `commands` - subcommand implementations

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod ingest;
pub mod logger;
pub mod report;
pub mod ui;

pub use error::{CliError, Result, ResultExt};
