//! # pagelog
//!
//! Classification, scrubbing and aggregation of browser console output.
//!
//! A page under test emits console events tagged with an open-ended
//! category (`log`, `warning`, `table`, `assert`, ...). This crate folds
//! those events into a per-severity report and a single pass/fail signal
//! that a CI step can act on.
//!
//! ## Architecture
//!
//! - **Severity**: four ordered levels and the category table
//! - **FilterSpec**: one compiled scrub pattern per level
//! - **CapturePolicy**: floor, scrub, suppression and threshold decisions
//! - **Aggregator**: arrival-ordered grouping and the latched outcome
//! - **Pipeline**: drives a stream of [`RawEvent`]s through all of the above
//!
//! ## Processing order
//!
//! For each event: classify, drop if below the capture floor, scrub,
//! drop if empty, then evaluate the failure threshold. A message that
//! scrubbing empties can never fail the run, which lets a pattern silence
//! known-benign warnings without raising the threshold.
//!
//! ## Errors
//!
//! Only configuration ([`ConfigError`]) and lifecycle misuse
//! ([`PipelineError::AlreadyFinalized`]) are errors. Exceeding the failure
//! threshold is reported through [`RunOutcome`], not as an error.
//!
//! ## Example
//!
//! ```
//! use pagelog::{Pipeline, PipelineConfig, RawSettings, Severity};
//!
//! let mut settings = RawSettings::default();
//! settings.max_log_level = Some("error".to_string());
//! let config = PipelineConfig::from_settings(&settings)?;
//!
//! let mut pipeline = Pipeline::new(&config);
//! pipeline.push(&pagelog::RawEvent::new("warning", "slow frame"))?;
//! let (report, outcome) = pipeline.finish()?;
//!
//! assert_eq!(report.messages(Severity::Warning), ["slow frame"]);
//! assert!(!outcome.is_failed());
//! # Ok::<(), pagelog::PipelineError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregate;
pub mod config;
pub mod error;
pub mod filter;
pub mod pipeline;
pub mod policy;
pub mod severity;
pub mod source;

// Re-export main types for convenience
pub use aggregate::{Aggregator, Report, RunOutcome, RunState};
pub use config::{PipelineConfig, RawSettings, DEFAULT_MAX_ALLOWED, DEFAULT_MIN_CAPTURE};
pub use error::{ConfigError, PipelineError, Result};
pub use filter::{FilterPatterns, FilterSpec, MATCH_NOTHING};
pub use pipeline::Pipeline;
pub use policy::{CapturePolicy, CapturedMessage, PolicyResult};
pub use severity::{classify, compare, Severity};
pub use source::{channel, EventSender, EventStream, RawEvent};
