//! Capture command implementation.

use crate::cli::CaptureArgs;
use crate::error::{CliError, Result};
use crate::{config, ingest, report, ui};
use pagelog::{Pipeline, RunOutcome, Severity, channel};
use tracing::{debug, info};

/// Execute the capture command.
///
/// 1. Load and validate configuration
/// 2. Stream events from the input through the pipeline
/// 3. Write the report and print the summary
///
/// Returns the run outcome; deciding the exit code is left to the caller.
///
/// # Errors
///
/// Returns configuration errors before touching the input, and I/O errors
/// from reading events or writing the report.
pub fn execute(args: CaptureArgs, quiet: bool) -> Result<RunOutcome> {
    let config = config::load(&args.config)?;
    let reader = ingest::open_input(args.input.as_deref())?;

    let (sender, stream) = channel();
    let producer = ingest::spawn_reader(reader, sender);

    let mut pipeline = Pipeline::new(&config);
    for event in stream {
        pipeline.push(&event)?;
    }

    let stats = producer
        .join()
        .map_err(|_| CliError::Custom("event reader thread panicked".to_string()))??;
    let progress = pipeline.aggregator();
    debug!(
        events = stats.events,
        skipped = stats.skipped,
        retained = progress.len(),
        warnings = progress.count(Severity::Warning),
        errors = progress.count(Severity::Error),
        "input exhausted"
    );
    if stats.skipped > 0 && !quiet {
        ui::warning(&format!("skipped {} undecodable input line(s)", stats.skipped));
    }

    let (report, outcome) = pipeline.finish()?;
    report::write_report(&report, &args.output)?;

    if args.report_only && outcome.is_failed() {
        info!("threshold exceeded, not failing because of --report-only");
    }
    if !quiet {
        ui::print_summary(&report, outcome, &config);
    }

    Ok(outcome)
}
