//! Terminal output for run summaries.
//!
//! Everything goes to stderr so stdout stays free for piping.

use owo_colors::OwoColorize;
use pagelog::{PipelineConfig, Report, RunOutcome, Severity};

/// Applies the global color decision for `owo-colors` output.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && crate::logger::should_use_colors();
    owo_colors::set_override(enabled);
}

/// Print a success message to stderr.
pub fn success(message: &str) {
    eprintln!("{} {}", "✓".green().bold(), message);
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
}

/// Print an error message to stderr.
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Renders one severity group header, e.g. `warning (2)`.
fn level_label(level: Severity, count: usize) -> String {
    let label = format!("{level} ({count})");
    match level {
        Severity::Verbose => label.dimmed().to_string(),
        Severity::Info => label.blue().to_string(),
        Severity::Warning => label.yellow().bold().to_string(),
        Severity::Error => label.red().bold().to_string(),
    }
}

/// Formats the per-severity summary printed after a run.
#[must_use]
pub fn format_summary(report: &Report) -> String {
    if report.is_empty() {
        return "Console messages: none".to_string();
    }

    let mut out = String::from("Console messages:");
    for (level, messages) in report.iter() {
        out.push_str(&format!("\n  {}", level_label(level, messages.len())));
        for message in messages {
            out.push_str(&format!("\n    {message}"));
        }
    }
    out
}

/// Prints the summary and the outcome line.
pub fn print_summary(report: &Report, outcome: RunOutcome, config: &PipelineConfig) {
    eprintln!("{}", format_summary(report));
    if outcome.is_failed() {
        error(&format!("console output above '{}' was captured", config.max_allowed));
    } else {
        success(&format!("nothing above '{}'", config.max_allowed));
    }
}

/// Prints the effective configuration for `pagelog check`.
pub fn print_config(config: &PipelineConfig) {
    success("configuration is valid");
    eprintln!("  capture floor:     {}", config.min_capture);
    eprintln!("  failure threshold: {}", config.max_allowed);
    for level in Severity::ALL {
        eprintln!("  {:<8} filter:   {}", level.as_str(), config.filters.pattern(level));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagelog::{Pipeline, RawEvent};

    #[test]
    fn summary_lists_groups_in_order() {
        owo_colors::set_override(false);
        let config = PipelineConfig::default();
        let mut pipeline = Pipeline::new(&config);
        pipeline
            .drain([
                RawEvent::new("error", "bad thing"),
                RawEvent::new("log", "hello"),
                RawEvent::new("log", "again"),
            ])
            .unwrap();
        let (report, _) = pipeline.finish().unwrap();

        assert_eq!(
            format_summary(&report),
            "Console messages:\n  info (2)\n    hello\n    again\n  error (1)\n    bad thing"
        );
    }

    #[test]
    fn empty_summary() {
        assert_eq!(format_summary(&Report::default()), "Console messages: none");
    }
}
