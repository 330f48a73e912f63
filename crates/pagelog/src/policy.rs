//! Capture policy: what to keep and what fails the run.
//!
//! For each incoming event the policy classifies, applies the capture
//! floor, scrubs, drops empty results, and only then evaluates the failure
//! threshold. A message that scrubbing empties is fully suppressed: it is
//! not retained and cannot fail the run, whatever its severity.

use crate::config::PipelineConfig;
use crate::filter::FilterSpec;
use crate::severity::{classify, compare, Severity};
use std::cmp::Ordering;
use tracing::trace;

/// The scrubbed text of one retained console event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedMessage {
    level: Severity,
    text: String,
}

impl CapturedMessage {
    /// Severity the message was classified as.
    #[must_use]
    pub fn level(&self) -> Severity {
        self.level
    }

    /// Scrubbed, trimmed, non-empty text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consumes the message, returning its text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Outcome of evaluating one event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PolicyResult {
    /// The message to keep, if any
    pub retained: Option<CapturedMessage>,
    /// Whether this event pushes the run over the failure threshold
    pub fail_triggered: bool,
}

impl PolicyResult {
    fn dropped() -> Self {
        Self::default()
    }
}

/// Decides retention and failure for each `(category, text)` pair.
#[derive(Debug, Clone, Copy)]
pub struct CapturePolicy<'a> {
    filters: &'a FilterSpec,
    min_capture: Severity,
    max_allowed: Severity,
}

impl<'a> CapturePolicy<'a> {
    /// Creates a policy bound to a validated configuration.
    #[must_use]
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self {
            filters: &config.filters,
            min_capture: config.min_capture,
            max_allowed: config.max_allowed,
        }
    }

    /// Returns true if `level` is at or above the capture floor.
    #[must_use]
    pub fn should_capture(&self, level: Severity) -> bool {
        compare(level, self.min_capture) != Ordering::Less
    }

    /// Returns true if `level` is strictly above the failure threshold.
    #[must_use]
    pub fn exceeds_threshold(&self, level: Severity) -> bool {
        compare(level, self.max_allowed) == Ordering::Greater
    }

    /// Evaluates one raw console event.
    #[must_use]
    pub fn process(&self, category: &str, text: &str) -> PolicyResult {
        let level = classify(category);

        if !self.should_capture(level) {
            trace!(%level, category, "below capture floor");
            return PolicyResult::dropped();
        }

        let scrubbed = self.filters.scrub(level, text);
        if scrubbed.is_empty() {
            trace!(%level, category, "empty after scrub");
            return PolicyResult::dropped();
        }

        PolicyResult {
            fail_triggered: self.exceeds_threshold(level),
            retained: Some(CapturedMessage {
                level,
                text: scrubbed,
            }),
        }
    }
}
