//! One capture run: policy plus aggregator behind a single driver.

use crate::aggregate::{Aggregator, Report, RunOutcome};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::policy::CapturePolicy;
use crate::source::RawEvent;
use tracing::debug;

/// Drives events through classification, scrubbing and aggregation.
///
/// # Example
///
/// ```
/// use pagelog::{Pipeline, PipelineConfig, RawEvent, Severity};
///
/// let config = PipelineConfig::default();
/// let mut pipeline = Pipeline::new(&config);
/// pipeline
///     .drain([RawEvent::new("log", "hello"), RawEvent::new("error", "bad thing")])
///     .unwrap();
///
/// let (report, outcome) = pipeline.finish().unwrap();
/// assert_eq!(report.messages(Severity::Info), ["hello"]);
/// assert!(outcome.is_failed());
/// ```
#[derive(Debug)]
pub struct Pipeline<'a> {
    policy: CapturePolicy<'a>,
    aggregator: Aggregator,
}

impl<'a> Pipeline<'a> {
    /// Starts an idle run.
    #[must_use]
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self {
            policy: CapturePolicy::new(config),
            aggregator: Aggregator::new(),
        }
    }

    /// Processes one event.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyFinalized` if the run has finished.
    pub fn push(&mut self, event: &RawEvent) -> Result<()> {
        let result = self.policy.process(&event.category, &event.text);
        debug!(
            category = %event.category,
            retained = result.retained.is_some(),
            fail = result.fail_triggered,
            "console event"
        );
        self.aggregator.fold(result)
    }

    /// Processes every event from `events`, in order.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyFinalized` if the run has finished.
    pub fn drain<I>(&mut self, events: I) -> Result<()>
    where
        I: IntoIterator<Item = RawEvent>,
    {
        for event in events {
            self.push(&event)?;
        }
        Ok(())
    }

    /// Read-only view of the accumulated state.
    #[must_use]
    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Finalizes the run, fixing the report and outcome.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyFinalized` if called twice.
    pub fn finish(&mut self) -> Result<(Report, RunOutcome)> {
        let report = self.aggregator.finalize()?;
        Ok((report, self.aggregator.outcome()))
    }
}
