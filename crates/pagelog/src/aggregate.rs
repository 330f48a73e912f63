//! Run-scoped accumulation of retained messages.
//!
//! The `Aggregator` groups retained messages by severity in arrival order
//! and ORs together failure signals. It is owned by a single run and is
//! never shared, so it holds plain collections rather than locks.
//!
//! Lifecycle: `Idle -> Streaming -> Finalized`. Once finalized, both
//! `fold` and `finalize` return `AlreadyFinalized`.

use crate::error::{PipelineError, Result};
use crate::policy::PolicyResult;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

/// Whether the run observed a message above the failure threshold.
///
/// Starts unfailed and latches once set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunOutcome(bool);

impl RunOutcome {
    /// True if at least one retained message exceeded the threshold.
    #[must_use]
    pub fn is_failed(self) -> bool {
        self.0
    }

    fn record(&mut self, triggered: bool) {
        self.0 |= triggered;
    }
}

/// Final per-severity grouping of retained message texts.
///
/// Keys iterate (and serialize) in severity order. A key is present only
/// when its list is non-empty, including after deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Severity, Vec<String>>", into = "BTreeMap<Severity, Vec<String>>")]
pub struct Report {
    groups: BTreeMap<Severity, Vec<String>>,
}

impl Report {
    /// Messages recorded for `level`, in arrival order.
    #[must_use]
    pub fn messages(&self, level: Severity) -> &[String] {
        self.groups.get(&level).map_or(&[], Vec::as_slice)
    }

    /// Severities present in the report, in rank order.
    pub fn levels(&self) -> impl Iterator<Item = Severity> + '_ {
        self.groups.keys().copied()
    }

    /// Iterates `(severity, messages)` pairs in rank order.
    pub fn iter(&self) -> impl Iterator<Item = (Severity, &[String])> {
        self.groups.iter().map(|(level, messages)| (*level, messages.as_slice()))
    }

    /// Total number of messages across all severities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Returns true if nothing was retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Serializes as pretty JSON with two-space indentation.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl From<BTreeMap<Severity, Vec<String>>> for Report {
    fn from(mut groups: BTreeMap<Severity, Vec<String>>) -> Self {
        groups.retain(|_, messages| !messages.is_empty());
        Self { groups }
    }
}

impl From<Report> for BTreeMap<Severity, Vec<String>> {
    fn from(report: Report) -> Self {
        report.groups
    }
}

/// Lifecycle position of an aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Nothing folded yet
    Idle,
    /// At least one result folded
    Streaming,
    /// Report and outcome are fixed
    Finalized,
}

/// Accumulates policy results for one run.
#[derive(Debug)]
pub struct Aggregator {
    groups: BTreeMap<Severity, Vec<String>>,
    outcome: RunOutcome,
    state: RunState,
}

impl Aggregator {
    /// Creates an aggregator with one empty group per severity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            groups: Severity::ALL.into_iter().map(|level| (level, Vec::new())).collect(),
            outcome: RunOutcome::default(),
            state: RunState::Idle,
        }
    }

    /// Folds one policy result into the run.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyFinalized` after `finalize` has been called.
    pub fn fold(&mut self, result: PolicyResult) -> Result<()> {
        if self.state == RunState::Finalized {
            return Err(PipelineError::AlreadyFinalized);
        }
        self.state = RunState::Streaming;

        if let Some(message) = result.retained {
            let level = message.level();
            self.groups.entry(level).or_default().push(message.into_text());
        }
        self.outcome.record(result.fail_triggered);
        Ok(())
    }

    /// Prunes empty groups and fixes the report.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyFinalized` if called more than once.
    pub fn finalize(&mut self) -> Result<Report> {
        if self.state == RunState::Finalized {
            return Err(PipelineError::AlreadyFinalized);
        }
        self.state = RunState::Finalized;

        let report = Report::from(std::mem::take(&mut self.groups));

        info!(
            retained = report.len(),
            failed = self.outcome.is_failed(),
            "capture run finalized"
        );
        Ok(report)
    }

    /// The failure signal accumulated so far.
    #[must_use]
    pub fn outcome(&self) -> RunOutcome {
        self.outcome
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Number of retained messages for `level`.
    #[must_use]
    pub fn count(&self, level: Severity) -> usize {
        self.groups.get(&level).map_or(0, Vec::len)
    }

    /// Total number of retained messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Returns true if no message has been retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::policy::CapturePolicy;
    use proptest::prelude::*;

    fn fold_all(events: &[(&str, &str)], config: &PipelineConfig) -> (Report, RunOutcome) {
        let policy = CapturePolicy::new(config);
        let mut aggregator = Aggregator::new();
        for (category, text) in events {
            aggregator.fold(policy.process(category, text)).unwrap();
        }
        let report = aggregator.finalize().unwrap();
        (report, aggregator.outcome())
    }

    #[test]
    fn groups_in_arrival_order() {
        let (report, _) = fold_all(
            &[("log", "one"), ("error", "boom"), ("info", "two"), ("log", "three")],
            &PipelineConfig::default(),
        );
        assert_eq!(report.messages(Severity::Info), ["one", "two", "three"]);
        assert_eq!(report.messages(Severity::Error), ["boom"]);
        assert_eq!(report.len(), 4);
    }

    #[test]
    fn empty_groups_are_pruned() {
        let (report, outcome) = fold_all(&[("debug", "tick")], &PipelineConfig::default());
        assert_eq!(report.levels().collect::<Vec<_>>(), [Severity::Verbose]);
        assert!(report.messages(Severity::Error).is_empty());
        assert!(!outcome.is_failed());
    }

    #[test]
    fn outcome_latches() {
        let config = PipelineConfig::default();
        let policy = CapturePolicy::new(&config);
        let mut aggregator = Aggregator::new();

        aggregator.fold(policy.process("warning", "careful")).unwrap();
        assert!(aggregator.outcome().is_failed());
        aggregator.fold(policy.process("log", "fine")).unwrap();
        assert!(aggregator.outcome().is_failed());
    }

    #[test]
    fn lifecycle_transitions() {
        let mut aggregator = Aggregator::new();
        assert_eq!(aggregator.state(), RunState::Idle);

        aggregator.fold(PolicyResult::default()).unwrap();
        assert_eq!(aggregator.state(), RunState::Streaming);

        let report = aggregator.finalize().unwrap();
        assert!(report.is_empty());
        assert_eq!(aggregator.state(), RunState::Finalized);
    }

    #[test]
    fn finalize_twice_is_an_error() {
        let mut aggregator = Aggregator::new();
        aggregator.finalize().unwrap();
        assert!(matches!(aggregator.finalize(), Err(PipelineError::AlreadyFinalized)));
        assert!(matches!(
            aggregator.fold(PolicyResult::default()),
            Err(PipelineError::AlreadyFinalized)
        ));
    }

    #[test]
    fn report_serializes_in_severity_order() {
        let (report, _) = fold_all(
            &[("error", "bad thing"), ("log", "hello")],
            &PipelineConfig::default(),
        );
        let json = report.to_json_pretty().unwrap();
        assert_eq!(
            json,
            "{\n  \"info\": [\n    \"hello\"\n  ],\n  \"error\": [\n    \"bad thing\"\n  ]\n}"
        );
    }

    #[test]
    fn report_reads_back_from_json() {
        let report: Report = serde_json::from_str(r#"{"warning": ["a", "b"]}"#).unwrap();
        assert_eq!(report.messages(Severity::Warning), ["a", "b"]);
        assert_eq!(report.levels().count(), 1);
    }

    #[test]
    fn deserialized_report_drops_empty_groups() {
        let report: Report = serde_json::from_str(r#"{"warning": [], "error": []}"#).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.to_json_pretty().unwrap(), "{}");
    }

    #[test]
    fn counters_track_retained_messages() {
        let config = PipelineConfig::default();
        let policy = CapturePolicy::new(&config);
        let mut aggregator = Aggregator::new();
        assert!(aggregator.is_empty());

        aggregator.fold(policy.process("warning", "slow")).unwrap();
        aggregator.fold(policy.process("warning", "slower")).unwrap();
        aggregator.fold(policy.process("error", "boom")).unwrap();
        aggregator.fold(policy.process("log", "")).unwrap();

        assert!(!aggregator.is_empty());
        assert_eq!(aggregator.len(), 3);
        assert_eq!(aggregator.count(Severity::Warning), 2);
        assert_eq!(aggregator.count(Severity::Error), 1);
        assert_eq!(aggregator.count(Severity::Info), 0);
    }

    proptest! {
        #[test]
        fn prop_finalize_never_leaves_empty_groups(
            events in prop::collection::vec(
                (prop::sample::select(vec!["log", "debug", "warning", "error", "other"]), "[a-z ]{0,6}"),
                0..30,
            )
        ) {
            let config = PipelineConfig::default();
            let policy = CapturePolicy::new(&config);
            let mut aggregator = Aggregator::new();
            for (category, text) in &events {
                aggregator.fold(policy.process(category, text)).unwrap();
            }
            let report = aggregator.finalize().unwrap();
            for (_, messages) in report.iter() {
                prop_assert!(!messages.is_empty());
            }
        }
    }
}
