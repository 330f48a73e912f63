//! Validated pipeline configuration.
//!
//! Configuration sources (files, environment, flags) hand over plain
//! strings in [`RawSettings`]. [`PipelineConfig::from_settings`] checks all
//! of them at once, before any console event is processed, and produces an
//! explicit value that is passed by reference into the policy.

use crate::error::ConfigError;
use crate::filter::{FilterPatterns, FilterSpec};
use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default capture floor: keep everything.
pub const DEFAULT_MIN_CAPTURE: Severity = Severity::Verbose;

/// Default failure threshold: warnings and errors fail the run.
pub const DEFAULT_MAX_ALLOWED: Severity = Severity::Info;

/// Unvalidated settings as delivered by a configuration source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSettings {
    /// Minimum severity a message needs to be considered at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_log_level: Option<String>,

    /// Highest severity tolerated before the run is marked failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_log_level: Option<String>,

    /// Scrub patterns keyed by severity
    pub filters: FilterPatterns,
}

/// Validated configuration for one capture run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Compiled scrub patterns
    pub filters: FilterSpec,
    /// Capture floor
    pub min_capture: Severity,
    /// Failure threshold (exclusive)
    pub max_allowed: Severity,
}

impl PipelineConfig {
    /// Validates raw settings.
    ///
    /// Missing or empty thresholds fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns the first invalid severity name or pattern encountered.
    pub fn from_settings(settings: &RawSettings) -> Result<Self, ConfigError> {
        let min_capture = threshold(
            "min_log_level",
            settings.min_log_level.as_deref(),
            DEFAULT_MIN_CAPTURE,
        )?;
        let max_allowed = threshold(
            "max_log_level",
            settings.max_log_level.as_deref(),
            DEFAULT_MAX_ALLOWED,
        )?;
        let filters = FilterSpec::compile(&settings.filters)?;

        debug!(%min_capture, %max_allowed, "pipeline configuration validated");

        Ok(Self {
            filters,
            min_capture,
            max_allowed,
        })
    }

    /// Sets the capture floor.
    #[must_use]
    pub fn with_min_capture(mut self, level: Severity) -> Self {
        self.min_capture = level;
        self
    }

    /// Sets the failure threshold.
    #[must_use]
    pub fn with_max_allowed(mut self, level: Severity) -> Self {
        self.max_allowed = level;
        self
    }

    /// Replaces the compiled filters.
    #[must_use]
    pub fn with_filters(mut self, filters: FilterSpec) -> Self {
        self.filters = filters;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            filters: FilterSpec::identity(),
            min_capture: DEFAULT_MIN_CAPTURE,
            max_allowed: DEFAULT_MAX_ALLOWED,
        }
    }
}

fn threshold(field: &str, value: Option<&str>, default: Severity) -> Result<Severity, ConfigError> {
    match value.map(str::trim) {
        None | Some("") => Ok(default),
        Some(name) => Severity::parse_setting(field, name),
    }
}
