//! Severity levels and console category classification.
//!
//! Browsers tag each console call with an open-ended category string
//! (`log`, `debug`, `table`, `assert`, ...). This module folds those tags
//! onto four ordered severity levels. Ordering is the only basis for
//! threshold comparisons, so it is derived from declaration order.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// How serious a console message is.
///
/// Variants are declared from least to most serious; `Ord` follows that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Debug chatter, traces, grouping and profiling calls
    Verbose,
    /// `console.log()`, `console.info()` and table/dir dumps
    Info,
    /// `console.warn()`
    Warning,
    /// `console.error()` and failed assertions
    Error,
}

impl Severity {
    /// All levels in rank order.
    pub const ALL: [Severity; 4] = [
        Severity::Verbose,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
    ];

    /// Fixed numeric rank: `verbose=0 < info=1 < warning=2 < error=3`.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Severity::Verbose => 0,
            Severity::Info => 1,
            Severity::Warning => 2,
            Severity::Error => 3,
        }
    }

    /// Lowercase name used in configuration and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Verbose => "verbose",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// Parses a configured threshold, attributing failures to `field`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSeverity` if `value` names no level.
    pub fn parse_setting(field: &str, value: &str) -> Result<Self, ConfigError> {
        value.parse().map_err(|_| ConfigError::InvalidSeverity {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Severity::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::InvalidSeverity {
                field: "severity".to_string(),
                value: s.to_string(),
            })
    }
}

/// Maps a raw console category onto a severity.
///
/// Total: unknown categories are treated as `Info`. Matching is exact
/// because browsers emit these tags verbatim.
#[must_use]
#[allow(clippy::match_same_arms)]
pub fn classify(category: &str) -> Severity {
    match category {
        "debug" | "trace" | "clear" | "startGroup" | "startGroupCollapsed" | "endGroup"
        | "profile" | "profileEnd" | "count" | "timeEnd" => Severity::Verbose,
        "log" | "info" | "dir" | "dirxml" | "table" => Severity::Info,
        "warning" => Severity::Warning,
        "error" | "assert" => Severity::Error,
        _ => Severity::Info,
    }
}

/// Compares two levels by rank.
#[must_use]
pub fn compare(a: Severity, b: Severity) -> Ordering {
    a.rank().cmp(&b.rank())
}
