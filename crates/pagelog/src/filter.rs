//! Per-severity text scrubbing.
//!
//! Each severity carries one compiled pattern. Scrubbing removes every
//! match (not just the first) and trims the remainder, so a pattern that
//! covers a whole message reduces it to the empty string. Patterns are
//! compiled up front; scrubbing itself cannot fail.

use crate::error::ConfigError;
use crate::severity::Severity;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Pattern used when a level has no filter configured.
///
/// It only matches the empty string, so removal is a no-op.
pub const MATCH_NOTHING: &str = "^$";

/// Raw pattern sources, one optional entry per severity.
///
/// An empty string counts as "not configured".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterPatterns {
    /// Scrub pattern for verbose messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<String>,
    /// Scrub pattern for info messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    /// Scrub pattern for warnings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// Scrub pattern for errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FilterPatterns {
    /// Returns the configured source for `level`, if any.
    #[must_use]
    pub fn get(&self, level: Severity) -> Option<&str> {
        let slot = match level {
            Severity::Verbose => &self.verbose,
            Severity::Info => &self.info,
            Severity::Warning => &self.warning,
            Severity::Error => &self.error,
        };
        slot.as_deref().filter(|pattern| !pattern.is_empty())
    }

    /// Replaces the source for `level`.
    pub fn set(&mut self, level: Severity, pattern: impl Into<String>) {
        let slot = match level {
            Severity::Verbose => &mut self.verbose,
            Severity::Info => &mut self.info,
            Severity::Warning => &mut self.warning,
            Severity::Error => &mut self.error,
        };
        *slot = Some(pattern.into());
    }
}

/// Compiled scrub patterns, exactly one per severity.
#[derive(Debug, Clone)]
pub struct FilterSpec {
    // Indexed by `Severity::rank()`.
    patterns: [Regex; 4],
}

impl FilterSpec {
    /// Compiles all four patterns, failing on the first invalid one.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPattern` naming the level and source that failed.
    pub fn compile(sources: &FilterPatterns) -> Result<Self, ConfigError> {
        let [verbose, info, warning, error] = Severity::ALL.map(|level| compile_one(level, sources));
        Ok(Self {
            patterns: [verbose?, info?, warning?, error?],
        })
    }

    /// Filters whose every pattern is the identity scrub.
    #[must_use]
    pub fn identity() -> Self {
        let nothing = Regex::new(MATCH_NOTHING).expect("static pattern should always compile");
        Self {
            patterns: [nothing.clone(), nothing.clone(), nothing.clone(), nothing],
        }
    }

    /// The pattern source in effect for `level`.
    #[must_use]
    pub fn pattern(&self, level: Severity) -> &str {
        self.regex(level).as_str()
    }

    /// Removes every match of the level's pattern, then trims whitespace.
    #[must_use]
    pub fn scrub(&self, level: Severity, text: &str) -> String {
        self.regex(level).replace_all(text, "").trim().to_string()
    }

    fn regex(&self, level: Severity) -> &Regex {
        &self.patterns[usize::from(level.rank())]
    }
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self::identity()
    }
}

fn compile_one(level: Severity, sources: &FilterPatterns) -> Result<Regex, ConfigError> {
    let source = sources.get(level).unwrap_or(MATCH_NOTHING);
    Regex::new(source).map_err(|e| ConfigError::InvalidPattern {
        level,
        pattern: source.to_string(),
        reason: e.to_string(),
    })
}
