//! Error handling for the pagelog CLI.
//!
//! `CliError` wraps the core's configuration and lifecycle errors together
//! with the I/O and settings-layer failures that only the CLI can hit.
//! `main` turns any of them into a `miette` report.
//!
//! Exceeding the failure threshold is not an error here either; it is an
//! exit code decided from the run outcome.
//!
//! # Example
//!
//! ```rust,no_run
//! use pagelog_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_events(path: &Path) -> Result<String> {
//!     // A missing file becomes `FileNotFound` with the path attached
//!     std::fs::read_to_string(path).with_path(path)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Rejected severity, pattern or encoding
    #[error("Configuration error: {0}")]
    Config(#[from] pagelog::ConfigError),

    /// Capture run misuse
    #[error("Capture error: {0}")]
    Pipeline(#[from] pagelog::PipelineError),

    /// Settings sources could not be merged or extracted
    #[error("Invalid settings: {0}")]
    Settings(#[from] figment::Error),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from reading events or writing the report
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for attaching file paths to I/O failures.
pub trait ResultExt<T> {
    /// Maps a not-found I/O error to `FileNotFound(path)`.
    ///
    /// # Errors
    ///
    /// Passes through every other error unchanged.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }
}

/// Converts a CLI error into a `miette` report with a hint where one helps.
///
/// # Arguments
///
/// * `err` - The error that ended the command
///
/// # Examples
///
/// ```rust
/// use pagelog_cli::error::{cli_error_to_miette, CliError};
/// use std::path::PathBuf;
///
/// let report = cli_error_to_miette(CliError::FileNotFound(PathBuf::from("events.jsonl")));
/// assert!(report.to_string().contains("events.jsonl"));
/// ```
#[must_use]
pub fn cli_error_to_miette(err: CliError) -> miette::Report {
    match err {
        CliError::Config(pagelog::ConfigError::InvalidPattern { level, pattern, reason }) => {
            miette::miette!(
                help = "Patterns use Rust regex syntax; set PATTERN_ENCODING=base64 if the value is encoded",
                "Invalid {level} filter pattern '{pattern}'\n{reason}"
            )
        }
        CliError::Config(pagelog::ConfigError::InvalidSeverity { field, value }) => {
            miette::miette!(
                help = "Use one of: verbose, info, warning, error",
                "Invalid value for '{field}': {value}"
            )
        }
        CliError::FileNotFound(path) => {
            miette::miette!(help = "Check the --input / --config path", "File not found: {}", path.display())
        }
        // No extra hint; the message already names the failing source
        other => miette::miette!("{other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagelog::{ConfigError, Severity};

    #[test]
    fn config_error_converts() {
        let err: CliError = ConfigError::InvalidSeverity {
            field: "min_log_level".to_string(),
            value: "loud".to_string(),
        }
        .into();
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn with_path_maps_not_found() {
        let result: std::io::Result<()> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let err = result.with_path("events.jsonl").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(ref p) if p.ends_with("events.jsonl")));
    }

    #[test]
    fn with_path_keeps_other_errors() {
        let result: std::io::Result<()> =
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope"));
        assert!(matches!(result.with_path("x").unwrap_err(), CliError::Io(_)));
    }

    #[test]
    fn miette_report_keeps_pattern_details() {
        let err = CliError::Config(ConfigError::InvalidPattern {
            level: Severity::Error,
            pattern: "(".to_string(),
            reason: "unclosed group".to_string(),
        });
        let report = cli_error_to_miette(err);
        let rendered = report.to_string();
        assert!(rendered.contains("error filter pattern '('"));
        assert!(rendered.contains("unclosed group"));
    }
}
