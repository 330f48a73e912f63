//! Error types for the capture pipeline.
//!
//! Only two things can go wrong inside the core: the configuration is
//! malformed (detected once, before any event is processed), or the caller
//! misuses the run lifecycle by touching an aggregator after it has been
//! finalized. Individual console events never produce errors.

use crate::severity::Severity;
use thiserror::Error;

/// Rejected configuration values.
///
/// Every variant names the offending value so the operator can fix it
/// without re-running with extra logging.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A severity threshold is not one of `verbose`, `info`, `warning`, `error`.
    #[error("invalid severity '{value}' for {field}: expected one of verbose, info, warning, error")]
    InvalidSeverity {
        /// Which setting carried the value (e.g. `min_log_level`)
        field: String,
        /// The rejected text
        value: String,
    },

    /// A filter pattern failed to compile.
    #[error("invalid {level} filter pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// Severity the pattern was configured for
        level: Severity,
        /// The pattern source as received
        pattern: String,
        /// Compiler diagnostic
        reason: String,
    },

    /// A transport-encoded value could not be decoded.
    #[error("cannot decode {field}: {reason}")]
    InvalidEncoding {
        /// Which setting carried the value
        field: String,
        /// Decoder diagnostic
        reason: String,
    },
}

/// Lifecycle errors raised by a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The aggregator was already finalized; its report is fixed.
    #[error("capture run is already finalized")]
    AlreadyFinalized,

    /// Configuration was rejected before the run started.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A specialized Result type for pipeline operations.
pub type Result<T, E = PipelineError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_pattern_names_level_and_pattern() {
        let err = ConfigError::InvalidPattern {
            level: Severity::Warning,
            pattern: "(unclosed".to_string(),
            reason: "unclosed group".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("warning"));
        assert!(msg.contains("(unclosed"));
    }

    #[test]
    fn config_error_converts_into_pipeline_error() {
        let err: PipelineError = ConfigError::InvalidSeverity {
            field: "max_log_level".to_string(),
            value: "fatal".to_string(),
        }
        .into();
        assert!(matches!(err, PipelineError::Config(_)));
        assert!(err.to_string().contains("fatal"));
    }
}
