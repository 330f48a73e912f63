//! Multi-source settings loading.
//!
//! Priority: CLI flags > environment variables > config file > defaults.
//!
//! Environment variables are read verbatim by [`VerbatimEnv`]. Figment's
//! stock `Env` provider parses values, which would turn a pattern such as
//! `[abc]` into an array or `404` into an integer.

use crate::cli::{ConfigArgs, PatternEncoding};
use crate::error::{CliError, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use figment::providers::{Format as _, Serialized, Toml};
use figment::value::{Dict, Map, Tag, Value};
use figment::{Figment, Metadata, Profile, Provider};
use pagelog::{ConfigError, FilterPatterns, PipelineConfig, RawSettings, Severity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "pagelog.toml";

/// Environment variables and the settings path each one fills.
pub const ENV_VARS: &[(&str, &[&str])] = &[
    ("MIN_LOG_LEVEL", &["min_log_level"]),
    ("MAX_LOG_LEVEL", &["max_log_level"]),
    ("PATTERN_ENCODING", &["pattern_encoding"]),
    ("REGEXP_VERBOSE", &["filters", "verbose"]),
    ("REGEXP_INFO", &["filters", "info"]),
    ("REGEXP_WARNING", &["filters", "warning"]),
    ("REGEXP_ERROR", &["filters", "error"]),
];

/// Merged settings before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_log_level: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_log_level: Option<String>,

    pub pattern_encoding: PatternEncoding,

    pub filters: FilterPatterns,
}

/// Flag overrides; unset flags are skipped so lower layers show through.
#[derive(Debug, Default, Serialize)]
struct FlagOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    min_log_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_log_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pattern_encoding: Option<PatternEncoding>,
}

impl From<&ConfigArgs> for FlagOverrides {
    fn from(args: &ConfigArgs) -> Self {
        Self {
            min_log_level: args.min_level.clone(),
            max_log_level: args.max_level.clone(),
            pattern_encoding: args.pattern_encoding,
        }
    }
}

/// Environment variables captured without value parsing.
///
/// Empty values count as unset.
#[derive(Debug, Clone, Default)]
pub struct VerbatimEnv {
    vars: BTreeMap<String, String>,
}

impl VerbatimEnv {
    /// Snapshots the known variables from the process environment.
    #[must_use]
    pub fn from_process() -> Self {
        Self::from_pairs(
            ENV_VARS
                .iter()
                .filter_map(|(name, _)| std::env::var(name).ok().map(|value| (*name, value))),
        )
    }

    /// Builds a provider from explicit `(name, value)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let vars = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(_, v)| !v.is_empty())
            .collect();
        Self { vars }
    }
}

impl Provider for VerbatimEnv {
    fn metadata(&self) -> Metadata {
        Metadata::named("environment variable(s)")
    }

    fn data(&self) -> std::result::Result<Map<Profile, Dict>, figment::Error> {
        let mut dict = Dict::new();
        for (name, path) in ENV_VARS {
            if let Some(value) = self.vars.get(*name) {
                insert_path(&mut dict, path, value.clone());
            }
        }
        Ok(Profile::Default.collect(dict))
    }
}

fn insert_path(dict: &mut Dict, path: &[&str], value: String) {
    match path {
        [] => {}
        [leaf] => {
            dict.insert((*leaf).to_string(), Value::String(Tag::Default, value));
        }
        [head, rest @ ..] => {
            let child = dict
                .entry((*head).to_string())
                .or_insert_with(|| Value::Dict(Tag::Default, Dict::new()));
            if let Value::Dict(_, child) = child {
                insert_path(child, rest, value);
            }
        }
    }
}

impl CliSettings {
    /// Merges defaults, config file, `env` and flags.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` for a missing explicit `--config`, or a
    /// settings error if a layer has the wrong shape.
    pub fn load(args: &ConfigArgs, env: VerbatimEnv) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = config_file(args.config.as_deref())? {
            debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Toml::file(path));
        }

        figment = figment
            .merge(env)
            .merge(Serialized::defaults(FlagOverrides::from(args)));

        Ok(figment.extract()?)
    }

    /// Applies the transport encoding, yielding the raw core settings.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEncoding` if a base64 pattern does not decode to UTF-8.
    pub fn decode(&self) -> std::result::Result<RawSettings, ConfigError> {
        let mut filters = FilterPatterns::default();
        for level in Severity::ALL {
            if let Some(source) = self.filters.get(level) {
                filters.set(level, decode_pattern(self.pattern_encoding, level, source)?);
            }
        }

        Ok(RawSettings {
            min_log_level: self.min_log_level.clone(),
            max_log_level: self.max_log_level.clone(),
            filters,
        })
    }
}

/// Loads, decodes and validates everything a run needs.
///
/// # Errors
///
/// Fails on the first malformed value; no event has been read yet.
pub fn load(args: &ConfigArgs) -> Result<PipelineConfig> {
    let settings = CliSettings::load(args, VerbatimEnv::from_process())?;
    let config = PipelineConfig::from_settings(&settings.decode()?)?;

    info!(
        min = %config.min_capture,
        max = %config.max_allowed,
        encoding = ?settings.pattern_encoding,
        "configuration loaded"
    );
    Ok(config)
}

fn config_file(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) if path.is_file() => Ok(Some(path.to_path_buf())),
        Some(path) => Err(CliError::FileNotFound(path.to_path_buf())),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            Ok(default_path.is_file().then(|| default_path.to_path_buf()))
        }
    }
}

fn decode_pattern(
    encoding: PatternEncoding,
    level: Severity,
    source: &str,
) -> std::result::Result<String, ConfigError> {
    match encoding {
        PatternEncoding::Plain => Ok(source.to_string()),
        PatternEncoding::Base64 => {
            let invalid = |reason: String| ConfigError::InvalidEncoding {
                field: format!("filters.{level}"),
                reason,
            };
            let bytes = STANDARD
                .decode(source.trim())
                .map_err(|e| invalid(e.to_string()))?;
            String::from_utf8(bytes).map_err(|e| invalid(e.to_string()))
        }
    }
}
