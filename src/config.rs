//! Reasoner configuration
//!
//! Defaults for the inference budget, the hard depth cap and the optional
//! relations file. Loaded from a TOML file or from `LEXIKON_*` environment
//! variables.

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const ENV_MAX_DEPTH: &str = "LEXIKON_MAX_DEPTH";
pub const ENV_CONFIDENCE_THRESHOLD: &str = "LEXIKON_CONFIDENCE_THRESHOLD";
pub const ENV_MAX_DEPTH_LIMIT: &str = "LEXIKON_MAX_DEPTH_LIMIT";
pub const ENV_RELATIONS_FILE: &str = "LEXIKON_RELATIONS_FILE";

/// Configuration for the reasoning engine
///
/// # Examples
///
/// ```
/// use lexikon_reasoner::ReasonerConfig;
///
/// let config = ReasonerConfig::default();
/// assert_eq!(config.default_max_depth, 3);
/// assert_eq!(config.default_confidence_threshold, 0.75);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasonerConfig {
    /// Depth budget used when a request does not name one
    #[serde(default = "default_max_depth")]
    pub default_max_depth: usize,

    /// Inclusive confidence cutoff used when a request does not name one
    #[serde(default = "default_confidence_threshold")]
    pub default_confidence_threshold: f64,

    /// Hard cap; requests asking for more are rejected
    #[serde(default = "default_max_depth_limit")]
    pub max_depth_limit: usize,

    /// JSON Lines file backing the reference store
    #[serde(default)]
    pub relations_file: Option<PathBuf>,
}

fn default_max_depth() -> usize {
    3
}

fn default_confidence_threshold() -> f64 {
    0.75
}

fn default_max_depth_limit() -> usize {
    10
}

impl Default for ReasonerConfig {
    fn default() -> Self {
        Self {
            default_max_depth: default_max_depth(),
            default_confidence_threshold: default_confidence_threshold(),
            max_depth_limit: default_max_depth_limit(),
            relations_file: None,
        }
    }
}

impl ReasonerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ReasonerConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Build configuration from defaults overridden by `LEXIKON_*` variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(depth) = parse_env::<usize>(ENV_MAX_DEPTH)? {
            config.default_max_depth = depth;
        }
        if let Some(threshold) = parse_env::<f64>(ENV_CONFIDENCE_THRESHOLD)? {
            config.default_confidence_threshold = threshold;
        }
        if let Some(limit) = parse_env::<usize>(ENV_MAX_DEPTH_LIMIT)? {
            config.max_depth_limit = limit;
        }
        if let Ok(path) = env::var(ENV_RELATIONS_FILE) {
            config.relations_file = Some(resolve_path(&path));
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the defaults are usable as an inference budget
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.default_confidence_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::Invalid(format!(
                "default_confidence_threshold must be within [0, 1], got {}",
                threshold
            )));
        }
        if self.default_max_depth > self.max_depth_limit {
            return Err(ConfigError::Invalid(format!(
                "default_max_depth {} exceeds max_depth_limit {}",
                self.default_max_depth, self.max_depth_limit
            )));
        }
        Ok(())
    }
}

fn parse_env<T: FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv {
                name: name.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}

/// Relative paths are taken from the current directory
fn resolve_path(path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        return path;
    }
    env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(path)
}
