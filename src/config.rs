//! Run configuration.
//!
//! Selects the objective and reporting options, optionally from a TOML file:
//!
//! ```
//! use u_knapsack::config::PackConfig;
//! use u_knapsack::builders::Goal;
//!
//! let config = PackConfig::from_toml_str(r#"
//!     goal = "volume"
//!     report_threshold = 0.5
//!     instance = "data/hiking.toml"
//! "#).unwrap();
//!
//! assert_eq!(config.goal, Goal::Volume);
//! assert!(config.instance.is_some());
//! ```

use crate::builders::Goal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Options for building, solving and reporting one packing run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct PackConfig {
    /// Objective to maximize.
    #[serde(default)]
    pub goal: Goal,

    /// Counts strictly above this value are reported as packed.
    #[serde(default)]
    pub report_threshold: f64,

    /// Instance file to load instead of the built-in sample.
    #[serde(default)]
    pub instance: Option<PathBuf>,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            goal: Goal::default(),
            report_threshold: 0.0,
            instance: None,
        }
    }
}

impl PackConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_goal(mut self, goal: Goal) -> Self {
        self.goal = goal;
        self
    }

    pub fn with_report_threshold(mut self, threshold: f64) -> Self {
        self.report_threshold = threshold;
        self
    }

    pub fn with_instance(mut self, path: impl Into<PathBuf>) -> Self {
        self.instance = Some(path.into());
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.report_threshold.is_finite() || self.report_threshold < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "report_threshold must be a non-negative number, got {}",
                self.report_threshold
            )));
        }
        Ok(())
    }
}
