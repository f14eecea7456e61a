//! Configuration system for fillforge.
//!
//! Load fill options from TOML or YAML files to control collection sizing,
//! cycle policy, the unknown-type policy, and randomness without code
//! changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string and resolve it onto a setup:
//!
//! ```
//! use fillforge_config::FillConfig;
//! use fillforge_core::Setup;
//!
//! let config = FillConfig::from_toml_str(r#"
//!     ignore_unknown_types = true
//!     circular_references = "fail"
//!     random_seed = 7
//!
//!     [sequence_items]
//!     min = 2
//!     max = 5
//! "#).unwrap();
//!
//! let setup = config.apply(Setup::new()).unwrap();
//! assert_eq!(setup.sequence_count_range(), 2..5);
//! assert!(setup.ignore_unknown_types());
//! ```
//!
//! Use the default config when a file is missing:
//!
//! ```
//! use fillforge_config::FillConfig;
//!
//! let config = FillConfig::load("fill.toml").unwrap_or_default();
//! // Proceeds with defaults if the file doesn't exist
//! ```

use std::ops::Range;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use fillforge_core::{
    CircularReferencePolicy, EntropyRandom, RandomSource, SeededRandom, Setup,
};

#[cfg(test)]
mod tests;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Inclusive-exclusive count bounds, `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct CountRange {
    pub min: usize,
    pub max: usize,
}

impl CountRange {
    /// The bounds as a half-open range.
    pub fn as_range(&self) -> Range<usize> {
        self.min..self.max
    }
}

/// Circular-reference policy as it appears in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePolicy {
    Fail,
    SubstituteDefault,
}

impl From<CyclePolicy> for CircularReferencePolicy {
    fn from(policy: CyclePolicy) -> Self {
        match policy {
            CyclePolicy::Fail => CircularReferencePolicy::Fail,
            CyclePolicy::SubstituteDefault => CircularReferencePolicy::SubstituteDefault,
        }
    }
}

/// File-loadable fill options. Every field is optional; absent fields
/// leave the setup's value untouched.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FillConfig {
    /// Bounds for sequence population.
    #[serde(default)]
    pub sequence_items: Option<CountRange>,

    /// Bounds for map key generation.
    #[serde(default)]
    pub map_keys: Option<CountRange>,

    /// How detected cycles are resolved.
    #[serde(default)]
    pub circular_references: Option<CyclePolicy>,

    /// Whether unregistered types resolve to defaults instead of failing.
    #[serde(default)]
    pub ignore_unknown_types: Option<bool>,

    /// Construction depth limit.
    #[serde(default)]
    pub max_depth: Option<usize>,

    /// Seed for deterministic fills.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl FillConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Validates bounds and limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (label, range) in [
            ("sequence_items", self.sequence_items),
            ("map_keys", self.map_keys),
        ] {
            if let Some(range) = range {
                if range.max < range.min {
                    return Err(ConfigError::Invalid(format!(
                        "{label}: max ({}) must not be below min ({})",
                        range.max, range.min
                    )));
                }
            }
        }
        if self.max_depth == Some(0) {
            return Err(ConfigError::Invalid(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Applies the configured options onto a setup.
    pub fn apply(&self, mut setup: Setup) -> Result<Setup, ConfigError> {
        self.validate()?;
        if let Some(range) = self.sequence_items {
            setup = setup.with_sequence_count_range(range.as_range());
        }
        if let Some(range) = self.map_keys {
            setup = setup.with_map_key_count_range(range.as_range());
        }
        if let Some(policy) = self.circular_references {
            setup = setup.with_circular_reference_policy(policy.into());
        }
        if let Some(ignore) = self.ignore_unknown_types {
            setup = setup.with_ignore_unknown_types(ignore);
        }
        if let Some(max_depth) = self.max_depth {
            setup = setup.with_max_depth(max_depth);
        }
        Ok(setup)
    }

    /// The randomness source the configuration calls for: seeded when
    /// `random_seed` is set, OS entropy otherwise.
    pub fn random_source(&self) -> Box<dyn RandomSource> {
        match self.random_seed {
            Some(seed) => Box::new(SeededRandom::new(seed)),
            None => Box::new(EntropyRandom::new()),
        }
    }
}
