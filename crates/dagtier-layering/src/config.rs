//! Solver configuration.
//!
//! Embedders usually keep solver settings in their own TOML files; a
//! `[layering]`-style table deserializes straight into [`LayeringConfig`].
//! Missing fields fall back to defaults. `DAGTIER_MAX_WIDTH` overrides the
//! width at runtime.

use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Environment variable overriding [`LayeringConfig::max_width`].
pub const MAX_WIDTH_ENV: &str = "DAGTIER_MAX_WIDTH";

/// Settings for [`crate::CoffmanGraham::from_config`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayeringConfig {
    /// Maximum number of elements per layer. Must be at least 1 for the
    /// solver to accept it. Default: 4.
    #[serde(default = "default_max_width")]
    pub max_width: usize,
}

impl Default for LayeringConfig {
    fn default() -> Self {
        Self {
            max_width: default_max_width(),
        }
    }
}

const fn default_max_width() -> usize {
    4
}

impl LayeringConfig {
    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if `content` is not valid TOML or a field has the
    /// wrong type.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content).context("Failed to parse layering config")
    }

    /// Load a configuration file, returning defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no layering config, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        toml::from_str::<Self>(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Apply `DAGTIER_MAX_WIDTH` if it is set.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_max_width_override(env::var(MAX_WIDTH_ENV).ok().as_deref())
    }

    /// Apply a raw width override. Values that do not parse as an unsigned
    /// integer are ignored with a warning.
    #[must_use]
    pub fn with_max_width_override(mut self, raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return self;
        };
        match raw.trim().parse::<usize>() {
            Ok(width) => self.max_width = width,
            Err(err) => warn!(value = raw, %err, "ignoring unparseable {MAX_WIDTH_ENV}"),
        }
        self
    }
}
