//! # CLI Configuration
//!
//! Optional YAML file passed with the global `--config` flag:
//!
//! ```yaml
//! validator:
//!   max_depth: 128
//! loader:
//!   default_draft: draft4
//! ```
//!
//! Both sections and every field are optional. Command-line flags override
//! the values read here.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use jsv_schema::{Draft, LoaderOptions, ValidatorOptions};

/// Settings shared by every subcommand.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Validation limits.
    pub validator: ValidatorOptions,
    /// Draft translation defaults.
    pub loader: LoaderOptions,
}

impl CliConfig {
    /// Read a configuration file, or the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&text)
            .with_context(|| format!("invalid config file: {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            max_depth = config.validator.max_depth,
            draft = ?config.loader.default_draft,
            "loaded configuration"
        );
        Ok(config)
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, max_depth: Option<usize>, draft: Option<Draft>) -> Self {
        if let Some(max_depth) = max_depth {
            self.validator.max_depth = max_depth;
        }
        if let Some(draft) = draft {
            self.loader.default_draft = draft;
        }
        self
    }
}

/// Parse a `--draft` value (`draft4`, `draft-04`, `4`, …).
pub fn parse_draft(s: &str) -> Result<Draft, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "draft4" | "draft-04" | "4" => Ok(Draft::Draft4),
        "draft6" | "draft-06" | "6" => Ok(Draft::Draft6),
        "draft7" | "draft-07" | "7" => Ok(Draft::Draft7),
        other => Err(format!("unknown draft '{other}', expected draft4, draft6 or draft7")),
    }
}
