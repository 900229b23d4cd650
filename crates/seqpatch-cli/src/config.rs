//! Optional TOML configuration for the CLI.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use seqpatch_core::DiffOptions;

/// Defaults read from a config file; command-line flags win over them.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Options forwarded to the diff engine.
    pub diff: DiffOptions,
    /// Colorize text output.
    pub color: bool,
    /// Compare lines ignoring whitespace differences.
    pub ignore_whitespace: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            diff: DiffOptions::default(),
            color: true,
            ignore_whitespace: false,
        }
    }
}

impl CliConfig {
    /// Load from `path`, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    fn parse(text: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.diff.validate()?;
        Ok(config)
    }
}
