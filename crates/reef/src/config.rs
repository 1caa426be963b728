//! TOML configuration for the `reef` tool.
//!
//! Every section is optional; a missing file means all defaults.

use std::path::Path;

use reef_ring::RegistryConfig;
use serde::Deserialize;

/// Top-level configuration, parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Ring construction settings.
    pub ring: RegistryConfig,
    /// Real nodes to register at startup.
    pub nodes: NodesSection,
    /// Logging configuration.
    pub log: LogSection,
}

/// `[nodes]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NodesSection {
    /// Real node names, registered in order.
    pub names: Vec<String>,
}

/// `[log]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// Log level filter (e.g. `"info"`, `"debug"`, `"warn"`).
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl CliConfig {
    /// Load config from a TOML file, or use defaults if no path given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => {
                let content = std::fs::read_to_string(p)?;
                let config: CliConfig = toml::from_str(&content)?;
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse config from a TOML string (used in tests).
    #[cfg(test)]
    pub fn from_toml(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }
}
