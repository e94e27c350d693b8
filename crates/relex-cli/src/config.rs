//! CLI configuration

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;

/// Overrides the config file location
pub const CONFIG_ENV: &str = "RELEX_CONFIG";

/// Path of the config file
pub fn config_file_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("relex")
        .join("config.toml")
}

/// Configuration for the CLI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Default rule table; the bundled table when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
}

impl Config {
    /// Load from the config file, falling back to defaults
    pub fn load() -> Self {
        let path = config_file_path();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => return Self::default(),
        };
        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring invalid config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_file_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, toml::to_string_pretty(self)?)?;
        tracing::debug!("Saved config to {:?}", path);
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["rules", "format"]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "rules" => self.rules.as_ref().map(|p| p.display().to_string()),
            "format" => self.format.map(|f| f.as_str().to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "rules" => self.rules = Some(PathBuf::from(value)),
            "format" => {
                let format = OutputFormat::from_str(value, true)
                    .map_err(|_| anyhow::anyhow!("Invalid format '{}': expected text or json", value))?;
                self.format = Some(format);
            }
            _ => anyhow::bail!(
                "Unknown config key: {} (available: {})",
                key,
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }
}
