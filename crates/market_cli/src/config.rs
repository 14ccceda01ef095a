//! CLI configuration.

use anyhow::{Context, Result};
use market_validator::HistoryRetention;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Top-level configuration, loaded from a TOML file.
///
/// Every section and field is optional; omitted values fall back to
/// defaults.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct MarketConfig {
    /// Storage settings
    pub storage: StorageConfig,

    /// Validation settings
    pub validation: ValidationConfig,
}

/// Storage settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Root directory for dataset and journal files
    pub root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("data"),
        }
    }
}

/// Validation settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ValidationConfig {
    /// Keep only the most recent N validation reports; unbounded if unset
    pub history_limit: Option<usize>,
}

impl ValidationConfig {
    /// Returns the retention policy the history limit selects.
    pub fn retention(&self) -> HistoryRetention {
        match self.history_limit {
            Some(n) => HistoryRetention::LastN(n),
            None => HistoryRetention::Unbounded,
        }
    }
}

impl MarketConfig {
    /// Loads configuration from an optional TOML file, applying the
    /// storage-root override if given.
    pub fn load(path: Option<&str>, root_override: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path))?;
                toml::from_str(&raw)
                    .with_context(|| format!("Failed to parse config file: {}", path))?
            }
            None => Self::default(),
        };

        if let Some(root) = root_override {
            config.storage.root = PathBuf::from(root);
        }
        Ok(config)
    }
}
