// config.rs - Configuration for twab-core
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use twab_common::prelude::*;
use twab_state::PeriodConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Period buckets shared by every account in the book
    pub periods: PeriodConfig,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Where to write a JSON snapshot of every account after replay
    pub snapshot_path: Option<String>,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            periods: PeriodConfig::default(),
            log_level: "info".to_string(),
            snapshot_path: None,
        }
    }
}

/// Config file formats, picked by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> TwabResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            other => Err(TwabError::config(format!(
                "Unsupported config extension {:?} for {}",
                other,
                path.display()
            ))),
        }
    }
}

impl ReplayConfig {
    /// Load and validate a configuration file
    pub fn load(path: impl AsRef<Path>) -> TwabResult<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let raw = std::fs::read_to_string(path)?;
        let config = Self::parse(&raw, format)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration text without validating it
    pub fn parse(raw: &str, format: ConfigFormat) -> TwabResult<Self> {
        match format {
            ConfigFormat::Toml => {
                toml::from_str(raw).map_err(|e| TwabError::config(format!("Invalid TOML: {}", e)))
            }
            ConfigFormat::Yaml => serde_yaml::from_str(raw)
                .map_err(|e| TwabError::config(format!("Invalid YAML: {}", e))),
            ConfigFormat::Json => Ok(serde_json::from_str(raw)?),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> TwabResult<()> {
        self.periods.validate()?;

        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(TwabError::config(format!(
                "log_level must be one of {:?}, got {}",
                LEVELS, self.log_level
            )));
        }

        if let Some(path) = &self.snapshot_path {
            if path.is_empty() {
                return Err(TwabError::config("snapshot_path cannot be empty"));
            }
        }

        Ok(())
    }

    /// Get the snapshot path as PathBuf
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        self.snapshot_path.as_ref().map(PathBuf::from)
    }
}
