//! Configuration for the rtam runtime
//!
//! Handles loading and validating runtime configuration. Files ending in
//! `.toml` are parsed as TOML, everything else as JSON.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use rtam_core::{ConfigError, LogLevel};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{info, warn};

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Bound (milliseconds) on waiting for a required or conflicting
    /// application to settle during `launch`; absent means wait forever
    #[serde(default)]
    pub dependency_timeout_ms: Option<u64>,

    /// Whether `init` launches the applications flagged for autostart
    #[serde(default = "default_autostart")]
    pub autostart: bool,

    /// Minimum level for log output
    #[serde(default)]
    pub log_level: LogLevel,

    /// Additional configuration
    #[serde(default)]
    pub extra: HashMap<String, serde_json::Value>,
}

fn default_autostart() -> bool {
    true
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            dependency_timeout_ms: None,
            autostart: default_autostart(),
            log_level: LogLevel::default(),
            extra: HashMap::new(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a file, falling back to defaults when no
    /// path is given or the file does not exist
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                info!("Loading configuration from {}", path.display());

                if !path.exists() {
                    warn!("Configuration file not found: {}", path.display());
                    return Ok(RuntimeConfig::default());
                }

                let content = fs::read_to_string(path)
                    .await
                    .map_err(|e| ConfigError::LoadFailed(e.to_string()))
                    .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

                Self::parse(path, &content)
                    .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?
            }
            None => {
                info!("No configuration file specified, using defaults");
                RuntimeConfig::default()
            }
        };

        config.validate()?;

        Ok(config)
    }

    fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            toml::from_str(content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
        } else {
            serde_json::from_str(content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dependency_timeout_ms == Some(0) {
            return Err(ConfigError::Invalid(
                "Dependency timeout cannot be zero; omit it to wait without bound".to_string(),
            ));
        }

        Ok(())
    }

    /// Dependency wait bound used by `launch`
    pub fn dependency_timeout(&self) -> Option<Duration> {
        self.dependency_timeout_ms.map(Duration::from_millis)
    }

    /// Merge with another configuration
    pub fn merge(&mut self, other: RuntimeConfig) {
        if other.dependency_timeout_ms.is_some() {
            self.dependency_timeout_ms = other.dependency_timeout_ms;
        }

        // Autostart can only be switched off by an overlay
        if !other.autostart {
            self.autostart = false;
        }

        if other.log_level != LogLevel::default() {
            self.log_level = other.log_level;
        }

        for (key, value) in other.extra {
            self.extra.insert(key, value);
        }
    }
}
