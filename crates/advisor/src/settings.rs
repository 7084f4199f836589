//! Service settings

use config::{Config, Environment, File, FileFormat};
use route_optimizer::OptimizerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use weather_alerts::AlertThresholds;

/// Prefix for environment overrides, e.g. `ROUTE_ADVISOR__LOGGING__LEVEL`
pub const ENV_PREFIX: &str = "ROUTE_ADVISOR";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Maximum level (`trace`, `debug`, `info`, `warn`, `error`)
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Top-level settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub optimizer: OptimizerConfig,
    pub alerts: AlertThresholds,
}

impl Settings {
    /// Load settings from an optional file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Self = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        settings.validated()
    }

    /// Parse settings from TOML text
    pub fn from_toml(text: &str) -> Result<Self, config::ConfigError> {
        let settings: Self = Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        settings.validated()
    }

    fn validated(self) -> Result<Self, config::ConfigError> {
        self.optimizer
            .validate()
            .map_err(|e| config::ConfigError::Message(format!("optimizer: {}", e)))?;
        Ok(self)
    }
}
