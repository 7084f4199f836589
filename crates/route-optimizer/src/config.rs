//! Optimizer configuration

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Optimizer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Routes below this mean humidity (%) count as safe
    pub safety_max_humidity: f64,
    /// Routes above this mean temperature (°C) count as safe
    pub safety_min_temperature: f64,
    /// Readings this many seconds around a trip are used for training
    pub window_padding_secs: i64,
}

impl OptimizerConfig {
    /// Training window padding, `None` when negative or beyond what a
    /// [`Duration`] can hold
    pub fn window_padding(&self) -> Option<Duration> {
        if self.window_padding_secs < 0 {
            return None;
        }
        Duration::try_seconds(self.window_padding_secs)
    }

    /// Check values that cannot be expressed by the type alone
    pub fn validate(&self) -> Result<(), String> {
        if self.window_padding().is_none() {
            return Err(format!(
                "window_padding_secs must be between 0 and {}, got {}",
                i64::MAX / 1000,
                self.window_padding_secs
            ));
        }
        Ok(())
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            safety_max_humidity: 85.0,
            safety_min_temperature: 0.0,
            window_padding_secs: 3600,
        }
    }
}
