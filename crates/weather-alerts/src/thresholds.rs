//! Alert Thresholds

use serde::{Deserialize, Serialize};

/// Limits used by the weather rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    /// Ice: temperature below this (°C)...
    pub ice_max_temperature: f64,
    /// ...and humidity above this (%)
    pub ice_min_humidity: f64,
    /// Storm: wind speed above this (m/s)
    pub storm_wind_speed: f64,
    /// Low pressure: mean pressure below this (hPa)
    pub low_pressure: f64,
    /// Heat: temperature above this (°C)
    pub heat_temperature: f64,
    /// Low humidity: humidity below this (%)
    pub low_humidity: f64,
    /// Cold storm: wind speed above this (m/s)...
    pub cold_storm_wind_speed: f64,
    /// ...and temperature below this (°C)
    pub cold_storm_max_temperature: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            ice_max_temperature: 0.0,
            ice_min_humidity: 80.0,
            storm_wind_speed: 20.0,
            low_pressure: 980.0,
            heat_temperature: 35.0,
            low_humidity: 20.0,
            cold_storm_wind_speed: 30.0,
            cold_storm_max_temperature: 5.0,
        }
    }
}
