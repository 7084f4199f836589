//! Averaged Environmental Conditions

use route_domain::SensorData;
use serde::{Deserialize, Serialize};

/// Mean environmental conditions over a set of readings
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ConditionAverages {
    /// Mean temperature (°C)
    pub temperature: f64,
    /// Mean humidity (%)
    pub humidity: f64,
    /// Mean wind speed (m/s)
    pub wind_speed: f64,
    /// Mean atmospheric pressure (hPa)
    pub mean_pressure: f64,
    /// Number of readings averaged
    pub sample_count: usize,
}

impl ConditionAverages {
    /// Average the given readings; `None` when there are none
    pub fn from_readings<'a, I>(readings: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a SensorData>,
    {
        let mut sums = Self::default();
        for reading in readings {
            sums.temperature += reading.temperature;
            sums.humidity += reading.humidity;
            sums.wind_speed += reading.wind_speed;
            sums.mean_pressure += reading.mean_pressure;
            sums.sample_count += 1;
        }

        if sums.sample_count == 0 {
            return None;
        }

        let n = sums.sample_count as f64;
        Some(Self {
            temperature: sums.temperature / n,
            humidity: sums.humidity / n,
            wind_speed: sums.wind_speed / n,
            mean_pressure: sums.mean_pressure / n,
            sample_count: sums.sample_count,
        })
    }
}
