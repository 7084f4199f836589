//! Weather Alerting
//!
//! Scans the latest reading of every waypoint on a route and emits one typed
//! hazard alert per triggered rule.

mod evaluator;
mod thresholds;

pub use evaluator::{AlertKind, WeatherAlert, WeatherAlertEvaluator};
pub use thresholds::AlertThresholds;

use thiserror::Error;

/// Weather alert errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlertError {
    #[error("No waypoints found for route {0}")]
    NoWaypoints(u64),

    #[error("No sensor data available for route {0}")]
    NoSensorData(u64),
}
