//! Routes, Waypoints and Sensor Readings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::distance::{path_distance_km, GeoPoint};
use crate::EntityId;

/// Environmental reading reported by a waypoint device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorData {
    pub id: EntityId,
    pub waypoint_id: EntityId,
    /// When the reading was taken
    pub recorded_at: DateTime<Utc>,
    /// Air temperature (°C)
    pub temperature: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Wind speed (m/s)
    pub wind_speed: f64,
    /// Mean atmospheric pressure (hPa)
    pub mean_pressure: f64,
}

impl Default for SensorData {
    fn default() -> Self {
        Self {
            id: 0,
            waypoint_id: 0,
            recorded_at: DateTime::<Utc>::UNIX_EPOCH,
            temperature: 0.0,
            humidity: 0.0,
            wind_speed: 0.0,
            mean_pressure: 0.0,
        }
    }
}

/// Ordered stop on a route
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: EntityId,
    pub route_id: EntityId,
    pub name: String,
    /// Serial number of the device reporting readings for this stop
    pub device_serial: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Readings in the order they were appended (oldest first)
    #[serde(default)]
    pub sensor_data: Vec<SensorData>,
}

impl Waypoint {
    /// Geographic position of the waypoint
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Latest reading, taken as the last one appended
    pub fn latest_reading(&self) -> Option<&SensorData> {
        self.sensor_data.last()
    }
}

/// Delivery route owned by a company
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Route {
    pub id: EntityId,
    pub company_id: EntityId,
    pub name: String,
    /// Stops in travel order
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
}

impl Route {
    /// Total path length over the route's waypoints (km)
    pub fn distance_km(&self) -> f64 {
        path_distance_km(&self.waypoints)
    }
}
