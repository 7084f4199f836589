//! Weather Alert Evaluator

use route_domain::{Route, SensorData};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};

use crate::{AlertError, AlertThresholds};

/// Hazard type, in rule evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertKind {
    #[serde(rename = "Ice Alert")]
    Ice,
    #[serde(rename = "Storm Alert")]
    Storm,
    #[serde(rename = "Low Pressure Alert")]
    LowPressure,
    #[serde(rename = "Heat Alert")]
    Heat,
    #[serde(rename = "Low Humidity Alert")]
    LowHumidity,
    #[serde(rename = "Cold Storm Alert")]
    ColdStorm,
}

impl AlertKind {
    /// All rules in evaluation order
    pub const ALL: [AlertKind; 6] = [
        AlertKind::Ice,
        AlertKind::Storm,
        AlertKind::LowPressure,
        AlertKind::Heat,
        AlertKind::LowHumidity,
        AlertKind::ColdStorm,
    ];

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Ice => "Ice Alert",
            AlertKind::Storm => "Storm Alert",
            AlertKind::LowPressure => "Low Pressure Alert",
            AlertKind::Heat => "Heat Alert",
            AlertKind::LowHumidity => "Low Humidity Alert",
            AlertKind::ColdStorm => "Cold Storm Alert",
        }
    }

    /// Human-readable description of the hazard
    pub fn message(&self) -> &'static str {
        match self {
            AlertKind::Ice => {
                "Potential ice formation detected due to low temperature and high humidity."
            }
            AlertKind::Storm => "High wind speed detected, potential storm risk.",
            AlertKind::LowPressure => {
                "Low atmospheric pressure detected, potential severe weather conditions."
            }
            AlertKind::Heat => "High temperature detected, risk of heat-related issues.",
            AlertKind::LowHumidity => "Low humidity detected, risk of dry conditions.",
            AlertKind::ColdStorm => {
                "High wind speed combined with low temperature detected, risk of severe cold storm."
            }
        }
    }

    /// The reading values that triggered the rule
    fn details(&self, reading: &SensorData) -> String {
        match self {
            AlertKind::Ice => format!(
                "Temperature: {:.2}°C, Humidity: {:.2}%",
                reading.temperature, reading.humidity
            ),
            AlertKind::Storm => format!("Wind Speed: {:.2} m/s", reading.wind_speed),
            AlertKind::LowPressure => format!("Pressure: {:.2} hPa", reading.mean_pressure),
            AlertKind::Heat => format!("Temperature: {:.2}°C", reading.temperature),
            AlertKind::LowHumidity => format!("Humidity: {:.2}%", reading.humidity),
            AlertKind::ColdStorm => format!(
                "Wind Speed: {:.2} m/s, Temperature: {:.2}°C",
                reading.wind_speed, reading.temperature
            ),
        }
    }
}

/// A hazard flagged on a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherAlert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
    pub details: String,
}

impl WeatherAlert {
    fn new(kind: AlertKind, reading: &SensorData) -> Self {
        Self {
            kind,
            message: kind.message().to_string(),
            details: kind.details(reading),
        }
    }
}

/// Evaluates weather rules against the latest readings of a route
#[derive(Debug, Clone, Default)]
pub struct WeatherAlertEvaluator {
    thresholds: AlertThresholds,
}

impl WeatherAlertEvaluator {
    /// Create an evaluator with the given thresholds
    pub fn new(thresholds: AlertThresholds) -> Self {
        Self { thresholds }
    }

    /// Thresholds in use
    pub fn thresholds(&self) -> &AlertThresholds {
        &self.thresholds
    }

    /// Whether a single reading triggers the given rule
    pub fn is_triggered(&self, kind: AlertKind, reading: &SensorData) -> bool {
        let t = &self.thresholds;
        match kind {
            AlertKind::Ice => {
                reading.temperature < t.ice_max_temperature && reading.humidity > t.ice_min_humidity
            }
            AlertKind::Storm => reading.wind_speed > t.storm_wind_speed,
            AlertKind::LowPressure => reading.mean_pressure < t.low_pressure,
            AlertKind::Heat => reading.temperature > t.heat_temperature,
            AlertKind::LowHumidity => reading.humidity < t.low_humidity,
            AlertKind::ColdStorm => {
                reading.wind_speed > t.cold_storm_wind_speed
                    && reading.temperature < t.cold_storm_max_temperature
            }
        }
    }

    /// Evaluate every waypoint's latest reading.
    ///
    /// Each alert type is reported at most once, in the order it was first
    /// triggered while scanning waypoints. Waypoints without readings are skipped.
    pub fn evaluate(&self, route: &Route) -> Result<Vec<WeatherAlert>, AlertError> {
        if route.waypoints.is_empty() {
            return Err(AlertError::NoWaypoints(route.id));
        }

        let latest: Vec<&SensorData> = route
            .waypoints
            .iter()
            .filter_map(|w| w.latest_reading())
            .collect();

        if latest.is_empty() {
            return Err(AlertError::NoSensorData(route.id));
        }

        let mut seen = HashSet::new();
        let mut alerts = Vec::new();

        for reading in latest {
            for kind in AlertKind::ALL {
                if self.is_triggered(kind, reading) && seen.insert(kind) {
                    debug!(
                        "Route {}: {} triggered by reading {}",
                        route.id,
                        kind.as_str(),
                        reading.id
                    );
                    alerts.push(WeatherAlert::new(kind, reading));
                }
            }
        }

        info!("Route {}: {} weather alerts", route.id, alerts.len());
        Ok(alerts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use route_domain::Waypoint;

    fn reading(temperature: f64, humidity: f64, wind_speed: f64, mean_pressure: f64) -> SensorData {
        SensorData {
            temperature,
            humidity,
            wind_speed,
            mean_pressure,
            ..Default::default()
        }
    }

    fn route_with(readings: Vec<Vec<SensorData>>) -> Route {
        Route {
            id: 1,
            waypoints: readings
                .into_iter()
                .enumerate()
                .map(|(i, sensor_data)| Waypoint {
                    id: i as u64 + 1,
                    sensor_data,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    fn kinds(alerts: &[WeatherAlert]) -> Vec<AlertKind> {
        alerts.iter().map(|a| a.kind).collect()
    }

    #[test]
    fn test_ice_alert_only() {
        let route = route_with(vec![vec![reading(-5.0, 85.0, 10.0, 1000.0)]]);
        let alerts = WeatherAlertEvaluator::default().evaluate(&route).unwrap();

        assert_eq!(kinds(&alerts), vec![AlertKind::Ice]);
        assert_eq!(
            alerts[0].message,
            "Potential ice formation detected due to low temperature and high humidity."
        );
        assert_eq!(alerts[0].details, "Temperature: -5.00°C, Humidity: 85.00%");
    }

    #[test]
    fn test_storm_and_cold_storm_not_duplicated() {
        let route = route_with(vec![
            vec![reading(2.0, 50.0, 35.0, 1000.0)],
            vec![reading(1.0, 50.0, 40.0, 1000.0)],
        ]);
        let alerts = WeatherAlertEvaluator::default().evaluate(&route).unwrap();

        assert_eq!(kinds(&alerts), vec![AlertKind::Storm, AlertKind::ColdStorm]);
        // Details come from the first reading that triggered the rule
        assert_eq!(alerts[0].details, "Wind Speed: 35.00 m/s");
    }

    #[test]
    fn test_order_follows_first_trigger() {
        let route = route_with(vec![
            vec![reading(40.0, 50.0, 5.0, 1000.0)], // heat
            vec![reading(-3.0, 90.0, 25.0, 970.0)], // ice, storm, low pressure
        ]);
        let alerts = WeatherAlertEvaluator::default().evaluate(&route).unwrap();

        assert_eq!(
            kinds(&alerts),
            vec![AlertKind::Heat, AlertKind::Ice, AlertKind::Storm, AlertKind::LowPressure]
        );
    }

    #[test]
    fn test_only_latest_reading_counts() {
        let route = route_with(vec![vec![
            reading(40.0, 10.0, 50.0, 900.0),
            reading(15.0, 50.0, 3.0, 1013.0),
        ]]);
        let alerts = WeatherAlertEvaluator::default().evaluate(&route).unwrap();
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_low_humidity_alert() {
        let route = route_with(vec![vec![reading(20.0, 15.0, 3.0, 1013.0)]]);
        let alerts = WeatherAlertEvaluator::default().evaluate(&route).unwrap();
        assert_eq!(kinds(&alerts), vec![AlertKind::LowHumidity]);
        assert_eq!(alerts[0].details, "Humidity: 15.00%");
    }

    #[test]
    fn test_thresholds_are_strict() {
        let route = route_with(vec![vec![reading(0.0, 80.0, 20.0, 980.0)]]);
        let alerts = WeatherAlertEvaluator::default().evaluate(&route).unwrap();
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_no_waypoints() {
        let route = Route {
            id: 9,
            ..Default::default()
        };
        let result = WeatherAlertEvaluator::default().evaluate(&route);
        assert_eq!(result, Err(AlertError::NoWaypoints(9)));
    }

    #[test]
    fn test_no_sensor_data() {
        let route = route_with(vec![vec![], vec![]]);
        let result = WeatherAlertEvaluator::default().evaluate(&route);
        assert_eq!(result, Err(AlertError::NoSensorData(1)));
    }

    #[test]
    fn test_waypoint_without_readings_is_skipped() {
        let route = route_with(vec![vec![], vec![reading(38.0, 50.0, 3.0, 1013.0)]]);
        let alerts = WeatherAlertEvaluator::default().evaluate(&route).unwrap();
        assert_eq!(kinds(&alerts), vec![AlertKind::Heat]);
    }

    #[test]
    fn test_custom_thresholds() {
        let evaluator = WeatherAlertEvaluator::new(AlertThresholds {
            heat_temperature: 25.0,
            ..Default::default()
        });
        let route = route_with(vec![vec![reading(30.0, 50.0, 3.0, 1013.0)]]);
        let alerts = evaluator.evaluate(&route).unwrap();
        assert_eq!(kinds(&alerts), vec![AlertKind::Heat]);
    }

    #[test]
    fn test_alert_serializes_with_type_field() {
        let alert = WeatherAlert::new(AlertKind::Storm, &reading(10.0, 50.0, 22.5, 1000.0));
        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["type"], "Storm Alert");
        assert_eq!(json["details"], "Wind Speed: 22.50 m/s");
    }
}
