//! Training Sample Collection

use chrono::Duration;
use route_domain::{path_distance_km, Delivery, Waypoint};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::duration::{duration_hours, parse_duration};
use crate::statistics::ConditionAverages;
use crate::MetricsError;

/// Readings up to this long before departure or after arrival still count
pub const DEFAULT_WINDOW_PADDING_SECS: i64 = 3600;

/// Observed conditions of one completed delivery paired with its realized speed
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrainingSample {
    /// Mean temperature during the trip (°C)
    pub temperature: f64,
    /// Mean humidity during the trip (%)
    pub humidity: f64,
    /// Mean wind speed during the trip (m/s)
    pub wind_speed: f64,
    /// Total cargo weight (kg), 0 when weight is not considered
    pub total_weight: f64,
    /// Route distance divided by trip duration (km/h)
    pub delivery_speed: f64,
}

/// Builds training samples from historical deliveries
#[derive(Debug, Clone)]
pub struct RouteMetricsCollector {
    window_padding: Duration,
}

impl RouteMetricsCollector {
    /// Create a collector with the given window padding around each trip
    pub fn new(window_padding: Duration) -> Self {
        Self { window_padding }
    }

    /// Window padding applied before departure and after arrival
    pub fn window_padding(&self) -> Duration {
        self.window_padding
    }

    /// Turn one delivery on the given route into a training sample.
    ///
    /// Readings from every waypoint are considered if they were recorded within
    /// `[date - padding, date + duration + padding]`.
    pub fn collect(
        &self,
        delivery: &Delivery,
        waypoints: &[Waypoint],
        include_weight: bool,
    ) -> Result<TrainingSample, MetricsError> {
        let duration = parse_duration(&delivery.duration)?;
        let hours = duration_hours(duration);
        if hours <= 0.0 {
            return Err(MetricsError::ZeroDuration);
        }

        let out_of_range = || MetricsError::InvalidDuration(delivery.duration.clone());
        let window_start = delivery
            .date
            .checked_sub_signed(self.window_padding)
            .ok_or_else(out_of_range)?;
        let window_end = delivery
            .date
            .checked_add_signed(duration)
            .and_then(|end| end.checked_add_signed(self.window_padding))
            .ok_or_else(out_of_range)?;

        let in_window = waypoints
            .iter()
            .flat_map(|w| w.sensor_data.iter())
            .filter(|r| r.recorded_at >= window_start && r.recorded_at <= window_end);

        let conditions =
            ConditionAverages::from_readings(in_window).ok_or(MetricsError::NoReadingsInWindow)?;

        let distance = path_distance_km(waypoints);
        let total_weight = if include_weight {
            delivery.total_weight()
        } else {
            0.0
        };

        let sample = TrainingSample {
            temperature: conditions.temperature,
            humidity: conditions.humidity,
            wind_speed: conditions.wind_speed,
            total_weight,
            delivery_speed: distance / hours,
        };

        debug!(
            "Delivery {} on route {}: {} readings, {:.2} km in {:.2} h",
            delivery.id, delivery.route_id, conditions.sample_count, distance, hours
        );

        Ok(sample)
    }
}

impl Default for RouteMetricsCollector {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_WINDOW_PADDING_SECS))
    }
}
