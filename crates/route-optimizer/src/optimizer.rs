//! Route Optimizer Implementation

use chrono::Duration;
use route_domain::{path_distance_km, Delivery, Route, Waypoint};
use route_metrics::{
    ConditionAverages, RouteMetricsCollector, TrainingSample, DEFAULT_WINDOW_PADDING_SECS,
};
use serde::{Deserialize, Serialize};
use speed_model::{RegressionModel, COEFFICIENT_COUNT};
use storage::{DeliveryStore, RouteStore};
use tracing::{debug, info, warn};

use crate::{OptimizerConfig, RouteError};

/// Why a route was recommended.
///
/// Only describes the winning route; every route competes on predicted time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionReason {
    PerishableProducts,
    SafetyConditions,
    RouteSpeed,
}

impl SelectionReason {
    /// Explanation shown to the caller
    pub fn message(&self) -> &'static str {
        match self {
            SelectionReason::PerishableProducts => {
                "Recommended route depends on perishable products"
            }
            SelectionReason::SafetyConditions => "Recommended route based on safety conditions",
            SelectionReason::RouteSpeed => "Recommended route depends on speed of the route",
        }
    }
}

/// Label a route from its current conditions and the cargo
pub fn classify(
    conditions: &ConditionAverages,
    is_perishable: bool,
    consider_perishable: bool,
    config: &OptimizerConfig,
) -> SelectionReason {
    if is_perishable && consider_perishable {
        SelectionReason::PerishableProducts
    } else if conditions.humidity < config.safety_max_humidity
        && conditions.temperature > config.safety_min_temperature
    {
        SelectionReason::SafetyConditions
    } else {
        SelectionReason::RouteSpeed
    }
}

/// Predicted trip figures for a route
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Prediction {
    pub distance_km: f64,
    pub speed_kmh: f64,
    pub time_h: f64,
}

/// Score of one candidate route
#[derive(Debug, Clone, PartialEq)]
pub struct RouteScore {
    pub conditions: ConditionAverages,
    pub prediction: Prediction,
}

/// The selected route and how it was chosen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecommendation {
    pub reason: SelectionReason,
    pub prediction: Prediction,
    /// `[intercept, β_temperature, β_humidity, β_wind_speed, β_weight, mean_residual]`
    pub coefficients: [f64; COEFFICIENT_COUNT],
    pub route: Route,
}

impl RouteRecommendation {
    /// Explanation of the recommendation
    pub fn message(&self) -> &'static str {
        self.reason.message()
    }
}

/// Selects the fastest route for a delivery.
///
/// Holds no model between calls: every selection refits from the stores.
pub struct RouteOptimizer<'a, R: ?Sized, D: ?Sized> {
    routes: &'a R,
    deliveries: &'a D,
    collector: RouteMetricsCollector,
    config: OptimizerConfig,
}

impl<'a, R, D> RouteOptimizer<'a, R, D>
where
    R: RouteStore + ?Sized,
    D: DeliveryStore + ?Sized,
{
    /// Create an optimizer over the given stores
    pub fn new(routes: &'a R, deliveries: &'a D, config: OptimizerConfig) -> Self {
        let padding = config.window_padding().unwrap_or_else(|| {
            warn!(
                "window_padding_secs {} out of range, using {}",
                config.window_padding_secs, DEFAULT_WINDOW_PADDING_SECS
            );
            Duration::seconds(DEFAULT_WINDOW_PADDING_SECS)
        });
        let collector = RouteMetricsCollector::new(padding);
        Self {
            routes,
            deliveries,
            collector,
            config,
        }
    }

    /// Build training samples from completed deliveries on every candidate route.
    ///
    /// Deliveries that cannot be turned into a sample are logged and skipped.
    pub fn build_training_set(
        &self,
        candidates: &[(Route, Vec<Waypoint>)],
        include_weight: bool,
    ) -> Result<Vec<TrainingSample>, RouteError> {
        let mut samples = Vec::new();

        for (route, waypoints) in candidates {
            let history = self.deliveries.completed_deliveries_by_route(route.id)?;
            for past in history.iter().filter(|d| d.is_completed()) {
                match self.collector.collect(past, waypoints, include_weight) {
                    Ok(sample) => samples.push(sample),
                    Err(e) => warn!("Skipping delivery {} on route {}: {}", past.id, route.id, e),
                }
            }
        }

        debug!(
            "Built {} training samples from {} routes (window padding {} s)",
            samples.len(),
            candidates.len(),
            self.collector.window_padding().num_seconds()
        );
        Ok(samples)
    }

    /// Predict distance, speed and time for one route under its latest conditions
    pub fn score_route(
        &self,
        route: &Route,
        waypoints: &[Waypoint],
        model: &RegressionModel,
        total_weight: f64,
    ) -> Result<RouteScore, RouteError> {
        if waypoints.is_empty() {
            return Err(RouteError::NoWaypoints(route.id));
        }

        let latest = waypoints
            .iter()
            .map(|w| w.latest_reading().ok_or(RouteError::NoSensorData(w.id)))
            .collect::<Result<Vec<_>, _>>()?;

        let conditions =
            ConditionAverages::from_readings(latest).ok_or(RouteError::NoWaypoints(route.id))?;

        let speed_kmh = model.predict_conditions(&conditions, total_weight);
        let distance_km = path_distance_km(waypoints);
        let time_h = distance_km / speed_kmh;

        Ok(RouteScore {
            conditions,
            prediction: Prediction {
                distance_km,
                speed_kmh,
                time_h,
            },
        })
    }

    /// Pick the route with the lowest predicted delivery time
    pub fn select_optimal_route(
        &self,
        delivery: &Delivery,
        include_weight: bool,
        consider_perishable: bool,
    ) -> Result<RouteRecommendation, RouteError> {
        let routes = self.routes.routes_by_company(delivery.company_id)?;
        if routes.is_empty() {
            return Err(RouteError::NoRoutesFound(delivery.company_id));
        }

        let candidates = routes
            .into_iter()
            .map(|route| -> Result<_, RouteError> {
                let waypoints = self.routes.waypoints_by_route(route.id)?;
                Ok((route, waypoints))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let samples = self.build_training_set(&candidates, include_weight)?;
        let model = RegressionModel::fit(&samples).map_err(|_| RouteError::NoTrainingData)?;

        let total_weight = if include_weight {
            delivery.total_weight()
        } else {
            0.0
        };
        let is_perishable = delivery.has_perishable();

        let mut best: Option<(SelectionReason, Prediction, &Route, &Vec<Waypoint>)> = None;

        for (route, waypoints) in &candidates {
            let score = self.score_route(route, waypoints, &model, total_weight)?;
            let prediction = score.prediction;

            if !(prediction.time_h.is_finite() && prediction.time_h >= 0.0) {
                warn!(
                    "Route {} skipped: predicted speed {:.2} km/h gives no usable time",
                    route.id, prediction.speed_kmh
                );
                continue;
            }

            let reason = classify(
                &score.conditions,
                is_perishable,
                consider_perishable,
                &self.config,
            );
            debug!(
                "Route {}: {:.2} km at {:.2} km/h = {:.3} h ({:?})",
                route.id, prediction.distance_km, prediction.speed_kmh, prediction.time_h, reason
            );

            if best.map_or(true, |(_, b, _, _)| prediction.time_h < b.time_h) {
                best = Some((reason, prediction, route, waypoints));
            }
        }

        let (reason, prediction, route, waypoints) = best.ok_or(RouteError::NoOptimalRoute)?;

        info!(
            "Delivery {}: route {} selected, {:.3} h predicted by a model of {} samples",
            delivery.id, route.id, prediction.time_h, model.sample_count
        );

        Ok(RouteRecommendation {
            reason,
            prediction,
            coefficients: model.coefficients(),
            route: Route {
                waypoints: waypoints.clone(),
                ..route.clone()
            },
        })
    }
}
