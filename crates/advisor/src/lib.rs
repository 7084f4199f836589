//! Route Advisor Service
//!
//! Entry points for delivery planning: recommend the fastest route for a
//! delivery and report weather hazards along a route.

mod cli;
mod logging;
mod settings;

pub use cli::Args;
pub use logging::{init_logging, parse_level};
pub use settings::{LoggingConfig, Settings, ENV_PREFIX};

use route_domain::{Delivery, EntityId, Route};
use route_optimizer::{Prediction, RouteError, RouteOptimizer};
use serde::{Deserialize, Serialize};
use storage::{DeliveryStore, InMemoryStore, RouteStore, StorageError};
use thiserror::Error;
use tracing::info;
use weather_alerts::{AlertError, WeatherAlert, WeatherAlertEvaluator};

/// Service errors
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("Route selection failed: {0}")]
    Route(#[from] RouteError),

    #[error("Weather alert failed: {0}")]
    Alert(#[from] AlertError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

/// Response for an optimal route request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalRouteResponse {
    pub message: String,
    pub prediction: Prediction,
    pub coefficients: Vec<f64>,
    pub route: Route,
}

/// Recommendation for a stored delivery together with hazards on the chosen route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryReport {
    pub delivery_id: EntityId,
    pub recommendation: OptimalRouteResponse,
    pub weather_alerts: Vec<WeatherAlert>,
}

/// Route advisor over a route and delivery store
pub struct RouteAdvisor<S> {
    store: S,
    settings: Settings,
    evaluator: WeatherAlertEvaluator,
}

impl<S> RouteAdvisor<S>
where
    S: RouteStore + DeliveryStore,
{
    /// Create a new advisor
    pub fn new(store: S, settings: Settings) -> Self {
        let evaluator = WeatherAlertEvaluator::new(settings.alerts.clone());
        Self {
            store,
            settings,
            evaluator,
        }
    }

    /// Get the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Recommend the route with the lowest predicted delivery time
    pub fn get_optimal_route(
        &self,
        delivery: &Delivery,
        include_weight: bool,
        consider_perishable: bool,
    ) -> Result<OptimalRouteResponse, AdvisorError> {
        let optimizer =
            RouteOptimizer::new(&self.store, &self.store, self.settings.optimizer.clone());
        let recommendation =
            optimizer.select_optimal_route(delivery, include_weight, consider_perishable)?;

        Ok(OptimalRouteResponse {
            message: recommendation.message().to_string(),
            prediction: recommendation.prediction,
            coefficients: recommendation.coefficients.to_vec(),
            route: recommendation.route,
        })
    }

    /// Weather hazards on a route, from the latest reading of each waypoint
    pub fn get_weather_alert(&self, route: &Route) -> Result<Vec<WeatherAlert>, AdvisorError> {
        Ok(self.evaluator.evaluate(route)?)
    }
}

impl RouteAdvisor<InMemoryStore> {
    /// Recommend a route for a stored delivery and check it for hazards
    pub fn report(
        &self,
        delivery_id: EntityId,
        include_weight: bool,
        consider_perishable: bool,
    ) -> Result<DeliveryReport, AdvisorError> {
        let delivery = self.store.delivery(delivery_id)?;
        let recommendation =
            self.get_optimal_route(&delivery, include_weight, consider_perishable)?;
        let weather_alerts = self.get_weather_alert(&recommendation.route)?;

        info!(
            "Delivery {}: route {} recommended with {} weather alerts",
            delivery_id,
            recommendation.route.id,
            weather_alerts.len()
        );

        Ok(DeliveryReport {
            delivery_id,
            recommendation,
            weather_alerts,
        })
    }
}
