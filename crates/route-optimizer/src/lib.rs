//! Route Optimizer
//!
//! Fits a delivery speed model on a company's delivery history and uses it to
//! score every candidate route for a new delivery.

mod config;
mod optimizer;

pub use config::OptimizerConfig;
pub use optimizer::{
    classify, Prediction, RouteOptimizer, RouteRecommendation, RouteScore, SelectionReason,
};

use route_domain::EntityId;
use storage::StorageError;
use thiserror::Error;

/// Route selection errors
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("No routes found for company {0}")]
    NoRoutesFound(EntityId),

    #[error("No waypoints found for route {0}")]
    NoWaypoints(EntityId),

    #[error("No sensor data for waypoint {0}")]
    NoSensorData(EntityId),

    #[error("No usable completed deliveries to train on")]
    NoTrainingData,

    #[error("No route could be scored")]
    NoOptimalRoute,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
