//! Delivery Speed Model
//!
//! Fits a linear estimator of delivery speed from historical training samples
//! and predicts speed for current conditions.

mod regression;

pub use regression::{calculate_beta, RegressionModel, COEFFICIENT_COUNT};

use thiserror::Error;

/// Speed model errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("Cannot fit a model without training samples")]
    EmptyTrainingSet,
}
