//! Route Metrics Collection
//!
//! Converts a completed delivery and the sensor history of its route into a
//! training sample for the delivery speed model.

mod collector;
mod duration;
mod error;
mod statistics;

pub use collector::{RouteMetricsCollector, TrainingSample, DEFAULT_WINDOW_PADDING_SECS};
pub use duration::{duration_hours, parse_duration};
pub use error::MetricsError;
pub use statistics::ConditionAverages;
