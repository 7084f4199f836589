//! Metrics Error Types

use thiserror::Error;

/// Reasons a delivery cannot be turned into a training sample
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsError {
    /// Duration string is not `HH:MM:SS`
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    /// Duration parsed but is zero, so no speed can be derived
    #[error("Delivery duration is zero")]
    ZeroDuration,

    /// No sensor reading falls inside the delivery window
    #[error("No sensor readings within the delivery window")]
    NoReadingsInWindow,
}
