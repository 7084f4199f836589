//! Delivery Duration Parsing

use chrono::Duration;

use crate::MetricsError;

/// Parse an `HH:MM:SS` duration string.
///
/// Each part must be a non-negative integer. Hours may exceed 24 and minutes or
/// seconds may exceed 59; they are added up as given.
pub fn parse_duration(value: &str) -> Result<Duration, MetricsError> {
    let invalid = || MetricsError::InvalidDuration(value.to_string());

    let parts: Vec<&str> = value.trim().split(':').collect();
    if parts.len() != 3 {
        return Err(invalid());
    }

    let mut total_seconds: i64 = 0;
    for (part, unit) in parts.iter().zip([3600i64, 60, 1]) {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let amount: i64 = part.parse().map_err(|_| invalid())?;
        total_seconds = amount
            .checked_mul(unit)
            .and_then(|s| total_seconds.checked_add(s))
            .ok_or_else(invalid)?;
    }

    Duration::try_seconds(total_seconds).ok_or_else(invalid)
}

/// Duration expressed in fractional hours
pub fn duration_hours(duration: Duration) -> f64 {
    duration.num_seconds() as f64 / 3600.0
}
