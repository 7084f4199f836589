//! Logging setup

use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::settings::LoggingConfig;
use crate::AdvisorError;

/// Parse a level name, falling back to `INFO` when unrecognized
pub fn parse_level(level: &str) -> Level {
    Level::from_str(level.trim()).unwrap_or(Level::INFO)
}

/// Initialize the global tracing subscriber
pub fn init_logging(config: &LoggingConfig) -> Result<(), AdvisorError> {
    let level = parse_level(&config.level);
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    let result = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.map_err(|e| AdvisorError::Logging(e.to_string()))
}
