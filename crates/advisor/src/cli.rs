//! Command-line arguments

use clap::Parser;
use route_domain::EntityId;
use std::path::PathBuf;

/// Recommend a route for a stored delivery and report weather hazards on it
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "route-advisor", version)]
pub struct Args {
    /// JSON snapshot holding routes and deliveries
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Delivery to plan
    #[arg(value_name = "DELIVERY_ID")]
    pub delivery_id: EntityId,

    /// Include cargo weight as a model feature
    #[arg(long = "weight")]
    pub include_weight: bool,

    /// Label the recommendation by perishable cargo
    #[arg(long = "perishable")]
    pub consider_perishable: bool,

    /// Settings file (TOML)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
