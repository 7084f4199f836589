//! Route Domain Model
//!
//! Provides the delivery, route, waypoint and sensor reading types shared by
//! the metrics collector, speed model, optimizer and weather alerting.

mod delivery;
mod distance;
mod route;

pub use delivery::{Delivery, DeliveryStatus, Product, ProductCategory};
pub use distance::{haversine_km, path_distance_km, GeoPoint, EARTH_RADIUS_KM};
pub use route::{Route, SensorData, Waypoint};

/// Identifier used for every stored entity
pub type EntityId = u64;
