//! Storage Layer
//!
//! Lookup interfaces used by route scoring, plus an in-memory repository
//! holding a snapshot of routes and deliveries.

mod repository;

pub use repository::{InMemoryStore, Snapshot};

use route_domain::{Delivery, EntityId, Route, Waypoint};
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Record not found")]
    NotFound,
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Route lookups
pub trait RouteStore {
    /// All routes owned by a company
    fn routes_by_company(&self, company_id: EntityId) -> Result<Vec<Route>, StorageError>;

    /// Waypoints of a route in travel order, with their readings
    fn waypoints_by_route(&self, route_id: EntityId) -> Result<Vec<Waypoint>, StorageError>;
}

/// Delivery lookups
pub trait DeliveryStore {
    /// Deliveries on a route whose status is completed
    fn completed_deliveries_by_route(
        &self,
        route_id: EntityId,
    ) -> Result<Vec<Delivery>, StorageError>;
}
