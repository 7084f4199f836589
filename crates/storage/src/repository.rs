//! Repository Implementation

use crate::{DeliveryStore, RouteStore, StorageError};
use route_domain::{Delivery, EntityId, Route, SensorData, Waypoint};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// Serializable set of routes and deliveries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(default)]
    pub deliveries: Vec<Delivery>,
}

impl Snapshot {
    /// Parse a snapshot from JSON
    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        serde_json::from_str(json).map_err(|e| StorageError::SerializationError(e.to_string()))
    }
}

/// Repository for route and delivery data (in-memory)
pub struct InMemoryStore {
    routes: Mutex<Vec<Route>>,
    deliveries: Mutex<Vec<Delivery>>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StorageError> {
    mutex
        .lock()
        .map_err(|e| StorageError::DatabaseError(format!("Lock error: {}", e)))
}

impl InMemoryStore {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            routes: Mutex::new(Vec::new()),
            deliveries: Mutex::new(Vec::new()),
        }
    }

    /// Create a repository holding the given snapshot
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        info!(
            "Loading snapshot with {} routes and {} deliveries",
            snapshot.routes.len(),
            snapshot.deliveries.len()
        );
        Self {
            routes: Mutex::new(snapshot.routes),
            deliveries: Mutex::new(snapshot.deliveries),
        }
    }

    /// Insert or replace a route
    pub fn upsert_route(&self, route: Route) -> Result<(), StorageError> {
        let mut routes = lock(&self.routes)?;
        match routes.iter_mut().find(|r| r.id == route.id) {
            Some(existing) => *existing = route,
            None => routes.push(route),
        }
        Ok(())
    }

    /// Insert or replace a delivery
    pub fn upsert_delivery(&self, delivery: Delivery) -> Result<(), StorageError> {
        let mut deliveries = lock(&self.deliveries)?;
        match deliveries.iter_mut().find(|d| d.id == delivery.id) {
            Some(existing) => *existing = delivery,
            None => deliveries.push(delivery),
        }
        Ok(())
    }

    /// Append a reading to the waypoint it belongs to
    pub fn append_reading(&self, reading: SensorData) -> Result<(), StorageError> {
        let mut routes = lock(&self.routes)?;
        let waypoint = routes
            .iter_mut()
            .flat_map(|r| r.waypoints.iter_mut())
            .find(|w| w.id == reading.waypoint_id)
            .ok_or(StorageError::NotFound)?;

        debug!("Appending reading {} to waypoint {}", reading.id, waypoint.id);
        waypoint.sensor_data.push(reading);
        Ok(())
    }

    /// Get a route by ID
    pub fn route(&self, route_id: EntityId) -> Result<Route, StorageError> {
        lock(&self.routes)?
            .iter()
            .find(|r| r.id == route_id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    /// Get a delivery by ID
    pub fn delivery(&self, delivery_id: EntityId) -> Result<Delivery, StorageError> {
        lock(&self.deliveries)?
            .iter()
            .find(|d| d.id == delivery_id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    /// Get total route count
    pub fn route_count(&self) -> usize {
        self.routes.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// Get total delivery count
    pub fn delivery_count(&self) -> usize {
        self.deliveries.lock().map(|d| d.len()).unwrap_or(0)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteStore for InMemoryStore {
    fn routes_by_company(&self, company_id: EntityId) -> Result<Vec<Route>, StorageError> {
        let routes = lock(&self.routes)?;
        Ok(routes
            .iter()
            .filter(|r| r.company_id == company_id)
            .cloned()
            .collect())
    }

    fn waypoints_by_route(&self, route_id: EntityId) -> Result<Vec<Waypoint>, StorageError> {
        let routes = lock(&self.routes)?;
        routes
            .iter()
            .find(|r| r.id == route_id)
            .map(|r| r.waypoints.clone())
            .ok_or(StorageError::NotFound)
    }
}

impl DeliveryStore for InMemoryStore {
    fn completed_deliveries_by_route(
        &self,
        route_id: EntityId,
    ) -> Result<Vec<Delivery>, StorageError> {
        let deliveries = lock(&self.deliveries)?;
        Ok(deliveries
            .iter()
            .filter(|d| d.route_id == route_id && d.is_completed())
            .cloned()
            .collect())
    }
}
