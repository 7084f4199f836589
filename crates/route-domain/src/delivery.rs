//! Deliveries and Their Cargo

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::EntityId;

/// Lifecycle state of a delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
    /// Any status string this model does not know about
    #[serde(other)]
    Unknown,
}

impl DeliveryStatus {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::InProgress => "in_progress",
            DeliveryStatus::Completed => "completed",
            DeliveryStatus::Cancelled => "cancelled",
            DeliveryStatus::Unknown => "unknown",
        }
    }
}

/// Category of goods with its storage requirements
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductCategory {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Acceptable temperature range (°C)
    pub min_temperature: f64,
    pub max_temperature: f64,
    /// Acceptable humidity range (%)
    pub min_humidity: f64,
    pub max_humidity: f64,
    pub is_perishable: bool,
}

/// A product carried by a delivery
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Product {
    pub id: EntityId,
    pub name: String,
    /// Weight (kg)
    pub weight: f64,
    pub category: ProductCategory,
}

/// One trip along a route carrying products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub id: EntityId,
    pub company_id: EntityId,
    pub route_id: EntityId,
    pub status: DeliveryStatus,
    /// Departure time
    pub date: DateTime<Utc>,
    /// Trip duration as `HH:MM:SS`
    pub duration: String,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl Delivery {
    /// Whether the delivery has finished and may be used as history
    pub fn is_completed(&self) -> bool {
        self.status == DeliveryStatus::Completed
    }

    /// Sum of product weights (kg)
    pub fn total_weight(&self) -> f64 {
        self.products.iter().map(|p| p.weight).sum()
    }

    /// True when any product belongs to a perishable category
    pub fn has_perishable(&self) -> bool {
        self.products.iter().any(|p| p.category.is_perishable)
    }
}

impl Default for Delivery {
    fn default() -> Self {
        Self {
            id: 0,
            company_id: 0,
            route_id: 0,
            status: DeliveryStatus::default(),
            date: DateTime::<Utc>::UNIX_EPOCH,
            duration: "00:00:00".to_string(),
            products: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(weight: f64, is_perishable: bool) -> Product {
        Product {
            weight,
            category: ProductCategory {
                is_perishable,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_total_weight() {
        let delivery = Delivery {
            products: vec![product(12.5, false), product(7.5, true)],
            ..Default::default()
        };
        assert!((delivery.total_weight() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_has_perishable() {
        let mut delivery = Delivery {
            products: vec![product(1.0, false)],
            ..Default::default()
        };
        assert!(!delivery.has_perishable());

        delivery.products.push(product(2.0, true));
        assert!(delivery.has_perishable());
    }

    #[test]
    fn test_status_strings() {
        let status: DeliveryStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(status, DeliveryStatus::Completed);
        assert_eq!(status.as_str(), "completed");

        let status: DeliveryStatus = serde_json::from_str("\"in_progress\"").unwrap();
        assert_eq!(status, DeliveryStatus::InProgress);
    }

    #[test]
    fn test_unknown_status_is_not_completed() {
        let status: DeliveryStatus = serde_json::from_str("\"Completed\"").unwrap();
        assert_eq!(status, DeliveryStatus::Unknown);

        let delivery = Delivery {
            status,
            ..Default::default()
        };
        assert!(!delivery.is_completed());
    }
}
