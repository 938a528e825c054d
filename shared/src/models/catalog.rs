//! Catalog Models
//!
//! Garment types and services are static catalog entries. Orders capture a
//! denormalized name (and, for services, the price) at attach time, so
//! catalog edits never mutate historical orders.

use serde::{Deserialize, Serialize};

/// Garment type entity (shirt, pants, dress, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GarmentType {
    pub uuid: String,
    pub name: String,
}

/// Create garment type payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GarmentTypeCreate {
    pub name: String,
}

/// Service entity (hem, wash, zipper replacement, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub uuid: String,
    pub name: String,
    /// Suggested unit price; the price used on an order is captured at
    /// attach time and never re-derived from this field.
    pub default_price: f64,
}

/// Create service payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCreate {
    pub name: String,
    pub default_price: f64,
}
