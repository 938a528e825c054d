//! Shared types for the Atelier order engine
//!
//! Data models used by the engine crate and by any shell embedding it
//! (desktop UI, receipt/report renderers). Everything here is plain
//! serde-serializable value types; behavior lives in `atelier-engine`.

pub mod models;
pub mod order;

// Re-exports
pub use serde::{Deserialize, Serialize};
