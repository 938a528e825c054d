//! Data models
//!
//! Catalog, client and metrics records persisted in the embedded store.
//! All IDs are v4 UUID strings.

pub mod catalog;
pub mod client;
pub mod metrics;

// Re-exports
pub use catalog::*;
pub use client::*;
pub use metrics::*;
