//! Client Model

use serde::{Deserialize, Serialize};

/// Client entity
///
/// Orders reference clients by `uuid` plus a denormalized name/phone
/// snapshot, so renaming a client never rewrites historic orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub uuid: String,
    /// Display name, upper-cased on save
    pub name: String,
    /// Canonical display format `(DD) DDDDD-DDDD` when present
    pub phone: Option<String>,
}

/// Create client payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientCreate {
    pub name: String,
    pub phone: Option<String>,
}
