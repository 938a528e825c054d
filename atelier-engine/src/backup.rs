//! Backup export and import
//!
//! JSON snapshots of the client and order collections. Client import merges
//! by the (name, phone) pair so re-importing the same file is idempotent;
//! order import requires the client collection to be populated first, since
//! orders reference clients by id.

use crate::clients::{format_phone, normalize_name};
use crate::storage::{Storage, StorageError};
use crate::utils::time::now_millis;
use serde::{Deserialize, Serialize};
use shared::models::Client;
use shared::order::Order;
use thiserror::Error;
use uuid::Uuid;

pub const BACKUP_VERSION: &str = "1.0.0";

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid backup format: {0}")]
    InvalidFormat(String),
    #[error("Orders cannot be imported before any clients exist")]
    NoClients,
}

pub type BackupResult<T> = Result<T, BackupError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ClientBackup {
    #[serde(rename = "clients")]
    pub records: Vec<Client>,
    pub version: String,
    /// Epoch milliseconds at export time
    pub timestamp: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderBackup {
    #[serde(rename = "orders")]
    pub records: Vec<Order>,
    pub version: String,
    pub timestamp: i64,
}

pub struct BackupService {
    storage: Storage,
}

impl BackupService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn export_clients(&self) -> BackupResult<String> {
        let backup = ClientBackup {
            records: self.storage.get_clients()?,
            version: BACKUP_VERSION.to_string(),
            timestamp: now_millis(),
        };
        Ok(serde_json::to_string_pretty(&backup)?)
    }

    pub fn export_orders(&self) -> BackupResult<String> {
        let backup = OrderBackup {
            records: self.storage.get_orders()?,
            version: BACKUP_VERSION.to_string(),
            timestamp: now_millis(),
        };
        Ok(serde_json::to_string_pretty(&backup)?)
    }

    /// Import clients, merging by normalized (name, phone)
    ///
    /// A record matching an existing client keeps that client's id; anything
    /// else gets a fresh one. An empty backup imports nothing. Returns how
    /// many records were written.
    pub fn import_clients(&self, json: &str) -> BackupResult<usize> {
        let backup: ClientBackup = serde_json::from_str(json)
            .map_err(|e| BackupError::InvalidFormat(e.to_string()))?;

        let existing = self.storage.get_clients()?;
        let mut merged = Vec::with_capacity(backup.records.len());
        for record in backup.records {
            let name = normalize_name(&record.name);
            let phone = record.phone.as_deref().map(format_phone);
            let uuid = existing
                .iter()
                .find(|c| c.name == name && c.phone == phone)
                .map(|c| c.uuid.clone())
                .unwrap_or_else(|| Uuid::new_v4().to_string());
            merged.push(Client { uuid, name, phone });
        }

        let count = merged.len();
        self.storage.import_clients(&merged)?;
        tracing::info!("Imported {count} clients from backup");
        Ok(count)
    }

    /// Import orders wholesale, replacing records that share an id
    pub fn import_orders(&self, json: &str) -> BackupResult<usize> {
        if self.storage.count_clients()? == 0 {
            return Err(BackupError::NoClients);
        }

        let backup: OrderBackup = serde_json::from_str(json)
            .map_err(|e| BackupError::InvalidFormat(e.to_string()))?;

        let count = backup.records.len();
        self.storage.import_orders(&backup.records)?;
        tracing::info!("Imported {count} orders from backup");
        Ok(count)
    }
}
