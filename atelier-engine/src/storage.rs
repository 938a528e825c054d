//! redb-based storage layer
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `clients` | `uuid` | `Client` | Client directory |
//! | `garment_types` | `uuid` | `GarmentType` | Catalog |
//! | `services` | `uuid` | `Service` | Catalog |
//! | `orders` | `uuid` | `Order` | Order ledger (never deleted in normal flow) |
//! | `monthly_metrics` | `YYYY-MM` | `MonthlyMetrics` | Persisted monthly counters |
//!
//! Values are JSON documents. redb commits with `Durability::Immediate`, so a
//! returned `commit()` is persistent and the file is always in a consistent
//! state, which is what a shop machine that may lose power needs. Bulk
//! imports run inside one write transaction and land all-or-nothing.

use redb::{
    Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{Client, GarmentType, MonthlyMetrics, Service};
use shared::order::Order;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

const CLIENTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("clients");
const GARMENT_TYPES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("garment_types");
const SERVICES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("services");
const ORDERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("orders");
const METRICS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("monthly_metrics");

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Embedded store, one keyed collection per entity
#[derive(Clone)]
pub struct Storage {
    db: Arc<Database>,
}

impl Storage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        let storage = Self { db: Arc::new(db) };
        storage.init_tables()?;
        Ok(storage)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        let storage = Self { db: Arc::new(db) };
        storage.init_tables()?;
        Ok(storage)
    }

    fn init_tables(&self) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let _ = write_txn.open_table(CLIENTS_TABLE)?;
            let _ = write_txn.open_table(GARMENT_TYPES_TABLE)?;
            let _ = write_txn.open_table(SERVICES_TABLE)?;
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(METRICS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    // ========== Generic JSON record helpers ==========

    fn get_all<T: DeserializeOwned>(
        &self,
        table_def: TableDefinition<&str, &[u8]>,
    ) -> StorageResult<Vec<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(table_def)?;
        let mut records = Vec::new();
        for entry in table.iter()? {
            let (_key, value) = entry?;
            records.push(serde_json::from_slice(value.value())?);
        }
        Ok(records)
    }

    fn get_one<T: DeserializeOwned>(
        &self,
        table_def: TableDefinition<&str, &[u8]>,
        key: &str,
    ) -> StorageResult<Option<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(table_def)?;
        match table.get(key)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    fn put_one<T: Serialize>(
        &self,
        table_def: TableDefinition<&str, &[u8]>,
        key: &str,
        record: &T,
    ) -> StorageResult<()> {
        let value = serde_json::to_vec(record)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(table_def)?;
            table.insert(key, value.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn delete_one(
        &self,
        table_def: TableDefinition<&str, &[u8]>,
        key: &str,
    ) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(table_def)?;
            table.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    // ========== Clients ==========

    pub fn get_clients(&self) -> StorageResult<Vec<Client>> {
        self.get_all(CLIENTS_TABLE)
    }

    pub fn put_client(&self, client: &Client) -> StorageResult<()> {
        self.put_one(CLIENTS_TABLE, &client.uuid, client)
    }

    pub fn delete_client(&self, uuid: &str) -> StorageResult<()> {
        self.delete_one(CLIENTS_TABLE, uuid)
    }

    pub fn count_clients(&self) -> StorageResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(CLIENTS_TABLE)?;
        Ok(table.len()?)
    }

    /// Upsert a batch of clients in a single transaction (backup import)
    pub fn import_clients(&self, clients: &[Client]) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(CLIENTS_TABLE)?;
            for client in clients {
                let value = serde_json::to_vec(client)?;
                table.insert(client.uuid.as_str(), value.as_slice())?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    // ========== Catalog ==========

    pub fn get_garment_types(&self) -> StorageResult<Vec<GarmentType>> {
        self.get_all(GARMENT_TYPES_TABLE)
    }

    pub fn put_garment_type(&self, garment_type: &GarmentType) -> StorageResult<()> {
        self.put_one(GARMENT_TYPES_TABLE, &garment_type.uuid, garment_type)
    }

    pub fn delete_garment_type(&self, uuid: &str) -> StorageResult<()> {
        self.delete_one(GARMENT_TYPES_TABLE, uuid)
    }

    pub fn get_services(&self) -> StorageResult<Vec<Service>> {
        self.get_all(SERVICES_TABLE)
    }

    pub fn put_service(&self, service: &Service) -> StorageResult<()> {
        self.put_one(SERVICES_TABLE, &service.uuid, service)
    }

    pub fn delete_service(&self, uuid: &str) -> StorageResult<()> {
        self.delete_one(SERVICES_TABLE, uuid)
    }

    // ========== Orders ==========

    pub fn get_orders(&self) -> StorageResult<Vec<Order>> {
        self.get_all(ORDERS_TABLE)
    }

    pub fn get_order(&self, uuid: &str) -> StorageResult<Option<Order>> {
        self.get_one(ORDERS_TABLE, uuid)
    }

    pub fn put_order(&self, order: &Order) -> StorageResult<()> {
        self.put_one(ORDERS_TABLE, &order.uuid, order)
    }

    /// Upsert a batch of orders in a single transaction (backup import)
    pub fn import_orders(&self, orders: &[Order]) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(ORDERS_TABLE)?;
            for order in orders {
                let value = serde_json::to_vec(order)?;
                table.insert(order.uuid.as_str(), value.as_slice())?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    // ========== Monthly Metrics ==========

    pub fn get_metrics(&self, month: &str) -> StorageResult<Option<MonthlyMetrics>> {
        self.get_one(METRICS_TABLE, month)
    }

    pub fn put_metrics(&self, metrics: &MonthlyMetrics) -> StorageResult<()> {
        self.put_one(METRICS_TABLE, &metrics.month, metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::OrderStatus;

    fn sample_client(uuid: &str, name: &str) -> Client {
        Client {
            uuid: uuid.to_string(),
            name: name.to_string(),
            phone: None,
        }
    }

    #[test]
    fn client_round_trip_and_delete() {
        let storage = Storage::open_in_memory().unwrap();

        storage.put_client(&sample_client("c1", "MARIA")).unwrap();
        storage.put_client(&sample_client("c2", "JOANA")).unwrap();
        assert_eq!(storage.count_clients().unwrap(), 2);

        storage.delete_client("c1").unwrap();
        let clients = storage.get_clients().unwrap();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].name, "JOANA");
    }

    #[test]
    fn put_is_an_upsert() {
        let storage = Storage::open_in_memory().unwrap();

        storage.put_client(&sample_client("c1", "MARIA")).unwrap();
        storage.put_client(&sample_client("c1", "MARIA SILVA")).unwrap();

        let clients = storage.get_clients().unwrap();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].name, "MARIA SILVA");
    }

    #[test]
    fn order_round_trip() {
        let storage = Storage::open_in_memory().unwrap();
        let order = Order {
            uuid: "o1".to_string(),
            client_id: "c1".to_string(),
            client_name: "MARIA".to_string(),
            client_phone: None,
            delivery_date: "2026-09-01".to_string(),
            delivery_time: "14:00".to_string(),
            items: vec![],
            status: OrderStatus::Pending,
            created_date: "2026-08-26".to_string(),
            payments: vec![],
            amount_paid: 0.0,
            discount_percent: 0.0,
        };

        storage.put_order(&order).unwrap();
        let loaded = storage.get_order("o1").unwrap().unwrap();
        assert_eq!(loaded, order);
        assert!(storage.get_order("missing").unwrap().is_none());
    }

    #[test]
    fn data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atelier.redb");

        {
            let storage = Storage::open(&path).unwrap();
            storage.put_client(&sample_client("c1", "MARIA")).unwrap();
        }

        let storage = Storage::open(&path).unwrap();
        let clients = storage.get_clients().unwrap();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].name, "MARIA");
    }

    #[test]
    fn metrics_keyed_by_month() {
        let storage = Storage::open_in_memory().unwrap();
        let mut metrics = MonthlyMetrics::zeroed("2026-08");
        metrics.completed_count = 2;
        metrics.invoiced_total = 63.0;

        storage.put_metrics(&metrics).unwrap();
        assert_eq!(storage.get_metrics("2026-08").unwrap().unwrap(), metrics);
        assert!(storage.get_metrics("2026-07").unwrap().is_none());
    }
}
