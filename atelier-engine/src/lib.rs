//! Atelier Engine - order and client management for a tailoring shop
//!
//! # Module layout
//!
//! ```text
//! atelier-engine/src/
//! ├── config.rs      # Environment configuration
//! ├── storage.rs     # Embedded redb store
//! ├── money.rs       # Decimal money math and validation
//! ├── draft.rs       # Draft order builder
//! ├── ledger/        # Persisted orders and status transitions
//! ├── metrics.rs     # Monthly financial aggregation
//! ├── clients.rs     # Client directory
//! ├── catalog.rs     # Garment types and services
//! ├── backup.rs      # JSON backup export/import
//! └── utils/         # Logger, time helpers
//! ```

pub mod backup;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod draft;
pub mod ledger;
pub mod metrics;
pub mod money;
pub mod storage;
pub mod utils;

use std::sync::Arc;

pub use backup::{BackupError, BackupService};
pub use catalog::CatalogService;
pub use clients::ClientDirectory;
pub use config::Config;
pub use draft::{DraftError, DraftOrder};
pub use ledger::{LedgerError, OrderLedger};
pub use metrics::FinancialAggregator;
pub use storage::{Storage, StorageError};
pub use utils::logger::{init_logger, init_logger_with_file};

/// The assembled engine: one storage handle shared by every service
pub struct Atelier {
    pub storage: Storage,
    pub clients: ClientDirectory,
    pub catalog: CatalogService,
    pub aggregator: Arc<FinancialAggregator>,
    pub ledger: OrderLedger,
    pub backup: BackupService,
}

impl Atelier {
    /// Open the database and load every service's cache
    pub fn open(config: &Config) -> Result<Self, StorageError> {
        let storage = Storage::open(config.db_path())?;

        let clients = ClientDirectory::new(storage.clone());
        clients.load()?;

        let catalog = CatalogService::new(storage.clone());
        catalog.load()?;

        let aggregator = Arc::new(FinancialAggregator::new(storage.clone()));
        let ledger = OrderLedger::new(storage.clone(), aggregator.clone());
        ledger
            .load()
            .map_err(|LedgerError::Storage(e)| e)?;

        let backup = BackupService::new(storage.clone());

        tracing::info!("Atelier engine ready");
        Ok(Self {
            storage,
            clients,
            catalog,
            aggregator,
            ledger,
            backup,
        })
    }
}
