//! Catalog of garment types and services
//!
//! Two small reference collections behind one service. Orders snapshot the
//! catalog name and price at attach time, so edits and deletions here never
//! rewrite existing orders.

use crate::storage::{Storage, StorageResult};
use parking_lot::RwLock;
use shared::models::{GarmentType, GarmentTypeCreate, Service, ServiceCreate};
use uuid::Uuid;

pub struct CatalogService {
    storage: Storage,
    garment_types: RwLock<Vec<GarmentType>>,
    services: RwLock<Vec<Service>>,
}

impl CatalogService {
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            garment_types: RwLock::new(Vec::new()),
            services: RwLock::new(Vec::new()),
        }
    }

    pub fn load(&self) -> StorageResult<()> {
        let garment_types = self.storage.get_garment_types()?;
        let services = self.storage.get_services()?;
        tracing::info!(
            "Loaded catalog: {} garment types, {} services",
            garment_types.len(),
            services.len()
        );
        *self.garment_types.write() = garment_types;
        *self.services.write() = services;
        Ok(())
    }

    pub fn add_garment_type(&self, create: GarmentTypeCreate) -> StorageResult<GarmentType> {
        let garment_type = GarmentType {
            uuid: Uuid::new_v4().to_string(),
            name: create.name.trim().to_string(),
        };
        self.storage.put_garment_type(&garment_type)?;
        self.garment_types.write().push(garment_type.clone());
        Ok(garment_type)
    }

    pub fn rename_garment_type(&self, uuid: &str, name: &str) -> StorageResult<()> {
        let mut garment_types = self.garment_types.write();
        let Some(garment_type) = garment_types.iter_mut().find(|g| g.uuid == uuid) else {
            tracing::warn!(garment_type_id = uuid, "Rename for unknown garment type ignored");
            return Ok(());
        };
        garment_type.name = name.trim().to_string();
        self.storage.put_garment_type(garment_type)?;
        Ok(())
    }

    pub fn remove_garment_type(&self, uuid: &str) -> StorageResult<()> {
        self.storage.delete_garment_type(uuid)?;
        self.garment_types.write().retain(|g| g.uuid != uuid);
        Ok(())
    }

    pub fn garment_types(&self) -> Vec<GarmentType> {
        self.garment_types.read().clone()
    }

    pub fn add_service(&self, create: ServiceCreate) -> StorageResult<Service> {
        let service = Service {
            uuid: Uuid::new_v4().to_string(),
            name: create.name.trim().to_string(),
            default_price: create.default_price,
        };
        self.storage.put_service(&service)?;
        self.services.write().push(service.clone());
        Ok(service)
    }

    pub fn update_service(&self, uuid: &str, create: ServiceCreate) -> StorageResult<()> {
        let mut services = self.services.write();
        let Some(service) = services.iter_mut().find(|s| s.uuid == uuid) else {
            tracing::warn!(service_id = uuid, "Update for unknown service ignored");
            return Ok(());
        };
        service.name = create.name.trim().to_string();
        service.default_price = create.default_price;
        self.storage.put_service(service)?;
        Ok(())
    }

    pub fn remove_service(&self, uuid: &str) -> StorageResult<()> {
        self.storage.delete_service(uuid)?;
        self.services.write().retain(|s| s.uuid != uuid);
        Ok(())
    }

    pub fn services(&self) -> Vec<Service> {
        self.services.read().clone()
    }

    pub fn get_service(&self, uuid: &str) -> Option<Service> {
        self.services.read().iter().find(|s| s.uuid == uuid).cloned()
    }
}
