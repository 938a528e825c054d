//! Client directory
//!
//! Registered clients with a read cache over storage. Names are stored
//! uppercased and phones in the Brazilian display format so lookups and
//! duplicate detection compare like with like.

use crate::storage::{Storage, StorageResult};
use parking_lot::RwLock;
use shared::models::{Client, ClientCreate};
use uuid::Uuid;

/// Uppercase a name for storage and comparison
pub fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Format an 11-digit phone number as `(DD) DDDDD-DDDD`
///
/// Anything that is not exactly 11 digits after stripping is returned
/// unchanged; partial input is better kept than mangled.
pub fn format_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 11 {
        format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..])
    } else {
        phone.to_string()
    }
}

pub struct ClientDirectory {
    storage: Storage,
    clients: RwLock<Vec<Client>>,
}

impl ClientDirectory {
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            clients: RwLock::new(Vec::new()),
        }
    }

    pub fn load(&self) -> StorageResult<()> {
        let clients = self.storage.get_clients()?;
        tracing::info!("Loaded {} clients", clients.len());
        *self.clients.write() = clients;
        Ok(())
    }

    /// Register a new client, normalizing name and phone
    pub fn add(&self, create: ClientCreate) -> StorageResult<Client> {
        let client = Client {
            uuid: Uuid::new_v4().to_string(),
            name: normalize_name(&create.name),
            phone: create.phone.map(|p| format_phone(&p)),
        };
        self.storage.put_client(&client)?;
        tracing::info!(client_id = %client.uuid, name = %client.name, "Client registered");
        self.clients.write().push(client.clone());
        Ok(client)
    }

    /// Update an existing client's name and phone
    ///
    /// An unknown id is logged and ignored.
    pub fn update(&self, uuid: &str, create: ClientCreate) -> StorageResult<()> {
        let mut clients = self.clients.write();
        let Some(client) = clients.iter_mut().find(|c| c.uuid == uuid) else {
            tracing::warn!(client_id = uuid, "Update for unknown client ignored");
            return Ok(());
        };
        client.name = normalize_name(&create.name);
        client.phone = create.phone.map(|p| format_phone(&p));
        self.storage.put_client(client)?;
        Ok(())
    }

    pub fn remove(&self, uuid: &str) -> StorageResult<()> {
        self.storage.delete_client(uuid)?;
        self.clients.write().retain(|c| c.uuid != uuid);
        Ok(())
    }

    pub fn list(&self) -> Vec<Client> {
        self.clients.read().clone()
    }

    pub fn get(&self, uuid: &str) -> Option<Client> {
        self.clients.read().iter().find(|c| c.uuid == uuid).cloned()
    }

    /// Match on the normalized (name, phone) pair
    ///
    /// This is the identity used when merging imported backups.
    pub fn find_by_name_phone(&self, name: &str, phone: Option<&str>) -> Option<Client> {
        let name = normalize_name(name);
        let phone = phone.map(format_phone);
        self.clients
            .read()
            .iter()
            .find(|c| c.name == name && c.phone == phone)
            .cloned()
    }
}
