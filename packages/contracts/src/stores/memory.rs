//! In-memory storage implementation for testing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::{StoreError, StoreResult};
use crate::traits::ContractStore;
use crate::types::{Client, NewClient, NewEvent};

/// In-memory contract store.
///
/// Mirrors the SQLite store's semantics (sequential ids, unique tax_id)
/// so stage tests run without a database. Data is lost on drop.
#[derive(Default)]
pub struct MemoryStore {
    clients: RwLock<Vec<Client>>,
    events: RwLock<Vec<NewEvent>>,
    fail_next_client_insert: AtomicBool,
    fail_next_event_insert: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All persisted clients, in insert order.
    pub fn clients(&self) -> Vec<Client> {
        self.clients.read().unwrap().clone()
    }

    /// All persisted events, in insert order.
    pub fn events(&self) -> Vec<NewEvent> {
        self.events.read().unwrap().clone()
    }

    pub fn client_count(&self) -> usize {
        self.clients.read().unwrap().len()
    }

    pub fn event_count(&self) -> usize {
        self.events.read().unwrap().len()
    }

    /// Events linked to one client.
    pub fn events_for_client(&self, client_id: i64) -> Vec<NewEvent> {
        self.events
            .read()
            .unwrap()
            .iter()
            .filter(|e| e.client_id == client_id)
            .cloned()
            .collect()
    }

    /// Make the next `insert_client` fail, to exercise skip handling.
    pub fn fail_next_client_insert(&self) {
        self.fail_next_client_insert.store(true, Ordering::SeqCst);
    }

    /// Make the next `insert_event` fail, to exercise partial success.
    pub fn fail_next_event_insert(&self) {
        self.fail_next_event_insert.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ContractStore for MemoryStore {
    async fn find_client_by_tax_id(&self, tax_id: &str) -> StoreResult<Option<Client>> {
        Ok(self
            .clients
            .read()
            .unwrap()
            .iter()
            .find(|c| c.tax_id == tax_id)
            .cloned())
    }

    async fn insert_client(&self, client: &NewClient) -> StoreResult<i64> {
        if self.fail_next_client_insert.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Query("injected client insert failure".into()));
        }

        let mut clients = self.clients.write().unwrap();
        if clients.iter().any(|c| c.tax_id == client.tax_id) {
            return Err(StoreError::Query(
                format!("UNIQUE constraint failed: clients.tax_id ({})", client.tax_id).into(),
            ));
        }

        let id = clients.len() as i64 + 1;
        clients.push(Client {
            id,
            legal_name: client.legal_name.clone(),
            person_type: client.person_type.clone(),
            tax_id: client.tax_id.clone(),
            responsible_name: client.responsible_name.clone(),
            category: client.category,
            postal_code: client.postal_code.clone(),
            street: client.street.clone(),
            number: client.number.clone(),
            complement: client.complement.clone(),
            district: client.district.clone(),
            city: client.city.clone(),
            state_code: client.state_code.clone(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn insert_event(&self, event: &NewEvent) -> StoreResult<i64> {
        if self.fail_next_event_insert.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Query("injected event insert failure".into()));
        }

        let mut events = self.events.write().unwrap();
        events.push(event.clone());
        Ok(events.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClientCategory;

    fn sample_client(tax_id: &str) -> NewClient {
        NewClient {
            legal_name: "ACME".to_string(),
            person_type: Some("PJ".to_string()),
            tax_id: tax_id.to_string(),
            responsible_name: None,
            category: ClientCategory::General,
            postal_code: None,
            street: None,
            number: None,
            complement: None,
            district: None,
            city: None,
            state_code: None,
        }
    }

    #[tokio::test]
    async fn test_unique_tax_id_enforced() {
        let store = MemoryStore::new();
        store.insert_client(&sample_client("1")).await.unwrap();
        assert!(store.insert_client(&sample_client("1")).await.is_err());
        assert_eq!(store.client_count(), 1);
    }

    #[tokio::test]
    async fn test_injected_failures_fire_once() {
        let store = MemoryStore::new();
        store.fail_next_client_insert();
        assert!(store.insert_client(&sample_client("1")).await.is_err());
        assert!(store.insert_client(&sample_client("1")).await.is_ok());
    }
}
