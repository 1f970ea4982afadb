//! ContractStore trait for the persisted datastore.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::{Client, NewClient, NewEvent};

/// The persisted store the importer writes to.
///
/// Only three operations are needed: key-based client lookup, client
/// insert, event insert. Imports are single-writer and sequential, so
/// find-or-create stays a check-then-insert; the store's `tax_id` UNIQUE
/// constraint backstops it.
#[async_trait]
pub trait ContractStore: Send + Sync {
    /// Find a client by its digits-only tax id.
    async fn find_client_by_tax_id(&self, tax_id: &str) -> StoreResult<Option<Client>>;

    /// Insert a new client, returning its generated identifier.
    async fn insert_client(&self, client: &NewClient) -> StoreResult<i64>;

    /// Insert a new event linked to a resolved client.
    async fn insert_event(&self, event: &NewEvent) -> StoreResult<i64>;
}
