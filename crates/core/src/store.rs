//! Object store port.
//!
//! The versioned service talks to storage only through [`ObjectStore`], so
//! the PostgreSQL store and the in-memory store are interchangeable.

use async_trait::async_trait;

use crate::entity::{NewEntity, StoredEntity};
use crate::types::{DbId, LogicalKey};

/// Errors raised by an object store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage backend failure: {0}")]
    Backend(String),
}

/// Keyed storage for version rows of one entity kind.
///
/// An unknown id is never an error: `get` and `update` return `None` and
/// `delete` returns `false`.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// All stored rows, in id order.
    async fn list(&self) -> Result<Vec<StoredEntity>, StoreError>;

    async fn get(&self, id: DbId) -> Result<Option<StoredEntity>, StoreError>;

    /// Insert a row and return it with its assigned id.
    async fn add(&self, entity: NewEntity) -> Result<StoredEntity, StoreError>;

    /// Overwrite the row with the given id. `updated_date` is refreshed by
    /// the store.
    async fn update(
        &self,
        id: DbId,
        entity: &StoredEntity,
    ) -> Result<Option<StoredEntity>, StoreError>;

    /// Permanently remove a row. Returns `true` if a row was removed.
    async fn delete(&self, id: DbId) -> Result<bool, StoreError>;

    /// Every row sharing one logical key, in id order.
    async fn list_by_key(&self, pk_id: LogicalKey) -> Result<Vec<StoredEntity>, StoreError> {
        let rows = self.list().await?;
        Ok(rows.into_iter().filter(|e| e.pk_id == pk_id).collect())
    }
}
