//! In-memory [`ObjectStore`] for tests and database-less runs.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::entity::{NewEntity, StoredEntity};
use crate::store::{ObjectStore, StoreError};
use crate::types::DbId;

#[derive(Default)]
struct Inner {
    rows: BTreeMap<DbId, StoredEntity>,
    last_id: DbId,
}

/// Process-local store. Ids start at 1 and are never reused.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list(&self) -> Result<Vec<StoredEntity>, StoreError> {
        Ok(self.inner.read().await.rows.values().cloned().collect())
    }

    async fn get(&self, id: DbId) -> Result<Option<StoredEntity>, StoreError> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn add(&self, entity: NewEntity) -> Result<StoredEntity, StoreError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let stored = entity.into_stored(inner.last_id);
        inner.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: DbId,
        entity: &StoredEntity,
    ) -> Result<Option<StoredEntity>, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(existing) = inner.rows.get_mut(&id) else {
            return Ok(None);
        };
        *existing = StoredEntity {
            id,
            updated_date: Utc::now(),
            ..entity.clone()
        };
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.rows.remove(&id).is_some())
    }
}
