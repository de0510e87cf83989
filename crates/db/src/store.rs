//! PostgreSQL adapter for the core [`ObjectStore`] port.

use async_trait::async_trait;
use strata_core::types::{DbId, LogicalKey};
use strata_core::{NewEntity, ObjectStore, Payload, StoreError, StoredEntity};

use crate::repositories::EntityRepo;
use crate::DbPool;

/// [`ObjectStore`] backed by one versioned entity table.
#[derive(Clone)]
pub struct PgObjectStore {
    pool: DbPool,
    table: &'static str,
}

impl PgObjectStore {
    /// Store over the table declared by payload type `P`.
    pub fn for_payload<P: Payload>(pool: DbPool) -> Self {
        Self {
            pool,
            table: P::TABLE,
        }
    }
}

fn backend_error(table: &'static str) -> impl Fn(sqlx::Error) -> StoreError {
    move |err| {
        tracing::error!(table, error = %err, "Database error");
        StoreError::Backend(err.to_string())
    }
}

#[async_trait]
impl ObjectStore for PgObjectStore {
    async fn list(&self) -> Result<Vec<StoredEntity>, StoreError> {
        let rows = EntityRepo::list(&self.pool, self.table)
            .await
            .map_err(backend_error(self.table))?;
        Ok(rows.into_iter().map(StoredEntity::from).collect())
    }

    async fn get(&self, id: DbId) -> Result<Option<StoredEntity>, StoreError> {
        let row = EntityRepo::find_by_id(&self.pool, self.table, id)
            .await
            .map_err(backend_error(self.table))?;
        Ok(row.map(StoredEntity::from))
    }

    async fn add(&self, entity: NewEntity) -> Result<StoredEntity, StoreError> {
        let row = EntityRepo::create(&self.pool, self.table, &entity)
            .await
            .map_err(backend_error(self.table))?;
        Ok(row.into())
    }

    async fn update(
        &self,
        id: DbId,
        entity: &StoredEntity,
    ) -> Result<Option<StoredEntity>, StoreError> {
        let row = EntityRepo::update(&self.pool, self.table, id, entity)
            .await
            .map_err(backend_error(self.table))?;
        Ok(row.map(StoredEntity::from))
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        EntityRepo::hard_delete(&self.pool, self.table, id)
            .await
            .map_err(backend_error(self.table))
    }

    async fn list_by_key(&self, pk_id: LogicalKey) -> Result<Vec<StoredEntity>, StoreError> {
        let rows = EntityRepo::list_by_key(&self.pool, self.table, pk_id)
            .await
            .map_err(backend_error(self.table))?;
        Ok(rows.into_iter().map(StoredEntity::from).collect())
    }
}
