//! Multi-version lifecycle for one payload kind.
//!
//! Every save appends a new row for the logical key and flips the previous
//! rows to non-latest. Drafts (rows with `is_valid = false`) can be discarded,
//! which restores the most recent valid version as latest.
//!
//! Store calls are issued one after another with no transaction around them.
//! A store failure in the middle of [`VersionedService::save`] can leave a
//! logical key with zero or several latest rows.

use std::marker::PhantomData;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::dto::{OperationType, Payload, Versioned};
use crate::entity::StoredEntity;
use crate::error::CoreError;
use crate::mapper::JsonEntityMapper;
use crate::observer::SaveObserver;
use crate::store::ObjectStore;
use crate::types::{DbId, LogicalKey};

/// Status assigned to a saved version when the caller sends none.
pub const DEFAULT_STATUS_ID: i32 = 1;

/// Versioned CRUD over an [`ObjectStore`] for payload type `P`.
pub struct VersionedService<P> {
    store: Arc<dyn ObjectStore>,
    observer: Option<Arc<dyn SaveObserver>>,
    _payload: PhantomData<fn() -> P>,
}

impl<P: Payload> VersionedService<P> {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self {
            store,
            observer: None,
            _payload: PhantomData,
        }
    }

    /// Notify `observer` after every inserted version.
    pub fn with_observer(mut self, observer: Arc<dyn SaveObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Latest, non-deleted version of every logical key.
    pub async fn get_all(&self) -> Result<Vec<Versioned<P>>, CoreError> {
        let entities = self.store.list().await?;
        let items = entities
            .iter()
            .filter(|e| !e.is_deleted && e.is_latest_version)
            .map(JsonEntityMapper::to_dto::<P>)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(kind = P::KIND, count = items.len(), "Listed latest versions");
        Ok(items)
    }

    /// A single version row by storage id.
    pub async fn get_by_id(&self, id: DbId) -> Result<Option<Versioned<P>>, CoreError> {
        self.store
            .get(id)
            .await?
            .as_ref()
            .map(JsonEntityMapper::to_dto::<P>)
            .transpose()
    }

    /// Every version of one logical key, newest first.
    pub async fn history(&self, pk_id: LogicalKey) -> Result<Vec<Versioned<P>>, CoreError> {
        self.versions_of(Some(pk_id))
            .await?
            .iter()
            .map(JsonEntityMapper::to_dto::<P>)
            .collect()
    }

    /// Store `dto` as the new latest version of its logical key.
    ///
    /// If no row carries the DTO's key yet, a fresh key is generated and the
    /// row becomes version 1 with base version 0. Otherwise every existing row
    /// is marked non-latest and the new row continues the numbering of the
    /// highest version. A `delete` operation stores a row flagged deleted.
    pub async fn save(&self, dto: Versioned<P>) -> Result<Versioned<P>, CoreError> {
        let mut entity = JsonEntityMapper::to_entity(&dto)?;
        let versions = self.versions_of(dto.meta.pk_id).await?;
        let previous = versions.first();

        for version in &versions {
            let mut stale = version.clone();
            stale.is_latest_version = false;
            if self.store.update(stale.id, &stale).await?.is_none() {
                tracing::warn!(
                    kind = P::KIND,
                    id = stale.id,
                    "Version disappeared before it could be marked stale"
                );
            }
        }

        entity.pk_id = previous.map(|p| p.pk_id).unwrap_or_else(Uuid::new_v4);
        entity.version_id = Some(previous.and_then(|p| p.version_id).map_or(1, |v| v + 1));
        entity.base_version_id =
            Some(previous.and_then(|p| p.base_version_id).map_or(0, |b| b + 1));
        entity.is_valid = dto.meta.is_valid;
        entity.is_deleted = dto.meta.operation_type == Some(OperationType::Delete);
        entity.is_latest_version = true;
        entity.updated_date = Utc::now();
        entity.status_id = Some(dto.meta.status_id.unwrap_or(DEFAULT_STATUS_ID));

        let saved = self.store.add(entity).await?;
        tracing::info!(
            kind = P::KIND,
            id = saved.id,
            pk_id = %saved.pk_id,
            version = ?saved.version_id,
            superseded = versions.len(),
            is_valid = saved.is_valid,
            is_deleted = saved.is_deleted,
            "Saved new version"
        );

        if let Some(observer) = &self.observer {
            observer.entity_saved(P::KIND, &saved);
        }

        JsonEntityMapper::to_dto(&saved)
    }

    /// Drop every draft of the DTO's logical key and reinstate the most recent
    /// valid, non-deleted version as latest.
    ///
    /// Returns `None` when the DTO carries no key or no such version remains.
    pub async fn discard_draft(
        &self,
        dto: &Versioned<P>,
    ) -> Result<Option<Versioned<P>>, CoreError> {
        let Some(pk_id) = dto.meta.pk_id else {
            return Ok(None);
        };
        let versions = self.versions_of(Some(pk_id)).await?;

        let mut discarded = 0usize;
        for draft in versions.iter().filter(|v| !v.is_valid) {
            if self.store.delete(draft.id).await? {
                discarded += 1;
            }
        }

        let Some(last_valid) = versions.iter().find(|v| v.is_valid && !v.is_deleted) else {
            tracing::info!(
                kind = P::KIND,
                pk_id = %pk_id,
                discarded,
                "Discarded drafts, no valid version remains"
            );
            return Ok(None);
        };

        let mut restored = last_valid.clone();
        restored.is_latest_version = true;
        let persisted = self.store.update(restored.id, &restored).await?;
        if persisted.is_none() {
            tracing::warn!(
                kind = P::KIND,
                id = restored.id,
                "Version disappeared before it could be restored as latest"
            );
        }
        let restored = persisted.unwrap_or(restored);

        tracing::info!(
            kind = P::KIND,
            pk_id = %pk_id,
            discarded,
            restored_id = restored.id,
            version = ?restored.version_id,
            "Discarded drafts and restored latest version"
        );
        JsonEntityMapper::to_dto(&restored).map(Some)
    }

    /// Rows of one logical key ordered by version, highest first.
    async fn versions_of(
        &self,
        pk_id: Option<LogicalKey>,
    ) -> Result<Vec<StoredEntity>, CoreError> {
        let Some(pk_id) = pk_id else {
            return Ok(Vec::new());
        };
        let mut versions = self.store.list_by_key(pk_id).await?;
        versions.sort_by(|a, b| b.version_id.cmp(&a.version_id));
        Ok(versions)
    }
}
