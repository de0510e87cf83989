//! Row type for versioned entity tables.

use sqlx::FromRow;
use strata_core::types::{DbId, Timestamp};
use strata_core::StoredEntity;
use uuid::Uuid;

/// A row from a versioned entity table (e.g. `products`).
///
/// `json_doc` is stored as `JSONB` and selected back as text.
#[derive(Debug, Clone, FromRow)]
pub struct EntityRow {
    pub id: DbId,
    pub pk_id: Uuid,
    pub json_doc: String,
    pub updated_by: Option<String>,
    pub updated_date: Timestamp,
    pub is_valid: bool,
    pub is_visible: bool,
    pub is_deleted: bool,
    pub base_version_id: Option<i32>,
    pub version_id: Option<i32>,
    pub is_latest_version: bool,
    pub status_id: Option<i32>,
}

impl From<EntityRow> for StoredEntity {
    fn from(row: EntityRow) -> Self {
        StoredEntity {
            id: row.id,
            pk_id: row.pk_id,
            json_doc: row.json_doc,
            updated_by: row.updated_by,
            updated_date: row.updated_date,
            is_valid: row.is_valid,
            is_visible: row.is_visible,
            is_deleted: row.is_deleted,
            base_version_id: row.base_version_id,
            version_id: row.version_id,
            is_latest_version: row.is_latest_version,
            status_id: row.status_id,
        }
    }
}
