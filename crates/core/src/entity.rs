//! Persistence-facing envelope for one version of a record.

use crate::types::{DbId, LogicalKey, Timestamp};

/// A stored version row: the serialized payload plus version metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEntity {
    pub id: DbId,
    pub pk_id: LogicalKey,
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

/// A version row that has not been assigned a storage id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntity {
    pub pk_id: LogicalKey,
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

impl NewEntity {
    /// Attach the id assigned by a store.
    pub fn into_stored(self, id: DbId) -> StoredEntity {
        StoredEntity {
            id,
            pk_id: self.pk_id,
            json_doc: self.json_doc,
            updated_by: self.updated_by,
            updated_date: self.updated_date,
            is_valid: self.is_valid,
            is_visible: self.is_visible,
            is_deleted: self.is_deleted,
            base_version_id: self.base_version_id,
            version_id: self.version_id,
            is_latest_version: self.is_latest_version,
            status_id: self.status_id,
        }
    }
}
