//! Versioned DTO model.
//!
//! A [`Versioned`] value is the API-facing form of one version of a record:
//! the shared [`VersionMeta`] plus a subtype [`Payload`]. Only the payload is
//! written into the stored JSON document; the metadata lives in dedicated
//! columns of the stored entity.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::types::{DbId, LogicalKey, Timestamp};

/// The subtype-specific fields of a versioned record.
///
/// Each implementor declares its own schema as a plain struct; whatever the
/// struct serializes is exactly what ends up in the JSON document.
pub trait Payload: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Entity name used in errors, events and logs (e.g. `"product"`).
    const KIND: &'static str;

    /// Backing table in the PostgreSQL store.
    const TABLE: &'static str;
}

/// Operation requested by the caller of a save. Input only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Create,
    Update,
    Delete,
}

/// Version, status and visibility metadata shared by every DTO subtype.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VersionMeta {
    pub id: Option<DbId>,
    pub pk_id: Option<LogicalKey>,
    pub is_valid: bool,
    pub is_visible: Option<bool>,
    pub is_deleted: Option<bool>,
    pub is_latest_version: Option<bool>,
    pub base_version_id: Option<i32>,
    pub version_id: Option<i32>,
    pub status_id: Option<i32>,
    pub updated_by: Option<String>,
    pub updated_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_type: Option<OperationType>,
}

/// One version of a record: metadata and payload side by side on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Versioned<P> {
    #[serde(flatten)]
    pub meta: VersionMeta,
    #[serde(flatten)]
    pub payload: P,
}

impl<P: Payload> Versioned<P> {
    /// Wrap a payload with empty metadata (no key, draft flag unset).
    pub fn new(payload: P) -> Self {
        Self {
            meta: VersionMeta::default(),
            payload,
        }
    }

    /// Target an existing logical key.
    pub fn with_key(mut self, pk_id: LogicalKey) -> Self {
        self.meta.pk_id = Some(pk_id);
        self
    }

    /// Set the validity flag (`false` marks a draft).
    pub fn valid(mut self, is_valid: bool) -> Self {
        self.meta.is_valid = is_valid;
        self
    }

    pub fn with_operation(mut self, operation: OperationType) -> Self {
        self.meta.operation_type = Some(operation);
        self
    }
}
