//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`EntityEvent`]s. It is
//! designed to be shared via `Arc<EventBus>` across the application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strata_core::types::{DbId, LogicalKey};
use strata_core::{SaveObserver, StoredEntity};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// EntityEvent
// ---------------------------------------------------------------------------

/// Something that happened to one stored version row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityEvent {
    /// Dot-separated event name, e.g. `"product.saved"`.
    pub event_type: String,

    /// Entity kind (e.g. `"product"`).
    pub entity_kind: String,

    /// Storage id of the row.
    pub entity_id: DbId,

    /// Logical key shared by all versions of the record.
    pub pk_id: Option<LogicalKey>,

    pub version_id: Option<i32>,

    /// Decoded JSON document, or `null` if it could not be parsed.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl EntityEvent {
    /// Create an event with no key, version or payload.
    pub fn new(entity_kind: impl Into<String>, action: &str, entity_id: DbId) -> Self {
        let entity_kind = entity_kind.into();
        Self {
            event_type: format!("{entity_kind}.{action}"),
            entity_kind,
            entity_id,
            pk_id: None,
            version_id: None,
            payload: serde_json::Value::Null,
            timestamp: Utc::now(),
        }
    }

    /// Build a `<kind>.saved` event from a freshly inserted row.
    pub fn saved(entity_kind: &str, entity: &StoredEntity) -> Self {
        let payload = serde_json::from_str(&entity.json_doc).unwrap_or(serde_json::Value::Null);
        Self::new(entity_kind, "saved", entity.id)
            .with_version(entity.pk_id, entity.version_id)
            .with_payload(payload)
    }

    pub fn with_version(mut self, pk_id: LogicalKey, version_id: Option<i32>) -> Self {
        self.pk_id = Some(pk_id);
        self.version_id = version_id;
        self
    }

    /// Set the JSON payload for the event.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`EntityEvent`].
///
/// # Usage
///
/// ```rust
/// use strata_events::bus::{EntityEvent, EventBus};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(EntityEvent::new("product", "saved", 1));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<EntityEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: EntityEvent) {
        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<EntityEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl SaveObserver for EventBus {
    fn entity_saved(&self, kind: &'static str, entity: &StoredEntity) {
        self.publish(EntityEvent::saved(kind, entity));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
