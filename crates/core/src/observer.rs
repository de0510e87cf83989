use crate::entity::StoredEntity;

/// Receives a notification after each version row is inserted.
///
/// Called synchronously on the saving task; implementations must not block.
pub trait SaveObserver: Send + Sync {
    fn entity_saved(&self, kind: &'static str, entity: &StoredEntity);
}
