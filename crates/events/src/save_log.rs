//! Structured log sink for entity events.
//!
//! [`SaveLog`] subscribes to the [`EventBus`](crate::bus::EventBus) and writes
//! one `tracing` line per received [`EntityEvent`]. It runs as a long-lived
//! background task and exits when the bus sender is dropped.

use tokio::sync::broadcast;

use crate::bus::EntityEvent;

/// Background service that logs every published entity event.
pub struct SaveLog;

impl SaveLog {
    /// Run the logging loop until the channel closes.
    ///
    /// Returns the number of events logged.
    pub async fn run(mut receiver: broadcast::Receiver<EntityEvent>) -> u64 {
        let mut logged = 0u64;
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    Self::log(&event);
                    logged += 1;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Save log lagged, some events were not logged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!(logged, "Event bus closed, save log shutting down");
                    break;
                }
            }
        }
        logged
    }

    fn log(event: &EntityEvent) {
        tracing::info!(
            event_type = %event.event_type,
            entity_id = event.entity_id,
            pk_id = ?event.pk_id,
            version = ?event.version_id,
            payload = %event.payload,
            "Entity event"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::EventBus;

    #[tokio::test]
    async fn exits_when_bus_is_dropped() {
        let bus = EventBus::default();
        let handle = tokio::spawn(SaveLog::run(bus.subscribe()));

        bus.publish(EntityEvent::new("product", "saved", 1));
        bus.publish(EntityEvent::new("product", "saved", 2));
        drop(bus);

        assert_eq!(handle.await.unwrap(), 2);
    }
}
