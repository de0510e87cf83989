//! Strata post-save notifications.
//!
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`. Implements
//!   [`SaveObserver`](strata_core::SaveObserver) so a
//!   [`VersionedService`](strata_core::VersionedService) can publish into it.
//! - [`EntityEvent`] — the event envelope.
//! - [`SaveLog`] — background subscriber that writes every event to the log.

pub mod bus;
pub mod save_log;

pub use bus::{EntityEvent, EventBus};
pub use save_log::SaveLog;
