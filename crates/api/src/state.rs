use std::sync::Arc;

use strata_core::{ObjectStore, Product, VersionedService};
use strata_events::EventBus;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Versioned product service.
    pub products: Arc<VersionedService<Product>>,
    /// Database pool, `None` when running on the in-memory store.
    pub pool: Option<strata_db::DbPool>,
}

impl AppState {
    /// Wire the product service to `store` and publish its saves on `event_bus`.
    pub fn new(
        config: Arc<ServerConfig>,
        store: Arc<dyn ObjectStore>,
        pool: Option<strata_db::DbPool>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        let products = VersionedService::new(store).with_observer(event_bus);
        Self {
            config,
            products: Arc::new(products),
            pool,
        }
    }
}
