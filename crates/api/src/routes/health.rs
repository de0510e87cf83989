use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    store: &'static str,
    /// `None` when no database is configured.
    db_healthy: Option<bool>,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match &state.pool {
        Some(pool) => Some(match strata_db::health_check(pool).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Database health check failed");
                false
            }
        }),
        None => None,
    };

    Json(HealthResponse {
        status: if db_healthy == Some(false) { "degraded" } else { "ok" },
        version: env!("CARGO_PKG_VERSION"),
        store: state.config.store_backend.as_str(),
        db_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
