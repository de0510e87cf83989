//! Handlers for versioned products.
//!
//! Every save appends a version; reads return the latest version of each
//! logical key unless a specific row or history is requested.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use strata_core::types::{DbId, LogicalKey};
use strata_core::{CoreError, Payload, Product, ProductDto};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /products/save
// ---------------------------------------------------------------------------

/// Store the body as the new latest version of its logical key.
pub async fn save(
    State(state): State<AppState>,
    Json(input): Json<ProductDto>,
) -> AppResult<impl IntoResponse> {
    let saved = state.products.save(input).await?;
    Ok(Json(DataResponse { data: saved }))
}

// ---------------------------------------------------------------------------
// POST /products/discard-draft
// ---------------------------------------------------------------------------

/// Discard the drafts of the body's logical key. Responds with the restored
/// version, or `null` when nothing valid remains.
pub async fn discard_draft(
    State(state): State<AppState>,
    Json(input): Json<ProductDto>,
) -> AppResult<impl IntoResponse> {
    let restored = state.products.discard_draft(&input).await?;
    if restored.is_none() {
        tracing::debug!(pk_id = ?input.meta.pk_id, "No valid version left after discard");
    }
    Ok(Json(DataResponse { data: restored }))
}

// ---------------------------------------------------------------------------
// GET /products
// ---------------------------------------------------------------------------

/// List the current version of every product.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = state.products.get_all().await?;
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// GET /products/{id}
// ---------------------------------------------------------------------------

/// Get one version row by storage id.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = state.products.get_by_id(id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: Product::KIND,
            id,
        })
    })?;
    Ok(Json(DataResponse { data: item }))
}

// ---------------------------------------------------------------------------
// GET /products/history/{pk_id}
// ---------------------------------------------------------------------------

/// Every version of one logical key, newest first.
pub async fn history(
    State(state): State<AppState>,
    Path(pk_id): Path<LogicalKey>,
) -> AppResult<impl IntoResponse> {
    let versions = state.products.history(pk_id).await?;
    tracing::debug!(%pk_id, count = versions.len(), "Listed version history");
    Ok(Json(DataResponse { data: versions }))
}
