pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /products                                        list
/// /products/save                                   save (POST)
/// /products/discard-draft                          discard drafts (POST)
/// /products/history/{pk_id}                        version history
/// /products/{id}                                   get one version
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/products", products::router())
}
