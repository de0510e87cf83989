//! Route definitions for versioned products, mounted at `/products`.
//!
//! ```text
//! GET    /                              list
//! POST   /save                          save
//! POST   /discard-draft                 discard_draft
//! GET    /history/{pk_id}               history
//! GET    /{id}                          get_by_id
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list))
        .route("/save", post(products::save))
        .route("/discard-draft", post(products::discard_draft))
        .route("/history/{pk_id}", get(products::history))
        .route("/{id}", get(products::get_by_id))
}
