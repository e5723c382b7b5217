//! Route definitions for the `/bids` resource.

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::handlers::bid;
use crate::state::AppState;

/// Routes mounted at `/bids`.
///
/// ```text
/// POST   /new                        -> create
/// PUT    /{id}/submit_decision       -> submit_decision
/// GET    /{id}/status                -> get_status
/// PUT    /{id}/status                -> change_status
/// PATCH  /{id}/edit                  -> edit
/// PUT    /{id}/rollback/{version}    -> rollback
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/new", post(bid::create))
        .route("/{id}/submit_decision", put(bid::submit_decision))
        .route("/{id}/status", get(bid::get_status).put(bid::change_status))
        .route("/{id}/edit", patch(bid::edit))
        .route("/{id}/rollback/{version}", put(bid::rollback))
}
