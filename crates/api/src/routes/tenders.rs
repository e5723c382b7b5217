//! Route definitions for the `/tenders` resource.

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::handlers::tender;
use crate::state::AppState;

/// Routes mounted at `/tenders`.
///
/// ```text
/// GET    /                           -> list_published
/// POST   /new                        -> create
/// GET    /my                         -> list_mine
/// GET    /{id}/status                -> get_status
/// PUT    /{id}/status                -> change_status
/// PATCH  /{id}/edit                  -> edit
/// PUT    /{id}/rollback/{version}    -> rollback
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tender::list_published))
        .route("/new", post(tender::create))
        .route("/my", get(tender::list_mine))
        .route(
            "/{id}/status",
            get(tender::get_status).put(tender::change_status),
        )
        .route("/{id}/edit", patch(tender::edit))
        .route("/{id}/rollback/{version}", put(tender::rollback))
}
