pub mod bids;
pub mod health;
pub mod tenders;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ping                                    liveness (plain "ok")
///
/// /tenders                                 published tenders (public)
/// /tenders/new                             create
/// /tenders/my                              tenders created by ?username
/// /tenders/{id}/status                     get, change status
/// /tenders/{id}/edit                       append edited version (PATCH)
/// /tenders/{id}/rollback/{version}         append copy of version (PUT)
///
/// /bids/new                                create
/// /bids/{id}/submit_decision               approve or reject (PUT)
/// /bids/{id}/status                        get, change status
/// /bids/{id}/edit                          append edited version (PATCH)
/// /bids/{id}/rollback/{version}            append copy of version (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ping", get(health::ping))
        .nest("/tenders", tenders::router())
        .nest("/bids", bids::router())
}
