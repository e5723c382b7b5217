//! Handlers for the `/bids` resource.

use axum::extract::State;
use axum::Json;
use tenderflow_core::status::BidStatus;
use tenderflow_core::types::{EntityId, Version};

use crate::dto::{
    BidResponse, BidStatusQuery, CreateBidRequest, DecisionQuery, EditBidRequest, UsernameQuery,
};
use crate::error::AppResult;
use crate::extract::{ApiPath, ValidJson, ValidQuery};
use crate::state::AppState;

/// POST /api/bids/new
pub async fn create(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateBidRequest>,
) -> AppResult<Json<BidResponse>> {
    let bid = state.bids.create(input.into()).await?;
    Ok(Json(bid.into()))
}

/// PUT /api/bids/{id}/submit_decision?decision=...&username=...
pub async fn submit_decision(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EntityId>,
    ValidQuery(query): ValidQuery<DecisionQuery>,
) -> AppResult<Json<BidResponse>> {
    let bid = state
        .bids
        .submit_decision(id, &query.username, query.decision)
        .await?;
    Ok(Json(bid.into()))
}

/// GET /api/bids/{id}/status?username=...
pub async fn get_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EntityId>,
    ValidQuery(query): ValidQuery<UsernameQuery>,
) -> AppResult<Json<BidStatus>> {
    let status = state.bids.status(id, &query.username).await?;
    Ok(Json(status))
}

/// PUT /api/bids/{id}/status?status=...&username=...
pub async fn change_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EntityId>,
    ValidQuery(query): ValidQuery<BidStatusQuery>,
) -> AppResult<Json<BidResponse>> {
    let bid = state
        .bids
        .change_status(id, query.status, &query.username)
        .await?;
    Ok(Json(bid.into()))
}

/// PATCH /api/bids/{id}/edit?username=...
pub async fn edit(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EntityId>,
    ValidQuery(query): ValidQuery<UsernameQuery>,
    ValidJson(input): ValidJson<EditBidRequest>,
) -> AppResult<Json<BidResponse>> {
    let bid = state.bids.edit(id, &query.username, input.into()).await?;
    Ok(Json(bid.into()))
}

/// PUT /api/bids/{id}/rollback/{version}?username=...
pub async fn rollback(
    State(state): State<AppState>,
    ApiPath((id, version)): ApiPath<(EntityId, Version)>,
    ValidQuery(query): ValidQuery<UsernameQuery>,
) -> AppResult<Json<BidResponse>> {
    let bid = state.bids.rollback(id, version, &query.username).await?;
    Ok(Json(bid.into()))
}
