//! Handlers for the `/tenders` resource.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use tenderflow_core::status::TenderStatus;
use tenderflow_core::types::{EntityId, Version};

use crate::dto::{
    CreateTenderRequest, EditTenderRequest, MyTendersQuery, PublishedTendersQuery,
    TenderResponse, TenderStatusQuery, UsernameQuery,
};
use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, ValidJson, ValidQuery};
use crate::state::AppState;

/// POST /api/tenders/new
pub async fn create(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateTenderRequest>,
) -> AppResult<Json<TenderResponse>> {
    let tender = state.tenders.create(input.into()).await?;
    Ok(Json(tender.into()))
}

/// GET /api/tenders?service_type=...&limit=...&offset=...
pub async fn list_published(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> AppResult<Json<Vec<TenderResponse>>> {
    let Query(pairs) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let filter = PublishedTendersQuery::from_pairs(pairs)?;
    let tenders = state
        .tenders
        .list_published(&filter.service_types, filter.page)
        .await?;
    Ok(Json(tenders.into_iter().map(TenderResponse::from).collect()))
}

/// GET /api/tenders/my?username=...&limit=...&offset=...
pub async fn list_mine(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<MyTendersQuery>,
) -> AppResult<Json<Vec<TenderResponse>>> {
    let page = query.page()?;
    let tenders = state.tenders.list_mine(&query.username, page).await?;
    Ok(Json(tenders.into_iter().map(TenderResponse::from).collect()))
}

/// GET /api/tenders/{id}/status?username=...
pub async fn get_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EntityId>,
    ValidQuery(query): ValidQuery<UsernameQuery>,
) -> AppResult<Json<TenderStatus>> {
    let status = state.tenders.status(id, &query.username).await?;
    Ok(Json(status))
}

/// PUT /api/tenders/{id}/status?status=...&username=...
pub async fn change_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EntityId>,
    ValidQuery(query): ValidQuery<TenderStatusQuery>,
) -> AppResult<Json<TenderResponse>> {
    let tender = state
        .tenders
        .change_status(id, query.status, &query.username)
        .await?;
    Ok(Json(tender.into()))
}

/// PATCH /api/tenders/{id}/edit?username=...
pub async fn edit(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EntityId>,
    ValidQuery(query): ValidQuery<UsernameQuery>,
    ValidJson(input): ValidJson<EditTenderRequest>,
) -> AppResult<Json<TenderResponse>> {
    let tender = state
        .tenders
        .edit(id, &query.username, input.into())
        .await?;
    Ok(Json(tender.into()))
}

/// PUT /api/tenders/{id}/rollback/{version}?username=...
pub async fn rollback(
    State(state): State<AppState>,
    ApiPath((id, version)): ApiPath<(EntityId, Version)>,
    ValidQuery(query): ValidQuery<UsernameQuery>,
) -> AppResult<Json<TenderResponse>> {
    let tender = state
        .tenders
        .rollback(id, version, &query.username)
        .await?;
    Ok(Json(tender.into()))
}
