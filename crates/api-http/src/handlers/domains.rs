// Domain CRUD

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, CurrentUser};
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use domainhub_core::domain::{Domain, DomainId, DomainInput};

pub async fn list(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> ApiResult<Json<Vec<Domain>>> {
    Ok(Json(state.domains.list().await?))
}

pub async fn create(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiJson(body): ApiJson<DomainInput>,
) -> ApiResult<(StatusCode, Json<Domain>)> {
    let domain = state.domains.create(body).await?;
    Ok((StatusCode::CREATED, Json(domain)))
}

pub async fn get(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiPath(id): ApiPath<DomainId>,
) -> ApiResult<Json<Domain>> {
    Ok(Json(state.domains.get(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiPath(id): ApiPath<DomainId>,
    ApiJson(body): ApiJson<DomainInput>,
) -> ApiResult<Json<Domain>> {
    Ok(Json(state.domains.update(id, body).await?))
}

/// Cascades to pages, FAQs, settings and posts
pub async fn delete(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiPath(id): ApiPath<DomainId>,
) -> ApiResult<StatusCode> {
    state.domains.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
