// Page CRUD

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, CurrentUser};
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use domainhub_core::domain::{DomainId, Page, PageId, PageInput};

pub async fn list_for_domain(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiPath(domain_id): ApiPath<DomainId>,
) -> ApiResult<Json<Vec<Page>>> {
    Ok(Json(state.pages.list_for_domain(domain_id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiPath(domain_id): ApiPath<DomainId>,
    ApiJson(body): ApiJson<PageInput>,
) -> ApiResult<(StatusCode, Json<Page>)> {
    let page = state.pages.create(domain_id, body).await?;
    Ok((StatusCode::CREATED, Json(page)))
}

pub async fn get(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiPath(id): ApiPath<PageId>,
) -> ApiResult<Json<Page>> {
    Ok(Json(state.pages.get(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiPath(id): ApiPath<PageId>,
    ApiJson(body): ApiJson<PageInput>,
) -> ApiResult<Json<Page>> {
    Ok(Json(state.pages.update(id, body).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiPath(id): ApiPath<PageId>,
) -> ApiResult<StatusCode> {
    state.pages.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
