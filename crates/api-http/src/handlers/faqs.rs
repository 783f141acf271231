// FAQ CRUD and ordering

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, CurrentUser};
use crate::state::AppState;
use crate::types::ReorderRequest;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use domainhub_core::domain::{Faq, FaqId, FaqInput, PageId};

pub async fn list_for_page(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiPath(page_id): ApiPath<PageId>,
) -> ApiResult<Json<Vec<Faq>>> {
    Ok(Json(state.faqs.list_for_page(page_id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiPath(page_id): ApiPath<PageId>,
    ApiJson(body): ApiJson<FaqInput>,
) -> ApiResult<(StatusCode, Json<Faq>)> {
    let faq = state.faqs.create(page_id, body).await?;
    Ok((StatusCode::CREATED, Json(faq)))
}

pub async fn reorder(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiPath(page_id): ApiPath<PageId>,
    ApiJson(body): ApiJson<ReorderRequest>,
) -> ApiResult<Json<Vec<Faq>>> {
    Ok(Json(state.faqs.reorder(page_id, body.ids).await?))
}

pub async fn update(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiPath(id): ApiPath<FaqId>,
    ApiJson(body): ApiJson<FaqInput>,
) -> ApiResult<Json<Faq>> {
    Ok(Json(state.faqs.update(id, body).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiPath(id): ApiPath<FaqId>,
) -> ApiResult<StatusCode> {
    state.faqs.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
