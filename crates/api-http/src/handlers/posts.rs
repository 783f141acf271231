// Blog post CRUD

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery, CurrentUser};
use crate::state::AppState;
use crate::types::PostQuery;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use domainhub_core::domain::{Post, PostId, PostInput};

pub async fn list(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiQuery(query): ApiQuery<PostQuery>,
) -> ApiResult<Json<Vec<Post>>> {
    Ok(Json(state.posts.list(&query.into()).await?))
}

pub async fn create(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiJson(body): ApiJson<PostInput>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    let post = state.posts.create(body).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn get(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiPath(id): ApiPath<PostId>,
) -> ApiResult<Json<Post>> {
    Ok(Json(state.posts.get(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiPath(id): ApiPath<PostId>,
    ApiJson(body): ApiJson<PostInput>,
) -> ApiResult<Json<Post>> {
    Ok(Json(state.posts.update(id, body).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiPath(id): ApiPath<PostId>,
) -> ApiResult<StatusCode> {
    state.posts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
