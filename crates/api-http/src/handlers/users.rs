// Account administration (admin only)

use crate::error::ApiResult;
use crate::extract::{AdminUser, ApiJson, ApiPath};
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use domainhub_core::domain::{NewUser, User, UserId};

pub async fn list(State(state): State<AppState>, _admin: AdminUser) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.auth.list_users().await?))
}

pub async fn create(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiJson(body): ApiJson<NewUser>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = state.auth.create_user(body).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn delete(
    State(state): State<AppState>,
    AdminUser(actor): AdminUser,
    ApiPath(id): ApiPath<UserId>,
) -> ApiResult<StatusCode> {
    state.auth.delete_user(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
