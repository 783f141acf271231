// Login / logout / own account

use crate::error::ApiResult;
use crate::extract::{ApiJson, CurrentUser};
use crate::state::AppState;
use crate::types::{ChangePasswordRequest, LoginRequest};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use domainhub_core::domain::User;

fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    let max_age = time::Duration::seconds(state.auth.session_ttl().num_seconds());
    Cookie::build((state.cookie.name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.cookie.secure)
        .max_age(max_age)
        .build()
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(body): ApiJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<User>)> {
    let (user, session) = state.auth.login(&body.email, &body.password).await?;
    let jar = jar.add(session_cookie(&state, session.id));
    Ok((jar, Json(user)))
}

/// Always succeeds so a stale cookie can still be cleared
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, StatusCode)> {
    if let Some(cookie) = jar.get(&state.cookie.name) {
        state.auth.logout(cookie.value()).await?;
    }
    let jar = jar.remove(Cookie::build(state.cookie.name.clone()).path("/"));
    Ok((jar, StatusCode::NO_CONTENT))
}

pub async fn current_user(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}

/// Other sessions of the user are signed out; this one stays
pub async fn change_password(
    State(state): State<AppState>,
    jar: CookieJar,
    CurrentUser(user): CurrentUser,
    ApiJson(body): ApiJson<ChangePasswordRequest>,
) -> ApiResult<StatusCode> {
    let token = jar
        .get(&state.cookie.name)
        .map(|c| c.value())
        .unwrap_or_default();
    state
        .auth
        .change_password(&user, token, &body.current_password, &body.new_password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
