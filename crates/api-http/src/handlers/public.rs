// Public read model for rendered sites (no authentication)

use crate::error::ApiResult;
use crate::extract::ApiPath;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use domainhub_core::application::{PublicPage, PublicSite};

pub async fn site(
    State(state): State<AppState>,
    ApiPath(name): ApiPath<String>,
) -> ApiResult<Json<PublicSite>> {
    Ok(Json(state.site.site(&name).await?))
}

pub async fn page(
    State(state): State<AppState>,
    ApiPath((name, page)): ApiPath<(String, String)>,
) -> ApiResult<Json<PublicPage>> {
    Ok(Json(state.site.page(&name, &page).await?))
}
