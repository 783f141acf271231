// Per-domain settings and SEO

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, CurrentUser};
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use domainhub_core::domain::{
    DomainId, DomainSettings, DomainSettingsInput, SeoSettings, SeoSettingsInput,
};

pub async fn get_settings(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiPath(domain_id): ApiPath<DomainId>,
) -> ApiResult<Json<DomainSettings>> {
    Ok(Json(state.settings.get_settings(domain_id).await?))
}

pub async fn update_settings(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiPath(domain_id): ApiPath<DomainId>,
    ApiJson(body): ApiJson<DomainSettingsInput>,
) -> ApiResult<Json<DomainSettings>> {
    Ok(Json(state.settings.update_settings(domain_id, body).await?))
}

pub async fn get_seo(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiPath(domain_id): ApiPath<DomainId>,
) -> ApiResult<Json<SeoSettings>> {
    Ok(Json(state.settings.get_seo(domain_id).await?))
}

pub async fn update_seo(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiPath(domain_id): ApiPath<DomainId>,
    ApiJson(body): ApiJson<SeoSettingsInput>,
) -> ApiResult<Json<SeoSettings>> {
    Ok(Json(state.settings.update_seo(domain_id, body).await?))
}
