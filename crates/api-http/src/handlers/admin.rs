// Operational endpoints (admin only)

use crate::error::ApiResult;
use crate::extract::{AdminUser, ApiQuery};
use crate::state::AppState;
use crate::types::{MaintenanceQuery, StatsResponse};
use axum::extract::State;
use axum::Json;
use domainhub_core::application::MaintenanceReport;
use tracing::info;

pub async fn stats(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<StatsResponse>> {
    let database = state.maintenance.stats().await?;
    Ok(Json(StatsResponse {
        database,
        version: domainhub_core::VERSION,
        uptime_secs: state.uptime_secs(),
    }))
}

pub async fn maintenance(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiQuery(query): ApiQuery<MaintenanceQuery>,
) -> ApiResult<Json<MaintenanceReport>> {
    info!(
        user_id = admin.id,
        force_vacuum = query.force_vacuum,
        "Manual maintenance requested"
    );
    Ok(Json(state.maintenance.run_now(query.force_vacuum).await?))
}
