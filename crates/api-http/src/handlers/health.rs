// Liveness probe

use crate::state::AppState;
use crate::types::HealthResponse;
use axum::extract::State;
use axum::http::header::{CACHE_CONTROL, PRAGMA};
use axum::response::IntoResponse;
use axum::Json;

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        [
            (CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
            (PRAGMA, "no-cache"),
        ],
        Json(HealthResponse {
            status: "up".to_string(),
            version: domainhub_core::VERSION.to_string(),
            uptime_secs: state.uptime_secs(),
        }),
    )
}
