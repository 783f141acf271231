// REST Handlers, one module per resource

pub mod admin;
pub mod auth;
pub mod domains;
pub mod faqs;
pub mod health;
pub mod pages;
pub mod posts;
pub mod public;
pub mod settings;
pub mod users;

use crate::error::ApiError;
use axum::http::Uri;
use domainhub_core::AppError;

/// JSON 404 for unknown `/api` routes (never falls through to the SPA)
pub async fn api_not_found(uri: Uri) -> ApiError {
    AppError::NotFound(format!("No route for {}", uri.path())).into()
}
