// HTTP Error Mapping
//
// Every failure leaves the API as `{"error", "message", "fields"?}` with a
// status derived from the `AppError` variant.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use domainhub_core::domain::{DomainError, FieldError};
use domainhub_core::AppError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error("{0}")]
    BadRequest(String),

    #[error("Too many requests")]
    Throttled,
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::App(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldError>>,
}

impl ApiError {
    fn parts(self) -> (StatusCode, ErrorBody) {
        let body = |error, message: String| ErrorBody {
            error,
            message,
            fields: None,
        };

        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, body("bad_request", message))
            }
            ApiError::Throttled => (
                StatusCode::TOO_MANY_REQUESTS,
                body("rate_limited", "Too many requests".to_string()),
            ),
            ApiError::App(AppError::Domain(DomainError::Validation(errors))) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "validation_error",
                    message: "Validation failed".to_string(),
                    fields: Some(errors.errors().to_vec()),
                },
            ),
            ApiError::App(AppError::Domain(err @ DomainError::InvalidValue { .. })) => (
                StatusCode::BAD_REQUEST,
                body("validation_error", err.to_string()),
            ),
            ApiError::App(AppError::Validation(message)) => {
                (StatusCode::BAD_REQUEST, body("validation_error", message))
            }
            ApiError::App(AppError::Serialization(err)) => {
                (StatusCode::BAD_REQUEST, body("invalid_json", err.to_string()))
            }
            ApiError::App(AppError::Unauthorized(message)) => {
                (StatusCode::UNAUTHORIZED, body("unauthorized", message))
            }
            ApiError::App(AppError::Forbidden(message)) => {
                (StatusCode::FORBIDDEN, body("forbidden", message))
            }
            ApiError::App(AppError::NotFound(message)) => {
                (StatusCode::NOT_FOUND, body("not_found", message))
            }
            ApiError::App(AppError::Conflict(message)) => {
                (StatusCode::CONFLICT, body("conflict", message))
            }
            ApiError::App(
                err @ (AppError::Database(_) | AppError::Config(_) | AppError::Internal(_)),
            ) => {
                error!(error = %err, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    body("internal_error", "Internal server error".to_string()),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.parts();
        (status, Json(body)).into_response()
    }
}
