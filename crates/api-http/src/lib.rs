// DomainHub HTTP API (axum)
// Session-cookie authenticated REST surface over the core services

pub mod error;
pub mod extract;
pub mod handlers;
pub mod rate_limiter;
pub mod router;
pub mod server;
pub mod state;
pub mod types;

pub use error::{ApiError, ApiResult, ErrorBody};
pub use rate_limiter::RateLimiter;
pub use router::build_router;
pub use server::{HttpServer, HttpServerConfig, ServerError};
pub use state::{AppState, CookieConfig, Services, DEFAULT_COOKIE_NAME};
pub use types::*;
