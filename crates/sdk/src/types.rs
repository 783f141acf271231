//! Wire types that only exist at the HTTP boundary
//!
//! Entities and create/update payloads are the `domainhub-core` types,
//! re-exported from the crate root.

use domainhub_core::domain::FaqId;
use domainhub_core::port::DatabaseStats;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChangePasswordRequest<'a> {
    pub current_password: &'a str,
    pub new_password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ReorderRequest<'a> {
    pub ids: &'a [FaqId],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub database: DatabaseStats,
    pub version: String,
    pub uptime_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorField {
    pub field: String,
    pub message: String,
}

/// Error body returned by the server for every non-2xx response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
    #[serde(default)]
    pub fields: Vec<ErrorField>,
}

impl ErrorBody {
    /// Message with field errors appended, e.g. `Validation failed (name: is required)`
    pub fn describe(&self) -> String {
        if self.fields.is_empty() {
            return self.message.clone();
        }
        let fields: Vec<String> = self
            .fields
            .iter()
            .map(|f| format!("{}: {}", f.field, f.message))
            .collect();
        format!("{} ({})", self.message, fields.join("; "))
    }
}
