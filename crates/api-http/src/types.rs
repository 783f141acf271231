// Request / Response bodies specific to the HTTP surface

use domainhub_core::domain::{DomainId, FaqId, PostFilter, PublishStatus};
use domainhub_core::port::DatabaseStats;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub ids: Vec<FaqId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaintenanceQuery {
    #[serde(default)]
    pub force_vacuum: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostQuery {
    pub domain_id: Option<DomainId>,
    pub status: Option<PublishStatus>,
}

impl From<PostQuery> for PostFilter {
    fn from(query: PostQuery) -> Self {
        PostFilter {
            domain_id: query.domain_id,
            status: query.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub database: DatabaseStats,
    pub version: &'static str,
    pub uptime_secs: u64,
}
