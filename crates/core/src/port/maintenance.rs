// DB Maintenance port
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Row counts and file size of the database
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseStats {
    pub db_size_bytes: i64,
    pub users: i64,
    pub sessions: i64,
    pub domains: i64,
    pub pages: i64,
    pub faqs: i64,
    pub posts: i64,
}

/// Database maintenance operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Maintenance: Send + Sync {
    /// Run VACUUM to reclaim space and defragment the file
    async fn vacuum(&self) -> Result<()>;

    /// Current counts and on-disk size
    async fn get_stats(&self) -> Result<DatabaseStats>;
}
