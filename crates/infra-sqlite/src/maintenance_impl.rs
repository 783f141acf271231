// SQLite Maintenance Implementation
use crate::error::map_sqlx_error;
use async_trait::async_trait;
use domainhub_core::error::{AppError, Result};
use domainhub_core::port::{DatabaseStats, Maintenance};
use sqlx::SqlitePool;
use tracing::info;

/// SQLite maintenance implementation
pub struct SqliteMaintenance {
    pool: SqlitePool,
}

impl SqliteMaintenance {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// DB size in bytes from page count and page size
    async fn get_db_size(&self) -> Result<i64> {
        let page_count: i64 = sqlx::query_scalar("PRAGMA page_count")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get page count: {}", e)))?;

        let page_size: i64 = sqlx::query_scalar("PRAGMA page_size")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get page size: {}", e)))?;

        Ok(page_count * page_size)
    }

    async fn count(&self, table: &str) -> Result<i64> {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl Maintenance for SqliteMaintenance {
    async fn vacuum(&self) -> Result<()> {
        info!("Running VACUUM to optimize database...");

        let size_before = self.get_db_size().await?;

        // VACUUM reclaims free pages and defragments the file
        sqlx::query("VACUUM")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("VACUUM failed: {}", e)))?;

        let size_after = self.get_db_size().await?;
        info!(
            size_before_bytes = size_before,
            size_after_bytes = size_after,
            reclaimed_bytes = (size_before - size_after).max(0),
            "VACUUM completed"
        );

        Ok(())
    }

    async fn get_stats(&self) -> Result<DatabaseStats> {
        Ok(DatabaseStats {
            db_size_bytes: self.get_db_size().await?,
            users: self.count("users").await?,
            sessions: self.count("sessions").await?,
            domains: self.count("domains").await?,
            pages: self.count("pages").await?,
            faqs: self.count("faqs").await?,
            posts: self.count("posts").await?,
        })
    }
}
