// SQLite FaqRepository Implementation

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domainhub_core::domain::{Faq, FaqId, FaqInput, PageId, MAX_FAQ_ORDER};
use domainhub_core::error::{AppError, Result};
use domainhub_core::port::{FaqRepository, TimeProvider};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::debug;

const FAQ_COLUMNS: &str =
    "id, page_id, question, answer, sort_order, is_active, created_at, updated_at";

pub struct SqliteFaqRepository {
    pool: SqlitePool,
    time_provider: Arc<dyn TimeProvider>,
}

impl SqliteFaqRepository {
    pub fn new(pool: SqlitePool, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            pool,
            time_provider,
        }
    }
}

#[async_trait]
impl FaqRepository for SqliteFaqRepository {
    async fn create(&self, page_id: PageId, input: &FaqInput) -> Result<Faq> {
        let now = self.time_provider.now();
        // Appending computes the next slot in the same statement, capped so
        // MAX + 1 stays an INTEGER
        let id = sqlx::query(
            r#"
            INSERT INTO faqs (page_id, question, answer, sort_order, is_active, created_at, updated_at)
            VALUES (
                ?, ?, ?,
                COALESCE(?, (
                    SELECT COALESCE(MIN(MAX(sort_order), ?) + 1, 0)
                    FROM faqs WHERE page_id = ?
                )),
                ?, ?, ?
            )
            "#,
        )
        .bind(page_id)
        .bind(&input.question)
        .bind(&input.answer)
        .bind(input.sort_order)
        .bind(MAX_FAQ_ORDER)
        .bind(page_id)
        .bind(input.is_active)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .last_insert_rowid();

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("FAQ {} vanished after insert", id)))
    }

    async fn find_by_id(&self, id: FaqId) -> Result<Option<Faq>> {
        let row = sqlx::query_as::<_, FaqRow>(&format!(
            "SELECT {} FROM faqs WHERE id = ?",
            FAQ_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(FaqRow::into_faq))
    }

    async fn list_by_page(&self, page_id: PageId, active_only: bool) -> Result<Vec<Faq>> {
        let rows = sqlx::query_as::<_, FaqRow>(&format!(
            "SELECT {} FROM faqs WHERE page_id = ? AND (? = 0 OR is_active = 1) \
             ORDER BY sort_order, id",
            FAQ_COLUMNS
        ))
        .bind(page_id)
        .bind(active_only)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(FaqRow::into_faq).collect())
    }

    async fn update(&self, id: FaqId, input: &FaqInput) -> Result<Option<Faq>> {
        let result = sqlx::query(
            r#"
            UPDATE faqs SET
                question = ?, answer = ?, sort_order = COALESCE(?, sort_order),
                is_active = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.question)
        .bind(&input.answer)
        .bind(input.sort_order)
        .bind(input.is_active)
        .bind(self.time_provider.now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn delete(&self, id: FaqId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM faqs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn reorder(&self, page_id: PageId, ids: &[FaqId]) -> Result<()> {
        let now = self.time_provider.now();
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        for (position, id) in ids.iter().enumerate() {
            let result = sqlx::query(
                "UPDATE faqs SET sort_order = ?, updated_at = ? WHERE id = ? AND page_id = ?",
            )
            .bind(position as i64)
            .bind(now)
            .bind(*id)
            .bind(page_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

            if result.rows_affected() == 0 {
                // Dropping the transaction rolls back earlier positions
                return Err(AppError::not_found("FAQ", id));
            }
        }

        tx.commit().await.map_err(map_sqlx_error)?;
        debug!(page_id, count = ids.len(), "FAQ order rewritten");
        Ok(())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FaqRow {
    id: i64,
    page_id: i64,
    question: String,
    answer: String,
    sort_order: i64,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl FaqRow {
    fn into_faq(self) -> Faq {
        Faq {
            id: self.id,
            page_id: self.page_id,
            question: self.question,
            answer: self.answer,
            sort_order: self.sort_order,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
