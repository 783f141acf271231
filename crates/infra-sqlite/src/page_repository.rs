// SQLite PageRepository Implementation

use crate::error::{corrupt_row, map_sqlx_error};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domainhub_core::domain::{DomainId, Page, PageId, PageInput, PublishStatus};
use domainhub_core::error::{AppError, Result};
use domainhub_core::port::{PageRepository, TimeProvider};
use sqlx::SqlitePool;
use std::sync::Arc;

const PAGE_COLUMNS: &str = "id, domain_id, name, title, content, meta_title, meta_description, \
                            meta_keywords, status, show_faq, created_at, updated_at";

pub struct SqlitePageRepository {
    pool: SqlitePool,
    time_provider: Arc<dyn TimeProvider>,
}

impl SqlitePageRepository {
    pub fn new(pool: SqlitePool, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            pool,
            time_provider,
        }
    }
}

#[async_trait]
impl PageRepository for SqlitePageRepository {
    async fn create(&self, domain_id: DomainId, input: &PageInput) -> Result<Page> {
        let now = self.time_provider.now();
        let id = sqlx::query(
            r#"
            INSERT INTO pages (
                domain_id, name, title, content, meta_title, meta_description,
                meta_keywords, status, show_faq, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(domain_id)
        .bind(&input.name)
        .bind(&input.title)
        .bind(input.content.to_string())
        .bind(&input.meta_title)
        .bind(&input.meta_description)
        .bind(&input.meta_keywords)
        .bind(input.status.as_str())
        .bind(input.show_faq)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .last_insert_rowid();

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Page {} vanished after insert", id)))
    }

    async fn find_by_id(&self, id: PageId) -> Result<Option<Page>> {
        let row = sqlx::query_as::<_, PageRow>(&format!(
            "SELECT {} FROM pages WHERE id = ?",
            PAGE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(PageRow::into_page).transpose()
    }

    async fn find_published_by_name(
        &self,
        domain_id: DomainId,
        name: &str,
    ) -> Result<Option<Page>> {
        let row = sqlx::query_as::<_, PageRow>(&format!(
            "SELECT {} FROM pages WHERE domain_id = ? AND name = ? AND status = ? \
             ORDER BY id LIMIT 1",
            PAGE_COLUMNS
        ))
        .bind(domain_id)
        .bind(name)
        .bind(PublishStatus::Published.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(PageRow::into_page).transpose()
    }

    async fn list_by_domain(&self, domain_id: DomainId, published_only: bool) -> Result<Vec<Page>> {
        let rows = sqlx::query_as::<_, PageRow>(&format!(
            "SELECT {} FROM pages WHERE domain_id = ? AND (? = 0 OR status = ?) ORDER BY id",
            PAGE_COLUMNS
        ))
        .bind(domain_id)
        .bind(published_only)
        .bind(PublishStatus::Published.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(PageRow::into_page).collect()
    }

    async fn update(&self, id: PageId, input: &PageInput) -> Result<Option<Page>> {
        let result = sqlx::query(
            r#"
            UPDATE pages SET
                name = ?, title = ?, content = ?, meta_title = ?, meta_description = ?,
                meta_keywords = ?, status = ?, show_faq = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.name)
        .bind(&input.title)
        .bind(input.content.to_string())
        .bind(&input.meta_title)
        .bind(&input.meta_description)
        .bind(&input.meta_keywords)
        .bind(input.status.as_str())
        .bind(input.show_faq)
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

    async fn delete(&self, id: PageId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM pages WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PageRow {
    id: i64,
    domain_id: i64,
    name: String,
    title: String,
    content: String,
    meta_title: Option<String>,
    meta_description: Option<String>,
    meta_keywords: Option<String>,
    status: String,
    show_faq: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PageRow {
    fn into_page(self) -> Result<Page> {
        let content =
            serde_json::from_str(&self.content).map_err(|e| corrupt_row("pages", self.id, e))?;
        let status = self
            .status
            .parse()
            .map_err(|e| corrupt_row("pages", self.id, e))?;

        Ok(Page {
            id: self.id,
            domain_id: self.domain_id,
            name: self.name,
            title: self.title,
            content,
            meta_title: self.meta_title,
            meta_description: self.meta_description,
            meta_keywords: self.meta_keywords,
            status,
            show_faq: self.show_faq,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup_test_db;
    use crate::SqliteDomainRepository;
    use domainhub_core::domain::DomainInput;
    use domainhub_core::port::DomainRepository;
    use serde_json::json;

    async fn setup() -> (SqlitePageRepository, SqliteDomainRepository, DomainId) {
        let (pool, time_provider) = setup_test_db().await;
        let domains = SqliteDomainRepository::new(pool.clone(), time_provider.clone());
        let domain = domains
            .create(&DomainInput {
                name: "example.com".to_string(),
                title: "Example".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        (SqlitePageRepository::new(pool, time_provider), domains, domain.id)
    }

    fn page(name: &str, status: PublishStatus) -> PageInput {
        let mut input = PageInput::new(name, name.to_uppercase());
        input.status = status;
        input.content = json!([{"type": "hero", "heading": "Welcome"}]);
        input
    }

    #[tokio::test]
    async fn test_create_round_trips_content() {
        let (repo, _, domain_id) = setup().await;
        let created = repo
            .create(domain_id, &page("home", PublishStatus::Draft))
            .await
            .unwrap();

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.content, json!([{"type": "hero", "heading": "Welcome"}]));
        assert_eq!(found.status, PublishStatus::Draft);
        assert!(!found.show_faq);
    }

    #[tokio::test]
    async fn test_published_filters() {
        let (repo, _, domain_id) = setup().await;
        repo.create(domain_id, &page("draft", PublishStatus::Draft))
            .await
            .unwrap();
        let first = repo
            .create(domain_id, &page("about", PublishStatus::Published))
            .await
            .unwrap();
        repo.create(domain_id, &page("about", PublishStatus::Published))
            .await
            .unwrap();

        assert_eq!(repo.list_by_domain(domain_id, false).await.unwrap().len(), 3);
        assert_eq!(repo.list_by_domain(domain_id, true).await.unwrap().len(), 2);

        let found = repo
            .find_published_by_name(domain_id, "about")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, first.id);
        assert!(repo
            .find_published_by_name(domain_id, "draft")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_unknown_domain_is_rejected() {
        let (repo, _, _) = setup().await;
        let err = repo
            .create(999, &page("home", PublishStatus::Draft))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_and_cascade_from_domain() {
        let (repo, domains, domain_id) = setup().await;
        let created = repo
            .create(domain_id, &page("home", PublishStatus::Draft))
            .await
            .unwrap();

        let mut changed = page("home", PublishStatus::Published);
        changed.show_faq = true;
        let updated = repo.update(created.id, &changed).await.unwrap().unwrap();
        assert!(updated.is_published());
        assert!(updated.show_faq);

        domains.delete(domain_id).await.unwrap();
        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
    }
}
