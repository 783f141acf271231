// SQLite PostRepository Implementation

use crate::error::{corrupt_row, map_sqlx_error};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domainhub_core::domain::{Post, PostFilter, PostId, PostRecord};
use domainhub_core::error::{AppError, Result};
use domainhub_core::port::{PostRepository, TimeProvider};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::sync::Arc;

const POST_COLUMNS: &str = "id, domain_id, title, slug, content, excerpt, status, published_at, \
                            created_at, updated_at";

pub struct SqlitePostRepository {
    pool: SqlitePool,
    time_provider: Arc<dyn TimeProvider>,
}

impl SqlitePostRepository {
    pub fn new(pool: SqlitePool, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            pool,
            time_provider,
        }
    }
}

#[async_trait]
impl PostRepository for SqlitePostRepository {
    async fn create(&self, record: &PostRecord) -> Result<Post> {
        let now = self.time_provider.now();
        let id = sqlx::query(
            r#"
            INSERT INTO posts (
                domain_id, title, slug, content, excerpt, status, published_at,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.domain_id)
        .bind(&record.title)
        .bind(&record.slug)
        .bind(&record.content)
        .bind(&record.excerpt)
        .bind(record.status.as_str())
        .bind(record.published_at)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .last_insert_rowid();

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Post {} vanished after insert", id)))
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {} FROM posts WHERE id = ?",
            POST_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(PostRow::into_post).transpose()
    }

    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>> {
        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {} FROM posts WHERE 1 = 1", POST_COLUMNS));
        if let Some(domain_id) = filter.domain_id {
            query.push(" AND domain_id = ").push_bind(domain_id);
        }
        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status.as_str());
        }
        query.push(" ORDER BY COALESCE(published_at, created_at) DESC, id DESC");

        let rows = query
            .build_query_as::<PostRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        rows.into_iter().map(PostRow::into_post).collect()
    }

    async fn update(&self, id: PostId, record: &PostRecord) -> Result<Option<Post>> {
        let result = sqlx::query(
            r#"
            UPDATE posts SET
                domain_id = ?, title = ?, slug = ?, content = ?, excerpt = ?,
                status = ?, published_at = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(record.domain_id)
        .bind(&record.title)
        .bind(&record.slug)
        .bind(&record.content)
        .bind(&record.excerpt)
        .bind(record.status.as_str())
        .bind(record.published_at)
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

    async fn delete(&self, id: PostId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: i64,
    domain_id: i64,
    title: String,
    slug: String,
    content: String,
    excerpt: Option<String>,
    status: String,
    published_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> Result<Post> {
        let status = self
            .status
            .parse()
            .map_err(|e| corrupt_row("posts", self.id, e))?;

        Ok(Post {
            id: self.id,
            domain_id: self.domain_id,
            title: self.title,
            slug: self.slug,
            content: self.content,
            excerpt: self.excerpt,
            status,
            published_at: self.published_at,
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
    use chrono::TimeZone;
    use domainhub_core::domain::{DomainId, DomainInput, PostInput, PublishStatus};
    use domainhub_core::port::DomainRepository;

    async fn setup() -> (SqlitePostRepository, SqliteDomainRepository, DomainId, DomainId) {
        let (pool, time_provider) = setup_test_db().await;
        let domains = SqliteDomainRepository::new(pool.clone(), time_provider.clone());
        let mut ids = Vec::new();
        for name in ["a.example.com", "b.example.com"] {
            let domain = domains
                .create(&DomainInput {
                    name: name.to_string(),
                    title: name.to_string(),
                    ..Default::default()
                })
                .await
                .unwrap();
            ids.push(domain.id);
        }
        (
            SqlitePostRepository::new(pool, time_provider),
            domains,
            ids[0],
            ids[1],
        )
    }

    fn record(domain_id: DomainId, title: &str, published: Option<(i32, u32)>) -> PostRecord {
        let mut input = PostInput::new(domain_id, title);
        if let Some((year, month)) = published {
            input.status = PublishStatus::Published;
            input.published_at = Some(Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).unwrap());
        }
        input.into_record(Utc::now())
    }

    #[tokio::test]
    async fn test_list_filters_and_orders_newest_first() {
        let (repo, _, a, b) = setup().await;
        repo.create(&record(a, "Old", Some((2023, 1)))).await.unwrap();
        repo.create(&record(a, "New", Some((2024, 1)))).await.unwrap();
        repo.create(&record(a, "Draft", None)).await.unwrap();
        repo.create(&record(b, "Other", Some((2024, 2)))).await.unwrap();

        assert_eq!(repo.list(&PostFilter::default()).await.unwrap().len(), 4);

        let published = repo
            .list(&PostFilter {
                domain_id: Some(a),
                status: Some(PublishStatus::Published),
            })
            .await
            .unwrap();
        let titles: Vec<&str> = published.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "Old"]);

        let drafts = repo
            .list(&PostFilter {
                domain_id: None,
                status: Some(PublishStatus::Draft),
            })
            .await
            .unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].slug, "draft");
    }

    #[tokio::test]
    async fn test_update_and_cascade() {
        let (repo, domains, a, b) = setup().await;
        let post = repo.create(&record(a, "Hello", None)).await.unwrap();

        let moved = repo
            .update(post.id, &record(b, "Hello again", Some((2024, 3))))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(moved.domain_id, b);
        assert_eq!(moved.slug, "hello-again");
        assert!(moved.published_at.is_some());

        domains.delete(b).await.unwrap();
        assert!(repo.find_by_id(post.id).await.unwrap().is_none());
        assert!(!repo.delete(post.id).await.unwrap());
    }
}
