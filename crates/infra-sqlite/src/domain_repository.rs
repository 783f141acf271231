// SQLite DomainRepository Implementation

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domainhub_core::domain::{Domain, DomainId, DomainInput, DomainSettings};
use domainhub_core::error::{AppError, Result};
use domainhub_core::port::{DomainRepository, TimeProvider};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::debug;

const DOMAIN_COLUMNS: &str = "id, name, title, description, contact_email, contact_phone, \
                              contact_address, created_at, updated_at";

pub struct SqliteDomainRepository {
    pool: SqlitePool,
    time_provider: Arc<dyn TimeProvider>,
}

impl SqliteDomainRepository {
    pub fn new(pool: SqlitePool, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            pool,
            time_provider,
        }
    }
}

#[async_trait]
impl DomainRepository for SqliteDomainRepository {
    async fn create(&self, input: &DomainInput) -> Result<Domain> {
        let now = self.time_provider.now();
        let defaults = DomainSettings::defaults(0, now);

        // Domain, settings and SEO rows commit together
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let id = sqlx::query(
            r#"
            INSERT INTO domains (
                name, title, description, contact_email, contact_phone, contact_address,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.name)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.contact_email)
        .bind(&input.contact_phone)
        .bind(&input.contact_address)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?
        .last_insert_rowid();

        sqlx::query(
            r#"
            INSERT INTO domain_settings (
                domain_id, visible_sections, navigation, footer, contact, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(serde_json::to_string(&defaults.visible_sections)?)
        .bind(defaults.navigation.to_string())
        .bind(defaults.footer.to_string())
        .bind(defaults.contact.to_string())
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        sqlx::query("INSERT INTO seo_settings (domain_id, updated_at) VALUES (?, ?)")
            .bind(id)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;
        debug!(domain_id = id, "Domain row inserted with default settings");

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Domain {} vanished after insert", id)))
    }

    async fn find_by_id(&self, id: DomainId) -> Result<Option<Domain>> {
        let row = sqlx::query_as::<_, DomainRow>(&format!(
            "SELECT {} FROM domains WHERE id = ?",
            DOMAIN_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(DomainRow::into_domain))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Domain>> {
        let row = sqlx::query_as::<_, DomainRow>(&format!(
            "SELECT {} FROM domains WHERE name = ?",
            DOMAIN_COLUMNS
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(DomainRow::into_domain))
    }

    async fn list(&self) -> Result<Vec<Domain>> {
        let rows = sqlx::query_as::<_, DomainRow>(&format!(
            "SELECT {} FROM domains ORDER BY name",
            DOMAIN_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(DomainRow::into_domain).collect())
    }

    async fn update(&self, id: DomainId, input: &DomainInput) -> Result<Option<Domain>> {
        let result = sqlx::query(
            r#"
            UPDATE domains SET
                name = ?, title = ?, description = ?, contact_email = ?,
                contact_phone = ?, contact_address = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.name)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.contact_email)
        .bind(&input.contact_phone)
        .bind(&input.contact_address)
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

    async fn delete(&self, id: DomainId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM domains WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DomainRow {
    id: i64,
    name: String,
    title: String,
    description: Option<String>,
    contact_email: Option<String>,
    contact_phone: Option<String>,
    contact_address: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DomainRow {
    fn into_domain(self) -> Domain {
        Domain {
            id: self.id,
            name: self.name,
            title: self.title,
            description: self.description,
            contact_email: self.contact_email,
            contact_phone: self.contact_phone,
            contact_address: self.contact_address,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
