// SQLite SettingsRepository Implementation (domain_settings & seo_settings)

use crate::error::{corrupt_row, map_sqlx_error};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domainhub_core::domain::{
    DomainId, DomainSettings, DomainSettingsInput, SeoSettings, SeoSettingsInput,
};
use domainhub_core::error::{AppError, Result};
use domainhub_core::port::{SettingsRepository, TimeProvider};
use sqlx::SqlitePool;
use std::sync::Arc;

const SEO_COLUMNS: &str = "domain_id, meta_title, meta_description, meta_keywords, \
                           google_analytics_id, google_tag_manager_id, og_title, \
                           og_description, og_image, twitter_card, twitter_site, robots, \
                           updated_at";

pub struct SqliteSettingsRepository {
    pool: SqlitePool,
    time_provider: Arc<dyn TimeProvider>,
}

impl SqliteSettingsRepository {
    pub fn new(pool: SqlitePool, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            pool,
            time_provider,
        }
    }
}

#[async_trait]
impl SettingsRepository for SqliteSettingsRepository {
    async fn get_settings(&self, domain_id: DomainId) -> Result<Option<DomainSettings>> {
        let row = sqlx::query_as::<_, SettingsRow>(
            r#"
            SELECT domain_id, visible_sections, navigation, footer, contact, updated_at
            FROM domain_settings WHERE domain_id = ?
            "#,
        )
        .bind(domain_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(SettingsRow::into_settings).transpose()
    }

    async fn save_settings(
        &self,
        domain_id: DomainId,
        input: &DomainSettingsInput,
    ) -> Result<DomainSettings> {
        sqlx::query(
            r#"
            INSERT INTO domain_settings (
                domain_id, visible_sections, navigation, footer, contact, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(domain_id) DO UPDATE SET
                visible_sections = excluded.visible_sections,
                navigation = excluded.navigation,
                footer = excluded.footer,
                contact = excluded.contact,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(domain_id)
        .bind(serde_json::to_string(&input.visible_sections)?)
        .bind(input.navigation.to_string())
        .bind(input.footer.to_string())
        .bind(input.contact.to_string())
        .bind(self.time_provider.now())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        self.get_settings(domain_id).await?.ok_or_else(|| {
            AppError::Internal(format!("Settings of domain {} vanished after save", domain_id))
        })
    }

    async fn get_seo(&self, domain_id: DomainId) -> Result<Option<SeoSettings>> {
        let row = sqlx::query_as::<_, SeoRow>(&format!(
            "SELECT {} FROM seo_settings WHERE domain_id = ?",
            SEO_COLUMNS
        ))
        .bind(domain_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(SeoRow::into_seo))
    }

    async fn save_seo(&self, domain_id: DomainId, input: &SeoSettingsInput) -> Result<SeoSettings> {
        sqlx::query(&format!(
            r#"
            INSERT OR REPLACE INTO seo_settings ({})
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            SEO_COLUMNS
        ))
        .bind(domain_id)
        .bind(&input.meta_title)
        .bind(&input.meta_description)
        .bind(&input.meta_keywords)
        .bind(&input.google_analytics_id)
        .bind(&input.google_tag_manager_id)
        .bind(&input.og_title)
        .bind(&input.og_description)
        .bind(&input.og_image)
        .bind(&input.twitter_card)
        .bind(&input.twitter_site)
        .bind(&input.robots)
        .bind(self.time_provider.now())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        self.get_seo(domain_id).await?.ok_or_else(|| {
            AppError::Internal(format!("SEO of domain {} vanished after save", domain_id))
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SettingsRow {
    domain_id: i64,
    visible_sections: String,
    navigation: String,
    footer: String,
    contact: String,
    updated_at: DateTime<Utc>,
}

impl SettingsRow {
    fn into_settings(self) -> Result<DomainSettings> {
        let id = self.domain_id;
        let parse = |text: &str| {
            serde_json::from_str::<serde_json::Value>(text)
                .map_err(|e| corrupt_row("domain_settings", id, e))
        };
        Ok(DomainSettings {
            domain_id: id,
            visible_sections: serde_json::from_str(&self.visible_sections)
                .map_err(|e| corrupt_row("domain_settings", id, e))?,
            navigation: parse(&self.navigation)?,
            footer: parse(&self.footer)?,
            contact: parse(&self.contact)?,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SeoRow {
    domain_id: i64,
    meta_title: Option<String>,
    meta_description: Option<String>,
    meta_keywords: Option<String>,
    google_analytics_id: Option<String>,
    google_tag_manager_id: Option<String>,
    og_title: Option<String>,
    og_description: Option<String>,
    og_image: Option<String>,
    twitter_card: Option<String>,
    twitter_site: Option<String>,
    robots: Option<String>,
    updated_at: DateTime<Utc>,
}

impl SeoRow {
    fn into_seo(self) -> SeoSettings {
        SeoSettings {
            domain_id: self.domain_id,
            meta_title: self.meta_title,
            meta_description: self.meta_description,
            meta_keywords: self.meta_keywords,
            google_analytics_id: self.google_analytics_id,
            google_tag_manager_id: self.google_tag_manager_id,
            og_title: self.og_title,
            og_description: self.og_description,
            og_image: self.og_image,
            twitter_card: self.twitter_card,
            twitter_site: self.twitter_site,
            robots: self.robots,
            updated_at: self.updated_at,
        }
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

    async fn setup() -> (SqliteSettingsRepository, SqliteDomainRepository, DomainId) {
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
        (
            SqliteSettingsRepository::new(pool, time_provider),
            domains,
            domain.id,
        )
    }

    #[tokio::test]
    async fn test_save_settings_replaces_row() {
        let (repo, _, domain_id) = setup().await;
        let input = DomainSettingsInput {
            visible_sections: vec!["hero".to_string(), "contact".to_string()],
            navigation: json!([{"label": "Home", "href": "/"}]),
            footer: json!({"text": "(c) Example"}),
            contact: json!({"phone": "+1 555 0100"}),
        };

        let saved = repo.save_settings(domain_id, &input).await.unwrap();
        assert_eq!(saved.visible_sections, vec!["hero", "contact"]);
        assert_eq!(saved.navigation, json!([{"label": "Home", "href": "/"}]));
        assert_eq!(saved.footer["text"], "(c) Example");
    }

    #[tokio::test]
    async fn test_save_seo_and_clear_fields() {
        let (repo, _, domain_id) = setup().await;
        let mut input = SeoSettingsInput {
            meta_title: Some("Example".to_string()),
            google_analytics_id: Some("G-123".to_string()),
            ..Default::default()
        };
        let saved = repo.save_seo(domain_id, &input).await.unwrap();
        assert_eq!(saved.google_analytics_id.as_deref(), Some("G-123"));

        input.google_analytics_id = None;
        let saved = repo.save_seo(domain_id, &input).await.unwrap();
        assert_eq!(saved.google_analytics_id, None);
        assert_eq!(saved.meta_title.as_deref(), Some("Example"));
    }

    #[tokio::test]
    async fn test_settings_cascade_with_domain() {
        let (repo, domains, domain_id) = setup().await;
        domains.delete(domain_id).await.unwrap();
        assert!(repo.get_settings(domain_id).await.unwrap().is_none());
        assert!(repo.get_seo(domain_id).await.unwrap().is_none());
    }
}
