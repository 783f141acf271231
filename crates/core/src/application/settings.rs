// Domain settings & SEO service

use crate::domain::{DomainId, DomainSettings, DomainSettingsInput, SeoSettings, SeoSettingsInput};
use crate::error::{AppError, Result};
use crate::port::{DomainRepository, SettingsRepository, TimeProvider};
use std::sync::Arc;
use tracing::info;

pub struct SettingsService {
    domains: Arc<dyn DomainRepository>,
    settings: Arc<dyn SettingsRepository>,
    time_provider: Arc<dyn TimeProvider>,
}

impl SettingsService {
    pub fn new(
        domains: Arc<dyn DomainRepository>,
        settings: Arc<dyn SettingsRepository>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            domains,
            settings,
            time_provider,
        }
    }

    async fn require_domain(&self, domain_id: DomainId) -> Result<()> {
        match self.domains.find_by_id(domain_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found("Domain", domain_id)),
        }
    }

    /// Stored settings, or the defaults when the row is missing
    pub async fn get_settings(&self, domain_id: DomainId) -> Result<DomainSettings> {
        self.require_domain(domain_id).await?;
        Ok(self
            .settings
            .get_settings(domain_id)
            .await?
            .unwrap_or_else(|| DomainSettings::defaults(domain_id, self.time_provider.now())))
    }

    pub async fn update_settings(
        &self,
        domain_id: DomainId,
        mut input: DomainSettingsInput,
    ) -> Result<DomainSettings> {
        input.normalize();
        input.validate()?;
        self.require_domain(domain_id).await?;

        let settings = self.settings.save_settings(domain_id, &input).await?;
        info!(domain_id, "Domain settings updated");
        Ok(settings)
    }

    /// Stored SEO settings, or an empty set when the row is missing
    pub async fn get_seo(&self, domain_id: DomainId) -> Result<SeoSettings> {
        self.require_domain(domain_id).await?;
        Ok(self
            .settings
            .get_seo(domain_id)
            .await?
            .unwrap_or_else(|| SeoSettings::empty(domain_id, self.time_provider.now())))
    }

    pub async fn update_seo(
        &self,
        domain_id: DomainId,
        mut input: SeoSettingsInput,
    ) -> Result<SeoSettings> {
        input.normalize();
        input.validate()?;
        self.require_domain(domain_id).await?;

        let seo = self.settings.save_seo(domain_id, &input).await?;
        info!(domain_id, "SEO settings updated");
        Ok(seo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::settings::DEFAULT_SECTIONS;
    use crate::domain::Domain;
    use crate::port::{FixedTimeProvider, MockDomainRepository, MockSettingsRepository};
    use chrono::{TimeZone, Utc};

    fn existing_domains() -> MockDomainRepository {
        let mut domains = MockDomainRepository::new();
        domains.expect_find_by_id().returning(|id| {
            Ok(Some(Domain {
                id,
                name: "example.com".to_string(),
                title: "Example".to_string(),
                description: None,
                contact_email: None,
                contact_phone: None,
                contact_address: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }))
        });
        domains
    }

    fn service(domains: MockDomainRepository, settings: MockSettingsRepository) -> SettingsService {
        let clock = FixedTimeProvider(Utc.with_ymd_and_hms(2024, 2, 2, 0, 0, 0).unwrap());
        SettingsService::new(Arc::new(domains), Arc::new(settings), Arc::new(clock))
    }

    #[tokio::test]
    async fn test_missing_row_yields_defaults() {
        let mut settings = MockSettingsRepository::new();
        settings.expect_get_settings().returning(|_| Ok(None));
        settings.expect_get_seo().returning(|_| Ok(None));

        let service = service(existing_domains(), settings);
        let got = service.get_settings(9).await.unwrap();
        assert_eq!(got.domain_id, 9);
        assert_eq!(got.visible_sections, DEFAULT_SECTIONS);

        let seo = service.get_seo(9).await.unwrap();
        assert_eq!(seo.domain_id, 9);
        assert_eq!(seo.meta_title, None);
    }

    #[tokio::test]
    async fn test_missing_domain_is_not_found() {
        let mut domains = MockDomainRepository::new();
        domains.expect_find_by_id().returning(|_| Ok(None));

        let service = service(domains, MockSettingsRepository::new());
        assert!(matches!(
            service.get_settings(1).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.update_seo(1, SeoSettingsInput::default()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_seo_is_rejected() {
        let mut settings = MockSettingsRepository::new();
        settings.expect_save_seo().never();

        let service = service(existing_domains(), settings);
        let err = service
            .update_seo(
                1,
                SeoSettingsInput {
                    google_tag_manager_id: Some("ABC".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("google_tag_manager_id"));
    }
}
