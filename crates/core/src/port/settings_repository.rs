// Domain Settings / SEO Repository Port

use crate::domain::{
    DomainId, DomainSettings, DomainSettingsInput, SeoSettings, SeoSettingsInput,
};
use crate::error::Result;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn get_settings(&self, domain_id: DomainId) -> Result<Option<DomainSettings>>;

    /// Insert or replace the settings row
    async fn save_settings(
        &self,
        domain_id: DomainId,
        input: &DomainSettingsInput,
    ) -> Result<DomainSettings>;

    async fn get_seo(&self, domain_id: DomainId) -> Result<Option<SeoSettings>>;

    /// Insert or replace the SEO row
    async fn save_seo(&self, domain_id: DomainId, input: &SeoSettingsInput) -> Result<SeoSettings>;
}
