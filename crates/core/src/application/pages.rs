// Page management service

use crate::domain::{DomainId, Page, PageId, PageInput};
use crate::error::{AppError, Result};
use crate::port::{DomainRepository, PageRepository};
use std::sync::Arc;
use tracing::info;

pub struct PageService {
    domains: Arc<dyn DomainRepository>,
    pages: Arc<dyn PageRepository>,
}

impl PageService {
    pub fn new(domains: Arc<dyn DomainRepository>, pages: Arc<dyn PageRepository>) -> Self {
        Self { domains, pages }
    }

    async fn require_domain(&self, domain_id: DomainId) -> Result<()> {
        match self.domains.find_by_id(domain_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found("Domain", domain_id)),
        }
    }

    pub async fn list_for_domain(&self, domain_id: DomainId) -> Result<Vec<Page>> {
        self.require_domain(domain_id).await?;
        self.pages.list_by_domain(domain_id, false).await
    }

    pub async fn get(&self, id: PageId) -> Result<Page> {
        self.pages
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Page", id))
    }

    pub async fn create(&self, domain_id: DomainId, mut input: PageInput) -> Result<Page> {
        input.normalize();
        input.validate()?;
        self.require_domain(domain_id).await?;

        let page = self.pages.create(domain_id, &input).await?;
        info!(page_id = page.id, domain_id, name = %page.name, "Page created");
        Ok(page)
    }

    pub async fn update(&self, id: PageId, mut input: PageInput) -> Result<Page> {
        input.normalize();
        input.validate()?;

        let page = self
            .pages
            .update(id, &input)
            .await?
            .ok_or_else(|| AppError::not_found("Page", id))?;
        info!(page_id = id, status = %page.status, "Page updated");
        Ok(page)
    }

    /// Delete a page and its FAQs
    pub async fn delete(&self, id: PageId) -> Result<()> {
        if !self.pages.delete(id).await? {
            return Err(AppError::not_found("Page", id));
        }
        info!(page_id = id, "Page deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::{MockDomainRepository, MockPageRepository};

    #[tokio::test]
    async fn test_create_under_missing_domain_is_not_found() {
        let mut domains = MockDomainRepository::new();
        domains.expect_find_by_id().returning(|_| Ok(None));
        let mut pages = MockPageRepository::new();
        pages.expect_create().never();

        let service = PageService::new(Arc::new(domains), Arc::new(pages));
        let err = service
            .create(42, PageInput::new("home", "Home"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg.contains("Domain 42")));
    }

    #[tokio::test]
    async fn test_list_for_missing_domain_is_not_found() {
        let mut domains = MockDomainRepository::new();
        domains.expect_find_by_id().returning(|_| Ok(None));

        let service = PageService::new(Arc::new(domains), Arc::new(MockPageRepository::new()));
        assert!(matches!(
            service.list_for_domain(1).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_page_rejected_before_lookup() {
        let mut domains = MockDomainRepository::new();
        domains.expect_find_by_id().never();

        let service = PageService::new(Arc::new(domains), Arc::new(MockPageRepository::new()));
        let err = service
            .create(1, PageInput::new("Not A Slug", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Domain(_)));
    }

    #[tokio::test]
    async fn test_update_missing_page_is_not_found() {
        let mut pages = MockPageRepository::new();
        pages.expect_update().returning(|_, _| Ok(None));

        let service = PageService::new(Arc::new(MockDomainRepository::new()), Arc::new(pages));
        let err = service
            .update(3, PageInput::new("home", "Home"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
