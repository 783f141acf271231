// Page Repository Port

use crate::domain::{DomainId, Page, PageId, PageInput};
use crate::error::Result;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageRepository: Send + Sync {
    async fn create(&self, domain_id: DomainId, input: &PageInput) -> Result<Page>;

    async fn find_by_id(&self, id: PageId) -> Result<Option<Page>>;

    /// Published page of a domain by slug (lowest id wins on duplicates)
    async fn find_published_by_name(&self, domain_id: DomainId, name: &str)
        -> Result<Option<Page>>;

    /// Pages of a domain ordered by id
    async fn list_by_domain(&self, domain_id: DomainId, published_only: bool)
        -> Result<Vec<Page>>;

    async fn update(&self, id: PageId, input: &PageInput) -> Result<Option<Page>>;

    /// Cascades to the page's FAQs
    async fn delete(&self, id: PageId) -> Result<bool>;
}
