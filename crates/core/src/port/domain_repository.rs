// Domain Repository Port

use crate::domain::{Domain, DomainId, DomainInput};
use crate::error::Result;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DomainRepository: Send + Sync {
    /// Insert a domain together with its default settings and empty SEO
    /// settings, atomically. A taken name yields `AppError::Conflict`.
    async fn create(&self, input: &DomainInput) -> Result<Domain>;

    async fn find_by_id(&self, id: DomainId) -> Result<Option<Domain>>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Domain>>;

    /// All domains ordered by name
    async fn list(&self) -> Result<Vec<Domain>>;

    /// `None` when the domain does not exist
    async fn update(&self, id: DomainId, input: &DomainInput) -> Result<Option<Domain>>;

    /// Cascades to pages, FAQs, settings and posts
    async fn delete(&self, id: DomainId) -> Result<bool>;
}
