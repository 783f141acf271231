// FAQ Repository Port

use crate::domain::{Faq, FaqId, FaqInput, PageId};
use crate::error::Result;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FaqRepository: Send + Sync {
    /// Without an explicit order the FAQ is appended after the last one
    async fn create(&self, page_id: PageId, input: &FaqInput) -> Result<Faq>;

    async fn find_by_id(&self, id: FaqId) -> Result<Option<Faq>>;

    /// FAQs of a page by `(order, id)`
    async fn list_by_page(&self, page_id: PageId, active_only: bool) -> Result<Vec<Faq>>;

    /// Without an explicit order the current position is kept
    async fn update(&self, id: FaqId, input: &FaqInput) -> Result<Option<Faq>>;

    async fn delete(&self, id: FaqId) -> Result<bool>;

    /// Assign `order = index` following `ids`, in one transaction
    async fn reorder(&self, page_id: PageId, ids: &[FaqId]) -> Result<()>;
}
