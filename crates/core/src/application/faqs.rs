// FAQ management service

use crate::domain::{DomainError, Faq, FaqId, FaqInput, PageId};
use crate::error::{AppError, Result};
use crate::port::{FaqRepository, PageRepository};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

pub struct FaqService {
    pages: Arc<dyn PageRepository>,
    faqs: Arc<dyn FaqRepository>,
}

impl FaqService {
    pub fn new(pages: Arc<dyn PageRepository>, faqs: Arc<dyn FaqRepository>) -> Self {
        Self { pages, faqs }
    }

    async fn require_page(&self, page_id: PageId) -> Result<()> {
        match self.pages.find_by_id(page_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found("Page", page_id)),
        }
    }

    /// All FAQs of a page (inactive included) in display order
    pub async fn list_for_page(&self, page_id: PageId) -> Result<Vec<Faq>> {
        self.require_page(page_id).await?;
        self.faqs.list_by_page(page_id, false).await
    }

    pub async fn create(&self, page_id: PageId, mut input: FaqInput) -> Result<Faq> {
        input.normalize();
        input.validate()?;
        self.require_page(page_id).await?;

        let faq = self.faqs.create(page_id, &input).await?;
        info!(faq_id = faq.id, page_id, order = faq.sort_order, "FAQ created");
        Ok(faq)
    }

    pub async fn update(&self, id: FaqId, mut input: FaqInput) -> Result<Faq> {
        input.normalize();
        input.validate()?;

        let faq = self
            .faqs
            .update(id, &input)
            .await?
            .ok_or_else(|| AppError::not_found("FAQ", id))?;
        info!(faq_id = id, "FAQ updated");
        Ok(faq)
    }

    pub async fn delete(&self, id: FaqId) -> Result<()> {
        if !self.faqs.delete(id).await? {
            return Err(AppError::not_found("FAQ", id));
        }
        info!(faq_id = id, "FAQ deleted");
        Ok(())
    }

    /// Reorder a page's FAQs. `ids` must list every FAQ of the page exactly once.
    pub async fn reorder(&self, page_id: PageId, ids: Vec<FaqId>) -> Result<Vec<Faq>> {
        self.require_page(page_id).await?;

        let current: HashSet<FaqId> = self
            .faqs
            .list_by_page(page_id, false)
            .await?
            .iter()
            .map(|f| f.id)
            .collect();
        let requested: HashSet<FaqId> = ids.iter().copied().collect();

        if requested.len() != ids.len() {
            return Err(DomainError::field("ids", "contains duplicates").into());
        }
        if requested != current {
            return Err(DomainError::field(
                "ids",
                "must list exactly the FAQ ids of this page",
            )
            .into());
        }

        self.faqs.reorder(page_id, &ids).await?;
        info!(page_id, count = ids.len(), "FAQs reordered");
        self.faqs.list_by_page(page_id, false).await
    }
}
