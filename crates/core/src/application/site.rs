// Public site read model (what a rendered website needs)

use crate::domain::{
    Domain, DomainSettings, Faq, Page, PageId, Post, PostFilter, PublishStatus, SeoSettings,
};
use crate::error::{AppError, Result};
use crate::port::{
    DomainRepository, FaqRepository, PageRepository, PostRepository, SettingsRepository,
    TimeProvider,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Navigation entry for a published page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLink {
    pub id: PageId,
    pub name: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicSite {
    pub domain: Domain,
    pub settings: DomainSettings,
    pub seo: SeoSettings,
    pub pages: Vec<PageLink>,
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicPage {
    pub domain: String,
    pub page: Page,
    /// Active FAQs, empty unless the page shows them
    pub faqs: Vec<Faq>,
}

pub struct SiteService {
    domains: Arc<dyn DomainRepository>,
    pages: Arc<dyn PageRepository>,
    settings: Arc<dyn SettingsRepository>,
    faqs: Arc<dyn FaqRepository>,
    posts: Arc<dyn PostRepository>,
    time_provider: Arc<dyn TimeProvider>,
}

impl SiteService {
    pub fn new(
        domains: Arc<dyn DomainRepository>,
        pages: Arc<dyn PageRepository>,
        settings: Arc<dyn SettingsRepository>,
        faqs: Arc<dyn FaqRepository>,
        posts: Arc<dyn PostRepository>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            domains,
            pages,
            settings,
            faqs,
            posts,
            time_provider,
        }
    }

    async fn domain_by_name(&self, name: &str) -> Result<Domain> {
        let name = name.trim().trim_end_matches('.').to_lowercase();
        self.domains
            .find_by_name(&name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Site {} not found", name)))
    }

    pub async fn site(&self, name: &str) -> Result<PublicSite> {
        let domain = self.domain_by_name(name).await?;
        let now = self.time_provider.now();

        let settings = self
            .settings
            .get_settings(domain.id)
            .await?
            .unwrap_or_else(|| DomainSettings::defaults(domain.id, now));
        let seo = self
            .settings
            .get_seo(domain.id)
            .await?
            .unwrap_or_else(|| SeoSettings::empty(domain.id, now));
        let pages = self
            .pages
            .list_by_domain(domain.id, true)
            .await?
            .into_iter()
            .map(|p| PageLink {
                id: p.id,
                name: p.name,
                title: p.title,
            })
            .collect();
        let posts = self
            .posts
            .list(&PostFilter {
                domain_id: Some(domain.id),
                status: Some(PublishStatus::Published),
            })
            .await?;

        Ok(PublicSite {
            domain,
            settings,
            seo,
            pages,
            posts,
        })
    }

    /// A published page; drafts are reported as missing
    pub async fn page(&self, site: &str, page_name: &str) -> Result<PublicPage> {
        let domain = self.domain_by_name(site).await?;
        let page_name = page_name.trim().to_lowercase();
        let page = self
            .pages
            .find_published_by_name(domain.id, &page_name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Page {} not found", page_name)))?;

        let faqs = if page.show_faq {
            self.faqs.list_by_page(page.id, true).await?
        } else {
            Vec::new()
        };

        Ok(PublicPage {
            domain: domain.name,
            page,
            faqs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::{
        FixedTimeProvider, MockDomainRepository, MockFaqRepository, MockPageRepository,
        MockPostRepository, MockSettingsRepository,
    };
    use chrono::Utc;
    use serde_json::json;

    fn domain() -> Domain {
        Domain {
            id: 1,
            name: "example.com".to_string(),
            title: "Example".to_string(),
            description: None,
            contact_email: None,
            contact_phone: None,
            contact_address: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn page(show_faq: bool) -> Page {
        Page {
            id: 10,
            domain_id: 1,
            name: "about".to_string(),
            title: "About".to_string(),
            content: json!([{"type": "text", "body": "hi"}]),
            meta_title: None,
            meta_description: None,
            meta_keywords: None,
            status: PublishStatus::Published,
            show_faq,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service(
        pages: MockPageRepository,
        settings: MockSettingsRepository,
        faqs: MockFaqRepository,
        posts: MockPostRepository,
    ) -> SiteService {
        let mut domains = MockDomainRepository::new();
        domains.expect_find_by_name().returning(|name| {
            Ok((name == "example.com").then(domain))
        });
        SiteService::new(
            Arc::new(domains),
            Arc::new(pages),
            Arc::new(settings),
            Arc::new(faqs),
            Arc::new(posts),
            Arc::new(FixedTimeProvider(Utc::now())),
        )
    }

    #[tokio::test]
    async fn test_site_collects_published_content() {
        let mut pages = MockPageRepository::new();
        pages.expect_list_by_domain().returning(|_, published_only| {
            assert!(published_only);
            Ok(vec![page(false)])
        });
        let mut settings = MockSettingsRepository::new();
        settings.expect_get_settings().returning(|_| Ok(None));
        settings.expect_get_seo().returning(|_| Ok(None));
        let mut posts = MockPostRepository::new();
        posts.expect_list().returning(|filter| {
            assert_eq!(filter.status, Some(PublishStatus::Published));
            assert_eq!(filter.domain_id, Some(1));
            Ok(Vec::new())
        });

        let site = service(pages, settings, MockFaqRepository::new(), posts)
            .site("Example.com")
            .await
            .unwrap();
        assert_eq!(site.domain.id, 1);
        assert_eq!(site.pages.len(), 1);
        assert_eq!(site.pages[0].name, "about");
        assert_eq!(site.settings.domain_id, 1);
    }

    #[tokio::test]
    async fn test_unknown_site_is_not_found() {
        let err = service(
            MockPageRepository::new(),
            MockSettingsRepository::new(),
            MockFaqRepository::new(),
            MockPostRepository::new(),
        )
        .site("missing.org")
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_page_includes_active_faqs_only_when_enabled() {
        let mut pages = MockPageRepository::new();
        pages
            .expect_find_published_by_name()
            .returning(|_, _| Ok(Some(page(false))));
        let mut faqs = MockFaqRepository::new();
        faqs.expect_list_by_page().never();

        let public = service(pages, MockSettingsRepository::new(), faqs, MockPostRepository::new())
            .page("example.com", "about")
            .await
            .unwrap();
        assert!(public.faqs.is_empty());

        let mut pages = MockPageRepository::new();
        pages
            .expect_find_published_by_name()
            .returning(|_, _| Ok(Some(page(true))));
        let mut faqs = MockFaqRepository::new();
        faqs.expect_list_by_page().times(1).returning(|page_id, active_only| {
            assert_eq!(page_id, 10);
            assert!(active_only);
            Ok(Vec::new())
        });

        let public = service(pages, MockSettingsRepository::new(), faqs, MockPostRepository::new())
            .page("example.com", "about")
            .await
            .unwrap();
        assert_eq!(public.domain, "example.com");
    }
}
