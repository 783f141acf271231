// Shared Application State

use crate::rate_limiter::RateLimiter;
use domainhub_core::application::{
    AuthService, DomainService, FaqService, MaintenanceScheduler, PageService, PostService,
    SettingsService, SiteService,
};
use std::ops::Deref;
use std::sync::Arc;
use std::time::Instant;

pub const DEFAULT_COOKIE_NAME: &str = "domainhub_session";

/// Session cookie attributes
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_COOKIE_NAME.to_string(),
            secure: false,
        }
    }
}

/// Application services the handlers call into
pub struct Services {
    pub auth: AuthService,
    pub domains: DomainService,
    pub pages: PageService,
    pub settings: SettingsService,
    pub faqs: FaqService,
    pub posts: PostService,
    pub site: SiteService,
    /// Shared with the background maintenance task
    pub maintenance: Arc<MaintenanceScheduler>,
}

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

pub struct AppStateInner {
    pub services: Services,
    pub cookie: CookieConfig,
    pub limiter: RateLimiter,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(services: Services, cookie: CookieConfig, limiter: RateLimiter) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                services,
                cookie,
                limiter,
                started_at: Instant::now(),
            }),
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

impl Deref for AppState {
    type Target = AppStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Deref for AppStateInner {
    type Target = Services;

    fn deref(&self) -> &Self::Target {
        &self.services
    }
}
