// Dependency wiring: SQLite + security adapters into the core services

use crate::config::Settings;
use domainhub_api_http::{AppState, CookieConfig, RateLimiter, Services};
use domainhub_core::application::{
    AuthService, DomainService, FaqService, MaintenanceScheduler, PageService, PostService,
    SettingsService, SiteService,
};
use domainhub_core::port::{SystemTimeProvider, TimeProvider};
use domainhub_infra_security::{Argon2PasswordHasher, RandomTokenProvider};
use domainhub_infra_sqlite::{
    SqliteDomainRepository, SqliteFaqRepository, SqliteMaintenance, SqlitePageRepository,
    SqlitePool, SqlitePostRepository, SqliteSessionStore, SqliteSettingsRepository,
    SqliteUserRepository,
};
use std::sync::Arc;

/// Build the service graph over an already migrated pool
pub fn build_services(
    pool: SqlitePool,
    settings: &Settings,
    time_provider: Arc<dyn TimeProvider>,
) -> Services {
    let users = Arc::new(SqliteUserRepository::new(pool.clone(), time_provider.clone()));
    let sessions = Arc::new(SqliteSessionStore::new(pool.clone()));
    let domains = Arc::new(SqliteDomainRepository::new(pool.clone(), time_provider.clone()));
    let pages = Arc::new(SqlitePageRepository::new(pool.clone(), time_provider.clone()));
    let site_settings = Arc::new(SqliteSettingsRepository::new(
        pool.clone(),
        time_provider.clone(),
    ));
    let faqs = Arc::new(SqliteFaqRepository::new(pool.clone(), time_provider.clone()));
    let posts = Arc::new(SqlitePostRepository::new(pool.clone(), time_provider.clone()));
    let maintenance = Arc::new(SqliteMaintenance::new(pool));

    Services {
        auth: AuthService::new(
            users,
            sessions.clone(),
            Arc::new(Argon2PasswordHasher::new()),
            Arc::new(RandomTokenProvider::new()),
            time_provider.clone(),
            settings.auth.session_ttl(),
        ),
        domains: DomainService::new(domains.clone()),
        pages: PageService::new(domains.clone(), pages.clone()),
        settings: SettingsService::new(
            domains.clone(),
            site_settings.clone(),
            time_provider.clone(),
        ),
        faqs: FaqService::new(pages.clone(), faqs.clone()),
        posts: PostService::new(domains.clone(), posts.clone(), time_provider.clone()),
        site: SiteService::new(
            domains,
            pages,
            site_settings,
            faqs,
            posts,
            time_provider.clone(),
        ),
        maintenance: Arc::new(MaintenanceScheduler::new(
            maintenance,
            sessions,
            time_provider,
            settings.maintenance.interval(),
        )),
    }
}

/// Full HTTP state with the system clock
pub fn build_state(pool: SqlitePool, settings: &Settings) -> AppState {
    let services = build_services(pool, settings, Arc::new(SystemTimeProvider));
    let cookie = CookieConfig {
        name: settings.server.cookie_name.clone(),
        secure: settings.server.secure_cookies,
    };
    let limiter = RateLimiter::new(
        settings.server.rate_limit.burst,
        settings.server.rate_limit.per_second,
    );
    AppState::new(services, cookie, limiter)
}
