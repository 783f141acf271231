// DomainHub Infrastructure - SQLite Adapter
// Implements: every repository port, SessionStore, Maintenance

mod connection;
mod domain_repository;
mod error;
mod faq_repository;
mod maintenance_impl;
mod migration;
mod page_repository;
mod post_repository;
mod session_store;
mod settings_repository;
mod user_repository;

pub use connection::{create_pool, create_pool_with};
pub use domain_repository::SqliteDomainRepository;
pub use faq_repository::SqliteFaqRepository;
pub use maintenance_impl::SqliteMaintenance;
pub use migration::{run_migrations, LATEST_VERSION};
pub use page_repository::SqlitePageRepository;
pub use post_repository::SqlitePostRepository;
pub use session_store::SqliteSessionStore;
pub use settings_repository::SqliteSettingsRepository;
pub use user_repository::SqliteUserRepository;

pub use sqlx::SqlitePool;

// Note: sqlx::Error conversion is handled by `error::map_sqlx_error`
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)

#[cfg(test)]
pub(crate) mod test_support {
    use crate::{create_pool, run_migrations};
    use domainhub_core::port::{SystemTimeProvider, TimeProvider};
    use sqlx::SqlitePool;
    use std::sync::Arc;

    pub async fn setup_test_db() -> (SqlitePool, Arc<dyn TimeProvider>) {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();
        (pool, Arc::new(SystemTimeProvider))
    }
}
