// Port Layer - Interfaces for external dependencies

pub mod domain_repository;
pub mod faq_repository;
pub mod maintenance;
pub mod page_repository;
pub mod post_repository;
pub mod security;
pub mod session_store;
pub mod settings_repository;
pub mod time_provider;
pub mod user_repository;

// Re-exports
pub use domain_repository::DomainRepository;
pub use faq_repository::FaqRepository;
pub use maintenance::{DatabaseStats, Maintenance};
pub use page_repository::PageRepository;
pub use post_repository::PostRepository;
pub use security::{PasswordHasher, TokenProvider};
pub use session_store::SessionStore;
pub use settings_repository::SettingsRepository;
pub use time_provider::{FixedTimeProvider, SystemTimeProvider, TimeProvider};
pub use user_repository::UserRepository;

#[cfg(test)]
pub use domain_repository::MockDomainRepository;
#[cfg(test)]
pub use faq_repository::MockFaqRepository;
#[cfg(test)]
pub use maintenance::MockMaintenance;
#[cfg(test)]
pub use page_repository::MockPageRepository;
#[cfg(test)]
pub use post_repository::MockPostRepository;
#[cfg(test)]
pub use security::{MockPasswordHasher, MockTokenProvider};
#[cfg(test)]
pub use session_store::MockSessionStore;
#[cfg(test)]
pub use settings_repository::MockSettingsRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
