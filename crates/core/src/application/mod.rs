// Application Layer - Use Cases and Business Logic

pub mod auth;
pub mod domains;
pub mod faqs;
pub mod maintenance;
pub mod pages;
pub mod posts;
pub mod settings;
pub mod shutdown;
pub mod site;

// Re-exports
pub use auth::AuthService;
pub use domains::DomainService;
pub use faqs::FaqService;
pub use maintenance::{MaintenanceReport, MaintenanceScheduler};
pub use pages::PageService;
pub use posts::PostService;
pub use settings::SettingsService;
pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};
pub use site::{PageLink, PublicPage, PublicSite, SiteService};
