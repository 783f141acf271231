//! DomainHub SDK - Rust Client Library
//!
//! Typed async client for the DomainHub REST API.
//!
//! # Example
//!
//! ```no_run
//! use domainhub_sdk::{DomainHubClient, DomainInput};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DomainHubClient::connect("http://127.0.0.1:8080")?;
//!     client.login("admin@example.com", "secret-password").await?;
//!
//!     let domain = client
//!         .create_domain(&DomainInput {
//!             name: "example.com".to_string(),
//!             title: "Example".to_string(),
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("Created domain {}", domain.id);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::DomainHubClient;
pub use error::{Result, SdkError};
pub use types::{HealthResponse, StatsResponse};

pub use domainhub_core::application::{MaintenanceReport, PageLink, PublicPage, PublicSite};
pub use domainhub_core::domain::{
    Domain, DomainId, DomainInput, DomainSettings, DomainSettingsInput, Faq, FaqId, FaqInput,
    NewUser, Page, PageId, PageInput, Post, PostFilter, PostId, PostInput, PublishStatus, Role,
    SeoSettings, SeoSettingsInput, User, UserId,
};
pub use domainhub_core::port::DatabaseStats;
