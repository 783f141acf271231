//! Simple SDK Example
//!
//! 1. Start the server with a bootstrap admin:
//!    ```bash
//!    DOMAINHUB__AUTH__BOOTSTRAP_ADMIN__EMAIL=admin@example.com \
//!    DOMAINHUB__AUTH__BOOTSTRAP_ADMIN__PASSWORD=change-me-now \
//!    cargo run --package domainhub-daemon
//!    ```
//!
//! 2. Run this example:
//!    ```bash
//!    cargo run --package domainhub-sdk --example simple
//!    ```

use domainhub_sdk::{DomainHubClient, DomainInput, FaqInput, PageInput, PublishStatus};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let url = std::env::var("DOMAINHUB_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".into());
    let client = DomainHubClient::connect(&url)?;

    let health = client.health().await?;
    println!("Server v{} up for {}s", health.version, health.uptime_secs);

    let user = client.login("admin@example.com", "change-me-now").await?;
    println!("Logged in as {} ({})", user.email, user.role);

    let domain = client
        .create_domain(&DomainInput {
            name: "demo.example.com".to_string(),
            title: "Demo Site".to_string(),
            ..Default::default()
        })
        .await?;
    println!("Created domain #{} {}", domain.id, domain.name);

    let mut page = PageInput::new("faq", "Frequently Asked Questions");
    page.status = PublishStatus::Published;
    page.show_faq = true;
    let page = client.create_page(domain.id, &page).await?;

    client
        .create_faq(page.id, &FaqInput::new("Is this a demo?", "Yes."))
        .await?;

    let public = client.public_page(&domain.name, &page.name).await?;
    println!("Public page '{}' has {} FAQ(s)", public.page.title, public.faqs.len());

    client.delete_domain(domain.id).await?;
    client.logout().await?;
    println!("Cleaned up");

    Ok(())
}
