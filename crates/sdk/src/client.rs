//! DomainHub Client Implementation

use crate::error::{Result, SdkError};
use crate::types::{
    ChangePasswordRequest, ErrorBody, HealthResponse, LoginRequest, ReorderRequest, StatsResponse,
};
use domainhub_core::application::{MaintenanceReport, PublicPage, PublicSite};
use domainhub_core::domain::{
    Domain, DomainId, DomainInput, DomainSettings, DomainSettingsInput, Faq, FaqId, FaqInput,
    NewUser, Page, PageId, PageInput, Post, PostFilter, PostId, PostInput, SeoSettings,
    SeoSettingsInput, User, UserId,
};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// DomainHub API Client
///
/// Keeps the session cookie between calls, so `login` once and reuse the
/// client.
///
/// # Example
///
/// ```no_run
/// use domainhub_sdk::DomainHubClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = DomainHubClient::connect("http://127.0.0.1:8080")?;
/// client.login("admin@example.com", "secret-password").await?;
/// for domain in client.list_domains().await? {
///     println!("{} - {}", domain.name, domain.title);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DomainHubClient {
    http: Client,
    base: Url,
}

impl DomainHubClient {
    /// Create a client for the server at `url` (e.g. `http://127.0.0.1:8080`).
    /// No request is made until the first call.
    pub fn connect(url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref();
        let mut base =
            Url::parse(url).map_err(|e| SdkError::InvalidUrl(format!("{}: {}", url, e)))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(SdkError::InvalidUrl(format!(
                "{}: scheme must be http or https",
                url
            )));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let http = Client::builder()
            .cookie_store(true)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SdkError::Connection(format!("Failed to create client: {}", e)))?;

        Ok(Self { http, base })
    }

    /// Absolute URL of an `/api` path such as `domains/3`
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(&format!("api/{}", path.trim_start_matches('/')))
            .map_err(|e| SdkError::InvalidUrl(e.to_string()))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        Ok(self.http.request(method, self.endpoint(path)?))
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => body.describe(),
            Err(_) if text.is_empty() => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
            Err(_) => text,
        };
        Err(SdkError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = Self::check(request.send().await?).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn send_empty(&self, request: RequestBuilder) -> Result<()> {
        Self::check(request.send().await?).await?;
        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.request(Method::GET, path)?).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.send(self.request(Method::POST, path)?.json(body)).await
    }

    async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.send(self.request(Method::PUT, path)?.json(body)).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        self.send_empty(self.request(Method::DELETE, path)?).await
    }

    // ---- Session ----

    pub async fn health(&self) -> Result<HealthResponse> {
        self.get("health").await
    }

    /// Log in; the session cookie is kept for subsequent calls
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        self.post("login", &LoginRequest { email, password }).await
    }

    pub async fn logout(&self) -> Result<()> {
        self.send_empty(self.request(Method::POST, "logout")?).await
    }

    pub async fn current_user(&self) -> Result<User> {
        self.get("auth/user").await
    }

    pub async fn change_password(&self, current_password: &str, new_password: &str) -> Result<()> {
        let body = ChangePasswordRequest {
            current_password,
            new_password,
        };
        self.send_empty(self.request(Method::PUT, "auth/password")?.json(&body))
            .await
    }

    // ---- Users (admin) ----

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.get("users").await
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<User> {
        self.post("users", user).await
    }

    pub async fn delete_user(&self, id: UserId) -> Result<()> {
        self.delete(&format!("users/{}", id)).await
    }

    // ---- Domains ----

    pub async fn list_domains(&self) -> Result<Vec<Domain>> {
        self.get("domains").await
    }

    pub async fn get_domain(&self, id: DomainId) -> Result<Domain> {
        self.get(&format!("domains/{}", id)).await
    }

    pub async fn create_domain(&self, input: &DomainInput) -> Result<Domain> {
        self.post("domains", input).await
    }

    pub async fn update_domain(&self, id: DomainId, input: &DomainInput) -> Result<Domain> {
        self.put(&format!("domains/{}", id), input).await
    }

    /// Deletes the domain with all of its pages, FAQs, settings and posts
    pub async fn delete_domain(&self, id: DomainId) -> Result<()> {
        self.delete(&format!("domains/{}", id)).await
    }

    // ---- Pages ----

    pub async fn list_pages(&self, domain_id: DomainId) -> Result<Vec<Page>> {
        self.get(&format!("domains/{}/pages", domain_id)).await
    }

    pub async fn get_page(&self, id: PageId) -> Result<Page> {
        self.get(&format!("pages/{}", id)).await
    }

    pub async fn create_page(&self, domain_id: DomainId, input: &PageInput) -> Result<Page> {
        self.post(&format!("domains/{}/pages", domain_id), input)
            .await
    }

    pub async fn update_page(&self, id: PageId, input: &PageInput) -> Result<Page> {
        self.put(&format!("pages/{}", id), input).await
    }

    pub async fn delete_page(&self, id: PageId) -> Result<()> {
        self.delete(&format!("pages/{}", id)).await
    }

    // ---- Settings & SEO ----

    pub async fn get_settings(&self, domain_id: DomainId) -> Result<DomainSettings> {
        self.get(&format!("domains/{}/settings", domain_id)).await
    }

    pub async fn update_settings(
        &self,
        domain_id: DomainId,
        input: &DomainSettingsInput,
    ) -> Result<DomainSettings> {
        self.put(&format!("domains/{}/settings", domain_id), input)
            .await
    }

    pub async fn get_seo(&self, domain_id: DomainId) -> Result<SeoSettings> {
        self.get(&format!("domains/{}/seo", domain_id)).await
    }

    pub async fn update_seo(
        &self,
        domain_id: DomainId,
        input: &SeoSettingsInput,
    ) -> Result<SeoSettings> {
        self.put(&format!("domains/{}/seo", domain_id), input).await
    }

    // ---- FAQs ----

    pub async fn list_faqs(&self, page_id: PageId) -> Result<Vec<Faq>> {
        self.get(&format!("pages/{}/faqs", page_id)).await
    }

    pub async fn create_faq(&self, page_id: PageId, input: &FaqInput) -> Result<Faq> {
        self.post(&format!("pages/{}/faqs", page_id), input).await
    }

    pub async fn update_faq(&self, id: FaqId, input: &FaqInput) -> Result<Faq> {
        self.put(&format!("faqs/{}", id), input).await
    }

    pub async fn delete_faq(&self, id: FaqId) -> Result<()> {
        self.delete(&format!("faqs/{}", id)).await
    }

    /// `ids` must list every FAQ of the page, in the new order
    pub async fn reorder_faqs(&self, page_id: PageId, ids: &[FaqId]) -> Result<Vec<Faq>> {
        self.put(&format!("pages/{}/faqs/order", page_id), &ReorderRequest { ids })
            .await
    }

    // ---- Posts ----

    pub async fn list_posts(&self, filter: &PostFilter) -> Result<Vec<Post>> {
        self.send(self.request(Method::GET, "posts")?.query(filter))
            .await
    }

    pub async fn get_post(&self, id: PostId) -> Result<Post> {
        self.get(&format!("posts/{}", id)).await
    }

    pub async fn create_post(&self, input: &PostInput) -> Result<Post> {
        self.post("posts", input).await
    }

    pub async fn update_post(&self, id: PostId, input: &PostInput) -> Result<Post> {
        self.put(&format!("posts/{}", id), input).await
    }

    pub async fn delete_post(&self, id: PostId) -> Result<()> {
        self.delete(&format!("posts/{}", id)).await
    }

    // ---- Admin ----

    pub async fn stats(&self) -> Result<StatsResponse> {
        self.get("admin/stats").await
    }

    /// Purge expired sessions now; `force_vacuum` also compacts the database
    pub async fn run_maintenance(&self, force_vacuum: bool) -> Result<MaintenanceReport> {
        let request = self
            .request(Method::POST, "admin/maintenance")?
            .query(&[("force_vacuum", force_vacuum)]);
        self.send(request).await
    }

    // ---- Public read model ----

    pub async fn public_site(&self, name: &str) -> Result<PublicSite> {
        self.get(&format!("public/sites/{}", name)).await
    }

    pub async fn public_page(&self, name: &str, page: &str) -> Result<PublicPage> {
        self.get(&format!("public/sites/{}/pages/{}", name, page))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_under_api() {
        let client = DomainHubClient::connect("http://127.0.0.1:8080").unwrap();
        assert_eq!(
            client.endpoint("domains/3").unwrap().as_str(),
            "http://127.0.0.1:8080/api/domains/3"
        );

        // Base path without trailing slash is kept
        let client = DomainHubClient::connect("https://example.com/admin").unwrap();
        assert_eq!(
            client.endpoint("/health").unwrap().as_str(),
            "https://example.com/admin/api/health"
        );
    }

    #[test]
    fn test_invalid_urls_are_rejected() {
        assert!(matches!(
            DomainHubClient::connect("not a url"),
            Err(SdkError::InvalidUrl(_))
        ));
        assert!(matches!(
            DomainHubClient::connect("ftp://example.com"),
            Err(SdkError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_error_body_description() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"error":"validation_error","message":"Validation failed",
                "fields":[{"field":"name","message":"is required"}]}"#,
        )
        .unwrap();
        assert_eq!(body.describe(), "Validation failed (name: is required)");

        let body: ErrorBody =
            serde_json::from_str(r#"{"error":"not_found","message":"Domain 4 not found"}"#)
                .unwrap();
        assert_eq!(body.describe(), "Domain 4 not found");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_connection_error() {
        // Port 9 (discard) is closed on test machines
        let client = DomainHubClient::connect("http://127.0.0.1:9").unwrap();
        let err = client.health().await.unwrap_err();
        assert!(matches!(err, SdkError::Connection(_)), "got {:?}", err);
    }
}
