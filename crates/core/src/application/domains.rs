// Domain (tenant) management service

use crate::domain::{Domain, DomainId, DomainInput};
use crate::error::{AppError, Result};
use crate::port::DomainRepository;
use std::sync::Arc;
use tracing::info;

pub struct DomainService {
    domains: Arc<dyn DomainRepository>,
}

impl DomainService {
    pub fn new(domains: Arc<dyn DomainRepository>) -> Self {
        Self { domains }
    }

    pub async fn list(&self) -> Result<Vec<Domain>> {
        self.domains.list().await
    }

    pub async fn get(&self, id: DomainId) -> Result<Domain> {
        self.domains
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Domain", id))
    }

    /// Create a domain with default settings. Duplicate names are a conflict.
    pub async fn create(&self, mut input: DomainInput) -> Result<Domain> {
        input.normalize();
        input.validate()?;

        let domain = self.domains.create(&input).await?;
        info!(domain_id = domain.id, name = %domain.name, "Domain created");
        Ok(domain)
    }

    pub async fn update(&self, id: DomainId, mut input: DomainInput) -> Result<Domain> {
        input.normalize();
        input.validate()?;

        let domain = self
            .domains
            .update(id, &input)
            .await?
            .ok_or_else(|| AppError::not_found("Domain", id))?;
        info!(domain_id = id, "Domain updated");
        Ok(domain)
    }

    /// Delete a domain and everything attached to it
    pub async fn delete(&self, id: DomainId) -> Result<()> {
        if !self.domains.delete(id).await? {
            return Err(AppError::not_found("Domain", id));
        }
        info!(domain_id = id, "Domain deleted");
        Ok(())
    }
}
