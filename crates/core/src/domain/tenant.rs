// Domain (managed website / tenant) Model

use super::error::{Result, ValidationErrors};
use super::validate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Domain ID (SQLite rowid)
pub type DomainId = i64;

/// A managed website
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub id: DomainId,
    /// Hostname, unique across the installation
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create / full-update payload for a domain
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainInput {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub contact_address: Option<String>,
}

impl DomainInput {
    pub fn normalize(&mut self) {
        self.name = self.name.trim().trim_end_matches('.').to_lowercase();
        validate::trim(&mut self.title);
        validate::trim_opt(&mut self.description);
        validate::trim_opt(&mut self.contact_email);
        if let Some(email) = self.contact_email.as_mut() {
            *email = email.to_lowercase();
        }
        validate::trim_opt(&mut self.contact_phone);
        validate::trim_opt(&mut self.contact_address);
    }

    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();

        if self.name.is_empty() {
            errors.add("name", "is required");
        } else if !validate::is_valid_hostname(&self.name) {
            errors.add("name", "must be a valid hostname such as example.com");
        }

        validate::required(&mut errors, "title", &self.title, 200);
        validate::max_len(&mut errors, "description", self.description.as_deref(), 2000);

        if let Some(email) = self.contact_email.as_deref() {
            if !validate::is_valid_email(email) {
                errors.add("contact_email", "must be a valid email address");
            }
        }
        if let Some(phone) = self.contact_phone.as_deref() {
            let digits = phone.chars().filter(char::is_ascii_digit).count();
            let allowed = phone
                .chars()
                .all(|c| c.is_ascii_digit() || " +-().".contains(c));
            if !allowed || digits < 5 || phone.len() > 32 {
                errors.add("contact_phone", "must be a valid phone number");
            }
        }
        validate::max_len(&mut errors, "contact_address", self.contact_address.as_deref(), 500);

        errors.into_result()
    }
}
