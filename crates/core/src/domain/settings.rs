// Per-domain Settings & SEO Model (1:1 with Domain)

use super::error::{Result, ValidationErrors};
use super::tenant::DomainId;
use super::validate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Sections shown on a freshly created site
pub const DEFAULT_SECTIONS: &[&str] = &["hero", "about", "services", "faq", "contact"];

pub const TWITTER_CARDS: &[&str] = &["summary", "summary_large_image", "app", "player"];

/// Layout settings of a domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainSettings {
    pub domain_id: DomainId,
    pub visible_sections: Vec<String>,
    /// Array of `{ "label": ..., "href": ... }`
    pub navigation: Value,
    pub footer: Value,
    pub contact: Value,
    pub updated_at: DateTime<Utc>,
}

impl DomainSettings {
    /// Settings used for a new domain (or one missing its row)
    pub fn defaults(domain_id: DomainId, now: DateTime<Utc>) -> Self {
        let input = DomainSettingsInput::default();
        Self {
            domain_id,
            visible_sections: input.visible_sections,
            navigation: input.navigation,
            footer: input.footer,
            contact: input.contact,
            updated_at: now,
        }
    }
}

fn default_sections() -> Vec<String> {
    DEFAULT_SECTIONS.iter().map(|s| s.to_string()).collect()
}

fn empty_array() -> Value {
    Value::Array(Vec::new())
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// Full-update payload for domain settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainSettingsInput {
    #[serde(default = "default_sections")]
    pub visible_sections: Vec<String>,
    #[serde(default = "empty_array")]
    pub navigation: Value,
    #[serde(default = "empty_object")]
    pub footer: Value,
    #[serde(default = "empty_object")]
    pub contact: Value,
}

impl Default for DomainSettingsInput {
    fn default() -> Self {
        Self {
            visible_sections: default_sections(),
            navigation: empty_array(),
            footer: empty_object(),
            contact: empty_object(),
        }
    }
}

impl DomainSettingsInput {
    pub fn normalize(&mut self) {
        for section in self.visible_sections.iter_mut() {
            *section = section.trim().to_lowercase();
        }
        if self.navigation.is_null() {
            self.navigation = empty_array();
        }
        if self.footer.is_null() {
            self.footer = empty_object();
        }
        if self.contact.is_null() {
            self.contact = empty_object();
        }
    }

    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();

        let mut seen = HashSet::new();
        for (i, section) in self.visible_sections.iter().enumerate() {
            if section.is_empty() || section.len() > 50 {
                errors.add(format!("visible_sections[{}]", i), "must be 1-50 characters");
            } else if !seen.insert(section.as_str()) {
                errors.add(format!("visible_sections[{}]", i), "is listed twice");
            }
        }

        match self.navigation.as_array() {
            Some(items) => {
                for (i, item) in items.iter().enumerate() {
                    let label = item.get("label").and_then(Value::as_str).unwrap_or("");
                    let href = item.get("href").and_then(Value::as_str).unwrap_or("");
                    if !item.is_object() || label.trim().is_empty() || href.trim().is_empty() {
                        errors.add(
                            format!("navigation[{}]", i),
                            "must have a non-empty \"label\" and \"href\"",
                        );
                    }
                }
            }
            None => errors.add("navigation", "must be an array"),
        }

        for (field, value) in [("footer", &self.footer), ("contact", &self.contact)] {
            if !value.is_object() {
                errors.add(field, "must be an object");
            } else if validate::json_depth(value) > validate::MAX_JSON_DEPTH {
                errors.add(field, "is too deeply nested");
            }
        }

        errors.into_result()
    }
}

/// Search / social metadata of a domain
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeoSettings {
    pub domain_id: DomainId,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub google_analytics_id: Option<String>,
    pub google_tag_manager_id: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub twitter_card: Option<String>,
    pub twitter_site: Option<String>,
    pub robots: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl SeoSettings {
    pub fn empty(domain_id: DomainId, now: DateTime<Utc>) -> Self {
        Self {
            domain_id,
            updated_at: now,
            ..Default::default()
        }
    }
}

/// Full-update payload for SEO settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoSettingsInput {
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub google_analytics_id: Option<String>,
    pub google_tag_manager_id: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub twitter_card: Option<String>,
    pub twitter_site: Option<String>,
    pub robots: Option<String>,
}

impl SeoSettingsInput {
    pub fn normalize(&mut self) {
        for field in [
            &mut self.meta_title,
            &mut self.meta_description,
            &mut self.meta_keywords,
            &mut self.google_analytics_id,
            &mut self.google_tag_manager_id,
            &mut self.og_title,
            &mut self.og_description,
            &mut self.og_image,
            &mut self.twitter_card,
            &mut self.twitter_site,
            &mut self.robots,
        ] {
            validate::trim_opt(field);
        }
        if let Some(card) = self.twitter_card.as_mut() {
            *card = card.to_lowercase();
        }
    }

    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();

        validate::max_len(&mut errors, "meta_title", self.meta_title.as_deref(), 120);
        validate::max_len(
            &mut errors,
            "meta_description",
            self.meta_description.as_deref(),
            320,
        );
        validate::max_len(&mut errors, "meta_keywords", self.meta_keywords.as_deref(), 500);
        validate::max_len(&mut errors, "og_title", self.og_title.as_deref(), 120);
        validate::max_len(&mut errors, "og_description", self.og_description.as_deref(), 320);
        validate::max_len(&mut errors, "twitter_site", self.twitter_site.as_deref(), 50);
        validate::max_len(&mut errors, "robots", self.robots.as_deref(), 100);

        if let Some(id) = self.google_analytics_id.as_deref() {
            if !(id.starts_with("G-") || id.starts_with("UA-")) || id.len() > 30 {
                errors.add("google_analytics_id", "must start with G- or UA-");
            }
        }
        if let Some(id) = self.google_tag_manager_id.as_deref() {
            if !id.starts_with("GTM-") || id.len() > 30 {
                errors.add("google_tag_manager_id", "must start with GTM-");
            }
        }
        if let Some(url) = self.og_image.as_deref() {
            if !validate::is_http_url(url) {
                errors.add("og_image", "must be an absolute http(s) URL");
            }
        }
        if let Some(card) = self.twitter_card.as_deref() {
            if !TWITTER_CARDS.contains(&card) {
                errors.add(
                    "twitter_card",
                    format!("must be one of {}", TWITTER_CARDS.join(", ")),
                );
            }
        }

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use serde_json::json;

    #[test]
    fn test_settings_defaults_are_valid() {
        let input = DomainSettingsInput::default();
        assert!(input.validate().is_ok());
        assert_eq!(input.visible_sections.len(), DEFAULT_SECTIONS.len());
    }

    #[test]
    fn test_settings_rejects_bad_navigation_and_duplicates() {
        let mut input: DomainSettingsInput = serde_json::from_value(json!({
            "visible_sections": ["Hero", "hero"],
            "navigation": [{"label": "Home", "href": "/"}, {"label": "", "href": "/x"}],
            "footer": [],
        }))
        .unwrap();
        input.normalize();
        let Err(DomainError::Validation(errors)) = input.validate() else {
            panic!("expected validation error");
        };
        assert!(errors.has("visible_sections[1]"));
        assert!(!errors.has("navigation[0]"));
        assert!(errors.has("navigation[1]"));
        assert!(errors.has("footer"));
        assert!(!errors.has("contact"));
    }

    #[test]
    fn test_seo_validation() {
        let mut input = SeoSettingsInput {
            google_analytics_id: Some("G-ABC123".to_string()),
            google_tag_manager_id: Some("GTM-XYZ".to_string()),
            og_image: Some("https://cdn.example.com/card.png".to_string()),
            twitter_card: Some(" Summary_Large_Image ".to_string()),
            ..Default::default()
        };
        input.normalize();
        assert!(input.validate().is_ok());

        input.google_analytics_id = Some("12345".to_string());
        input.og_image = Some("card.png".to_string());
        input.twitter_card = Some("poster".to_string());
        let Err(DomainError::Validation(errors)) = input.validate() else {
            panic!("expected validation error");
        };
        assert!(errors.has("google_analytics_id"));
        assert!(errors.has("og_image"));
        assert!(errors.has("twitter_card"));
    }

    #[test]
    fn test_seo_blank_fields_become_none() {
        let mut input = SeoSettingsInput {
            meta_title: Some("   ".to_string()),
            ..Default::default()
        };
        input.normalize();
        assert_eq!(input.meta_title, None);
    }
}
