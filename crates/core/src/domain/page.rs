// Page Domain Model

use super::error::{DomainError, Result, ValidationErrors};
use super::tenant::DomainId;
use super::validate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// Page ID (SQLite rowid)
pub type PageId = i64;

/// Publication state shared by pages and posts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    #[default]
    Draft,
    Published,
}

impl PublishStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishStatus::Draft => "draft",
            PublishStatus::Published => "published",
        }
    }
}

impl std::fmt::Display for PublishStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PublishStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "draft" => Ok(PublishStatus::Draft),
            "published" => Ok(PublishStatus::Published),
            other => Err(DomainError::InvalidValue {
                field: "status",
                value: other.to_string(),
            }),
        }
    }
}

/// Content unit of a domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub domain_id: DomainId,
    /// URL slug, e.g. `about-us`
    pub name: String,
    pub title: String,
    /// Ordered content sections, each an object with a `type`
    pub content: Value,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub status: PublishStatus,
    pub show_faq: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Page {
    pub fn is_published(&self) -> bool {
        self.status == PublishStatus::Published
    }
}

fn empty_sections() -> Value {
    Value::Array(Vec::new())
}

/// Create / full-update payload for a page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInput {
    pub name: String,
    pub title: String,
    #[serde(default = "empty_sections")]
    pub content: Value,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub meta_keywords: Option<String>,
    #[serde(default)]
    pub status: PublishStatus,
    #[serde(default)]
    pub show_faq: bool,
}

impl PageInput {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            content: empty_sections(),
            meta_title: None,
            meta_description: None,
            meta_keywords: None,
            status: PublishStatus::Draft,
            show_faq: false,
        }
    }

    pub fn normalize(&mut self) {
        self.name = self.name.trim().to_lowercase();
        validate::trim(&mut self.title);
        validate::trim_opt(&mut self.meta_title);
        validate::trim_opt(&mut self.meta_description);
        validate::trim_opt(&mut self.meta_keywords);
        if self.content.is_null() {
            self.content = empty_sections();
        }
    }

    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();

        if self.name.is_empty() {
            errors.add("name", "is required");
        } else if self.name.len() > 100 || !validate::is_valid_slug(&self.name) {
            errors.add(
                "name",
                "must be a slug of lowercase letters, digits and single hyphens",
            );
        }
        validate::required(&mut errors, "title", &self.title, 200);
        validate::max_len(&mut errors, "meta_title", self.meta_title.as_deref(), 120);
        validate::max_len(
            &mut errors,
            "meta_description",
            self.meta_description.as_deref(),
            320,
        );
        validate::max_len(&mut errors, "meta_keywords", self.meta_keywords.as_deref(), 500);
        check_sections(&mut errors, &self.content);

        errors.into_result()
    }
}

/// Content must be an array of objects each carrying a non-empty string `type`
fn check_sections(errors: &mut ValidationErrors, content: &Value) {
    let Some(sections) = content.as_array() else {
        errors.add("content", "must be an array of sections");
        return;
    };
    if validate::json_depth(content) > validate::MAX_JSON_DEPTH {
        errors.add("content", "is too deeply nested");
        return;
    }
    for (i, section) in sections.iter().enumerate() {
        let kind = section.as_object().and_then(|o| o.get("type"));
        match kind.and_then(Value::as_str) {
            Some(t) if !t.trim().is_empty() => {}
            _ => errors.add(
                format!("content[{}]", i),
                "must be an object with a non-empty \"type\"",
            ),
        }
    }
}
