// Blog Post Domain Model (belongs to a Domain)

use super::error::{Result, ValidationErrors};
use super::page::PublishStatus;
use super::tenant::DomainId;
use super::validate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post ID (SQLite rowid)
pub type PostId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub domain_id: DomainId,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub status: PublishStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create / full-update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostInput {
    pub domain_id: DomainId,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub status: PublishStatus,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

/// Normalized post ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct PostRecord {
    pub domain_id: DomainId,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub status: PublishStatus,
    pub published_at: Option<DateTime<Utc>>,
}

impl PostInput {
    pub fn new(domain_id: DomainId, title: impl Into<String>) -> Self {
        Self {
            domain_id,
            title: title.into(),
            slug: None,
            content: String::new(),
            excerpt: None,
            status: PublishStatus::Draft,
            published_at: None,
        }
    }

    pub fn normalize(&mut self) {
        validate::trim(&mut self.title);
        validate::trim_opt(&mut self.slug);
        if let Some(slug) = self.slug.as_mut() {
            *slug = slug.to_lowercase();
        }
        validate::trim_opt(&mut self.excerpt);
    }

    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        validate::required(&mut errors, "title", &self.title, 200);
        if let Some(slug) = self.slug.as_deref() {
            if slug.len() > 200 || !validate::is_valid_slug(slug) {
                errors.add(
                    "slug",
                    "must be a slug of lowercase letters, digits and single hyphens",
                );
            }
        } else if !self.title.is_empty() && validate::slugify(&self.title).is_empty() {
            errors.add("slug", "cannot be derived from the title, provide one");
        }
        validate::max_len(&mut errors, "excerpt", self.excerpt.as_deref(), 1000);
        validate::max_len(&mut errors, "content", Some(self.content.as_str()), 200_000);
        errors.into_result()
    }

    /// Resolves the slug and the publication timestamp.
    ///
    /// Publishing without an explicit `published_at` stamps `now`.
    pub fn into_record(self, now: DateTime<Utc>) -> PostRecord {
        let slug = self
            .slug
            .unwrap_or_else(|| validate::slugify(&self.title).chars().take(200).collect());
        let published_at = match (self.status, self.published_at) {
            (PublishStatus::Published, None) => Some(now),
            (_, at) => at,
        };
        PostRecord {
            domain_id: self.domain_id,
            title: self.title,
            slug,
            content: self.content,
            excerpt: self.excerpt,
            status: self.status,
            published_at,
        }
    }
}

/// List filter for posts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostFilter {
    pub domain_id: Option<DomainId>,
    pub status: Option<PublishStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_slug_derived_from_title() {
        let mut input = PostInput::new(1, "  Hello, World! ");
        input.normalize();
        assert!(input.validate().is_ok());
        let record = input.into_record(Utc::now());
        assert_eq!(record.slug, "hello-world");
        assert_eq!(record.title, "Hello, World!");
    }

    #[test]
    fn test_publish_stamps_now_once() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut input = PostInput::new(1, "Launch");
        input.status = PublishStatus::Published;
        assert_eq!(input.clone().into_record(now).published_at, Some(now));

        let earlier = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        input.published_at = Some(earlier);
        assert_eq!(input.into_record(now).published_at, Some(earlier));
    }

    #[test]
    fn test_draft_keeps_no_publish_date() {
        let input = PostInput::new(1, "Draft");
        assert_eq!(input.into_record(Utc::now()).published_at, None);
    }

    #[test]
    fn test_rejects_bad_slug_and_underivable_title() {
        let mut input = PostInput::new(1, "Title");
        input.slug = Some("Bad Slug".to_string());
        assert!(input.validate().unwrap_err().to_string().contains("slug"));

        let input = PostInput::new(1, "!!!");
        assert!(input.validate().unwrap_err().to_string().contains("slug"));
    }
}
