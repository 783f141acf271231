// Blog post service

use crate::domain::{DomainError, Post, PostFilter, PostId, PostInput, PublishStatus};
use crate::error::{AppError, Result};
use crate::port::{DomainRepository, PostRepository, TimeProvider};
use std::sync::Arc;
use tracing::info;

pub struct PostService {
    domains: Arc<dyn DomainRepository>,
    posts: Arc<dyn PostRepository>,
    time_provider: Arc<dyn TimeProvider>,
}

impl PostService {
    pub fn new(
        domains: Arc<dyn DomainRepository>,
        posts: Arc<dyn PostRepository>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            domains,
            posts,
            time_provider,
        }
    }

    pub async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>> {
        self.posts.list(filter).await
    }

    pub async fn get(&self, id: PostId) -> Result<Post> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Post", id))
    }

    /// The owning domain comes from the body, so a missing one is a field error
    async fn check_input(&self, input: &mut PostInput) -> Result<()> {
        input.normalize();
        input.validate()?;
        if self.domains.find_by_id(input.domain_id).await?.is_none() {
            return Err(DomainError::field("domain_id", "does not exist").into());
        }
        Ok(())
    }

    pub async fn create(&self, mut input: PostInput) -> Result<Post> {
        self.check_input(&mut input).await?;

        let record = input.into_record(self.time_provider.now());
        let post = self.posts.create(&record).await?;
        info!(post_id = post.id, domain_id = post.domain_id, slug = %post.slug, "Post created");
        Ok(post)
    }

    /// Full update. Re-publishing keeps the original publication date.
    pub async fn update(&self, id: PostId, mut input: PostInput) -> Result<Post> {
        let existing = self.get(id).await?;
        self.check_input(&mut input).await?;

        if input.status == PublishStatus::Published && input.published_at.is_none() {
            input.published_at = existing.published_at;
        }

        let record = input.into_record(self.time_provider.now());
        let post = self
            .posts
            .update(id, &record)
            .await?
            .ok_or_else(|| AppError::not_found("Post", id))?;
        info!(post_id = id, status = %post.status, "Post updated");
        Ok(post)
    }

    pub async fn delete(&self, id: PostId) -> Result<()> {
        if !self.posts.delete(id).await? {
            return Err(AppError::not_found("Post", id));
        }
        info!(post_id = id, "Post deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Domain, PostRecord};
    use crate::port::{FixedTimeProvider, MockDomainRepository, MockPostRepository};
    use chrono::{DateTime, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap()
    }

    fn domains(exists: bool) -> MockDomainRepository {
        let mut domains = MockDomainRepository::new();
        domains.expect_find_by_id().returning(move |id| {
            Ok(exists.then(|| Domain {
                id,
                name: "example.com".to_string(),
                title: "Example".to_string(),
                description: None,
                contact_email: None,
                contact_phone: None,
                contact_address: None,
                created_at: now(),
                updated_at: now(),
            }))
        });
        domains
    }

    fn from_record(id: PostId, record: &PostRecord) -> Post {
        Post {
            id,
            domain_id: record.domain_id,
            title: record.title.clone(),
            slug: record.slug.clone(),
            content: record.content.clone(),
            excerpt: record.excerpt.clone(),
            status: record.status,
            published_at: record.published_at,
            created_at: now(),
            updated_at: now(),
        }
    }

    fn service(domains: MockDomainRepository, posts: MockPostRepository) -> PostService {
        PostService::new(
            Arc::new(domains),
            Arc::new(posts),
            Arc::new(FixedTimeProvider(now())),
        )
    }

    #[tokio::test]
    async fn test_unknown_domain_is_field_error() {
        let mut posts = MockPostRepository::new();
        posts.expect_create().never();

        let err = service(domains(false), posts)
            .create(PostInput::new(77, "Hello"))
            .await
            .unwrap_err();
        let AppError::Domain(DomainError::Validation(errors)) = err else {
            panic!("expected validation error");
        };
        assert!(errors.has("domain_id"));
    }

    #[tokio::test]
    async fn test_create_published_stamps_now_and_slug() {
        let mut posts = MockPostRepository::new();
        posts
            .expect_create()
            .returning(|record| Ok(from_record(1, record)));

        let mut input = PostInput::new(1, "First Post!");
        input.status = PublishStatus::Published;
        let post = service(domains(true), posts).create(input).await.unwrap();
        assert_eq!(post.slug, "first-post");
        assert_eq!(post.published_at, Some(now()));
    }

    #[tokio::test]
    async fn test_update_keeps_original_publication_date() {
        let first_published = Utc.with_ymd_and_hms(2023, 12, 24, 18, 0, 0).unwrap();
        let mut posts = MockPostRepository::new();
        posts.expect_find_by_id().returning(move |id| {
            let mut post = from_record(
                id,
                &PostInput::new(1, "Old").into_record(first_published),
            );
            post.status = PublishStatus::Published;
            post.published_at = Some(first_published);
            Ok(Some(post))
        });
        posts
            .expect_update()
            .returning(|id, record| Ok(Some(from_record(id, record))));

        let mut input = PostInput::new(1, "Old, edited");
        input.status = PublishStatus::Published;
        let post = service(domains(true), posts).update(4, input).await.unwrap();
        assert_eq!(post.published_at, Some(first_published));
        assert_eq!(post.slug, "old-edited");
    }

    #[tokio::test]
    async fn test_update_missing_post_is_not_found() {
        let mut posts = MockPostRepository::new();
        posts.expect_find_by_id().returning(|_| Ok(None));

        let err = service(domains(true), posts)
            .update(4, PostInput::new(1, "Title"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
