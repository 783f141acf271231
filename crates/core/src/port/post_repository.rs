// Post Repository Port

use crate::domain::{Post, PostFilter, PostId, PostRecord};
use crate::error::Result;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, record: &PostRecord) -> Result<Post>;

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>>;

    /// Newest first (`published_at`, then `created_at`)
    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>>;

    async fn update(&self, id: PostId, record: &PostRecord) -> Result<Option<Post>>;

    async fn delete(&self, id: PostId) -> Result<bool>;
}
