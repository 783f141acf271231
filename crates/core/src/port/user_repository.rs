// User Repository Port

use crate::domain::{User, UserCredentials, UserId, UserRecord};
use crate::error::Result;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account. A taken email yields `AppError::Conflict`.
    async fn insert(&self, record: &UserRecord) -> Result<User>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>>;

    /// Lookup by (normalized) email, including the password hash
    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>>;

    async fn list(&self) -> Result<Vec<User>>;

    /// Returns false when the user does not exist
    async fn update_password(&self, id: UserId, password_hash: &str) -> Result<bool>;

    /// Delete an account unless it is the only remaining admin, as one atomic
    /// step. Returns false when nothing was deleted.
    async fn delete_unless_last_admin(&self, id: UserId) -> Result<bool>;

    async fn count(&self) -> Result<i64>;
}
