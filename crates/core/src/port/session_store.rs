// Session Store Port

use crate::domain::{Session, UserId};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Server-side storage of login sessions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self, session: &Session) -> Result<()>;

    async fn find(&self, id: &str) -> Result<Option<Session>>;

    async fn delete(&self, id: &str) -> Result<bool>;

    /// Drop every session of a user except `keep`, returns how many were removed
    async fn delete_other_sessions(&self, user_id: UserId, keep: &str) -> Result<u64>;

    /// Delete sessions with `expires_at <= now`, returns how many were removed
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64>;
}
