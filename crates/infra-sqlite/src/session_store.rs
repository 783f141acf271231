// SQLite SessionStore Implementation

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domainhub_core::domain::{Session, UserId};
use domainhub_core::error::Result;
use domainhub_core::port::SessionStore;
use sqlx::SqlitePool;
use tracing::debug;

pub struct SqliteSessionStore {
    pool: SqlitePool,
}

impl SqliteSessionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn create(&self, session: &Session) -> Result<()> {
        sqlx::query(
            "INSERT INTO sessions (id, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&session.id)
        .bind(session.user_id)
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn find(&self, id: &str) -> Result<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(
            "SELECT id, user_id, created_at, expires_at FROM sessions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(SessionRow::into_session))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_other_sessions(&self, user_id: UserId, keep: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = ? AND id <> ?")
            .bind(user_id)
            .bind(keep)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(result.rows_affected())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let purged = result.rows_affected();
        debug!(purged, "Expired sessions purged");
        Ok(purged)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SessionRow {
    id: String,
    user_id: i64,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> Session {
        Session {
            id: self.id,
            user_id: self.user_id,
            created_at: self.created_at,
            expires_at: self.expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup_test_db;
    use crate::SqliteUserRepository;
    use chrono::Duration;
    use domainhub_core::domain::{Role, UserRecord};
    use domainhub_core::port::UserRepository;

    async fn setup() -> (SqliteSessionStore, SqliteUserRepository, UserId) {
        let (pool, time_provider) = setup_test_db().await;
        let users = SqliteUserRepository::new(pool.clone(), time_provider);
        let user = users
            .insert(&UserRecord {
                email: "a@example.com".to_string(),
                name: None,
                role: Role::Editor,
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();
        (SqliteSessionStore::new(pool), users, user.id)
    }

    fn session(id: &str, user_id: UserId, expires_in: Duration) -> Session {
        let now = Utc::now();
        Session {
            id: id.to_string(),
            user_id,
            created_at: now,
            expires_at: now + expires_in,
        }
    }

    #[tokio::test]
    async fn test_create_find_delete() {
        let (store, _, user_id) = setup().await;
        let s = session("tok", user_id, Duration::hours(1));
        store.create(&s).await.unwrap();

        let found = store.find("tok").await.unwrap().unwrap();
        assert_eq!(found.user_id, user_id);
        assert_eq!(found.expires_at, s.expires_at);

        assert!(store.delete("tok").await.unwrap());
        assert!(store.find("tok").await.unwrap().is_none());
        assert!(!store.delete("tok").await.unwrap());
    }

    #[tokio::test]
    async fn test_purge_expired_keeps_live_sessions() {
        let (store, _, user_id) = setup().await;
        store
            .create(&session("old", user_id, Duration::hours(-1)))
            .await
            .unwrap();
        store
            .create(&session("new", user_id, Duration::hours(1)))
            .await
            .unwrap();

        assert_eq!(store.purge_expired(Utc::now()).await.unwrap(), 1);
        assert!(store.find("old").await.unwrap().is_none());
        assert!(store.find("new").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_sessions_cascade_with_user() {
        let (store, users, user_id) = setup().await;
        store
            .create(&session("tok", user_id, Duration::hours(1)))
            .await
            .unwrap();

        assert!(users.delete_unless_last_admin(user_id).await.unwrap());
        assert!(store.find("tok").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_other_sessions_keeps_current() {
        let (store, _, user_id) = setup().await;
        for id in ["current", "laptop", "phone"] {
            store
                .create(&session(id, user_id, Duration::hours(1)))
                .await
                .unwrap();
        }

        assert_eq!(store.delete_other_sessions(user_id, "current").await.unwrap(), 2);
        assert!(store.find("current").await.unwrap().is_some());
        assert!(store.find("laptop").await.unwrap().is_none());
        assert_eq!(store.delete_other_sessions(user_id, "current").await.unwrap(), 0);
    }
}
