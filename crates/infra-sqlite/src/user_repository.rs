// SQLite UserRepository Implementation

use crate::error::{corrupt_row, map_sqlx_error};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domainhub_core::domain::{Role, User, UserCredentials, UserId, UserRecord};
use domainhub_core::error::{AppError, Result};
use domainhub_core::port::{TimeProvider, UserRepository};
use sqlx::SqlitePool;
use std::sync::Arc;

const USER_COLUMNS: &str = "id, email, name, role, password_hash, created_at, updated_at";

pub struct SqliteUserRepository {
    pool: SqlitePool,
    time_provider: Arc<dyn TimeProvider>,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            pool,
            time_provider,
        }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn insert(&self, record: &UserRecord) -> Result<User> {
        let now = self.time_provider.now();
        let id = sqlx::query(
            r#"
            INSERT INTO users (email, name, role, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.email)
        .bind(&record.name)
        .bind(record.role.as_str())
        .bind(&record.password_hash)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .last_insert_rowid();

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("User {} vanished after insert", id)))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = ?",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE email = ?",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(UserRow::into_credentials).transpose()
    }

    async fn list(&self) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users ORDER BY id",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    async fn update_password(&self, id: UserId, password_hash: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(password_hash)
            .bind(self.time_provider.now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_unless_last_admin(&self, id: UserId) -> Result<bool> {
        // One statement: at least one admin survives concurrent deletes
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = ?
              AND (role <> ? OR (SELECT COUNT(*) FROM users WHERE role = ?) > 1)
            "#,
        )
        .bind(id)
        .bind(Role::Admin.as_str())
        .bind(Role::Admin.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    name: Option<String>,
    role: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_credentials(self) -> Result<UserCredentials> {
        let role: Role = self
            .role
            .parse()
            .map_err(|e| corrupt_row("users", self.id, e))?;
        Ok(UserCredentials {
            password_hash: self.password_hash,
            user: User {
                id: self.id,
                email: self.email,
                name: self.name,
                role,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
        })
    }

    fn into_user(self) -> Result<User> {
        self.into_credentials().map(|c| c.user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup_test_db;

    fn record(email: &str, role: Role) -> UserRecord {
        UserRecord {
            email: email.to_string(),
            name: Some("Tester".to_string()),
            role,
            password_hash: "$argon2id$fake".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let (pool, time_provider) = setup_test_db().await;
        let repo = SqliteUserRepository::new(pool, time_provider);

        let user = repo.insert(&record("a@example.com", Role::Admin)).await.unwrap();
        assert_eq!(user.role, Role::Admin);

        let found = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(found, user);

        let creds = repo
            .find_credentials("a@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(creds.password_hash, "$argon2id$fake");
        assert!(repo.find_credentials("b@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let (pool, time_provider) = setup_test_db().await;
        let repo = SqliteUserRepository::new(pool, time_provider);

        repo.insert(&record("a@example.com", Role::Admin)).await.unwrap();
        let err = repo
            .insert(&record("a@example.com", Role::Editor))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_counts_update_and_delete() {
        let (pool, time_provider) = setup_test_db().await;
        let repo = SqliteUserRepository::new(pool, time_provider);

        let admin = repo.insert(&record("a@example.com", Role::Admin)).await.unwrap();
        let editor = repo.insert(&record("e@example.com", Role::Editor)).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 2);
        assert_eq!(repo.list().await.unwrap().len(), 2);

        assert!(repo.update_password(admin.id, "new-hash").await.unwrap());
        let creds = repo.find_credentials(&admin.email).await.unwrap().unwrap();
        assert_eq!(creds.password_hash, "new-hash");

        assert!(repo.delete_unless_last_admin(editor.id).await.unwrap());
        assert!(!repo.delete_unless_last_admin(editor.id).await.unwrap());
        assert!(!repo.update_password(editor.id, "x").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_keeps_the_last_admin() {
        let (pool, time_provider) = setup_test_db().await;
        let repo = SqliteUserRepository::new(pool, time_provider);

        let first = repo.insert(&record("a@example.com", Role::Admin)).await.unwrap();
        let second = repo.insert(&record("b@example.com", Role::Admin)).await.unwrap();

        assert!(repo.delete_unless_last_admin(second.id).await.unwrap());
        assert!(!repo.delete_unless_last_admin(first.id).await.unwrap());
        assert!(repo.find_by_id(first.id).await.unwrap().is_some());
    }
}
