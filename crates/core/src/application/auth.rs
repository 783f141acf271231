// Authentication & Account Service

use crate::domain::user::{check_password, normalize_email};
use crate::domain::{
    DomainError, NewUser, Role, Session, User, UserId, UserRecord, ValidationErrors,
};
use crate::error::{AppError, Result};
use crate::port::{PasswordHasher, SessionStore, TimeProvider, TokenProvider, UserRepository};
use chrono::Duration;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};

const INVALID_CREDENTIALS: &str = "invalid email or password";

/// Hashed once and verified against for unknown emails
const DUMMY_PASSWORD: &str = "domainhub-timing-equalizer";

/// Login sessions and user management
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionStore>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenProvider>,
    time_provider: Arc<dyn TimeProvider>,
    session_ttl: Duration,
    dummy_hash: OnceCell<String>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionStore>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenProvider>,
        time_provider: Arc<dyn TimeProvider>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            users,
            sessions,
            hasher,
            tokens,
            time_provider,
            session_ttl,
            dummy_hash: OnceCell::new(),
        }
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    async fn dummy_hash(&self) -> Result<&str> {
        self.dummy_hash
            .get_or_try_init(|| self.hasher.hash(DUMMY_PASSWORD))
            .await
            .map(String::as_str)
    }

    /// Verify credentials and open a new session.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller,
    /// in the response and in the hashing work done.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, Session)> {
        let email = normalize_email(email);
        let Some(credentials) = self.users.find_credentials(&email).await? else {
            let dummy = self.dummy_hash().await?;
            self.hasher.verify(password, dummy).await?;
            warn!(email = %email, "Login for unknown email");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        if !self
            .hasher
            .verify(password, &credentials.password_hash)
            .await?
        {
            warn!(user_id = credentials.user.id, "Login with wrong password");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let now = self.time_provider.now();
        let session = Session {
            id: self.tokens.new_token(),
            user_id: credentials.user.id,
            created_at: now,
            expires_at: now + self.session_ttl,
        };
        self.sessions.create(&session).await?;

        info!(user_id = credentials.user.id, "User logged in");
        Ok((credentials.user, session))
    }

    /// Resolve a session token to its user. Expired sessions are deleted.
    pub async fn authenticate(&self, token: &str) -> Result<User> {
        let Some(session) = self.sessions.find(token).await? else {
            return Err(AppError::Unauthorized("not logged in".to_string()));
        };

        if session.is_expired(self.time_provider.now()) {
            self.sessions.delete(token).await?;
            return Err(AppError::Unauthorized("session expired".to_string()));
        }

        match self.users.find_by_id(session.user_id).await? {
            Some(user) => Ok(user),
            None => {
                self.sessions.delete(token).await?;
                Err(AppError::Unauthorized("not logged in".to_string()))
            }
        }
    }

    /// Drop the server-side session (no-op for unknown tokens)
    pub async fn logout(&self, token: &str) -> Result<()> {
        if self.sessions.delete(token).await? {
            info!("User logged out");
        }
        Ok(())
    }

    /// Replace the user's password and sign out every other session.
    /// `session_token` is the session making the change and stays valid.
    pub async fn change_password(
        &self,
        user: &User,
        session_token: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<()> {
        let mut errors = ValidationErrors::new();
        check_password(&mut errors, "new_password", new_password);
        errors.into_result()?;

        let credentials = self
            .users
            .find_credentials(&user.email)
            .await?
            .ok_or_else(|| AppError::not_found("User", user.id))?;

        if !self
            .hasher
            .verify(current_password, &credentials.password_hash)
            .await?
        {
            return Err(DomainError::field("current_password", "is incorrect").into());
        }

        let hash = self.hasher.hash(new_password).await?;
        if !self.users.update_password(user.id, &hash).await? {
            return Err(AppError::not_found("User", user.id));
        }

        let revoked = self
            .sessions
            .delete_other_sessions(user.id, session_token)
            .await?;
        info!(user_id = user.id, revoked, "Password changed");
        Ok(())
    }

    pub async fn create_user(&self, mut new_user: NewUser) -> Result<User> {
        new_user.normalize();
        new_user.validate()?;

        let record = UserRecord {
            password_hash: self.hasher.hash(&new_user.password).await?,
            email: new_user.email,
            name: new_user.name,
            role: new_user.role,
        };
        let user = self.users.insert(&record).await?;

        info!(user_id = user.id, role = %user.role, "User created");
        Ok(user)
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.users.list().await
    }

    /// Delete an account. Self-deletion and removing the last admin are refused.
    pub async fn delete_user(&self, actor: &User, id: UserId) -> Result<()> {
        if actor.id == id {
            return Err(AppError::Validation(
                "you cannot delete your own account".to_string(),
            ));
        }

        if !self.users.delete_unless_last_admin(id).await? {
            // Still present means the last-admin guard refused it
            return Err(match self.users.find_by_id(id).await? {
                Some(_) => {
                    AppError::Validation("cannot delete the last admin account".to_string())
                }
                None => AppError::not_found("User", id),
            });
        }

        info!(user_id = id, deleted_by = actor.id, "User deleted");
        Ok(())
    }

    /// Create the first admin when the installation has no users yet.
    ///
    /// Returns the created account, or `None` if users already exist.
    pub async fn ensure_admin(&self, mut admin: NewUser) -> Result<Option<User>> {
        if self.users.count().await? > 0 {
            return Ok(None);
        }
        admin.role = Role::Admin;
        let user = self.create_user(admin).await?;
        info!(email = %user.email, "Bootstrap admin account created");
        Ok(Some(user))
    }
}
