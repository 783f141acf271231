// Password hashing & token generation ports

use crate::error::Result;
use async_trait::async_trait;

/// One-way password hashing
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing string
    async fn hash(&self, password: &str) -> Result<String>;

    /// Check a plaintext password against a stored hash
    async fn verify(&self, password: &str, hash: &str) -> Result<bool>;
}

/// Source of unguessable session tokens
#[cfg_attr(test, mockall::automock)]
pub trait TokenProvider: Send + Sync {
    fn new_token(&self) -> String;
}
