// User & Session Domain Model

use super::error::{DomainError, Result, ValidationErrors};
use super::validate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// User ID (SQLite rowid)
pub type UserId = i64;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

/// Account role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Editor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "admin" => Ok(Role::Admin),
            "editor" => Ok(Role::Editor),
            other => Err(DomainError::InvalidValue {
                field: "role",
                value: other.to_string(),
            }),
        }
    }
}

/// User Entity (never carries the password hash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// User together with the stored hash, only used by login
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Account creation input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl NewUser {
    pub fn normalize(&mut self) {
        self.email = normalize_email(&self.email);
        validate::trim_opt(&mut self.name);
    }

    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        if self.email.is_empty() {
            errors.add("email", "is required");
        } else if !validate::is_valid_email(&self.email) {
            errors.add("email", "must be a valid email address");
        }
        check_password(&mut errors, "password", &self.password);
        validate::max_len(&mut errors, "name", self.name.as_deref(), 100);
        errors.into_result()
    }
}

/// Password hash ready to be stored for a new account
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
    pub password_hash: String,
}

/// Lowercased, trimmed email used for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn check_password(errors: &mut ValidationErrors, field: &str, password: &str) {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        errors.add(
            field,
            format!("must be at least {} characters", MIN_PASSWORD_LEN),
        );
    } else if len > MAX_PASSWORD_LEN {
        errors.add(
            field,
            format!("must be at most {} characters", MAX_PASSWORD_LEN),
        );
    }
}

/// Session token (opaque, random)
pub type SessionId = String;

/// Server-side login session referenced by the session cookie
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: SessionId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
