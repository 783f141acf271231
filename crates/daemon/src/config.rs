// Server Configuration
//
// Layered: optional TOML file (DOMAINHUB_CONFIG, default ./domainhub.toml),
// then DOMAINHUB__SECTION__KEY environment overrides.

use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use directories::ProjectDirs;
use domainhub_api_http::{HttpServerConfig, DEFAULT_COOKIE_NAME};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "DOMAINHUB_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "domainhub.toml";
const ENV_PREFIX: &str = "DOMAINHUB";
const DB_FILE_NAME: &str = "domainhub.db";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub logging: LoggingSettings,
    pub maintenance: MaintenanceSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub static_dir: Option<String>,
    pub cookie_name: String,
    pub secure_cookies: bool,
    pub rate_limit: RateLimitSettings,
}

impl Default for ServerSettings {
    fn default() -> Self {
        let http = HttpServerConfig::default();
        Self {
            host: http.host,
            port: http.port,
            static_dir: None,
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            secure_cookies: false,
            rate_limit: RateLimitSettings::default(),
        }
    }
}

impl ServerSettings {
    pub fn http_config(&self) -> HttpServerConfig {
        HttpServerConfig {
            host: self.host.clone(),
            port: self.port,
            static_dir: self.static_dir.as_deref().map(expand_path),
        }
    }
}

/// Token bucket for `/api`: `burst` requests at once, `per_second` sustained
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitSettings {
    pub burst: u32,
    pub per_second: u32,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            burst: 200,
            per_second: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// File path (`~` expanded) or `:memory:`; defaults to the platform data dir
    pub path: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: None,
            max_connections: 10,
        }
    }
}

impl DatabaseSettings {
    pub fn resolved_path(&self) -> PathBuf {
        match &self.path {
            Some(path) => expand_path(path),
            None => ProjectDirs::from("", "", "domainhub")
                .map(|dirs| dirs.data_dir().join(DB_FILE_NAME))
                .unwrap_or_else(|| PathBuf::from(DB_FILE_NAME)),
        }
    }

    pub fn is_memory(&self) -> bool {
        self.path.as_deref() == Some(":memory:")
    }

    pub fn url(&self) -> String {
        if self.is_memory() {
            "sqlite::memory:".to_string()
        } else {
            format!("sqlite://{}", self.resolved_path().display())
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub session_ttl_hours: i64,
    /// Created on startup when the user table is empty
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            session_ttl_hours: 24,
            bootstrap_admin: None,
        }
    }
}

impl AuthSettings {
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.session_ttl_hours.max(1))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub format: LogFormat,
    /// EnvFilter directives; RUST_LOG wins when set
    pub filter: Option<String>,
    /// Daily-rolling JSON log files are written here when set
    pub directory: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MaintenanceSettings {
    pub interval_minutes: u64,
}

impl Default for MaintenanceSettings {
    fn default() -> Self {
        Self {
            interval_minutes: 60,
        }
    }
}

impl MaintenanceSettings {
    pub fn interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.interval_minutes.max(1) * 60)
    }
}

pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

impl Settings {
    /// Load from `DOMAINHUB_CONFIG` (must exist when set) or `./domainhub.toml`
    /// (optional), then apply environment overrides.
    pub fn load() -> Result<Self> {
        let explicit = std::env::var(CONFIG_ENV).ok();
        let (path, required) = match &explicit {
            Some(path) => (expand_path(path), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        Self::load_from(&path, required)
    }

    pub fn load_from(path: &Path, required: bool) -> Result<Self> {
        let builder = Config::builder().add_source(File::from(path).required(required));
        Self::build(builder)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build config")?
            .try_deserialize()
            .context("Failed to deserialize config")
    }
}
