//! DomainHub Server - Main Entry Point

use anyhow::{Context, Result};
use domainhub_api_http::HttpServer;
use domainhub_core::application::shutdown_channel;
use domainhub_core::domain::{NewUser, Role};
use domainhub_daemon::{build_state, logging, Settings};
use domainhub_infra_sqlite::{create_pool_with, run_migrations};
use std::time::Duration;
use tracing::{error, info, warn};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Configuration, then logging (the guard flushes file logs on exit)
    let settings = Settings::load()?;
    let _log_guard = logging::init(&settings.logging)?;

    info!("DomainHub v{} starting...", VERSION);

    // 2. Database
    if !settings.database.is_memory() {
        let path = settings.database.resolved_path();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory {}", parent.display())
            })?;
        }
    }
    let url = settings.database.url();
    info!(database = %url, "Initializing database...");

    let pool = create_pool_with(&url, settings.database.max_connections)
        .await
        .map_err(|e| anyhow::anyhow!("DB pool creation failed: {}", e))?;
    run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    // 3. Services
    let state = build_state(pool.clone(), &settings);

    // 4. Bootstrap admin (only into an empty user table)
    match &settings.auth.bootstrap_admin {
        Some(admin) => {
            let new_admin = NewUser {
                email: admin.email.clone(),
                password: admin.password.clone(),
                name: admin.name.clone(),
                role: Role::Admin,
            };
            match state.auth.ensure_admin(new_admin).await {
                Ok(Some(user)) => {
                    info!(user_id = user.id, email = %user.email, "Bootstrap admin created")
                }
                Ok(None) => info!("Users already exist, bootstrap admin skipped"),
                Err(e) => return Err(anyhow::anyhow!("Bootstrap admin failed: {}", e)),
            }
        }
        None => {
            if state.auth.list_users().await.map(|u| u.is_empty()).unwrap_or(false) {
                warn!("No users exist and no bootstrap admin is configured; nobody can log in");
            }
        }
    }

    // 5. Maintenance scheduler
    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let scheduler = state.maintenance.clone();
    let maintenance_handle = tokio::spawn(async move {
        scheduler.run(shutdown_rx).await;
    });

    // 6. HTTP server (runs until Ctrl+C / SIGTERM)
    let server = HttpServer::bind(settings.server.http_config(), state)
        .await
        .context("HTTP server start failed")?;
    info!("System ready. Press Ctrl+C to shutdown");

    let result = server.run(shutdown_signal()).await;

    // 7. Graceful shutdown
    info!("Shutdown signal received. Stopping background tasks...");
    shutdown_tx.shutdown();
    if tokio::time::timeout(Duration::from_secs(5), maintenance_handle)
        .await
        .is_err()
    {
        warn!("Maintenance task did not stop in time");
    }
    pool.close().await;

    if let Err(e) = &result {
        error!(error = %e, "HTTP server failed");
    }
    info!("Shutdown complete.");
    result.context("HTTP server failed")
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
