// Maintenance Service
// Periodic session cleanup plus on-demand VACUUM

use super::shutdown::ShutdownToken;
use crate::error::Result;
use crate::port::{DatabaseStats, Maintenance, SessionStore, TimeProvider};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

/// Outcome of one maintenance run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceReport {
    pub purged_sessions: u64,
    pub vacuumed: bool,
    pub db_size_before_bytes: i64,
    pub db_size_after_bytes: i64,
}

/// Maintenance scheduler
///
/// Purges expired sessions every `interval`; `run_now` can also VACUUM.
pub struct MaintenanceScheduler {
    maintenance: Arc<dyn Maintenance>,
    sessions: Arc<dyn SessionStore>,
    time_provider: Arc<dyn TimeProvider>,
    interval: Duration,
}

impl MaintenanceScheduler {
    pub fn new(
        maintenance: Arc<dyn Maintenance>,
        sessions: Arc<dyn SessionStore>,
        time_provider: Arc<dyn TimeProvider>,
        interval: Duration,
    ) -> Self {
        Self {
            maintenance,
            sessions,
            time_provider,
            interval,
        }
    }

    /// Run maintenance loop until shutdown (spawn with tokio::spawn)
    pub async fn run(&self, mut shutdown: ShutdownToken) {
        info!(
            interval_secs = self.interval.as_secs(),
            "Maintenance scheduler started"
        );

        let mut tick = interval(self.interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = tick.tick() => {}
                _ = shutdown.wait() => {
                    info!("Maintenance scheduler stopped");
                    return;
                }
            }

            match self.purge_sessions().await {
                Ok(purged) if purged > 0 => {
                    info!(purged_sessions = purged, "Scheduled maintenance completed");
                }
                Ok(_) => {}
                Err(e) => {
                    error!(error = ?e, "Scheduled maintenance failed");
                }
            }
        }
    }

    async fn purge_sessions(&self) -> Result<u64> {
        self.sessions.purge_expired(self.time_provider.now()).await
    }

    /// Run maintenance immediately (manual trigger)
    pub async fn run_now(&self, force_vacuum: bool) -> Result<MaintenanceReport> {
        info!(force_vacuum, "Running manual maintenance...");

        let before = self.maintenance.get_stats().await?;
        let purged_sessions = self.purge_sessions().await?;
        if force_vacuum {
            self.maintenance.vacuum().await?;
        }
        let after = self.maintenance.get_stats().await?;

        let report = MaintenanceReport {
            purged_sessions,
            vacuumed: force_vacuum,
            db_size_before_bytes: before.db_size_bytes,
            db_size_after_bytes: after.db_size_bytes,
        };
        info!(
            purged_sessions = report.purged_sessions,
            db_size_bytes = report.db_size_after_bytes,
            "Manual maintenance completed"
        );
        Ok(report)
    }

    pub async fn stats(&self) -> Result<DatabaseStats> {
        self.maintenance.get_stats().await
    }
}
