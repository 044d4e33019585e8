//! Image retention background task.
//!
//! Periodically deletes stored images older than the retention window.

use std::time::Duration;

use chrono::Utc;
use tokio::time::interval;
use tracing::{error, info};

use crate::store::{ImageStore, StoreError};

/// Longest retention honoured; larger values are clamped to it (100 years).
pub const MAX_RETENTION_HOURS: u64 = 100 * 365 * 24;

/// Configuration for the cleanup task.
#[derive(Debug, Clone)]
pub struct CleanupConfig {
    /// Whether cleanup is enabled
    pub enabled: bool,
    /// How often to run cleanup (in seconds)
    pub interval_secs: u64,
    /// Images older than this are deleted
    pub retention_hours: u64,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 3600,
            retention_hours: 24,
        }
    }
}

impl CleanupConfig {
    pub fn retention(&self) -> Duration {
        Duration::from_secs(self.retention_hours.min(MAX_RETENTION_HOURS) * 3600)
    }
}

/// Background cleanup task.
pub struct CleanupTask {
    store: ImageStore,
    config: CleanupConfig,
}

impl CleanupTask {
    pub fn new(store: ImageStore, config: CleanupConfig) -> Self {
        Self { store, config }
    }

    /// Run one sweep, returning the number of images deleted.
    pub async fn run_once(&self) -> Result<usize, StoreError> {
        let retention = self.config.retention();
        let cutoff = chrono::Duration::from_std(retention)
            .ok()
            .and_then(|age| Utc::now().checked_sub_signed(age));
        let removed = self.store.remove_older_than(retention).await?;
        info!(
            removed,
            cutoff = ?cutoff,
            dir = %self.store.root().display(),
            "Cleanup cycle complete"
        );
        Ok(removed)
    }

    /// Run the cleanup task in a loop.
    pub async fn run_forever(self) {
        if !self.config.enabled {
            info!("Cleanup task disabled");
            return;
        }

        info!(
            interval_secs = self.config.interval_secs,
            retention_hours = self.config.retention_hours,
            "Starting cleanup background task"
        );

        // The first tick completes immediately, so a sweep runs on startup
        let mut ticker = interval(Duration::from_secs(self.config.interval_secs));
        loop {
            ticker.tick().await;
            if let Err(e) = self.run_once().await {
                error!(error = %e, "Cleanup cycle failed");
            }
        }
    }
}
