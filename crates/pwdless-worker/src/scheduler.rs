//! Interval scheduler for periodic maintenance tasks.

use std::time::Duration;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};

use pwdless_core::config::WorkerConfig;
use pwdless_core::error::AppError;

use crate::jobs::PurgeJob;

/// Runs maintenance jobs on fixed intervals.
pub struct PurgeScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Refresh token purge job
    purge: PurgeJob,
    /// Purge interval
    interval: Duration,
}

impl std::fmt::Debug for PurgeScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PurgeScheduler")
            .field("interval", &self.interval)
            .finish()
    }
}

impl PurgeScheduler {
    /// Create a new scheduler
    pub async fn new(purge: PurgeJob, config: &WorkerConfig) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self {
            scheduler,
            purge,
            interval: Duration::from_secs(config.purge_interval_seconds.max(1)),
        })
    }

    /// Register all default scheduled tasks
    pub async fn register_default_tasks(&self) -> Result<(), AppError> {
        self.register_refresh_token_purge().await?;

        tracing::info!("All scheduled tasks registered");
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Scheduler shut down");
        Ok(())
    }

    /// Refresh token purge, every `purge_interval_seconds`
    async fn register_refresh_token_purge(&self) -> Result<(), AppError> {
        let purge = self.purge.clone();
        let job = CronJob::new_repeated_async(self.interval, move |_uuid, _lock| {
            let purge = purge.clone();
            Box::pin(async move {
                purge.run().await;
            })
        })
        .map_err(|e| {
            AppError::internal(format!("Failed to create refresh_token_purge schedule: {}", e))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add refresh_token_purge schedule: {}", e))
        })?;

        tracing::info!(
            interval_seconds = self.interval.as_secs(),
            "Registered: refresh_token_purge"
        );
        Ok(())
    }
}
