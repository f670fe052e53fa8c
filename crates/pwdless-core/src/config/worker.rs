//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Background worker settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the periodic refresh-token purge runs in this process.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Interval between expired refresh-token purges, in seconds.
    #[serde(default = "default_purge_interval")]
    pub purge_interval_seconds: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            purge_interval_seconds: default_purge_interval(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_purge_interval() -> u64 {
    3600
}
