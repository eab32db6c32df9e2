use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a synchronizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Real time between playback ticks
    /// Default: 1 second (one virtual second per tick)
    pub tick_interval: Duration,

    /// Length of the virtual track in seconds; scrubs are clamped to it
    /// Default: 300 seconds (5 minutes)
    pub max_duration_secs: u64,

    /// Initial playback position in seconds
    pub start_at: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            max_duration_secs: 300,
            start_at: 0,
        }
    }
}
