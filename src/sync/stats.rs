use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counters describing a synchronizer's lifetime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncStats {
    /// When the synchronizer started
    pub started_at: DateTime<Utc>,

    /// Context requests issued (ticks, scrubs and the initial fetch)
    pub requests_issued: u64,

    /// Responses merged into the deck
    pub responses_applied: u64,

    /// Responses dropped because a newer request had been issued
    pub responses_discarded: u64,

    /// Failed fetches (transport or parse errors)
    pub fetch_failures: u64,

    /// Playback position at the time of the report
    pub current_time: u64,

    pub is_playing: bool,
}

impl SyncStats {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            requests_issued: 0,
            responses_applied: 0,
            responses_discarded: 0,
            fetch_failures: 0,
            current_time: 0,
            is_playing: false,
        }
    }

    /// Requests whose outcome has not been observed yet
    pub fn in_flight(&self) -> u64 {
        self.requests_issued
            .saturating_sub(self.responses_applied + self.responses_discarded + self.fetch_failures)
    }
}

impl Default for SyncStats {
    fn default() -> Self {
        Self::new()
    }
}
