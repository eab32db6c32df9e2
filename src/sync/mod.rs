//! Context synchronization
//!
//! This module provides the `SyncHandle` / synchronizer pair that:
//! - Owns the virtual playback clock (play/pause ticking, scrubbing)
//! - Requests context from a `ContextSource` on every clock change
//! - Discards responses to superseded requests
//! - Reconciles subtitle history, theme, schema and logs
//! - Publishes deck snapshots for rendering

mod clock;
mod config;
mod event;
mod history;
mod state;
mod stats;
mod synchronizer;
mod theme;
mod ticker;
mod tracker;

pub use clock::{format_time, PlaybackClock};
pub use config::SyncConfig;
pub use history::{SubtitleHistory, HISTORY_LEN};
pub use state::{DeckSnapshot, DeckState, Reconciled};
pub use stats::SyncStats;
pub use synchronizer::SyncHandle;
pub use theme::SceneTheme;
pub use tracker::{RequestTicket, RequestTracker};
