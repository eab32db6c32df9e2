use anyhow::Result;
use tokio::sync::oneshot;

use super::state::DeckSnapshot;
use super::stats::SyncStats;
use super::tracker::RequestTicket;
use crate::context::ContextResponse;

/// User commands sent from a `SyncHandle`; each carries its reply channel
pub(crate) enum Command {
    Play(oneshot::Sender<DeckSnapshot>),
    Pause(oneshot::Sender<DeckSnapshot>),
    Toggle(oneshot::Sender<DeckSnapshot>),
    Scrub(u64, oneshot::Sender<DeckSnapshot>),
    Stats(oneshot::Sender<SyncStats>),
}

/// Events raised inside the synchronizer (ticker and fetch tasks)
pub(crate) enum SyncEvent {
    /// Playback tick from the ticker of the given generation
    Tick(u64),
    Fetched {
        ticket: RequestTicket,
        result: Result<ContextResponse>,
    },
}
