use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use super::event::SyncEvent;

/// Scheduled playback tick task
///
/// Sends `SyncEvent::Tick(generation)` once per period, starting one period
/// after `start`. The task is aborted when the ticker is dropped; ticks it
/// already queued still carry its generation.
#[derive(Debug)]
pub(crate) struct Ticker {
    generation: u64,
    handle: JoinHandle<()>,
}

impl Ticker {
    pub(crate) fn start(
        period: Duration,
        generation: u64,
        events: mpsc::Sender<SyncEvent>,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if events.send(SyncEvent::Tick(generation)).await.is_err() {
                    break;
                }
            }

            debug!("Ticker {} stopped", generation);
        });

        Self { generation, handle }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
