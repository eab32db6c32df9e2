use anyhow::{anyhow, Context, Result};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::config::SyncConfig;
use super::event::{Command, SyncEvent};
use super::state::{DeckSnapshot, DeckState};
use super::stats::SyncStats;
use super::ticker::Ticker;
use super::tracker::{RequestTicket, RequestTracker};
use crate::context::{ContextResponse, ContextSource};

/// Capacity of the command and event queues
const QUEUE_CAPACITY: usize = 100;

/// Handle to a running synchronizer
///
/// The synchronizer owns the playback clock and all derived deck state. It
/// runs as a single task that handles one event at a time: commands from
/// this handle, ticks from the playback ticker, and completed fetches.
/// Dropping the handle (or calling `shutdown`) stops it.
pub struct SyncHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<DeckSnapshot>,
    task: JoinHandle<SyncStats>,
}

impl SyncHandle {
    /// Start a synchronizer fetching context from `source`
    ///
    /// Issues one request for the initial position right away.
    pub fn spawn(source: Arc<dyn ContextSource>, config: SyncConfig) -> Self {
        let (command_tx, command_rx) = mpsc::channel(QUEUE_CAPACITY);
        let (event_tx, event_rx) = mpsc::channel(QUEUE_CAPACITY);

        let (synchronizer, snapshot_rx) = Synchronizer::new(source, config, event_tx);
        let task = tokio::spawn(synchronizer.run(command_rx, event_rx));

        Self {
            commands: command_tx,
            snapshots: snapshot_rx,
            task,
        }
    }

    pub async fn play(&self) -> Result<DeckSnapshot> {
        self.request(Command::Play).await
    }

    pub async fn pause(&self) -> Result<DeckSnapshot> {
        self.request(Command::Pause).await
    }

    pub async fn toggle(&self) -> Result<DeckSnapshot> {
        self.request(Command::Toggle).await
    }

    /// Jump to `target` seconds
    ///
    /// The returned snapshot already has an empty subtitle history; the
    /// context for the new position arrives later.
    pub async fn scrub(&self, target: u64) -> Result<DeckSnapshot> {
        self.request(|reply| Command::Scrub(target, reply)).await
    }

    pub async fn stats(&self) -> Result<SyncStats> {
        self.request(Command::Stats).await
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> DeckSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified after every state change
    pub fn subscribe(&self) -> watch::Receiver<DeckSnapshot> {
        self.snapshots.clone()
    }

    /// Stop the synchronizer and return its final stats
    pub async fn shutdown(self) -> Result<SyncStats> {
        drop(self.commands);
        self.task.await.context("Synchronizer task panicked")
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.commands
            .send(make(reply_tx))
            .await
            .map_err(|_| anyhow!("Synchronizer is not running"))?;

        reply_rx.await.context("Synchronizer dropped the request")
    }
}

struct Synchronizer {
    config: SyncConfig,
    source: Arc<dyn ContextSource>,
    state: DeckState,
    tracker: RequestTracker,
    stats: SyncStats,

    /// Present only while playing
    ticker: Option<Ticker>,
    /// Generation of the most recently started ticker
    ticker_generation: u64,

    events: mpsc::Sender<SyncEvent>,
    snapshots: watch::Sender<DeckSnapshot>,
}

impl Synchronizer {
    fn new(
        source: Arc<dyn ContextSource>,
        config: SyncConfig,
        events: mpsc::Sender<SyncEvent>,
    ) -> (Self, watch::Receiver<DeckSnapshot>) {
        let mut state = DeckState::new(config.max_duration_secs);
        state.clock_mut().scrub(config.start_at);
        let (snapshot_tx, snapshot_rx) = watch::channel(state.snapshot());

        let synchronizer = Self {
            config,
            source,
            state,
            tracker: RequestTracker::new(),
            stats: SyncStats::new(),
            ticker: None,
            ticker_generation: 0,
            events,
            snapshots: snapshot_tx,
        };

        (synchronizer, snapshot_rx)
    }

    async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        mut events: mpsc::Receiver<SyncEvent>,
    ) -> SyncStats {
        info!(
            "Synchronizer started (source: {}, t={}s, track: {}s)",
            self.source.name(),
            self.state.clock().current_time(),
            self.config.max_duration_secs
        );

        self.request_context(self.state.clock().current_time());
        self.publish();

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(event) = events.recv() => self.handle_event(event),
            }
        }

        self.ticker = None;
        info!(
            "Synchronizer stopped: {} requests, {} applied, {} stale, {} failed",
            self.stats.requests_issued,
            self.stats.responses_applied,
            self.stats.responses_discarded,
            self.stats.fetch_failures
        );

        self.current_stats()
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Play(reply) => {
                self.play();
                self.reply(reply);
            }
            Command::Pause(reply) => {
                self.pause();
                self.reply(reply);
            }
            Command::Toggle(reply) => {
                if self.state.clock().is_playing() {
                    self.pause();
                } else {
                    self.play();
                }
                self.reply(reply);
            }
            Command::Scrub(target, reply) => {
                let time = self.state.scrub(target);
                info!("Scrubbed to t={}s", time);
                self.request_context(time);
                self.reply(reply);
            }
            Command::Stats(reply) => {
                let _ = reply.send(self.current_stats());
            }
        }
    }

    fn handle_event(&mut self, event: SyncEvent) {
        match event {
            SyncEvent::Tick(generation) if !self.is_live_tick(generation) => {
                // Queued by a ticker that has since been stopped
                debug!("Ignoring tick from ticker generation {}", generation);
                return;
            }
            SyncEvent::Tick(_) => match self.state.tick() {
                Some(time) => self.request_context(time),
                None => {
                    if !self.state.clock().is_playing() && self.ticker.take().is_some() {
                        info!("Reached end of track at t={}s", self.state.clock().current_time());
                    }
                }
            },
            SyncEvent::Fetched { ticket, result } => self.reconcile(ticket, result),
        }
        self.publish();
    }

    fn play(&mut self) {
        if self.state.clock_mut().play() {
            info!("Playback started at t={}s", self.state.clock().current_time());
            self.ticker_generation += 1;
            self.ticker = Some(Ticker::start(
                self.config.tick_interval,
                self.ticker_generation,
                self.events.clone(),
            ));
        }
    }

    fn is_live_tick(&self, generation: u64) -> bool {
        self.ticker
            .as_ref()
            .is_some_and(|ticker| ticker.generation() == generation)
    }

    fn pause(&mut self) {
        if self.state.clock_mut().pause() {
            info!("Playback paused at t={}s", self.state.clock().current_time());
        }
        self.ticker = None;
    }

    /// Issue a request for `timestamp_seconds` on its own task
    fn request_context(&mut self, timestamp_seconds: u64) {
        let ticket = self.tracker.issue(timestamp_seconds);
        self.stats.requests_issued += 1;

        let source = Arc::clone(&self.source);
        let events = self.events.clone();

        tokio::spawn(async move {
            let result = source.fetch_context(timestamp_seconds).await;
            // The synchronizer may already be gone; nothing to deliver to then.
            let _ = events.send(SyncEvent::Fetched { ticket, result }).await;
        });
    }

    fn reconcile(&mut self, ticket: RequestTicket, result: Result<ContextResponse>) {
        if !self.tracker.is_current(&ticket) {
            self.stats.responses_discarded += 1;
            debug!(
                "Discarding stale context for t={}s (seq {}, latest {})",
                ticket.timestamp_seconds,
                ticket.seq,
                self.tracker.issued()
            );
            return;
        }

        match result {
            Ok(response) => {
                let changed = self.state.reconcile(ticket.timestamp_seconds, response);
                self.stats.responses_applied += 1;
                debug!("Applied context for t={}s: {:?}", ticket.timestamp_seconds, changed);
            }
            Err(e) => {
                self.stats.fetch_failures += 1;
                warn!("Context fetch for t={}s failed: {:#}", ticket.timestamp_seconds, e);
            }
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.state.snapshot());
    }

    fn reply(&self, reply: oneshot::Sender<DeckSnapshot>) {
        self.publish();
        let _ = reply.send(self.state.snapshot());
    }

    fn current_stats(&self) -> SyncStats {
        SyncStats {
            current_time: self.state.clock().current_time(),
            is_playing: self.state.clock().is_playing(),
            ..self.stats.clone()
        }
    }
}
