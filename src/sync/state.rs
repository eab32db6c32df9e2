use serde::Serialize;
use tracing::warn;

use super::clock::{format_time, PlaybackClock};
use super::history::SubtitleHistory;
use super::theme::SceneTheme;
use crate::context::ContextResponse;
use crate::schema::{render_schema, RenderedTree, UiSchema};

/// Derived deck state owned by the synchronizer
#[derive(Debug, Clone)]
pub struct DeckState {
    clock: PlaybackClock,
    history: SubtitleHistory,
    theme: SceneTheme,
    schema: Option<UiSchema>,
    logs: Vec<String>,
    last_synced: Option<u64>,
}

/// What a reconcile pass changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reconciled {
    pub subtitle_advanced: bool,
    pub logs_replaced: bool,
    pub schema_replaced: bool,
    pub theme_replaced: bool,
}

impl DeckState {
    pub fn new(max_duration: u64) -> Self {
        Self {
            clock: PlaybackClock::new(max_duration),
            history: SubtitleHistory::new(),
            theme: SceneTheme::default(),
            schema: None,
            logs: Vec::new(),
            last_synced: None,
        }
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut PlaybackClock {
        &mut self.clock
    }

    pub fn history(&self) -> &SubtitleHistory {
        &self.history
    }

    pub fn theme(&self) -> SceneTheme {
        self.theme
    }

    pub fn schema(&self) -> Option<&UiSchema> {
        self.schema.as_ref()
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    /// Jump the clock and drop per-timestamp state
    ///
    /// History is cleared here, before any fetch for the new time resolves;
    /// theme, schema and logs stay until a response replaces them.
    pub fn scrub(&mut self, target: u64) -> u64 {
        self.history.clear();
        self.clock.scrub(target)
    }

    /// Natural playback advance; history is left to the dedupe rule
    pub fn tick(&mut self) -> Option<u64> {
        self.clock.tick()
    }

    /// Merge a context response fetched for `timestamp_seconds`
    pub fn reconcile(&mut self, timestamp_seconds: u64, response: ContextResponse) -> Reconciled {
        let mut changed = Reconciled::default();

        if let Some(subtitle) = response.subtitle {
            changed.subtitle_advanced = self.history.push(&subtitle.text);
        }

        if let Some(logs) = response.logs {
            self.logs = logs;
            changed.logs_replaced = true;
        }

        if let Some(schema) = response.ui_schema.as_ref().and_then(UiSchema::from_update) {
            self.schema = Some(schema);
            changed.schema_replaced = true;
        }

        if let Some(tag) = response.theme {
            match tag.parse::<SceneTheme>() {
                Ok(theme) => {
                    self.theme = theme;
                    changed.theme_replaced = true;
                }
                Err(e) => warn!("Ignoring theme at t={}s: {}", timestamp_seconds, e),
            }
        }

        self.last_synced = Some(timestamp_seconds);
        changed
    }

    pub fn snapshot(&self) -> DeckSnapshot {
        DeckSnapshot {
            current_time: self.clock.current_time(),
            is_playing: self.clock.is_playing(),
            max_duration: self.clock.max_duration(),
            history: self.history.lines().map(str::to_string).collect(),
            theme: self.theme,
            schema: self.schema.clone(),
            logs: self.logs.clone(),
            last_synced: self.last_synced,
        }
    }
}

/// Immutable copy of the deck published after every synchronizer event
#[derive(Debug, Clone, Serialize)]
pub struct DeckSnapshot {
    pub current_time: u64,
    pub is_playing: bool,
    pub max_duration: u64,

    /// Subtitle lines, oldest first; the last one is the active line
    pub history: Vec<String>,

    pub theme: SceneTheme,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<UiSchema>,

    pub logs: Vec<String>,

    /// Timestamp of the last applied response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_synced: Option<u64>,
}

impl DeckSnapshot {
    pub fn active_line(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    pub fn trailing_lines(&self) -> &[String] {
        match self.history.split_last() {
            Some((_, older)) => older,
            None => &[],
        }
    }

    pub fn formatted_time(&self) -> String {
        format_time(self.current_time)
    }

    /// Render the retained schema; empty when nothing has been received yet
    pub fn render(&self) -> RenderedTree {
        self.schema.as_ref().map(render_schema).unwrap_or_default()
    }
}
