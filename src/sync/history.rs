use serde::Serialize;
use std::collections::VecDeque;

/// Number of subtitle lines kept for the karaoke view
pub const HISTORY_LEN: usize = 5;

/// Recently seen subtitle lines, oldest first
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct SubtitleHistory {
    lines: VecDeque<String>,
}

impl SubtitleHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line unless it repeats the newest one
    ///
    /// Returns true if the history advanced.
    pub fn push(&mut self, text: &str) -> bool {
        if self.active() == Some(text) {
            return false;
        }
        if self.lines.len() == HISTORY_LEN {
            self.lines.pop_front();
        }
        self.lines.push_back(text.to_string());
        true
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Newest line
    pub fn active(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    /// Older lines, oldest first
    pub fn trailing(&self) -> impl Iterator<Item = &str> {
        let older = self.lines.len().saturating_sub(1);
        self.lines.iter().take(older).map(String::as_str)
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
