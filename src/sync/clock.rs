use serde::{Deserialize, Serialize};

/// Virtual playback clock in whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackClock {
    current_time: u64,
    is_playing: bool,
    max_duration: u64,
}

impl PlaybackClock {
    pub fn new(max_duration: u64) -> Self {
        Self {
            current_time: 0,
            is_playing: false,
            max_duration,
        }
    }

    pub fn current_time(&self) -> u64 {
        self.current_time
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn max_duration(&self) -> u64 {
        self.max_duration
    }

    pub fn at_end(&self) -> bool {
        self.current_time >= self.max_duration
    }

    /// Start playing; returns true if the clock was paused before
    ///
    /// A clock parked at the end of the track stays paused.
    pub fn play(&mut self) -> bool {
        if self.is_playing || self.at_end() {
            return false;
        }
        self.is_playing = true;
        true
    }

    /// Pause; returns true if the clock was playing before
    pub fn pause(&mut self) -> bool {
        std::mem::replace(&mut self.is_playing, false)
    }

    /// Advance by one second while playing
    ///
    /// Returns the new time, or `None` when paused. Reaching the end of the
    /// track pauses the clock instead of advancing.
    pub fn tick(&mut self) -> Option<u64> {
        if !self.is_playing {
            return None;
        }
        if self.at_end() {
            self.is_playing = false;
            return None;
        }
        self.current_time += 1;
        Some(self.current_time)
    }

    /// Jump to `target`, clamped to `[0, max_duration]`
    pub fn scrub(&mut self, target: u64) -> u64 {
        self.current_time = target.min(self.max_duration);
        self.current_time
    }
}

/// Format seconds as `m:ss`
pub fn format_time(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
