use std::collections::VecDeque;

use crate::sync::SceneTheme;

/// Number of recent lines considered when judging the scene
pub const SCENE_BUFFER_LEN: usize = 10;

/// Fewer buffered lines than this always read as neutral
const MIN_LINES: usize = 3;

const ACTION_WORDS: &[&str] = &["kill", "fight", "attack", "shoot", "blast"];
const EMOTIONAL_WORDS: &[&str] = &["love", "sorry", "cry", "tears", "miss"];
const SUSPENSE_WORDS: &[&str] = &["secret", "hide", "quiet", "unknown"];

/// Rolling window of recent dialogue used to guess the scene mood
#[derive(Debug, Clone)]
pub struct SceneBuffer {
    lines: VecDeque<String>,
    current: SceneTheme,
}

impl SceneBuffer {
    pub fn new() -> Self {
        Self {
            lines: VecDeque::with_capacity(SCENE_BUFFER_LEN),
            current: SceneTheme::Neutral,
        }
    }

    /// Buffer a line unless it is empty or already buffered
    pub fn add_line(&mut self, text: &str) {
        if text.is_empty() || self.lines.iter().any(|line| line == text) {
            return;
        }
        if self.lines.len() == SCENE_BUFFER_LEN {
            self.lines.pop_front();
        }
        self.lines.push_back(text.to_string());
    }

    /// Classify the buffered dialogue by keyword
    ///
    /// Action wins over emotional, emotional over suspense.
    pub fn analyze(&mut self) -> SceneTheme {
        if self.lines.len() < MIN_LINES {
            return SceneTheme::Neutral;
        }

        let transcript = self
            .lines
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        let mentions = |words: &[&str]| words.iter().any(|word| transcript.contains(word));

        self.current = if mentions(ACTION_WORDS) {
            SceneTheme::Action
        } else if mentions(EMOTIONAL_WORDS) {
            SceneTheme::Emotional
        } else if mentions(SUSPENSE_WORDS) {
            SceneTheme::Suspense
        } else {
            SceneTheme::Neutral
        };

        self.current
    }

    pub fn current_theme(&self) -> SceneTheme {
        self.current
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for SceneBuffer {
    fn default() -> Self {
        Self::new()
    }
}
