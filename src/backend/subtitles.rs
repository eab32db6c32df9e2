use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

use crate::context::SubtitleEvent;

/// Demo track bundled with the binary
const BUILTIN_TRACK: &str = include_str!("../../assets/demo.srt");

/// A single timed subtitle
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub index: u32,
    /// Start in seconds
    pub start: f64,
    /// End in seconds
    pub end: f64,
    pub text: String,
}

impl Cue {
    pub fn contains(&self, seconds: f64) -> bool {
        self.start <= seconds && seconds <= self.end
    }
}

impl From<&Cue> for SubtitleEvent {
    fn from(cue: &Cue) -> Self {
        Self {
            text: cue.text.clone(),
            start: Some(cue.start),
            end: Some(cue.end),
            index: Some(cue.index),
        }
    }
}

/// Subtitle track parsed from SRT
#[derive(Debug, Clone, Default)]
pub struct SubtitleTrack {
    cues: Vec<Cue>,
}

impl SubtitleTrack {
    /// Parse SRT content; malformed blocks are skipped
    pub fn parse(content: &str) -> Self {
        let content = content.trim_start_matches('\u{feff}').replace("\r\n", "\n");

        let mut cues = Vec::new();
        for block in content.split("\n\n") {
            let lines: Vec<&str> = block
                .lines()
                .map(str::trim_end)
                .filter(|line| !line.is_empty())
                .collect();
            if lines.is_empty() {
                continue;
            }

            match parse_block(&lines) {
                Some(cue) => cues.push(cue),
                None => warn!("Skipping malformed subtitle block: {:?}", lines.first()),
            }
        }

        Self { cues }
    }

    /// Load an SRT file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read subtitle file {}", path.display()))?;

        let track = Self::parse(&content);
        info!("Loaded {} subtitles from {}", track.len(), path.display());

        Ok(track)
    }

    pub fn builtin() -> Self {
        Self::parse(BUILTIN_TRACK)
    }

    /// First cue active at `seconds` (inclusive at both ends)
    pub fn cue_at(&self, seconds: f64) -> Option<&Cue> {
        self.cues.iter().find(|cue| cue.contains(seconds))
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }
}

fn parse_block(lines: &[&str]) -> Option<Cue> {
    // The index line is optional in the wild; the timing line is not.
    let timing_at = lines.iter().position(|line| line.contains("-->"))?;
    let index = match timing_at {
        0 => 0,
        _ => lines[timing_at - 1].trim().parse().ok()?,
    };

    let (start, end) = lines[timing_at].split_once("-->")?;
    let start = parse_timestamp(start)?;
    let end = parse_timestamp(end)?;

    let text = lines[timing_at + 1..].join("\n");
    if text.is_empty() || end < start {
        return None;
    }

    Some(Cue {
        index,
        start,
        end,
        text,
    })
}

/// Parse `HH:MM:SS,mmm` (a `.` separator is accepted too) into seconds
fn parse_timestamp(raw: &str) -> Option<f64> {
    // Timing lines may carry position hints after the timestamp.
    let raw = raw.split_whitespace().next()?;
    let (clock, millis) = raw.split_once([',', '.']).unwrap_or((raw, "0"));

    let mut parts = clock.split(':');
    let hours: u64 = parts.next()?.parse().ok()?;
    let minutes: u64 = parts.next()?.parse().ok()?;
    let seconds: u64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    let millis: u64 = millis.parse().ok()?;

    Some((hours * 3600 + minutes * 60 + seconds) as f64 + millis as f64 / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "1\r\n00:00:01,000 --> 00:00:03,500\r\nHello there.\r\n\r\n\
                          2\r\n00:00:04,000 --> 00:00:06,000\r\nTwo\r\nlines\r\n\r\n\
                          garbage block\r\n\r\n\
                          3\r\n00:01:00,250 --> 00:01:02,000 X1:10 X2:20\r\nLater.\r\n";

    #[test]
    fn test_parse_sample() {
        let track = SubtitleTrack::parse(SAMPLE);

        assert_eq!(track.len(), 3);
        assert_eq!(track.cues()[0].text, "Hello there.");
        assert_eq!(track.cues()[1].text, "Two\nlines");
        assert_eq!(track.cues()[2].index, 3);
        assert!((track.cues()[2].start - 60.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cue_at_is_inclusive() {
        let track = SubtitleTrack::parse(SAMPLE);

        assert_eq!(track.cue_at(1.0).map(|c| c.index), Some(1));
        assert_eq!(track.cue_at(3.5).map(|c| c.index), Some(1));
        assert_eq!(track.cue_at(3.75), None);
        assert_eq!(track.cue_at(5.0).map(|c| c.index), Some(2));
        assert_eq!(track.cue_at(600.0), None);
    }

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(parse_timestamp("00:00:02,500"), Some(2.5));
        assert_eq!(parse_timestamp(" 01:02:03.000 "), Some(3723.0));
        assert_eq!(parse_timestamp("02:03"), None);
        assert_eq!(parse_timestamp("aa:bb:cc,ddd"), None);
    }

    #[test]
    fn test_builtin_track_loads() {
        let track = SubtitleTrack::builtin();
        assert!(!track.is_empty());
        assert!(track.cue_at(3.0).is_some());
    }

    #[test]
    fn test_load_from_file() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("track.srt");
        std::fs::write(&path, SAMPLE)?;

        let track = SubtitleTrack::load(&path)?;
        assert_eq!(track.len(), 3);

        assert!(SubtitleTrack::load(dir.path().join("missing.srt")).is_err());
        Ok(())
    }
}
