use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ambient mood of the current scene
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneTheme {
    #[default]
    Neutral,
    Action,
    Suspense,
    Emotional,
}

impl SceneTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Action => "action",
            Self::Suspense => "suspense",
            Self::Emotional => "emotional",
        }
    }
}

impl FromStr for SceneTheme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "neutral" => Ok(Self::Neutral),
            "action" => Ok(Self::Action),
            "suspense" => Ok(Self::Suspense),
            "emotional" => Ok(Self::Emotional),
            other => anyhow::bail!("Unknown scene theme: {}", other),
        }
    }
}

impl fmt::Display for SceneTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
