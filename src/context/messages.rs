use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Context sync
// ============================================================================

/// Request body for `POST /api/sync`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncRequest {
    pub timestamp_seconds: u64,
}

/// Context for a single playback timestamp
///
/// Every field is independently optional; an absent field means
/// "no update" for that part of the deck.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<SubtitleEvent>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<Vec<String>>,

    /// Raw UI schema; only a non-empty array replaces the displayed schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_schema: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

/// Subtitle cue active at the requested timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleEvent {
    pub text: String,

    /// Cue start in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,

    /// Cue end in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,

    /// Cue index within the subtitle track
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

impl SubtitleEvent {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            start: None,
            end: None,
            index: None,
        }
    }
}

// ============================================================================
// Chat
// ============================================================================

/// Request body for `POST /api/chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ChatData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_used: Option<String>,
}

/// Agent payload attached to a chat reply
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_schema: Option<Value>,

    /// Agent-specific fields merged alongside the schema
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
