use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schema::{render_schema, RenderedTree, UiSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Ai,
}

/// One chat message; never modified once appended to a `ChatLog`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,

    /// Generative UI attached to an AI reply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attached_schema: Option<UiSchema>,

    /// Backend agent that produced the reply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_used: Option<String>,

    pub sent_at: DateTime<Utc>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            attached_schema: None,
            agent_used: None,
            sent_at: Utc::now(),
        }
    }

    pub fn ai(content: impl Into<String>) -> Self {
        Self {
            role: Role::Ai,
            ..Self::user(content)
        }
    }

    pub fn with_schema(mut self, schema: Option<UiSchema>) -> Self {
        self.attached_schema = schema;
        self
    }

    pub fn with_agent(mut self, agent: Option<String>) -> Self {
        self.agent_used = agent;
        self
    }

    /// Render the attached schema; empty when there is none
    pub fn render(&self) -> RenderedTree {
        self.attached_schema
            .as_ref()
            .map(render_schema)
            .unwrap_or_default()
    }
}

/// Append-only conversation history
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ChatLog {
    messages: Vec<Message>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return a reference to it
    pub fn append(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
