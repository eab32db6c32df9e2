use std::sync::Arc;
use tracing::{error, info};

use super::message::{ChatLog, Message};
use crate::context::{ChatBackend, ChatRequest};
use crate::schema::UiSchema;

/// Reply appended when the backend cannot be reached
pub const UNREACHABLE_REPLY: &str = "Sorry, I couldn't reach the server.";

/// A conversation with the backend chat agent
pub struct ChatSession {
    backend: Arc<dyn ChatBackend>,
    user_id: String,
    log: ChatLog,
}

impl ChatSession {
    pub fn new(backend: Arc<dyn ChatBackend>, user_id: impl Into<String>) -> Self {
        Self {
            backend,
            user_id: user_id.into(),
            log: ChatLog::new(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn log(&self) -> &ChatLog {
        &self.log
    }

    /// Send a query and append both sides of the exchange
    ///
    /// Blank queries are ignored and return `None`. Backend failures do not
    /// propagate: they are logged and answered with a fallback reply.
    pub async fn send(&mut self, query: &str) -> Option<&Message> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        self.log.append(Message::user(query));

        let request = ChatRequest {
            query: query.to_string(),
            user_id: self.user_id.clone(),
        };

        let reply = match self.backend.send_chat(&request).await {
            Ok(response) => {
                info!(
                    "Chat reply from agent {}",
                    response.agent_used.as_deref().unwrap_or("unknown")
                );
                let schema = response
                    .data
                    .as_ref()
                    .and_then(|data| data.ui_schema.as_ref())
                    .and_then(UiSchema::from_update);

                Message::ai(response.response)
                    .with_schema(schema)
                    .with_agent(response.agent_used)
            }
            Err(e) => {
                error!("Chat request failed: {:#}", e);
                Message::ai(UNREACHABLE_REPLY)
            }
        };

        Some(self.log.append(reply))
    }
}
