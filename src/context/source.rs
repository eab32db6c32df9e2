use anyhow::Result;

use super::messages::{ChatRequest, ChatResponse, ContextResponse};

/// Backend lookup of time-indexed context
///
/// Implementations:
/// - `BackendClient`: HTTP `POST /api/sync`
/// - in-process fakes for tests
#[async_trait::async_trait]
pub trait ContextSource: Send + Sync {
    /// Fetch the context for a playback timestamp (whole seconds)
    async fn fetch_context(&self, timestamp_seconds: u64) -> Result<ContextResponse>;

    /// Source name for logging
    fn name(&self) -> &str;
}

/// Backend chat exchange, treated as a plain request-reply call
#[async_trait::async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse>;
}
