use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use super::messages::{ChatRequest, ChatResponse, ContextResponse, SyncRequest};
use super::source::{ChatBackend, ContextSource};

/// HTTP client for the context backend
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client for the backend at `base_url` (e.g. `http://localhost:8000`)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        info!("Backend client targeting {}", base_url);

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Health check against `GET /health`
    pub async fn health_check(&self) -> Result<bool> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await;

        match response {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(_) => Ok(false),
        }
    }
}

#[async_trait::async_trait]
impl ContextSource for BackendClient {
    async fn fetch_context(&self, timestamp_seconds: u64) -> Result<ContextResponse> {
        debug!("Requesting context for t={}s", timestamp_seconds);

        let context = self
            .client
            .post(format!("{}/api/sync", self.base_url))
            .json(&SyncRequest { timestamp_seconds })
            .send()
            .await
            .context("Failed to send sync request")?
            .error_for_status()
            .context("Backend rejected sync request")?
            .json::<ContextResponse>()
            .await
            .context("Failed to parse sync response")?;

        Ok(context)
    }

    fn name(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl ChatBackend for BackendClient {
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let reply = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(request)
            .send()
            .await
            .context("Failed to send chat request")?
            .error_for_status()
            .context("Backend rejected chat request")?
            .json::<ChatResponse>()
            .await
            .context("Failed to parse chat response")?;

        Ok(reply)
    }
}
