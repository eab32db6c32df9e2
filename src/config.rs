use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

use crate::sync::SyncConfig;

/// Default location of the config file, without extension
pub const DEFAULT_CONFIG_PATH: &str = "config/context-deck";

/// Environment overrides look like `DECK__BACKEND__PORT=9000`
const ENV_PREFIX: &str = "DECK";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub backend: BackendConfig,
    pub playback: PlaybackConfig,
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "context-deck".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Where the deck client sends requests
    pub base_url: String,
    /// Where the demo backend listens
    pub bind: String,
    pub port: u16,
    /// SRT file for the demo backend; the built-in track is used when absent
    pub subtitles_path: Option<String>,
    pub request_timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            bind: "0.0.0.0".to_string(),
            port: 8000,
            subtitles_path: None,
            request_timeout_ms: 5000,
        }
    }
}

impl BackendConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub tick_interval_ms: u64,
    pub max_duration_secs: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            max_duration_secs: 300,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub user_id: Option<String>,
}

impl ChatConfig {
    /// Configured user id, or a fresh `viewer-<uuid>`
    pub fn user_id(&self) -> String {
        self.user_id
            .clone()
            .unwrap_or_else(|| format!("viewer-{}", uuid::Uuid::new_v4()))
    }
}

impl Config {
    /// Load `path` (extension optional) layered with `DECK__*` overrides
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .with_context(|| format!("Failed to read config {}", path))?;

        settings
            .try_deserialize()
            .context("Failed to parse config")
    }

    /// Synchronizer settings derived from `[playback]`
    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig {
            tick_interval: Duration::from_millis(self.playback.tick_interval_ms),
            max_duration_secs: self.playback.max_duration_secs,
            ..SyncConfig::default()
        }
    }
}
