pub mod backend;
pub mod chat;
pub mod config;
pub mod context;
pub mod schema;
pub mod sync;

pub use backend::{create_router, BackendState, SubtitleTrack};
pub use chat::{ChatLog, ChatSession, Message, Role};
pub use config::Config;
pub use context::{BackendClient, ChatBackend, ContextResponse, ContextSource};
pub use schema::{render, RenderedTree, UiSchema};
pub use sync::{DeckSnapshot, SceneTheme, SyncConfig, SyncHandle, SyncStats};
