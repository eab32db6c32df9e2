pub mod client;
pub mod messages;
pub mod source;

pub use client::BackendClient;
pub use messages::{
    ChatData, ChatRequest, ChatResponse, ContextResponse, SubtitleEvent, SyncRequest,
};
pub use source::{ChatBackend, ContextSource};
