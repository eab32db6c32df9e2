//! Chat side channel
//!
//! An append-only message log plus a session that forwards queries to a
//! `ChatBackend` and attaches any returned UI schema to the reply.

mod message;
mod session;

pub use message::{ChatLog, Message, Role};
pub use session::{ChatSession, UNREACHABLE_REPLY};
