//! Demo backend server
//!
//! Serves time-indexed movie context for the deck:
//! - GET /health - Health check
//! - POST /api/sync - Subtitle, scene mood, log lines and context cards for a timestamp
//! - POST /api/chat - Route a viewer question to an agent and answer with a card

pub mod cards;
mod catalog;
mod handlers;
mod intent;
mod routes;
mod scene;
mod state;
mod subtitles;

pub use catalog::{CardCatalog, ContextCard, MovieInfo};
pub use handlers::ErrorResponse;
pub use intent::{route_query, Intent};
pub use routes::{create_router, serve};
pub use scene::{SceneBuffer, SCENE_BUFFER_LEN};
pub use state::BackendState;
pub use subtitles::{Cue, SubtitleTrack};
