use std::sync::Arc;
use tokio::sync::Mutex;

use super::catalog::{CardCatalog, MovieInfo};
use super::scene::SceneBuffer;
use super::subtitles::SubtitleTrack;

/// Shared state for the demo backend handlers
#[derive(Clone)]
pub struct BackendState {
    pub track: Arc<SubtitleTrack>,
    pub catalog: Arc<CardCatalog>,
    pub movie: Arc<MovieInfo>,
    /// Scene mood tracking across sync requests
    pub scene: Arc<Mutex<SceneBuffer>>,
}

impl BackendState {
    pub fn new(track: SubtitleTrack, catalog: CardCatalog, movie: MovieInfo) -> Self {
        Self {
            track: Arc::new(track),
            catalog: Arc::new(catalog),
            movie: Arc::new(movie),
            scene: Arc::new(Mutex::new(SceneBuffer::new())),
        }
    }

    /// Built-in track, cards and movie
    pub fn demo() -> Self {
        Self::new(SubtitleTrack::builtin(), CardCatalog::demo(), MovieInfo::demo())
    }
}

impl Default for BackendState {
    fn default() -> Self {
        Self::demo()
    }
}
