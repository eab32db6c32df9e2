use super::handlers;
use super::state::BackendState;
use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Create the demo backend router
pub fn create_router(state: BackendState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Deck endpoints
        .route("/api/sync", post(handlers::sync_context))
        .route("/api/chat", post(handlers::chat))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(state: BackendState, bind: &str, port: u16) -> Result<()> {
    let addr = format!("{}:{}", bind, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Demo backend listening on http://{}", addr);

    axum::serve(listener, create_router(state))
        .await
        .context("Demo backend server failed")?;

    Ok(())
}
