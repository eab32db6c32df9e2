use super::cards;
use super::intent::{route_query, Intent};
use super::state::BackendState;
use crate::context::{
    ChatData, ChatRequest, ChatResponse, ContextResponse, SubtitleEvent, SyncRequest,
};
use crate::sync::format_time;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

/// Gift card purchases are fixed in the demo
const GIFT_CARD_AMOUNT: &str = "$25.00";
const GIFT_CARD_RECIPIENT: &str = "user@example.com";

/// Reasoning answers longer than this get a sources footer
const FOOTER_THRESHOLD: usize = 50;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// POST /api/sync
/// Context for a playback timestamp
pub async fn sync_context(
    State(state): State<BackendState>,
    Json(req): Json<SyncRequest>,
) -> Json<ContextResponse> {
    let seconds = req.timestamp_seconds;
    let clock = chrono::Local::now().format("%H:%M:%S").to_string();
    debug!("Sync request at {}", format_time(seconds));

    let mut logs = Vec::new();
    let cue = state.track.cue_at(seconds as f64);

    let theme = {
        let mut scene = state.scene.lock().await;
        match cue {
            Some(cue) => {
                scene.add_line(&cue.text);
                scene.analyze()
            }
            None => scene.current_theme(),
        }
    };

    match cue {
        Some(cue) => logs.push(format!(
            "[{}] Subtitle #{} matched at {}",
            clock,
            cue.index,
            format_time(seconds)
        )),
        None => logs.push(format!("[{}] No subtitle at {}", clock, format_time(seconds))),
    }
    logs.push(format!("[{}] Scene mood: {}", clock, theme));

    let cards = state.catalog.schema_at(seconds);
    if !cards.is_empty() {
        logs.push(format!("[{}] Showing {} context card(s)", clock, cards.len()));
    }

    Json(ContextResponse {
        subtitle: cue.map(SubtitleEvent::from),
        logs: Some(logs),
        ui_schema: (!cards.is_empty()).then(|| Value::Array(cards)),
        theme: Some(theme.to_string()),
    })
}

/// POST /api/chat
/// Route a viewer question to an agent and answer with a card
pub async fn chat(
    State(state): State<BackendState>,
    Json(req): Json<ChatRequest>,
) -> impl IntoResponse {
    let query = req.query.trim();
    if query.is_empty() {
        warn!("Rejecting empty chat query from {}", req.user_id);
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Query must not be empty".to_string(),
            }),
        )
            .into_response();
    }

    let intent = route_query(query);
    info!("Chat query from {} routed to {}", req.user_id, intent);

    let (response, card, extra) = match intent {
        Intent::Ingestion => answer_ingestion(&state, query),
        Intent::Commerce => answer_commerce(),
        Intent::Reasoning => answer_reasoning(query),
    };

    Json(ChatResponse {
        response,
        data: Some(ChatData {
            ui_schema: Some(json!([card])),
            extra,
        }),
        agent_used: Some(intent.agent_name().to_string()),
    })
    .into_response()
}

// ============================================================================
// Agents
// ============================================================================

type Answer = (String, Value, Map<String, Value>);

fn answer_ingestion(state: &BackendState, query: &str) -> Answer {
    let movie = &state.movie;

    let mut extra = Map::new();
    extra.insert("title".to_string(), json!(movie.title));
    extra.insert("url".to_string(), json!(movie.source_url));

    (
        format!("Here is what I found for '{}'.", query),
        movie.to_card(),
        extra,
    )
}

fn answer_commerce() -> Answer {
    let transaction_id = format!("tx_{}", uuid::Uuid::new_v4().simple());
    info!("Gift card purchase {} for {}", transaction_id, GIFT_CARD_RECIPIENT);

    let mut extra = Map::new();
    extra.insert("status".to_string(), json!("success"));
    extra.insert("transaction_id".to_string(), json!(transaction_id));
    extra.insert("amount".to_string(), json!(GIFT_CARD_AMOUNT));
    extra.insert("recipient".to_string(), json!(GIFT_CARD_RECIPIENT));

    (
        "I can help you with that gift card transaction.".to_string(),
        cards::transaction_receipt(&transaction_id, GIFT_CARD_AMOUNT, GIFT_CARD_RECIPIENT),
        extra,
    )
}

fn answer_reasoning(query: &str) -> Answer {
    let response = format!(
        "I understand you are asking about '{}'. Let me check my sources...",
        query
    );
    let footer =
        (response.chars().count() > FOOTER_THRESHOLD).then_some("Source: knowledge graph");

    let mut extra = Map::new();
    extra.insert("context".to_string(), json!("knowledge_graph_lookup"));

    let card = cards::info_card("Analysis", "Reasoning agent", &response, None, footer);
    (response, card, extra)
}
