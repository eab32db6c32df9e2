use anyhow::{anyhow, Context, Result};
use context_deck::context::{ContextResponse, ContextSource, SubtitleEvent};
use context_deck::sync::{DeckSnapshot, SceneTheme, SyncConfig, SyncHandle, SyncStats};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::{sleep, timeout};

const WAIT: Duration = Duration::from_secs(30);

type Reply = std::result::Result<ContextResponse, String>;

// ============================================================================
// Fake context source
// ============================================================================

/// Answers from a script, except for gated timestamps which wait until the
/// test releases them
struct FakeSource {
    script: Box<dyn Fn(u64) -> Reply + Send + Sync>,
    gates: Mutex<HashMap<u64, oneshot::Receiver<Reply>>>,
}

impl FakeSource {
    fn new(script: impl Fn(u64) -> Reply + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            script: Box::new(script),
            gates: Mutex::new(HashMap::new()),
        })
    }

    fn gate(&self, timestamp_seconds: u64) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(timestamp_seconds, rx);
        tx
    }
}

#[async_trait::async_trait]
impl ContextSource for FakeSource {
    async fn fetch_context(&self, timestamp_seconds: u64) -> Result<ContextResponse> {
        let gate = self.gates.lock().unwrap().remove(&timestamp_seconds);
        let reply = match gate {
            Some(rx) => rx.await.map_err(|_| anyhow!("gate dropped"))?,
            None => (self.script)(timestamp_seconds),
        };
        reply.map_err(|e| anyhow!(e))
    }

    fn name(&self) -> &str {
        "fake"
    }
}

fn release(gate: oneshot::Sender<Reply>, reply: Reply) -> Result<()> {
    gate.send(reply).map_err(|_| anyhow!("fetch for gate already gone"))
}

fn card(title: &str) -> Value {
    json!({ "type": "Card", "children": [title] })
}

fn subtitle(text: &str) -> ContextResponse {
    ContextResponse {
        subtitle: Some(SubtitleEvent::text(text)),
        ..ContextResponse::default()
    }
}

async fn wait_until(
    deck: &SyncHandle,
    predicate: impl FnMut(&DeckSnapshot) -> bool,
) -> Result<DeckSnapshot> {
    let mut updates = deck.subscribe();
    let snapshot = timeout(WAIT, updates.wait_for(predicate))
        .await
        .context("Timed out waiting for deck state")??;
    Ok(DeckSnapshot::clone(&snapshot))
}

async fn wait_for_stats(
    deck: &SyncHandle,
    mut predicate: impl FnMut(&SyncStats) -> bool,
) -> Result<SyncStats> {
    timeout(WAIT, async {
        loop {
            let stats = deck.stats().await?;
            if predicate(&stats) {
                return Ok::<_, anyhow::Error>(stats);
            }
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .context("Timed out waiting for stats")?
}

// ============================================================================
// Ordering
// ============================================================================

#[tokio::test]
async fn test_stale_response_is_discarded() -> Result<()> {
    let source = FakeSource::new(|_| Ok(ContextResponse::default()));
    let deck = SyncHandle::spawn(source.clone(), SyncConfig::default());
    wait_until(&deck, |s| s.last_synced == Some(0)).await?;

    let gate_10 = source.gate(10);
    let gate_20 = source.gate(20);
    deck.scrub(10).await?;
    deck.scrub(20).await?;

    // Newer request resolves first
    release(
        gate_20,
        Ok(ContextResponse {
            logs: Some(vec!["twenty".to_string()]),
            ui_schema: Some(json!([card("twenty")])),
            theme: Some("action".to_string()),
            ..ContextResponse::default()
        }),
    )?;
    wait_until(&deck, |s| s.last_synced == Some(20)).await?;

    release(
        gate_10,
        Ok(ContextResponse {
            subtitle: Some(SubtitleEvent::text("ten")),
            logs: Some(vec!["ten".to_string()]),
            ui_schema: Some(json!([card("ten")])),
            theme: Some("suspense".to_string()),
        }),
    )?;
    let stats = wait_for_stats(&deck, |s| s.responses_discarded == 1).await?;
    assert_eq!(stats.in_flight(), 0);

    let snapshot = deck.snapshot();
    assert_eq!(snapshot.last_synced, Some(20));
    assert_eq!(snapshot.theme, SceneTheme::Action);
    assert_eq!(snapshot.logs, vec!["twenty"]);
    assert!(snapshot.history.is_empty());

    let markup = snapshot.render().to_markup();
    assert!(markup.contains("twenty"));
    assert!(!markup.contains("ten"));

    deck.shutdown().await?;
    Ok(())
}

#[tokio::test]
async fn test_scrub_clears_history_before_fetch() -> Result<()> {
    let source = FakeSource::new(|t| match t {
        0 => Ok(subtitle("Opening line")),
        _ => Ok(ContextResponse::default()),
    });
    let deck = SyncHandle::spawn(source.clone(), SyncConfig::default());
    let snapshot = wait_until(&deck, |s| s.last_synced == Some(0)).await?;
    assert_eq!(snapshot.history, vec!["Opening line"]);

    let gate = source.gate(50);
    let snapshot = deck.scrub(50).await?;
    assert_eq!(snapshot.current_time, 50);
    assert!(snapshot.history.is_empty());
    assert!(deck.snapshot().history.is_empty());

    release(gate, Ok(subtitle("Later line")))?;
    let snapshot = wait_until(&deck, |s| s.last_synced == Some(50)).await?;
    assert_eq!(snapshot.history, vec!["Later line"]);

    deck.shutdown().await?;
    Ok(())
}

#[tokio::test]
async fn test_scrub_is_clamped() -> Result<()> {
    let source = FakeSource::new(|_| Ok(ContextResponse::default()));
    let deck = SyncHandle::spawn(
        source,
        SyncConfig {
            max_duration_secs: 120,
            ..SyncConfig::default()
        },
    );

    let snapshot = deck.scrub(500).await?;
    assert_eq!(snapshot.current_time, 120);
    wait_until(&deck, |s| s.last_synced == Some(120)).await?;

    deck.shutdown().await?;
    Ok(())
}

// ============================================================================
// Partial and failed responses
// ============================================================================

#[tokio::test]
async fn test_fetch_failure_keeps_last_good_state() -> Result<()> {
    let source = FakeSource::new(|t| match t {
        0 => Ok(ContextResponse {
            logs: Some(vec!["boot".to_string()]),
            ui_schema: Some(json!([card("boot")])),
            theme: Some("suspense".to_string()),
            ..ContextResponse::default()
        }),
        30 => Err("backend down".to_string()),
        _ => Ok(ContextResponse {
            logs: Some(vec!["forty".to_string()]),
            ..ContextResponse::default()
        }),
    });
    let deck = SyncHandle::spawn(source, SyncConfig::default());
    wait_until(&deck, |s| s.last_synced == Some(0)).await?;

    deck.scrub(30).await?;
    wait_for_stats(&deck, |s| s.fetch_failures == 1).await?;

    let snapshot = deck.snapshot();
    assert_eq!(snapshot.current_time, 30);
    assert_eq!(snapshot.last_synced, Some(0));
    assert_eq!(snapshot.logs, vec!["boot"]);
    assert_eq!(snapshot.theme, SceneTheme::Suspense);
    assert!(snapshot.schema.is_some());

    // Later requests still apply
    deck.scrub(40).await?;
    let snapshot = wait_until(&deck, |s| s.last_synced == Some(40)).await?;
    assert_eq!(snapshot.logs, vec!["forty"]);
    assert_eq!(snapshot.theme, SceneTheme::Suspense);
    assert!(snapshot.render().to_markup().contains("boot"));

    let stats = deck.shutdown().await?;
    assert_eq!(stats.fetch_failures, 1);
    assert_eq!(stats.responses_applied, 2);
    Ok(())
}

#[tokio::test]
async fn test_partial_responses_keep_previous_fields() -> Result<()> {
    let source = FakeSource::new(|t| match t {
        0 => Ok(ContextResponse {
            logs: Some(vec!["x".to_string()]),
            ui_schema: Some(json!([card("first")])),
            ..ContextResponse::default()
        }),
        5 => Ok(ContextResponse {
            ui_schema: Some(json!([])),
            ..ContextResponse::default()
        }),
        _ => Ok(ContextResponse {
            ui_schema: Some(json!({ "type": "Card", "children": ["not a list"] })),
            theme: Some("romcom".to_string()),
            ..ContextResponse::default()
        }),
    });
    let deck = SyncHandle::spawn(source, SyncConfig::default());
    wait_until(&deck, |s| s.last_synced == Some(0)).await?;

    deck.scrub(5).await?;
    let snapshot = wait_until(&deck, |s| s.last_synced == Some(5)).await?;
    assert_eq!(snapshot.logs, vec!["x"]);
    assert!(snapshot.render().to_markup().contains("first"));

    deck.scrub(7).await?;
    let snapshot = wait_until(&deck, |s| s.last_synced == Some(7)).await?;
    assert_eq!(snapshot.theme, SceneTheme::Neutral);
    assert!(snapshot.render().to_markup().contains("first"));
    assert!(!snapshot.render().to_markup().contains("not a list"));

    deck.shutdown().await?;
    Ok(())
}

// ============================================================================
// Playback
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_ticks_build_history_until_end() -> Result<()> {
    let lines = ["A", "A", "B", "B", "B", "C"];
    let source = FakeSource::new(move |t| match t {
        1..=6 => Ok(subtitle(lines[t as usize - 1])),
        _ => Ok(ContextResponse::default()),
    });
    let deck = SyncHandle::spawn(
        source,
        SyncConfig {
            max_duration_secs: 6,
            ..SyncConfig::default()
        },
    );

    let snapshot = deck.play().await?;
    assert!(snapshot.is_playing);

    let snapshot = wait_until(&deck, |s| !s.is_playing && s.current_time == 6).await?;
    assert_eq!(snapshot.history, vec!["A", "B", "C"]);
    assert_eq!(snapshot.active_line(), Some("C"));
    assert_eq!(snapshot.trailing_lines(), ["A", "B"]);

    // Parked at the end: play is a no-op
    let snapshot = deck.play().await?;
    assert!(!snapshot.is_playing);

    let stats = deck.shutdown().await?;
    assert_eq!(stats.requests_issued, 7);
    assert_eq!(stats.responses_discarded, 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_history_is_bounded() -> Result<()> {
    let source = FakeSource::new(|t| Ok(subtitle(&format!("line {}", t))));
    let deck = SyncHandle::spawn(
        source,
        SyncConfig {
            max_duration_secs: 10,
            ..SyncConfig::default()
        },
    );

    deck.play().await?;
    let snapshot = wait_until(&deck, |s| !s.is_playing && s.current_time == 10).await?;
    assert_eq!(snapshot.history.len(), 5);
    assert_eq!(snapshot.active_line(), Some("line 10"));
    assert_eq!(snapshot.history[0], "line 6");

    deck.shutdown().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_in_flight_request_applies_after_pause() -> Result<()> {
    let source = FakeSource::new(|_| Ok(ContextResponse::default()));
    let gate = source.gate(1);
    let deck = SyncHandle::spawn(source.clone(), SyncConfig::default());

    deck.play().await?;
    wait_for_stats(&deck, |s| s.requests_issued == 2).await?;

    let snapshot = deck.pause().await?;
    assert!(!snapshot.is_playing);
    assert_eq!(snapshot.current_time, 1);

    release(gate, Ok(subtitle("late")))?;
    let snapshot = wait_until(&deck, |s| s.last_synced == Some(1)).await?;
    assert_eq!(snapshot.history, vec!["late"]);
    assert!(!snapshot.is_playing);

    let stats = deck.shutdown().await?;
    assert_eq!(stats.requests_issued, 2);
    assert_eq!(stats.responses_applied, 2);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_pause_stops_ticks() -> Result<()> {
    let source = FakeSource::new(|_| Ok(ContextResponse::default()));
    let deck = SyncHandle::spawn(source, SyncConfig::default());

    deck.play().await?;
    wait_until(&deck, |s| s.current_time >= 3).await?;

    let snapshot = deck.pause().await?;
    assert!(!snapshot.is_playing);
    let paused_at = snapshot.current_time;

    sleep(Duration::from_secs(10)).await;
    assert_eq!(deck.snapshot().current_time, paused_at);

    let snapshot = deck.toggle().await?;
    assert!(snapshot.is_playing);
    wait_until(&deck, |s| s.current_time > paused_at).await?;

    let stats = deck.stats().await?;
    assert!(stats.is_playing);

    deck.shutdown().await?;
    Ok(())
}
