use anyhow::Result;
use clap::{Parser, Subcommand};
use context_deck::backend::{self, CardCatalog, MovieInfo};
use context_deck::config::DEFAULT_CONFIG_PATH;
use context_deck::{
    BackendClient, BackendState, ChatSession, Config, SubtitleTrack, SyncConfig, SyncHandle,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "context-deck", version, about = "Movie context deck demo")]
struct Cli {
    /// Config file (extension optional)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the demo backend
    Serve,
    /// Play the deck against the backend and log each snapshot
    Watch {
        /// How long to watch, in real seconds
        #[arg(long, default_value_t = 30)]
        seconds: u64,
        /// Playback position to start from
        #[arg(long, default_value_t = 0)]
        start: u64,
    },
    /// Send one chat query and print the reply
    Chat { query: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Serve => serve(&cfg).await,
        Command::Watch { seconds, start } => watch(&cfg, seconds, start).await,
        Command::Chat { query } => chat(&cfg, &query).await,
    }
}

async fn serve(cfg: &Config) -> Result<()> {
    let track = match &cfg.backend.subtitles_path {
        Some(path) => SubtitleTrack::load(path)?,
        None => {
            info!("No subtitles_path configured, using the built-in track");
            SubtitleTrack::builtin()
        }
    };

    let state = BackendState::new(track, CardCatalog::demo(), MovieInfo::demo());
    backend::serve(state, &cfg.backend.bind, cfg.backend.port).await
}

async fn watch(cfg: &Config, seconds: u64, start: u64) -> Result<()> {
    let client = BackendClient::new(&cfg.backend.base_url, cfg.backend.request_timeout())?;
    if !client.health_check().await? {
        warn!("Backend at {} is not healthy, continuing anyway", client.base_url());
    }

    let sync_config = SyncConfig {
        start_at: start,
        ..cfg.sync_config()
    };
    let deck = SyncHandle::spawn(Arc::new(client), sync_config);
    let mut updates = deck.subscribe();
    deck.play().await?;

    let deadline = tokio::time::sleep(Duration::from_secs(seconds));
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            _ = &mut deadline => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                info!(
                    "[{}] {} | theme: {} | cards: {} | {}",
                    snapshot.formatted_time(),
                    if snapshot.is_playing { "playing" } else { "paused" },
                    snapshot.theme,
                    snapshot.schema.as_ref().map_or(0, |schema| schema.len()),
                    snapshot.active_line().unwrap_or("...")
                );
            }
        }
    }

    let stats = deck.shutdown().await?;
    info!(
        "Stopped at t={}s: {} requests, {} applied, {} stale, {} failed",
        stats.current_time,
        stats.requests_issued,
        stats.responses_applied,
        stats.responses_discarded,
        stats.fetch_failures
    );

    Ok(())
}

async fn chat(cfg: &Config, query: &str) -> Result<()> {
    let client = BackendClient::new(&cfg.backend.base_url, cfg.backend.request_timeout())?;
    let mut session = ChatSession::new(Arc::new(client), cfg.chat.user_id());

    match session.send(query).await {
        Some(reply) => {
            println!("{}", reply.content);
            let markup = reply.render().to_markup();
            if !markup.is_empty() {
                println!("{}", markup);
            }
        }
        None => warn!("Nothing to send"),
    }

    Ok(())
}
