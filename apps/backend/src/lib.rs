pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::time::{Instant, MissedTickBehavior};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::services::sessions::SessionStore;

/// How often idle sessions are looked for.
const PRUNE_INTERVAL: Duration = Duration::from_secs(30);

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let game_config = config.load_game_config()?;

    tracing::info!("Loading question bank...");
    let bank = services::bank::load_bank(
        &config.question_bank_path,
        game_config.required_questions(),
    )
    .with_context(|| {
        format!(
            "loading question bank {}",
            config.question_bank_path.display()
        )
    })?;
    bank.ensure_capacity(&game_config)?;

    let tick_interval = game_config.tick_interval();
    let sessions = Arc::new(SessionStore::new(bank, game_config, config.session_ttl));
    spawn_ticker(Arc::clone(&sessions), tick_interval);

    let app = build_router(AppState { sessions });

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the full router. Timers only advance while a ticker is running.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::game::health))
        .route("/api/config", get(routes::game::config))
        .route("/api/sessions", post(routes::sessions::create))
        .route(
            "/api/sessions/:id",
            get(routes::sessions::get).delete(routes::sessions::delete),
        )
        .route("/api/sessions/:id/start", post(routes::sessions::start))
        .route("/api/sessions/:id/answer", post(routes::sessions::answer))
        .route("/api/sessions/:id/tap", post(routes::sessions::tap))
        .route("/api/sessions/:id/events", get(routes::sessions::events))
        .route("/api/sessions/:id/share", get(routes::sessions::share))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Advance every session by the measured time between ticks and prune idle ones.
pub fn spawn_ticker(sessions: Arc<SessionStore>, every: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut last = Instant::now();
        let mut last_prune = last;

        loop {
            let now = interval.tick().await;
            sessions.tick_all(now.saturating_duration_since(last));
            last = now;

            if now.saturating_duration_since(last_prune) >= PRUNE_INTERVAL {
                sessions.prune_expired();
                last_prune = now;
            }
        }
    })
}
