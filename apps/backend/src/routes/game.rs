//! Service-level endpoints

use axum::{extract::State, Json};

use crate::models::GameConfig;
use crate::AppState;

/// GET /health
pub async fn health() -> &'static str {
    "OK"
}

/// GET /api/config
/// Returns the constants every session is created with
pub async fn config(State(state): State<AppState>) -> Json<GameConfig> {
    Json(state.sessions.config().clone())
}
