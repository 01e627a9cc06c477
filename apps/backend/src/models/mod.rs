//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export shared types from trivia-core
pub use trivia_core::{
    GameConfig, GameEvent, GamePhase, GameState, MatchGridView, Outcome, QuestionView, Side,
};

// === Requests ===

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    /// Fixes every random choice of the session.
    pub seed: Option<u64>,
    /// Play the bank in random order instead of row order.
    #[serde(default)]
    pub shuffle: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerRequest {
    /// Option slot, 0 to 3.
    pub option: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TapRequest {
    pub side: Side,
    pub index: usize,
}

// === Responses ===

/// Everything a client needs to draw a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub phase: GamePhase,
    pub state: GameState,
    pub lives_left: u32,
    pub forgiven: u32,
    pub progress: String,
    /// Share of the question or match timer left, when one is running.
    pub timer_remaining: Option<f64>,
    pub elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<MatchGridView>,
}

/// Result of `start` or `tap`: the new snapshot and the events the action produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    pub session: SessionSnapshot,
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub correct: bool,
    pub session: SessionSnapshot,
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsResponse {
    pub events: Vec<GameEvent>,
    /// Events discarded because the buffer was full.
    pub dropped: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareResponse {
    pub text: String,
    pub score: u32,
    pub outcome: Option<Outcome>,
}
