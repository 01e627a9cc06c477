//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext wiring a session store to the real router
//! - Manual clock control through `tick`
//! - Helpers for reading session snapshots
//!
//! No ticker task runs in tests; timers advance only when a test calls `tick`.

pub mod fixtures;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use serde_json::Value;

use brainbolt_backend::services::sessions::SessionStore;
use brainbolt_backend::{build_router, AppState};
use trivia_core::GameConfig;

pub struct TestContext {
    pub sessions: Arc<SessionStore>,
    app: Router,
}

impl TestContext {
    /// Sessions with no countdown and no reveal pause, so play advances on each call.
    pub fn new() -> Self {
        Self::with_config(fixtures::instant_config())
    }

    pub fn with_config(config: GameConfig) -> Self {
        let sessions = Arc::new(SessionStore::new(
            fixtures::sample_bank(36),
            config,
            Duration::from_secs(60),
        ));
        let app = build_router(AppState {
            sessions: Arc::clone(&sessions),
        });
        Self { sessions, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Advance every session's timers, as the ticker task would.
    pub fn tick(&self, elapsed: Duration) {
        self.sessions.tick_all(elapsed);
    }
}

/// Slot holding the correct answer of the question in a snapshot.
pub fn correct_slot(snapshot: &Value) -> usize {
    snapshot["question"]["options"]
        .as_array()
        .expect("snapshot has no question")
        .iter()
        .position(|o| o.as_str().is_some_and(|t| t.starts_with("Answer")))
        .expect("question has no correct option")
}

/// Any slot that does not hold the correct answer.
pub fn wrong_slot(snapshot: &Value) -> usize {
    (correct_slot(snapshot) + 1) % 4
}

/// Index of the tile on `side` ("left" or "right") belonging to real pair `n`.
pub fn tile_index(snapshot: &Value, side: &str, n: u64) -> usize {
    snapshot["grid"][side]
        .as_array()
        .expect("snapshot has no grid")
        .iter()
        .position(|t| t["pair_id"]["pair"] == n)
        .expect("pair tile missing")
}
