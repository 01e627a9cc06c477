//! Session tuning constants.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{GameError, Result};
use crate::selection::PairSelection;
use crate::types::RoundMode;

/// Constants fixed when a session is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub round_size: usize,
    pub total_rounds: usize,
    pub round_modes: Vec<RoundMode>,
    pub question_time_ms: u64,
    pub match_time_ms: u64,
    pub tick_interval_ms: u64,
    /// Whole seconds counted down before each round; 0 starts rounds immediately.
    pub countdown_secs: u32,
    /// Pause after a quiz answer before the next question; 0 advances immediately.
    pub answer_reveal_ms: u64,
    /// How long rejected tiles are flagged for the UI.
    pub mismatch_flash_ms: u64,
    /// Final seconds of a quiz question that are announced one by one.
    pub final_seconds_warning: u32,
    pub match_pairs: usize,
    pub match_decoys: usize,
    pub max_wrong: u32,
    pub redemption_streak: u32,
    pub decoy_similarity_threshold: f64,
    pub pair_selection: PairSelection,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_size: 12,
            total_rounds: 3,
            round_modes: vec![RoundMode::Quiz, RoundMode::Match, RoundMode::Quiz],
            question_time_ms: 10_000,
            match_time_ms: 45_000,
            tick_interval_ms: 100,
            countdown_secs: 3,
            answer_reveal_ms: 450,
            mismatch_flash_ms: 450,
            final_seconds_warning: 3,
            match_pairs: 6,
            match_decoys: 6,
            max_wrong: 3,
            redemption_streak: 3,
            decoy_similarity_threshold: 0.28,
            pair_selection: PairSelection::default(),
        }
    }
}

impl GameConfig {
    /// Number of bank records a full session consumes.
    pub fn required_questions(&self) -> usize {
        self.round_size * self.total_rounds
    }

    /// Mode of a round; rounds past the configured sequence fall back to quiz.
    pub fn mode_for(&self, round_index: usize) -> RoundMode {
        self.round_modes
            .get(round_index)
            .copied()
            .unwrap_or(RoundMode::Quiz)
    }

    pub fn question_duration(&self) -> Duration {
        Duration::from_millis(self.question_time_ms)
    }

    pub fn match_duration(&self) -> Duration {
        Duration::from_millis(self.match_time_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn countdown_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.countdown_secs))
    }

    pub fn answer_reveal(&self) -> Duration {
        Duration::from_millis(self.answer_reveal_ms)
    }

    /// Check the constants are mutually consistent.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(GameError::InvalidConfig(msg));

        if self.round_size == 0 {
            return invalid("round_size must be at least 1".to_string());
        }
        if self.total_rounds == 0 {
            return invalid("total_rounds must be at least 1".to_string());
        }
        if self.round_modes.len() != self.total_rounds {
            return invalid(format!(
                "round_modes lists {} rounds but total_rounds is {}",
                self.round_modes.len(),
                self.total_rounds
            ));
        }
        if self.round_modes.contains(&RoundMode::Match)
            && (self.match_pairs == 0 || self.match_pairs > self.round_size)
        {
            return invalid(format!(
                "match_pairs must be between 1 and round_size ({})",
                self.round_size
            ));
        }
        if self.question_time_ms == 0 || self.match_time_ms == 0 || self.tick_interval_ms == 0 {
            return invalid("timer durations must be positive".to_string());
        }
        if self.max_wrong == 0 {
            return invalid("max_wrong must be at least 1".to_string());
        }
        if self.redemption_streak == 0 {
            return invalid("redemption_streak must be at least 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.decoy_similarity_threshold) {
            return invalid("decoy_similarity_threshold must be within 0..=1".to_string());
        }
        Ok(())
    }
}
