//! Events emitted by a session for whatever renders it.

use serde::{Deserialize, Serialize};

use crate::types::{MatchTile, Outcome, PairId, QuestionView, RoundMode, Side};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    CountdownTick {
        remaining: u32,
    },
    RoundChanged {
        round_index: usize,
        mode: RoundMode,
    },
    QuestionRendered {
        round_index: usize,
        position: usize,
        question: QuestionView,
    },
    MatchGridRendered {
        left_tiles: Vec<MatchTile>,
        right_tiles: Vec<MatchTile>,
    },
    TimerProgress {
        fraction: f64,
    },
    FinalSeconds {
        seconds_left: u32,
    },
    AnswerResolved {
        correct: bool,
        /// Slot the player chose; `None` for timeouts and match taps.
        chosen_slot: Option<usize>,
        /// `None` when no single answer applies, as for a rejected pair or a match timeout.
        correct_answer: Option<String>,
        /// Note from the bank row shown with a quiz answer, when it has one.
        explanation: Option<String>,
    },
    TileSelected {
        side: Side,
        index: usize,
    },
    TilesMatched {
        pair_id: PairId,
        left_index: usize,
        right_index: usize,
    },
    /// Both tiles should flash as wrong for `flash_ms`; they are already deselected.
    TilesRejected {
        left_index: usize,
        right_index: usize,
        flash_ms: u64,
    },
    ScoreChanged {
        score: u32,
        wrong_total: u32,
    },
    MistakeForgiven {
        wrong_total: u32,
    },
    RoundCompleted {
        round_index: usize,
    },
    GameEnded {
        outcome: Outcome,
        final_score: u32,
    },
}

impl GameEvent {
    /// Short name of the event kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CountdownTick { .. } => "countdown_tick",
            Self::RoundChanged { .. } => "round_changed",
            Self::QuestionRendered { .. } => "question_rendered",
            Self::MatchGridRendered { .. } => "match_grid_rendered",
            Self::TimerProgress { .. } => "timer_progress",
            Self::FinalSeconds { .. } => "final_seconds",
            Self::AnswerResolved { .. } => "answer_resolved",
            Self::TileSelected { .. } => "tile_selected",
            Self::TilesMatched { .. } => "tiles_matched",
            Self::TilesRejected { .. } => "tiles_rejected",
            Self::ScoreChanged { .. } => "score_changed",
            Self::MistakeForgiven { .. } => "mistake_forgiven",
            Self::RoundCompleted { .. } => "round_completed",
            Self::GameEnded { .. } => "game_ended",
        }
    }
}
