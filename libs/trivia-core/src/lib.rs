//! Core trivia session engine shared by every Brain Bolt host.
//!
//! Provides:
//! - Round controller running quiz and match rounds against a question bank
//! - Single-shot question timer driven by host ticks
//! - Forgiving score ledger with streak redemption
//! - Match puzzle building with similarity-ranked decoys
//! - Shared types (QuestionRecord, GamePhase, GameEvent, etc.)

pub mod bank;
pub mod config;
pub mod decoy;
pub mod error;
pub mod events;
pub mod ledger;
pub mod match_controller;
pub mod puzzle;
pub mod round;
pub mod selection;
pub mod shuffle;
pub mod similarity;
pub mod timer;
pub mod types;

pub use bank::QuestionBank;
pub use config::GameConfig;
pub use decoy::{DecoySelector, ScoredCandidate};
pub use error::{GameError, Result};
pub use events::GameEvent;
pub use ledger::{LedgerVerdict, ScoreLedger};
pub use match_controller::{MatchController, MatchGridView, TapOutcome, TileView};
pub use puzzle::{MatchPuzzle, PuzzleBuilder};
pub use round::RoundController;
pub use selection::{get_selector, PairSelection, PairSelector};
pub use shuffle::Shuffler;
pub use similarity::{max_similarity, normalize, similarity};
pub use timer::{QuestionTimer, TimerSignal};
pub use types::{
    FailReason, GamePhase, GameState, MatchTile, Outcome, Pair, PairId, QuestionRecord,
    QuestionView, RoundMode, Side, OPTION_SLOTS,
};
