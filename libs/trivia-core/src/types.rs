//! Core types for trivia sessions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::similarity::{normalize, same_text};

/// Number of option slots on a quiz question.
pub const OPTION_SLOTS: usize = 4;

/// A question as supplied by the bank loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: String,
    pub prompt: String,
    /// Up to four options; empty or missing slots are rendered disabled.
    pub options: [Option<String>; OPTION_SLOTS],
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl QuestionRecord {
    /// A record can be played when both prompt and answer carry text.
    pub fn is_playable(&self) -> bool {
        !self.prompt.trim().is_empty() && !self.correct_answer.trim().is_empty()
    }

    /// Option text for a slot, trimmed; `None` for blank or out-of-range slots.
    pub fn option(&self, slot: usize) -> Option<&str> {
        self.options
            .get(slot)?
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    /// All non-blank option texts in slot order.
    pub fn option_texts(&self) -> impl Iterator<Item = &str> {
        (0..OPTION_SLOTS).filter_map(|slot| self.option(slot))
    }

    /// Whether the given text answers this question (case and whitespace insensitive).
    pub fn is_correct(&self, text: &str) -> bool {
        !normalize(text).is_empty() && same_text(text, &self.correct_answer)
    }
}

/// Mode a round is played in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundMode {
    Quiz,
    Match,
}

impl RoundMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quiz => "quiz",
            Self::Match => "match",
        }
    }
}

impl fmt::Display for RoundMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column of the match grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "L", alias = "left")]
    Left,
    #[serde(rename = "R", alias = "right")]
    Right,
}

/// Identity of a tile's pair.
///
/// Decoys live in their own namespace, so a decoy id can never equal a real pair id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairId {
    Pair(usize),
    Decoy(usize),
}

impl PairId {
    pub fn is_decoy(&self) -> bool {
        matches!(self, Self::Decoy(_))
    }
}

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pair(n) => write!(f, "p{n}"),
            Self::Decoy(n) => write!(f, "decoy_{n}"),
        }
    }
}

/// A clue/answer association for the match round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pair {
    pub pair_id: PairId,
    pub question_id: String,
    pub clue_text: String,
    pub answer_text: String,
}

/// One tile of the match grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchTile {
    pub side: Side,
    pub pair_id: PairId,
    pub text: String,
    pub is_decoy: bool,
}

impl MatchTile {
    pub fn clue(pair: &Pair) -> Self {
        Self {
            side: Side::Left,
            pair_id: pair.pair_id,
            text: pair.clue_text.clone(),
            is_decoy: false,
        }
    }

    pub fn answer(pair: &Pair) -> Self {
        Self {
            side: Side::Right,
            pair_id: pair.pair_id,
            text: pair.answer_text.clone(),
            is_decoy: false,
        }
    }

    pub fn decoy(index: usize, text: String) -> Self {
        Self {
            side: Side::Right,
            pair_id: PairId::Decoy(index),
            text,
            is_decoy: true,
        }
    }
}

/// How a finished session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Complete,
    Failed,
}

/// Why a session failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailReason {
    TooManyWrong,
}

/// Position of the session in its state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum GamePhase {
    Idle,
    Countdown { round_index: usize },
    QuizActive,
    /// Answer shown, waiting before the next question.
    QuizReveal,
    MatchActive,
    RoundComplete { round_index: usize },
    GameOver { outcome: Outcome },
}

impl GamePhase {
    pub fn is_over(&self) -> bool {
        matches!(self, Self::GameOver { .. })
    }
}

impl Default for GamePhase {
    fn default() -> Self {
        Self::Idle
    }
}

/// Score and progress of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub score: u32,
    pub wrong_total: u32,
    pub correct_streak_since_wrong: u32,
    pub round_index: usize,
    pub position_in_round: usize,
}

/// What the player sees for a quiz question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionView {
    pub question_id: String,
    pub prompt: String,
    /// Four slots; `None` marks a disabled slot.
    pub options: Vec<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl From<&QuestionRecord> for QuestionView {
    fn from(record: &QuestionRecord) -> Self {
        Self {
            question_id: record.id.clone(),
            prompt: record.prompt.trim().to_string(),
            options: (0..OPTION_SLOTS)
                .map(|slot| record.option(slot).map(str::to_string))
                .collect(),
            category: record.category.clone(),
        }
    }
}
