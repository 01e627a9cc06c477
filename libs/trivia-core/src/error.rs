//! Error types for trivia-core.

use thiserror::Error;

/// Result type alias using GameError.
pub type Result<T> = std::result::Result<T, GameError>;

/// Errors raised by the session engine.
///
/// Timeouts, taps during a pending evaluation and short decoy pools are not errors;
/// they are handled inside the state machine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("round {round} needs {needed} questions but only {available} are available")]
    InsufficientQuestions {
        round: usize,
        needed: usize,
        available: usize,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("option slot {slot} is empty or out of range")]
    InvalidOption { slot: usize },

    #[error("no quiz question is awaiting an answer")]
    NotAcceptingAnswers,

    #[error("no match round is in progress")]
    NotInMatchRound,

    #[error("session has already been started")]
    AlreadyStarted,

    #[error("session is over")]
    SessionOver,
}

impl GameError {
    /// Whether the error is caused by the caller's input rather than the session state.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidOption { .. } | Self::InvalidConfig(_))
    }

    /// Stable snake_case name for the error, used in API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InsufficientQuestions { .. } => "insufficient_questions",
            Self::InvalidConfig(_) => "invalid_config",
            Self::InvalidOption { .. } => "invalid_option",
            Self::NotAcceptingAnswers => "not_accepting_answers",
            Self::NotInMatchRound => "not_in_match_round",
            Self::AlreadyStarted => "already_started",
            Self::SessionOver => "session_over",
        }
    }
}
