//! Forgiving score keeping.
//!
//! A wrong answer costs a life; a streak of correct answers after a mistake buys
//! one back. Running out of lives fails the session.

use serde::{Deserialize, Serialize};

/// Result of registering an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerVerdict {
    Counted,
    /// The answer completed a redemption streak and one mistake was forgiven.
    Redeemed,
    /// The wrong-answer limit has been reached. The ledger no longer changes.
    SessionFailed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLedger {
    score: u32,
    wrong_total: u32,
    streak: u32,
    forgiven: u32,
    max_wrong: u32,
    redemption_streak: u32,
}

impl ScoreLedger {
    pub fn new(max_wrong: u32, redemption_streak: u32) -> Self {
        Self {
            score: 0,
            wrong_total: 0,
            streak: 0,
            forgiven: 0,
            max_wrong: max_wrong.max(1),
            redemption_streak: redemption_streak.max(1),
        }
    }

    pub fn register_correct(&mut self) -> LedgerVerdict {
        if self.is_failed() {
            return LedgerVerdict::SessionFailed;
        }

        self.score += 1;
        self.streak += 1;

        if self.wrong_total > 0 && self.streak >= self.redemption_streak {
            self.wrong_total -= 1;
            self.streak = 0;
            self.forgiven += 1;
            return LedgerVerdict::Redeemed;
        }
        LedgerVerdict::Counted
    }

    pub fn register_wrong(&mut self) -> LedgerVerdict {
        if self.is_failed() {
            return LedgerVerdict::SessionFailed;
        }

        self.wrong_total += 1;
        self.streak = 0;

        if self.is_failed() {
            LedgerVerdict::SessionFailed
        } else {
            LedgerVerdict::Counted
        }
    }

    pub fn is_failed(&self) -> bool {
        self.wrong_total >= self.max_wrong
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn wrong_total(&self) -> u32 {
        self.wrong_total
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Mistakes forgiven so far.
    pub fn forgiven(&self) -> u32 {
        self.forgiven
    }

    /// Wrong answers still allowed before the session fails.
    pub fn lives_left(&self) -> u32 {
        self.max_wrong.saturating_sub(self.wrong_total)
    }
}
