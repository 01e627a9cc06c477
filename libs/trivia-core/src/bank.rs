//! Ordered question bank consumed by a session.

use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::shuffle::Shuffler;
use crate::types::QuestionRecord;

/// Playable questions in the order the loader supplied them.
///
/// The bank never reorders itself; `shuffled` is an explicit request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionBank {
    records: Vec<QuestionRecord>,
}

impl QuestionBank {
    /// Keep the playable records, preserving order.
    pub fn new(records: Vec<QuestionRecord>) -> Self {
        let total = records.len();
        let records: Vec<QuestionRecord> =
            records.into_iter().filter(QuestionRecord::is_playable).collect();

        if records.len() < total {
            tracing::warn!(
                "skipped {} question records without prompt or answer",
                total - records.len()
            );
        }

        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&QuestionRecord> {
        self.records.get(index)
    }

    /// Keep only the first `count` records.
    pub fn limit(mut self, count: usize) -> Self {
        self.records.truncate(count);
        self
    }

    /// A copy of the bank in random order.
    pub fn shuffled(&self, shuffler: &mut Shuffler) -> Self {
        Self {
            records: shuffler.shuffled(self.records.clone()),
        }
    }

    /// The block of records played in round `round`.
    pub fn round_block(&self, round: usize, round_size: usize) -> Result<&[QuestionRecord]> {
        let start = round * round_size;
        let end = start + round_size;
        self.records
            .get(start..end)
            .ok_or(GameError::InsufficientQuestions {
                round,
                needed: round_size,
                available: self.records.len().saturating_sub(start),
            })
    }

    /// Check that every configured round can be filled.
    pub fn ensure_capacity(&self, config: &GameConfig) -> Result<()> {
        (0..config.total_rounds)
            .try_for_each(|round| self.round_block(round, config.round_size).map(|_| ()))
    }
}

impl From<Vec<QuestionRecord>> for QuestionBank {
    fn from(records: Vec<QuestionRecord>) -> Self {
        Self::new(records)
    }
}
