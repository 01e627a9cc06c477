//! Questions whose answers have the closest look-alikes elsewhere in the block.
//!
//! Picking these as pairs leaves their look-alikes in the unused part of the block,
//! where the decoy selector will find them.

use super::PairSelector;
use crate::shuffle::Shuffler;
use crate::similarity::{max_similarity, same_text};
use crate::types::QuestionRecord;

#[derive(Debug, Clone, Default)]
pub struct Confusable;

impl Confusable {
    /// Closest look-alike score for the answer of `block[index]`.
    fn score(block: &[QuestionRecord], index: usize) -> f64 {
        let answer = &block[index].correct_answer;
        let others: Vec<&str> = block
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .flat_map(|(_, q)| q.option_texts().chain(std::iter::once(q.correct_answer.as_str())))
            .filter(|text| !same_text(text, answer))
            .collect();
        max_similarity(answer, &others)
    }
}

impl PairSelector for Confusable {
    fn name(&self) -> &'static str {
        "confusable"
    }

    fn select(
        &self,
        block: &[QuestionRecord],
        count: usize,
        _shuffler: &mut Shuffler,
    ) -> Vec<usize> {
        let mut ranked: Vec<(usize, f64)> = (0..block.len())
            .map(|i| (i, Self::score(block, i)))
            .collect();
        // Stable sort keeps bank order among equal scores.
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.into_iter().take(count).map(|(i, _)| i).collect()
    }
}
