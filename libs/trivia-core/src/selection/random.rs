//! Random questions from the block.

use super::PairSelector;
use crate::shuffle::Shuffler;
use crate::types::QuestionRecord;

#[derive(Debug, Clone, Copy, Default)]
pub struct Random;

impl PairSelector for Random {
    fn name(&self) -> &'static str {
        "random"
    }

    fn select(&self, block: &[QuestionRecord], count: usize, shuffler: &mut Shuffler) -> Vec<usize> {
        shuffler.sample_indices(block.len(), count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::test_support::question;
    use std::collections::HashSet;

    #[test]
    fn picks_distinct_questions() {
        let block: Vec<_> = (0..12)
            .map(|i| question(i, "prompt", &format!("answer {i}"), ["x", "y", "z"]))
            .collect();
        let picked = Random.select(&block, 6, &mut Shuffler::seeded(5));
        assert_eq!(picked.len(), 6);
        assert_eq!(picked.iter().collect::<HashSet<_>>().len(), 6);
        assert!(picked.iter().all(|&i| i < block.len()));
    }

    #[test]
    fn seed_makes_choice_repeatable() {
        let block: Vec<_> = (0..12)
            .map(|i| question(i, "prompt", &format!("answer {i}"), ["x", "y", "z"]))
            .collect();
        let a = Random.select(&block, 6, &mut Shuffler::seeded(9));
        let b = Random.select(&block, 6, &mut Shuffler::seeded(9));
        assert_eq!(a, b);
    }
}
