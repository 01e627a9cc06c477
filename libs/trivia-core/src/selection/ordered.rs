//! First questions of the block, in bank order.

use super::PairSelector;
use crate::shuffle::Shuffler;
use crate::types::QuestionRecord;

/// Uses the block exactly as the bank author ordered it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ordered;

impl PairSelector for Ordered {
    fn name(&self) -> &'static str {
        "ordered"
    }

    fn select(
        &self,
        block: &[QuestionRecord],
        count: usize,
        _shuffler: &mut Shuffler,
    ) -> Vec<usize> {
        (0..count.min(block.len())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::test_support::question;

    #[test]
    fn takes_leading_questions() {
        let block: Vec<_> = (0..5)
            .map(|i| question(i, "prompt", &format!("answer {i}"), ["x", "y", "z"]))
            .collect();
        let mut shuffler = Shuffler::seeded(1);
        assert_eq!(Ordered.select(&block, 3, &mut shuffler), vec![0, 1, 2]);
        assert_eq!(Ordered.select(&block, 9, &mut shuffler), vec![0, 1, 2, 3, 4]);
    }
}
