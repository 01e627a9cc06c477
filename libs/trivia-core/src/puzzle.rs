//! Match puzzle construction: pairs, decoys and shuffled tile columns.

use serde::{Deserialize, Serialize};

use crate::decoy::DecoySelector;
use crate::selection::PairSelector;
use crate::shuffle::Shuffler;
use crate::types::{MatchTile, Pair, PairId, QuestionRecord};

/// A ready-to-play match grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchPuzzle {
    pub pairs: Vec<Pair>,
    pub left_tiles: Vec<MatchTile>,
    pub right_tiles: Vec<MatchTile>,
}

impl MatchPuzzle {
    pub fn decoy_count(&self) -> usize {
        self.right_tiles.iter().filter(|t| t.is_decoy).count()
    }
}

/// Builds match puzzles from a round's question block.
pub struct PuzzleBuilder {
    pairs: usize,
    decoys: usize,
    pair_selector: Box<dyn PairSelector>,
    decoy_selector: DecoySelector,
}

impl PuzzleBuilder {
    pub fn new(
        pairs: usize,
        decoys: usize,
        pair_selector: Box<dyn PairSelector>,
        decoy_selector: DecoySelector,
    ) -> Self {
        Self {
            pairs,
            decoys,
            pair_selector,
            decoy_selector,
        }
    }

    pub fn build(&self, block: &[QuestionRecord], shuffler: &mut Shuffler) -> MatchPuzzle {
        let chosen = self.pair_selector.select(block, self.pairs, shuffler);

        let pairs: Vec<Pair> = chosen
            .iter()
            .enumerate()
            .map(|(n, &i)| Pair {
                pair_id: PairId::Pair(n),
                question_id: block[i].id.clone(),
                clue_text: block[i].prompt.trim().to_string(),
                answer_text: block[i].correct_answer.trim().to_string(),
            })
            .collect();

        // Options and answers of the questions that did not become pairs.
        let pool: Vec<String> = block
            .iter()
            .enumerate()
            .filter(|(i, _)| !chosen.contains(i))
            .flat_map(|(_, q)| {
                q.option_texts()
                    .chain(std::iter::once(q.correct_answer.as_str()))
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();

        let correct: Vec<&str> = pairs.iter().map(|p| p.answer_text.as_str()).collect();
        let decoys = self
            .decoy_selector
            .select(&correct, &pool, self.decoys, shuffler);

        let left_tiles = shuffler.shuffled(pairs.iter().map(MatchTile::clue).collect());
        let right_tiles = shuffler.shuffled(
            pairs
                .iter()
                .map(MatchTile::answer)
                .chain(
                    decoys
                        .into_iter()
                        .enumerate()
                        .map(|(n, text)| MatchTile::decoy(n, text)),
                )
                .collect(),
        );

        tracing::debug!(
            "built match puzzle: {} pairs, {} right tiles via {}",
            pairs.len(),
            right_tiles.len(),
            self.pair_selector.name()
        );

        MatchPuzzle {
            pairs,
            left_tiles,
            right_tiles,
        }
    }
}
