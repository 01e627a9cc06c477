//! Near-miss decoy selection for the match round.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::shuffle::Shuffler;
use crate::similarity::{max_similarity, normalize};

/// Default minimum similarity for a candidate to count as a near miss.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.28;

/// A decoy candidate with its near-miss score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub text: String,
    /// Highest similarity to any correct answer.
    pub score: f64,
}

/// Picks wrong answers that look like the right ones.
#[derive(Debug, Clone)]
pub struct DecoySelector {
    pub threshold: f64,
}

impl Default for DecoySelector {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

impl DecoySelector {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Score the usable candidates, most confusable first.
    ///
    /// Candidates are trimmed, deduplicated by normalized text (first spelling wins)
    /// and dropped when blank or equal to a correct answer. Equal scores keep pool order.
    pub fn rank<S: AsRef<str>>(
        &self,
        correct_answers: &[S],
        candidate_pool: &[String],
    ) -> Vec<ScoredCandidate> {
        let correct: HashSet<String> = correct_answers
            .iter()
            .map(|a| normalize(a.as_ref()))
            .collect();
        let mut seen = HashSet::new();

        let mut ranked: Vec<ScoredCandidate> = candidate_pool
            .iter()
            .map(|text| text.trim())
            .filter(|text| {
                let key = normalize(text);
                !key.is_empty() && !correct.contains(&key) && seen.insert(key)
            })
            .map(|text| ScoredCandidate {
                text: text.to_string(),
                score: max_similarity(text, correct_answers),
            })
            .collect();

        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }

    /// Choose up to `needed` decoys.
    ///
    /// Near misses above the threshold come first, best first. Any shortfall is
    /// padded with the remaining candidates in random order. When the pool runs out
    /// fewer than `needed` decoys are returned; no text is ever invented.
    pub fn select<S: AsRef<str>>(
        &self,
        correct_answers: &[S],
        candidate_pool: &[String],
        needed: usize,
        shuffler: &mut Shuffler,
    ) -> Vec<String> {
        let ranked = self.rank(correct_answers, candidate_pool);
        let (near, far): (Vec<_>, Vec<_>) = ranked
            .into_iter()
            .partition(|candidate| candidate.score > self.threshold);

        let mut decoys: Vec<String> = near
            .into_iter()
            .take(needed)
            .map(|candidate| candidate.text)
            .collect();

        if decoys.len() < needed {
            let padding = shuffler.shuffled(far);
            decoys.extend(
                padding
                    .into_iter()
                    .take(needed - decoys.len())
                    .map(|candidate| candidate.text),
            );
        }

        if decoys.len() < needed {
            tracing::warn!(
                "decoy pool exhausted: wanted {}, found {}",
                needed,
                decoys.len()
            );
        }

        decoys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pool(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn near_misses_beat_unrelated_candidates() {
        let correct = ["Paris", "Rome", "Madrid"];
        let candidates = pool(&["Pires", "Berlin", "Roma", "Madrit", "Tokyo"]);
        let decoys =
            DecoySelector::default().select(&correct, &candidates, 2, &mut Shuffler::seeded(1));

        assert_eq!(decoys, vec!["Madrit".to_string(), "Roma".to_string()]);
        assert!(!decoys.contains(&"Berlin".to_string()));
        assert!(!decoys.contains(&"Tokyo".to_string()));
    }

    #[test]
    fn ranking_orders_by_best_similarity() {
        let correct = ["Paris", "Rome", "Madrid"];
        let candidates = pool(&["Tokyo", "Roma", "Madrit"]);
        let ranked = DecoySelector::default().rank(&correct, &candidates);
        let texts: Vec<&str> = ranked.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["Madrit", "Roma", "Tokyo"]);
        assert_eq!(ranked[2].score, 0.0);
    }

    #[test]
    fn never_returns_correct_answers_or_duplicates() {
        let correct = ["Paris", "Rome"];
        let candidates = pool(&["paris", " ROME ", "Roma", "roma", "Rom a", "Parris", "PARRIS"]);
        let decoys =
            DecoySelector::default().select(&correct, &candidates, 10, &mut Shuffler::seeded(4));

        let keys: Vec<String> = decoys.iter().map(|d| normalize(d)).collect();
        let unique: HashSet<&String> = keys.iter().collect();
        assert_eq!(unique.len(), keys.len());
        assert!(!keys.contains(&"paris".to_string()));
        assert!(!keys.contains(&"rome".to_string()));
        assert_eq!(decoys.len(), 3);
    }

    #[test]
    fn pads_with_random_candidates_below_threshold() {
        let correct = ["Paris"];
        let candidates = pool(&["Parris", "Tokyo", "Lima", "Oslo"]);
        let decoys =
            DecoySelector::default().select(&correct, &candidates, 3, &mut Shuffler::seeded(2));

        assert_eq!(decoys.len(), 3);
        assert_eq!(decoys[0], "Parris");
        for d in &decoys[1..] {
            assert!(["Tokyo", "Lima", "Oslo"].contains(&d.as_str()));
        }
    }

    #[test]
    fn exhausted_pool_returns_fewer() {
        let correct = ["Paris"];
        let candidates = pool(&["Lyon", "", "   ", "paris"]);
        let decoys =
            DecoySelector::default().select(&correct, &candidates, 6, &mut Shuffler::seeded(2));
        assert_eq!(decoys, vec!["Lyon".to_string()]);
    }

    #[test]
    fn threshold_is_exclusive() {
        let correct = ["Rome"];
        let candidates = pool(&["Roma"]);
        let selector = DecoySelector::new(2.0 / 3.0);
        let ranked = selector.rank(&correct, &candidates);
        assert!((ranked[0].score - 2.0 / 3.0).abs() < 1e-9);

        // Still returned, but only through random padding.
        let decoys = selector.select(&correct, &candidates, 1, &mut Shuffler::seeded(3));
        assert_eq!(decoys, vec!["Roma".to_string()]);
    }
}
