//! Text normalization and bigram similarity used to judge answers and rank decoys.

use std::collections::HashMap;

/// Normalize text for comparison (trim, lowercase, collapse whitespace).
pub fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Whether two texts are equal after normalization.
pub fn same_text(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// Multiset of adjacent character pairs.
fn bigrams(s: &str) -> HashMap<(char, char), usize> {
    let chars: Vec<char> = s.chars().collect();
    let mut counts = HashMap::new();
    for window in chars.windows(2) {
        *counts.entry((window[0], window[1])).or_insert(0) += 1;
    }
    counts
}

/// Dice coefficient over character bigrams of the normalized strings (0.0 to 1.0).
///
/// Identical non-empty strings score 1.0. Empty strings, and otherwise strings shorter
/// than two characters, score 0.0.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);

    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }
    if a.chars().count() < 2 || b.chars().count() < 2 {
        return 0.0;
    }

    let a_pairs = bigrams(&a);
    let b_pairs = bigrams(&b);

    let a_total: usize = a_pairs.values().sum();
    let b_total: usize = b_pairs.values().sum();

    let overlap: usize = a_pairs
        .iter()
        .map(|(pair, count)| (*count).min(b_pairs.get(pair).copied().unwrap_or(0)))
        .sum();

    (2 * overlap) as f64 / (a_total + b_total) as f64
}

/// Highest similarity between `candidate` and any of `targets` (0.0 when empty).
pub fn max_similarity<S: AsRef<str>>(candidate: &str, targets: &[S]) -> f64 {
    targets
        .iter()
        .map(|t| similarity(candidate, t.as_ref()))
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Hello   World "), "hello world");
        assert_eq!(normalize("\tNew\nYork"), "new york");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_identical_strings() {
        assert_eq!(similarity("paris", "paris"), 1.0);
        assert_eq!(similarity("Paris", "  paris "), 1.0);
        assert_eq!(similarity("a", "a"), 1.0);
    }

    #[test]
    fn test_empty_and_short() {
        assert_eq!(similarity("", ""), 0.0);
        assert_eq!(similarity("", "abc"), 0.0);
        assert_eq!(similarity("a", "ab"), 0.0);
        assert_eq!(similarity("   ", "ab"), 0.0);
    }

    #[test]
    fn test_known_values() {
        // ro om me / ro om ma
        let score = similarity("Rome", "Roma");
        assert!((score - 2.0 / 3.0).abs() < 1e-9);

        // ma ad dr ri id / ma ad dr ri it
        let score = similarity("Madrid", "Madrit");
        assert!((score - 0.8).abs() < 1e-9);

        assert_eq!(similarity("Tokyo", "Paris"), 0.0);
    }

    #[test]
    fn test_repeated_bigrams_use_multiset_overlap() {
        // aa aa / aa
        let score = similarity("aaa", "aa");
        assert!((score - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_symmetric_and_bounded() {
        let words = [
            "Paris", "Pires", "Rome", "Roma", "Madrid", "Madrit", "Berlin", "Tokyo", "a", "",
            "New York", "new  york city",
        ];
        for a in words {
            for b in words {
                let ab = similarity(a, b);
                let ba = similarity(b, a);
                assert_eq!(ab, ba, "{a} vs {b}");
                assert!((0.0..=1.0).contains(&ab), "{a} vs {b} = {ab}");
            }
        }
    }

    #[test]
    fn test_max_similarity() {
        let targets = ["Paris", "Rome", "Madrid"];
        assert!((max_similarity("Madrit", &targets) - 0.8).abs() < 1e-9);
        assert_eq!(max_similarity("Tokyo", &targets), 0.0);
        assert_eq!(max_similarity::<&str>("Tokyo", &[]), 0.0);
    }

    #[test]
    fn test_same_text() {
        assert!(same_text(" The  Nile", "the nile"));
        assert!(!same_text("Nile", "Niles"));
    }
}
