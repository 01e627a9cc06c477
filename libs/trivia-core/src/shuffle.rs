//! Seedable randomness shared by every random decision in a session.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Wrapper around a seedable RNG.
///
/// A session owns exactly one of these; tile layouts, random pair picks and decoy
/// padding all draw from it, so a fixed seed reproduces a whole session.
#[derive(Debug, Clone)]
pub struct Shuffler {
    rng: StdRng,
}

impl Shuffler {
    /// Deterministic shuffler for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Shuffler seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// Return the items in a random order.
    pub fn shuffled<T>(&mut self, mut items: Vec<T>) -> Vec<T> {
        self.shuffle(&mut items);
        items
    }

    /// Pick up to `amount` distinct indices below `len`, in random order.
    pub fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..len).collect();
        let (picked, _) = indices.partial_shuffle(&mut self.rng, amount.min(len));
        picked.to_vec()
    }
}

impl Default for Shuffler {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn same_seed_same_order() {
        let items: Vec<u32> = (0..20).collect();
        let a = Shuffler::seeded(7).shuffled(items.clone());
        let b = Shuffler::seeded(7).shuffled(items);
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_keeps_every_item() {
        let items: Vec<u32> = (0..50).collect();
        let mut shuffled = Shuffler::seeded(3).shuffled(items.clone());
        shuffled.sort_unstable();
        assert_eq!(shuffled, items);
    }

    #[test]
    fn sample_indices_are_distinct_and_bounded() {
        let mut shuffler = Shuffler::seeded(11);
        let picked = shuffler.sample_indices(10, 4);
        assert_eq!(picked.len(), 4);
        assert!(picked.iter().all(|&i| i < 10));
        assert_eq!(picked.iter().collect::<HashSet<_>>().len(), 4);

        assert_eq!(shuffler.sample_indices(3, 10).len(), 3);
        assert!(shuffler.sample_indices(0, 2).is_empty());
    }
}
