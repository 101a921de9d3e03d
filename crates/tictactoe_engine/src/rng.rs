//! Deterministic random number generation for the computer opponent.
//!
//! The engine never reaches for a thread-local RNG. It owns a [`GameRng`],
//! so tests can pin the computer's choices with a seed.
//!
//! ```
//! use tictactoe_engine::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.choose(&[1, 2, 3]), b.choose(&[1, 2, 3]));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seedable RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().r#gen())
    }

    /// The seed this RNG started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Choose a random element from a slice, uniformly.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        let cells: Vec<usize> = (0..9).collect();
        for _ in 0..100 {
            assert_eq!(rng1.choose(&cells), rng2.choose(&cells));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let cells: Vec<usize> = (0..1000).collect();
        let seq1: Vec<_> = (0..10).filter_map(|_| rng1.choose(&cells).copied()).collect();
        let seq2: Vec<_> = (0..10).filter_map(|_| rng2.choose(&cells).copied()).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_choose() {
        let mut rng = GameRng::new(42);
        let items = vec![1, 2, 3, 4, 5];

        let chosen = rng.choose(&items);
        assert!(chosen.is_some_and(|c| items.contains(c)));

        let empty: Vec<i32> = vec![];
        assert!(rng.choose(&empty).is_none());
    }

    #[test]
    fn test_choose_covers_every_element() {
        let mut rng = GameRng::new(3);
        let items = [0usize, 1, 2, 3];
        let mut hits = [0u32; 4];
        for _ in 0..400 {
            if let Some(&i) = rng.choose(&items) {
                hits[i] += 1;
            }
        }
        assert!(hits.iter().all(|&h| h > 0));
    }

    #[test]
    fn test_entropy_seed_replays() {
        let cells: Vec<usize> = (0..9).collect();
        let mut fresh = GameRng::from_entropy();
        let mut replay = GameRng::new(fresh.seed());
        for _ in 0..20 {
            assert_eq!(fresh.choose(&cells), replay.choose(&cells));
        }
    }

    #[test]
    fn test_seed_is_reported() {
        assert_eq!(GameRng::new(99).seed(), 99);
    }
}
