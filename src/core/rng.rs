//! Seeded randomness.
//!
//! Deck shuffles and the "random follower" opcodes all draw from a
//! [`GameRng`]. Two games built from the same seed and driven by the same
//! calls play out identically.
//!
//! Deck building uses its own stream so that adding cards to one deck
//! does not change which random target an effect picks later:
//!
//! ```
//! use shadow_rules::core::GameRng;
//!
//! let rng = GameRng::new(42);
//! let mut decks = rng.for_context("decks");
//! let mut again = GameRng::new(42).for_context("decks");
//!
//! let mut a: Vec<u32> = (0..20).collect();
//! let mut b = a.clone();
//! decks.shuffle(&mut a);
//! again.shuffle(&mut b);
//! assert_eq!(a, b);
//! assert_ne!(rng.for_context("targets").seed(), decks.seed());
//! ```

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// ChaCha8 stream plus the seed it started from.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Independent stream for one purpose, derived from this seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }

    /// Uniform pick; `None` for an empty pool.
    #[must_use]
    pub fn choose<'a, T>(&mut self, pool: &'a [T]) -> Option<&'a T> {
        pool.choose(&mut self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shuffled(rng: &mut GameRng) -> Vec<u32> {
        let mut items: Vec<u32> = (0..30).collect();
        rng.shuffle(&mut items);
        items
    }

    #[test]
    fn test_same_seed_same_shuffle() {
        assert_eq!(shuffled(&mut GameRng::new(9)), shuffled(&mut GameRng::new(9)));
    }

    #[test]
    fn test_context_streams_differ() {
        let rng = GameRng::new(42);
        let mut first = rng.for_context("decks");
        let mut second = rng.for_context("targets");
        assert_ne!(shuffled(&mut first), shuffled(&mut second));
    }

    #[test]
    fn test_shuffle_keeps_cards() {
        let mut items = shuffled(&mut GameRng::new(3));
        assert_ne!(items, (0..30).collect::<Vec<_>>());
        items.sort_unstable();
        assert_eq!(items, (0..30).collect::<Vec<_>>());
    }

    #[test]
    fn test_choose() {
        let mut rng = GameRng::new(7);
        let pool = [3, 5, 8];
        assert!(pool.contains(rng.choose(&pool).unwrap()));

        let empty: [i32; 0] = [];
        assert!(rng.choose(&empty).is_none());
    }
}
