//! Randomness abstraction for count selection and sampling.
//!
//! The engine consults a single injected [`RandomSource`] for collection
//! sizing, enumeration selection, and map-key sampling, so deterministic
//! seeded tests need no global state.

use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of the integers the engine draws while filling.
pub trait RandomSource: Send {
    /// Next integer in `[range.start, range.end)`; an empty range yields
    /// `range.start`.
    fn from_range(&mut self, range: Range<usize>) -> usize;

    /// Chooses an index in `[0, choices)`; zero choices yields zero.
    fn pick(&mut self, choices: usize) -> usize {
        self.from_range(0..choices)
    }
}

impl RandomSource for Box<dyn RandomSource> {
    fn from_range(&mut self, range: Range<usize>) -> usize {
        (**self).from_range(range)
    }

    fn pick(&mut self, choices: usize) -> usize {
        (**self).pick(choices)
    }
}

/// OS-entropy-backed source; the default for a fresh filler.
pub struct EntropyRandom {
    rng: StdRng,
}

impl EntropyRandom {
    /// Creates a source seeded from OS entropy.
    pub fn new() -> Self {
        EntropyRandom {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Default for EntropyRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropyRandom {
    fn from_range(&mut self, range: Range<usize>) -> usize {
        if range.is_empty() {
            range.start
        } else {
            self.rng.random_range(range)
        }
    }
}

/// Deterministic seeded source for reproducible fills.
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    /// Creates a source with the given seed.
    pub fn new(seed: u64) -> Self {
        SeededRandom {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn from_range(&mut self, range: Range<usize>) -> usize {
        if range.is_empty() {
            range.start
        } else {
            self.rng.random_range(range)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_source_is_deterministic() {
        let mut first = SeededRandom::new(42);
        let mut second = SeededRandom::new(42);
        for _ in 0..32 {
            assert_eq!(first.from_range(0..1000), second.from_range(0..1000));
        }
    }

    #[test]
    fn test_empty_range_yields_start() {
        let mut source = SeededRandom::new(1);
        assert_eq!(source.from_range(5..5), 5);
        assert_eq!(source.from_range(5..3), 5);
    }

    #[test]
    fn test_range_bounds_are_honored() {
        let mut source = SeededRandom::new(7);
        for _ in 0..100 {
            let drawn = source.from_range(3..6);
            assert!((3..6).contains(&drawn));
        }
    }

    #[test]
    fn test_pick_stays_in_bounds() {
        let mut source = EntropyRandom::new();
        for _ in 0..100 {
            assert!(source.pick(4) < 4);
        }
        assert_eq!(source.pick(0), 0);
    }
}
