//! Random number generator abstraction for puzzle generation.
//!
//! Generation, selection and scrambling all draw from a `&mut dyn PipeRng`
//! so callers decide whether a run is reproducible:
//!
//! - `StdRandom::from_seed(seed)`: deterministic, same seed gives the same grid
//! - `StdRandom::from_entropy()`: seeded from the operating system
//!
//! # Example
//!
//! ```ignore
//! use pipe_core::rng::{PipeRng, StdRandom};
//!
//! let mut rng = StdRandom::from_seed(42);
//! let column = rng.next_usize_max(10); // 0..10
//! let roll = rng.next_u32_max(90); // 0..90
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Trait for random sources used by the generator.
pub trait PipeRng {
    /// Returns a random u32 in [0, max). Returns 0 when `max` is 0.
    fn next_u32_max(&mut self, max: u32) -> u32;

    /// Returns a random usize in [0, max). Returns 0 when `max` is 0.
    fn next_usize_max(&mut self, max: usize) -> usize;

    /// Returns a random double in [0.0, 1.0).
    fn next_double(&mut self) -> f64;

    /// Returns a random u64, used for seeding sub-generators.
    fn next_u64(&mut self) -> u64;

    /// Returns a random quarter-turn count in [0, 4).
    fn next_rotation(&mut self) -> u8 {
        self.next_u32_max(4) as u8
    }
}

/// Standard Rust RNG wrapper using `rand::rngs::StdRng`.
#[derive(Clone, Debug)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Create a deterministic generator from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a generator seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic when `seed` is set, entropy-seeded otherwise.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl PipeRng for StdRandom {
    fn next_u32_max(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.rng.gen_range(0..max)
    }

    fn next_usize_max(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        self.rng.gen_range(0..max)
    }

    fn next_double(&mut self) -> f64 {
        self.rng.gen()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.gen()
    }
}
