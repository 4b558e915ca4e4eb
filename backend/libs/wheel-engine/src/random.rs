//! Injectable uniform random source
//!
//! Every random decision the engine makes (weighted draw, rotation offset,
//! extra spins, shuffle) goes through `RandomSource` so tests can pin values.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg_attr(test, mockall::automock)]
pub trait RandomSource {
    /// Uniform real in `[0, 1)`
    fn next_unit(&mut self) -> f64;
}

/// Thread-local entropy (`rand::thread_rng`)
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_unit(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Reproducible draws from a fixed seed
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Random source selected by configuration
#[derive(Debug, Clone)]
pub enum ConfiguredRandom {
    Thread(ThreadRandom),
    Seeded(SeededRandom),
}

impl ConfiguredRandom {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => ConfiguredRandom::Seeded(SeededRandom::new(seed)),
            None => ConfiguredRandom::Thread(ThreadRandom),
        }
    }
}

impl RandomSource for ConfiguredRandom {
    fn next_unit(&mut self) -> f64 {
        match self {
            ConfiguredRandom::Thread(rng) => rng.next_unit(),
            ConfiguredRandom::Seeded(rng) => rng.next_unit(),
        }
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Uniform index in `[0, upper)`; `upper` must be non-zero
pub(crate) fn next_index<R: RandomSource + ?Sized>(rng: &mut R, upper: usize) -> usize {
    let index = (rng.next_unit() * upper as f64).floor() as usize;
    // Guards against a source returning exactly 1.0
    index.min(upper - 1)
}
