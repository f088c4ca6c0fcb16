//! Random source adapters.
//!
//! - [`ThreadRandomSource`]: thread-local system RNG for normal runs
//! - [`SeededRandomSource`]: reproducible runs from a `u64` seed
//! - [`ScriptedRandomSource`]: exact draw sequences for tests

use std::collections::VecDeque;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::application::ports::RandomSource;

/// Draws from `rand`'s thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandomSource;

impl RandomSource for ThreadRandomSource {
    fn next_unit(&self) -> f64 {
        rand::rng().random::<f64>()
    }
}

/// Deterministic generator seeded once at construction.
#[derive(Debug)]
pub struct SeededRandomSource {
    rng: Mutex<StdRng>,
}

impl SeededRandomSource {
    /// Create a source from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandomSource {
    fn next_unit(&self) -> f64 {
        self.rng.lock().random::<f64>()
    }
}

/// Replays a fixed queue of draws, then a constant fallback.
///
/// Values are clamped into `[0, 1)`.
#[derive(Debug)]
pub struct ScriptedRandomSource {
    values: Mutex<VecDeque<f64>>,
    fallback: f64,
}

impl ScriptedRandomSource {
    /// Largest value below one, used when a script asks for `1.0`.
    const MAX_UNIT: f64 = 1.0 - f64::EPSILON;

    /// Create a source that yields `values` in order, then `fallback` forever.
    #[must_use]
    pub fn new(values: impl IntoIterator<Item = f64>, fallback: f64) -> Self {
        Self {
            values: Mutex::new(values.into_iter().collect()),
            fallback,
        }
    }

    /// Append more draws to the script.
    pub fn push(&self, values: impl IntoIterator<Item = f64>) {
        self.values.lock().extend(values);
    }

    /// Draws left before the fallback takes over.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.values.lock().len()
    }
}

impl RandomSource for ScriptedRandomSource {
    fn next_unit(&self) -> f64 {
        let value = self.values.lock().pop_front().unwrap_or(self.fallback);
        value.clamp(0.0, Self::MAX_UNIT)
    }
}
