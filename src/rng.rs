// src/rng.rs
//! Injectable shared PRNG. The engine never reaches for ambient randomness;
//! every sampling site receives this handle so tests can seed it.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug)]
pub struct SharedRng {
    inner: Mutex<StdRng>,
}

impl SharedRng {
    pub fn from_entropy() -> Self {
        Self {
            inner: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Deterministic generator for tests and reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Uniform index into `0..len`. `len` must be non-zero.
    pub fn pick_index(&self, len: usize) -> usize {
        let mut rng = self.inner.lock().expect("rng mutex poisoned");
        rng.random_range(0..len)
    }
}
