//! Test utilities and fixtures for poplat development.
//!
//! Provides a draw-counting RNG ([`CountingRng`]) for asserting how much
//! randomness an operation consumes, and population fixtures in
//! [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded RNG that counts how many values it has produced.
///
/// Each `next_u32`/`next_u64` call counts as one draw. `fill_bytes` counts
/// once per call. Sampling an `f64` in `[0, 1)` through [`rand::Rng`]
/// consumes exactly one `next_u64`, so `draws()` equals the number of
/// uniform decisions made.
pub struct CountingRng {
    inner: ChaCha8Rng,
    draws: usize,
}

impl CountingRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            draws: 0,
        }
    }

    /// Number of draws since construction.
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl RngCore for CountingRng {
    fn next_u32(&mut self) -> u32 {
        self.draws += 1;
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws += 1;
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.draws += 1;
        self.inner.fill_bytes(dst);
    }
}
