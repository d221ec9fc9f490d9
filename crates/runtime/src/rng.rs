//! Entropy-seeded random source for live battles.

use battle_core::RngSource;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Production [`RngSource`]: every draw is independent and unseeded.
///
/// Use [`EntropyRng::seeded`] to replay a battle.
#[derive(Clone, Debug)]
pub struct EntropyRng {
    inner: StdRng,
}

impl EntropyRng {
    pub fn new() -> Self {
        Self {
            inner: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for EntropyRng {
    fn default() -> Self {
        Self::new()
    }
}

impl RngSource for EntropyRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }
}
