//! Random duration provider trait
//!
//! All pause durations, spin counts, and state selections draw from
//! this trait. It is injected at scheduler construction so tests can
//! substitute a seeded or scripted generator; each scheduler owns its
//! own instance, so no synchronization is ever needed.

use rand::rngs::SmallRng;
use rand::Rng;

/// Bounded pseudo-random integer provider
pub trait RandomSource {
    /// Return a uniformly distributed value in `min..=max`
    ///
    /// Callers guarantee `min <= max`; every range the schedulers use
    /// comes from a validated config.
    fn uniform(&mut self, min: u16, max: u16) -> u16;
}

impl RandomSource for SmallRng {
    fn uniform(&mut self, min: u16, max: u16) -> u16 {
        self.random_range(min..=max)
    }
}
