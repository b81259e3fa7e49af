//! Latency model implementations for first-beat timing.
//!
//! This module provides:
//! 1. **FixedLatency:** Every request waits the same number of cycles.
//! 2. **JitteredLatency:** Fixed access time plus bounded random jitter, modeling
//!    queuing and refresh variability at the memory rank.
//!
//! Models are injected into the protocol engine at construction so tests can
//! substitute a deterministic implementation. Only the first beat of a burst
//! pays this latency; later beats stream at one per cycle.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

/// Trait for latency models that decide when a burst's first beat is ready.
///
/// Implementors must be `Send` so a model instance can move between test threads.
pub trait LatencyModel: Send {
    /// Returns the number of cycles between acceptance and the first beat.
    ///
    /// # Arguments
    ///
    /// * `addr` - Base address of the accepted burst.
    fn access_latency(&mut self, addr: u64) -> u64;

    /// Returns the largest value [`access_latency`](Self::access_latency) can produce.
    fn max_latency(&self) -> u64;

    /// Returns the absolute cycle at which the first beat may be produced.
    ///
    /// # Arguments
    ///
    /// * `cycle` - Cycle number of the rising edge that accepted the request.
    /// * `addr` - Base address of the accepted burst.
    fn first_beat_ready_cycle(&mut self, cycle: u64, addr: u64) -> u64 {
        cycle.saturating_add(self.access_latency(addr))
    }
}

/// Fixed-latency model; every request takes the same number of cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedLatency {
    latency: u64,
}

impl FixedLatency {
    /// Creates a fixed model with the given latency in cycles.
    pub const fn new(latency: u64) -> Self {
        Self { latency }
    }
}

impl LatencyModel for FixedLatency {
    fn access_latency(&mut self, _addr: u64) -> u64 {
        self.latency
    }

    fn max_latency(&self) -> u64 {
        self.latency
    }
}

/// Fixed access time plus uniformly distributed jitter in `0..=max_jitter`.
///
/// The generator is seeded explicitly, so two models built with the same
/// parameters produce identical latency sequences.
#[derive(Debug, Clone)]
pub struct JitteredLatency {
    fixed: u64,
    max_jitter: u64,
    rng: Xoshiro256StarStar,
}

impl JitteredLatency {
    /// Creates a jittered model.
    ///
    /// # Arguments
    ///
    /// * `fixed` - Minimum access time in cycles.
    /// * `max_jitter` - Largest extra delay (inclusive).
    /// * `seed` - Seed for the jitter generator.
    pub fn new(fixed: u64, max_jitter: u64, seed: u64) -> Self {
        Self {
            fixed,
            max_jitter,
            rng: Xoshiro256StarStar::seed_from_u64(seed),
        }
    }

    /// Returns the minimum access time.
    pub const fn fixed(&self) -> u64 {
        self.fixed
    }

    /// Returns the jitter bound.
    pub const fn max_jitter(&self) -> u64 {
        self.max_jitter
    }
}

impl LatencyModel for JitteredLatency {
    fn access_latency(&mut self, _addr: u64) -> u64 {
        self.fixed
            .saturating_add(self.rng.gen_range(0..=self.max_jitter))
    }

    fn max_latency(&self) -> u64 {
        self.fixed.saturating_add(self.max_jitter)
    }
}
