//! Modeled DRAM storage and timing.
//!
//! This module implements the two passive halves of the memory device:
//! 1. **Store:** Backing bytes ([`MemoryStore`]) seeded by the harness.
//! 2. **Controller:** Latency models ([`LatencyModel`]) that schedule first beats.

/// Byte storage sized at construction.
pub mod store;

/// Latency model implementations for first-beat timing.
pub mod controller;

pub use controller::{FixedLatency, JitteredLatency, LatencyModel};
pub use store::MemoryStore;
