//! Cycle-accurate AXI4 read-channel DRAM model.
//!
//! This crate stands in for real memory while verifying hardware that reads
//! over an AXI4 bus. It models the following:
//! 1. **Protocol:** AR/R channel handshakes, INCR bursts, and strict in-order completion.
//! 2. **Timing:** Fixed plus jittered first-beat latency, then one beat per cycle.
//! 3. **Registers:** Two-phase (rising/falling edge) output staging, as in RTL.
//! 4. **Memory:** A fixed-size byte store seeded by the harness.
//! 5. **Harness:** Request/beat helpers, image loading, configuration, and statistics.
//!
//! # Example
//!
//! ```
//! use axi_dram_core::memory::FixedLatency;
//! use axi_dram_core::sim::{Harness, ReadRequest};
//! use axi_dram_core::AxiDram;
//!
//! let mut dram = AxiDram::new(1024, Box::new(FixedLatency::new(10)));
//! dram.memory_mut().fill_with(|i| (i & 0xFF) as u8);
//!
//! let mut harness = Harness::new(dram);
//! let beats = harness.read(ReadRequest::new(0x20).beats(4), 0).unwrap();
//! let values: Vec<u64> = beats.iter().map(|b| b.as_le_u64()).collect();
//! assert_eq!(values, vec![0x20, 0x21, 0x22, 0x23]);
//! assert!(beats[3].last);
//! ```

/// AXI4 read channel: signals, pending queue, and protocol engine.
pub mod axi;
/// Common constants and error types.
pub mod common;
/// Model configuration (defaults, enums, JSON loading).
pub mod config;
/// Memory store and latency models.
pub mod memory;
/// Harness helpers and image loading.
pub mod sim;
/// Model statistics collection and reporting.
pub mod stats;

/// Protocol engine; construct with `AxiDram::new` or `AxiDram::from_config`.
pub use crate::axi::AxiDram;
/// Error type returned by evaluation and harness helpers.
pub use crate::common::{DramError, DramResult};
/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
