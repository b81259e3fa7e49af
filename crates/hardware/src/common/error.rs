//! Model Error definitions.
//!
//! This module defines the error type reported by the DRAM model. It provides:
//! 1. **Contract Violations:** Requests the model refuses to interpret (unsupported bursts).
//! 2. **Caller Misuse:** Beats that would address outside the memory store.
//! 3. **Configuration Errors:** Invalid, unparseable, or unreadable inputs.
//! 4. **Harness Errors:** Timeouts reported by the stepping helpers in [`crate::sim`].

use thiserror::Error;

/// Errors surfaced synchronously by the model and its harness helpers.
///
/// None of these are modeled protocol responses; each indicates that the
/// driving test is misusing the model and the simulation step must stop.
#[derive(Debug, Error)]
pub enum DramError {
    /// A read request carried a burst type other than INCR.
    #[error("unsupported burst type {burst:#04b} accepted at cycle {cycle} (only INCR is modeled)")]
    UnsupportedBurst {
        /// Cycle number of the rising edge that sampled the request.
        cycle: u64,
        /// Raw `arburst` value driven by the harness.
        burst: u8,
    },

    /// A beat would read past the end of the memory store.
    #[error("beat at offset {offset:#x} (+{len} bytes) exceeds memory size {size:#x}")]
    AddressOutOfRange {
        /// Byte offset of the first byte of the beat.
        offset: u64,
        /// Number of bytes in the beat.
        len: usize,
        /// Total size of the memory store.
        size: usize,
    },

    /// Configuration values were rejected during construction.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration JSON could not be deserialized.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// A configuration file or memory image could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A harness helper gave up waiting for the model.
    #[error("no burst completed within {cycles} cycles")]
    Timeout {
        /// Number of cycles the helper waited.
        cycles: u64,
    },
}

/// Convenience alias for results produced by the model.
pub type DramResult<T> = Result<T, DramError>;
