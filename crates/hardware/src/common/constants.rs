//! Global Model Constants.
//!
//! This module defines constants shared across the DRAM model. It includes:
//! 1. **Memory Constants:** The sentinel fill pattern for unwritten bytes.
//! 2. **Protocol Constants:** Raw AXI4 encodings for burst types and responses.
//! 3. **Timing Constants:** Baseline latency parameters of the modeled memory rank.

/// Fill pattern for every byte of a freshly constructed memory store.
pub const SENTINEL_BYTE: u8 = 0xAB;

/// Raw `arburst` encoding for FIXED bursts.
pub const BURST_FIXED: u8 = 0b00;

/// Raw `arburst` encoding for INCR bursts (the only supported type).
pub const BURST_INCR: u8 = 0b01;

/// Raw `arburst` encoding for WRAP bursts.
pub const BURST_WRAP: u8 = 0b10;

/// Raw `rresp` encoding for a normal successful access.
pub const RESP_OKAY: u8 = 0b00;

/// Raw `rresp` encoding for exclusive access success.
pub const RESP_EXOKAY: u8 = 0b01;

/// Raw `rresp` encoding for a subordinate error.
pub const RESP_SLVERR: u8 = 0b10;

/// Raw `rresp` encoding for a decode error.
pub const RESP_DECERR: u8 = 0b11;

/// Largest legal `arsize` code (128 bytes per beat).
pub const MAX_SIZE_CODE: u8 = 7;

/// Minimum cycles between request acceptance and the first data beat.
pub const FIXED_LATENCY: u64 = 10;

/// Upper bound (inclusive) of the random jitter added to [`FIXED_LATENCY`].
pub const MAX_JITTER: u64 = 2;

/// Seed used when a deterministic run is requested without an explicit seed.
pub const DEFAULT_SEED: u64 = 42;
