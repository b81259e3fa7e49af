//! Common utilities and types used throughout the DRAM model.
//!
//! This module provides the building blocks shared by every component:
//! 1. **Constants:** Sentinel fill value, AXI4 encodings, and baseline timing.
//! 2. **Error Handling:** The [`DramError`] type and [`DramResult`] alias.

/// Common constants used throughout the model.
pub mod constants;

/// Error types for contract violations and misuse.
pub mod error;

pub use constants::SENTINEL_BYTE;
pub use error::{DramError, DramResult};
