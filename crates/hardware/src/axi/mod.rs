//! AXI4 read-channel front end of the DRAM model.
//!
//! This module contains:
//! 1. **Signals:** Input/output records and the burst/response encodings.
//! 2. **Queue:** Burst descriptors and the FIFO of accepted requests.
//! 3. **Engine:** The two-phase clocked protocol state machine.

/// Protocol engine (`AxiDram`).
pub mod engine;

/// Pending-transaction queue and burst descriptors.
pub mod queue;

/// Bus signal records and encodings.
pub mod signals;

pub use engine::AxiDram;
pub use queue::{BurstDescriptor, PendingQueue};
pub use signals::{BurstType, DataSpan, ReadInput, ReadOutput, ReadResponse};
