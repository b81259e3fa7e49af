//! AXI4 read-channel signal records.
//!
//! These are the values sampled from, and driven onto, the bus at a given
//! half-cycle. They carry no behavior of their own:
//! 1. **Input:** [`ReadInput`] holds the AR channel, `rready`, and reset.
//! 2. **Output:** [`ReadOutput`] holds `arready` and the R channel.
//! 3. **Encodings:** [`BurstType`] and [`ReadResponse`] decode the raw fields.

use std::fmt;

use crate::common::constants::{
    BURST_FIXED, BURST_INCR, BURST_WRAP, RESP_DECERR, RESP_EXOKAY, RESP_OKAY, RESP_SLVERR,
};

/// Burst addressing mode carried in `arburst`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstType {
    /// Every beat reads the same address.
    Fixed,
    /// Each beat's address increments by the transfer width.
    Incr,
    /// Incrementing, wrapping at an aligned boundary.
    Wrap,
    /// The reserved `0b11` encoding.
    Reserved,
}

impl BurstType {
    /// Decodes a raw `arburst` value. Anything outside the two-bit field is reserved.
    pub const fn from_bits(bits: u8) -> Self {
        match bits {
            BURST_FIXED => Self::Fixed,
            BURST_INCR => Self::Incr,
            BURST_WRAP => Self::Wrap,
            _ => Self::Reserved,
        }
    }
}

/// Response code carried in `rresp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadResponse {
    /// Normal access success.
    #[default]
    Okay,
    /// Exclusive access success.
    ExOkay,
    /// Subordinate error.
    SlvErr,
    /// Decode error.
    DecErr,
}

impl ReadResponse {
    /// Returns the two-bit wire encoding.
    pub const fn code(self) -> u8 {
        match self {
            Self::Okay => RESP_OKAY,
            Self::ExOkay => RESP_EXOKAY,
            Self::SlvErr => RESP_SLVERR,
            Self::DecErr => RESP_DECERR,
        }
    }
}

impl fmt::Display for ReadResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Okay => "OKAY",
            Self::ExOkay => "EXOKAY",
            Self::SlvErr => "SLVERR",
            Self::DecErr => "DECERR",
        };
        f.write_str(name)
    }
}

/// Input signals sampled on the rising edge.
///
/// The harness writes these between evaluations, the same way it would poke
/// the ports of a generated RTL model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadInput {
    /// Read address valid.
    pub arvalid: bool,
    /// Read address (byte offset into the store).
    pub araddr: u64,
    /// Burst length minus one.
    pub arlen: u8,
    /// Log2 of the bytes per beat. Only the low three bits are wired.
    pub arsize: u8,
    /// Raw burst type; only `0b01` (INCR) is supported.
    pub arburst: u8,
    /// Consumer is ready to accept a data beat.
    pub rready: bool,
    /// Synchronous reset.
    pub rst: bool,
}

impl Default for ReadInput {
    fn default() -> Self {
        Self {
            arvalid: false,
            araddr: 0,
            arlen: 0,
            arsize: 0,
            arburst: BURST_INCR,
            rready: true,
            rst: false,
        }
    }
}

/// Location of one beat's bytes inside the memory store.
///
/// Outputs refer to data by position rather than by borrowing it, so an
/// output snapshot stays valid across evaluations; the engine resolves it
/// against its store on request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataSpan {
    /// Byte offset of the first byte.
    pub offset: u64,
    /// Number of bytes in the beat.
    pub len: usize,
}

/// Output signals of the model.
///
/// The engine keeps two of these: the staged snapshot computed on the rising
/// edge and the visible snapshot committed on the falling edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOutput {
    /// Read address ready. Always asserted.
    pub arready: bool,
    /// Read data valid.
    pub rvalid: bool,
    /// Read data, as a span into the memory store.
    pub rdata: Option<DataSpan>,
    /// Read response.
    pub rresp: ReadResponse,
    /// Last beat of the burst.
    pub rlast: bool,
}

impl Default for ReadOutput {
    fn default() -> Self {
        Self {
            arready: true,
            rvalid: false,
            rdata: None,
            rresp: ReadResponse::Okay,
            rlast: false,
        }
    }
}

impl ReadOutput {
    /// Returns this snapshot with `rvalid` cleared and everything else kept.
    #[must_use]
    pub const fn without_valid(self) -> Self {
        Self {
            rvalid: false,
            ..self
        }
    }

    /// Returns a snapshot presenting one beat.
    pub const fn beat(span: DataSpan, last: bool) -> Self {
        Self {
            arready: true,
            rvalid: true,
            rdata: Some(span),
            rresp: ReadResponse::Okay,
            rlast: last,
        }
    }
}
