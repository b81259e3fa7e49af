//! Cycle-stepping helpers for verification harnesses.
//!
//! [`Harness`] wraps an [`AxiDram`] and plays the role of an AXI read master
//! that always keeps `rready` high. It provides:
//! 1. **Issue:** Drive one request on the AR channel for a single cycle.
//! 2. **Collect:** Clock until a burst's last beat is observed, recording every beat.
//! 3. **Reset:** Hold `rst` for a number of cycles.

use std::collections::VecDeque;

use crate::axi::{AxiDram, ReadResponse};
use crate::common::constants::{BURST_INCR, MAX_SIZE_CODE};
use crate::common::{DramError, DramResult};

/// One AXI read request as a master would issue it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadRequest {
    /// Start address.
    pub addr: u64,
    /// Number of beats. Values outside 1..=256 are clamped when issued.
    pub beats: u16,
    /// Log2 of bytes per beat.
    pub size: u8,
    /// Raw burst type driven on `arburst`.
    pub burst: u8,
}

impl ReadRequest {
    /// A single-beat, one-byte INCR read at `addr`.
    pub const fn new(addr: u64) -> Self {
        Self {
            addr,
            beats: 1,
            size: 0,
            burst: BURST_INCR,
        }
    }

    /// Sets the number of beats; clamped to the AXI4 range 1..=256.
    #[must_use]
    pub fn beats(mut self, beats: u16) -> Self {
        self.beats = beats.clamp(1, 256);
        self
    }

    /// Sets the transfer size code (bytes per beat = `1 << size`).
    #[must_use]
    pub const fn size(mut self, size: u8) -> Self {
        self.size = size;
        self
    }

    /// Overrides the raw burst type. Anything but INCR is rejected by the model.
    #[must_use]
    pub const fn burst(mut self, burst: u8) -> Self {
        self.burst = burst;
        self
    }

    /// Number of beats actually issued, clamped to 1..=256.
    pub const fn beat_count(&self) -> u16 {
        match self.beats {
            0 => 1,
            n if n > 256 => 256,
            n => n,
        }
    }

    /// The `arlen` encoding of [`beat_count`](Self::beat_count).
    pub const fn arlen(&self) -> u8 {
        (self.beat_count() - 1) as u8
    }

    /// Bytes per beat.
    pub const fn width(&self) -> usize {
        1 << (self.size & MAX_SIZE_CODE)
    }
}

/// One data beat observed on the R channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Beat {
    /// Cycle number after which the beat became visible.
    pub cycle: u64,
    /// Copy of the beat's bytes.
    pub data: Vec<u8>,
    /// Response code.
    pub resp: ReadResponse,
    /// `rlast` was asserted with this beat.
    pub last: bool,
}

impl Beat {
    /// Interprets up to the first eight bytes as a little-endian integer.
    pub fn as_le_u64(&self) -> u64 {
        self.data
            .iter()
            .take(8)
            .enumerate()
            .fold(0, |acc, (i, &b)| acc | (u64::from(b) << (i * 8)))
    }
}

/// Read master driving an [`AxiDram`].
///
/// Every clock cycle the harness advances, it records the beat presented on
/// the R channel, so beats produced while a request is being issued are not
/// lost.
#[derive(Debug)]
pub struct Harness {
    dram: AxiDram,
    observed: VecDeque<Beat>,
}

impl Harness {
    /// Wraps a model. `rready` is driven high from now on.
    pub fn new(mut dram: AxiDram) -> Self {
        dram.input_mut().rready = true;
        Self {
            dram,
            observed: VecDeque::new(),
        }
    }

    /// Returns the wrapped model.
    pub const fn dram(&self) -> &AxiDram {
        &self.dram
    }

    /// Returns the wrapped model for direct signal access.
    pub const fn dram_mut(&mut self) -> &mut AxiDram {
        &mut self.dram
    }

    /// Unwraps the model.
    pub fn into_inner(self) -> AxiDram {
        self.dram
    }

    /// Number of beats observed but not yet returned by [`poll`](Self::poll).
    pub fn buffered(&self) -> usize {
        self.observed.len()
    }

    /// Advances one full clock cycle, recording any beat presented after it.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`AxiDram::tick`].
    pub fn tick(&mut self) -> DramResult<()> {
        self.dram.input_mut().rready = true;
        self.dram.tick()?;
        let out = *self.dram.output();
        if out.rvalid {
            self.observed.push_back(Beat {
                cycle: self.dram.cycle(),
                data: self.dram.rdata().map(<[u8]>::to_vec).unwrap_or_default(),
                resp: out.rresp,
                last: out.rlast,
            });
        }
        Ok(())
    }

    /// Holds reset for `cycles` clock cycles, then releases it.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`AxiDram::tick`]; `rst` stays asserted.
    pub fn reset(&mut self, cycles: u64) -> DramResult<()> {
        self.dram.input_mut().rst = true;
        for _ in 0..cycles {
            self.tick()?;
        }
        self.dram.input_mut().rst = false;
        Ok(())
    }

    /// Presents `req` on the AR channel for exactly one cycle.
    ///
    /// # Returns
    ///
    /// The cycle number at which the request was accepted.
    ///
    /// # Errors
    ///
    /// [`DramError::UnsupportedBurst`] or [`DramError::AddressOutOfRange`] if
    /// the model rejects `req`. `arvalid` is dropped either way.
    pub fn issue(&mut self, req: ReadRequest) -> DramResult<u64> {
        let input = self.dram.input_mut();
        input.arvalid = true;
        input.araddr = req.addr;
        input.arlen = req.arlen();
        input.arsize = req.size;
        input.arburst = req.burst;

        let result = self.tick();
        self.dram.input_mut().arvalid = false;
        result?;
        Ok(self.dram.cycle())
    }

    /// Returns the oldest unreturned beat, advancing one cycle if none is buffered.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`tick`](Self::tick).
    pub fn poll(&mut self) -> DramResult<Option<Beat>> {
        if self.observed.is_empty() {
            self.tick()?;
        }
        Ok(self.observed.pop_front())
    }

    /// Clocks the model until a beat with `rlast` is seen.
    ///
    /// Beats already buffered are consumed first without advancing the clock.
    ///
    /// # Returns
    ///
    /// Every beat observed, in order, ending with the last beat.
    ///
    /// # Errors
    ///
    /// [`DramError::Timeout`] if no last beat appears within `max_cycles`.
    pub fn collect_burst(&mut self, max_cycles: u64) -> DramResult<Vec<Beat>> {
        let mut beats = Vec::new();
        let mut waited = 0;
        loop {
            while let Some(beat) = self.observed.pop_front() {
                let last = beat.last;
                beats.push(beat);
                if last {
                    return Ok(beats);
                }
            }
            if waited == max_cycles {
                return Err(DramError::Timeout { cycles: max_cycles });
            }
            self.tick()?;
            waited += 1;
        }
    }

    /// Issues `req` and collects its beats.
    ///
    /// The timeout covers the model's worst-case latency plus one cycle per beat,
    /// plus `slack` cycles for bursts already queued ahead of this one.
    ///
    /// # Errors
    ///
    /// As [`issue`](Self::issue) and [`collect_burst`](Self::collect_burst).
    pub fn read(&mut self, req: ReadRequest, slack: u64) -> DramResult<Vec<Beat>> {
        let _ = self.issue(req)?;
        let budget = self
            .dram
            .max_latency()
            .saturating_add(u64::from(req.beat_count()))
            .saturating_add(slack);
        self.collect_burst(budget)
    }
}
