//! AXI4 read-channel protocol engine.
//!
//! [`AxiDram`] is the clocked state machine of the model. Each clock cycle the
//! harness evaluates it twice:
//! 1. **Rising edge:** Advance the cycle counter, handle reset, accept a request
//!    on the AR channel, and service the head of the pending queue into the
//!    staged output snapshot.
//! 2. **Falling edge:** Commit the staged snapshot to the visible one.
//!
//! Splitting the update this way gives the consumer stable, edge-aligned
//! outputs, the same as a registered RTL implementation.

use std::fmt;

use tracing::{debug, trace};

use super::queue::{BurstDescriptor, PendingQueue};
use super::signals::{BurstType, ReadInput, ReadOutput};
use crate::common::{DramError, DramResult};
use crate::config::{Config, LatencyKind, ResetPolicy};
use crate::memory::{FixedLatency, JitteredLatency, LatencyModel, MemoryStore};
use crate::stats::DramStats;

/// Cycle-accurate model of a DRAM behind an AXI4 read port.
///
/// Supports INCR bursts only. Requests are always accepted (`arready` is held
/// high) and complete strictly in acceptance order; after the latency model's
/// delay, a burst streams one beat per cycle while `rready` is asserted.
pub struct AxiDram {
    memory: MemoryStore,
    latency: Box<dyn LatencyModel>,
    queue: PendingQueue,
    reset_policy: ResetPolicy,
    input: ReadInput,
    staged: ReadOutput,
    visible: ReadOutput,
    cycle: u64,
    stats: DramStats,
}

impl AxiDram {
    /// Creates a model with a `size`-byte store and the given latency model.
    ///
    /// The store starts filled with the sentinel pattern and the queue empty.
    ///
    /// # Arguments
    ///
    /// * `size` - Memory store size in bytes.
    /// * `latency` - Strategy that schedules each burst's first beat.
    pub fn new(size: usize, latency: Box<dyn LatencyModel>) -> Self {
        Self {
            memory: MemoryStore::new(size),
            latency,
            queue: PendingQueue::new(),
            reset_policy: ResetPolicy::default(),
            input: ReadInput::default(),
            staged: ReadOutput::default(),
            visible: ReadOutput::default(),
            cycle: 0,
            stats: DramStats::default(),
        }
    }

    /// Builds a model from configuration.
    ///
    /// The latency model is chosen from `config.latency.model`.
    ///
    /// # Errors
    ///
    /// [`DramError::InvalidConfig`] if [`Config::validate`] rejects `config`.
    pub fn from_config(config: &Config) -> DramResult<Self> {
        config.validate()?;
        let lat = &config.latency;
        let latency: Box<dyn LatencyModel> = match lat.model {
            LatencyKind::Fixed => Box::new(FixedLatency::new(lat.fixed_cycles)),
            LatencyKind::Jittered => Box::new(JitteredLatency::new(
                lat.fixed_cycles,
                lat.max_jitter,
                lat.seed,
            )),
        };
        Ok(Self::new(config.memory.size_bytes, latency).with_reset_policy(config.reset.policy))
    }

    /// Sets what reset does to queued bursts.
    #[must_use]
    pub fn with_reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.reset_policy = policy;
        self
    }

    /// Evaluates one half-cycle at the given clock level.
    ///
    /// `clk == true` runs the rising-edge logic, `clk == false` commits the
    /// staged outputs. This mirrors how a harness drives a generated RTL model.
    ///
    /// # Errors
    ///
    /// Returns [`DramError::UnsupportedBurst`] when a request with a non-INCR
    /// burst type is presented, and [`DramError::AddressOutOfRange`] when a
    /// presented burst would read past the end of the store. Either way the
    /// request is not queued.
    pub fn eval(&mut self, clk: bool) -> DramResult<()> {
        if clk {
            self.posedge()
        } else {
            self.negedge();
            Ok(())
        }
    }

    /// Runs one full clock cycle: rising edge, then falling edge.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`posedge`](Self::posedge); the falling
    /// edge is skipped in that case.
    pub fn tick(&mut self) -> DramResult<()> {
        self.posedge()?;
        self.negedge();
        Ok(())
    }

    /// Rising-edge evaluation.
    ///
    /// # Errors
    ///
    /// See [`eval`](Self::eval). On error the cycle counter has advanced, the
    /// rejected request is dropped, and the queue and staged output are left
    /// as they were before the edge.
    pub fn posedge(&mut self) -> DramResult<()> {
        self.cycle += 1;
        self.stats.cycles += 1;
        let input = self.input;

        if input.rst {
            self.reset();
            return Ok(());
        }

        if input.arvalid {
            self.accept(&input)?;
        }

        self.staged = if input.rready {
            // The consumer took whatever was presented; only a fresh beat re-asserts valid.
            self.service(self.staged.without_valid())
        } else {
            if self.staged.rvalid {
                self.stats.stall_cycles += 1;
            }
            self.staged
        };
        Ok(())
    }

    /// Falling-edge evaluation: the staged snapshot becomes visible.
    pub fn negedge(&mut self) {
        self.visible = self.staged;
    }

    fn reset(&mut self) {
        self.stats.resets += 1;
        if self.reset_policy == ResetPolicy::FlushQueue {
            self.queue.clear();
        }
        debug!(
            cycle = self.cycle,
            pending = self.queue.len(),
            policy = ?self.reset_policy,
            "reset"
        );
        self.staged = ReadOutput::default();
    }

    fn accept(&mut self, input: &ReadInput) -> DramResult<()> {
        if BurstType::from_bits(input.arburst) != BurstType::Incr {
            return Err(DramError::UnsupportedBurst {
                cycle: self.cycle,
                burst: input.arburst,
            });
        }

        let desc = BurstDescriptor::new(input.araddr, input.arlen, input.arsize, 0);
        if !self.memory.contains(desc.base_address, desc.total_bytes()) {
            return Err(DramError::AddressOutOfRange {
                offset: desc.base_address,
                len: desc.total_bytes(),
                size: self.memory.len(),
            });
        }

        let ready_at = self
            .latency
            .first_beat_ready_cycle(self.cycle, input.araddr);
        let desc = BurstDescriptor {
            first_beat_ready_cycle: ready_at,
            ..desc
        };
        self.queue.push(desc);

        self.stats.requests_accepted += 1;
        self.stats.max_queue_depth = self.stats.max_queue_depth.max(self.queue.len());
        debug!(
            cycle = self.cycle,
            addr = input.araddr,
            beats = desc.total_beats,
            width = desc.bytes_per_beat,
            ready_at,
            pending = self.queue.len(),
            "accepted read burst"
        );
        Ok(())
    }

    /// Produces the next beat of the head burst if it is due, else returns `held`.
    ///
    /// Every queued burst was checked against the store on acceptance.
    fn service(&mut self, held: ReadOutput) -> ReadOutput {
        let cycle = self.cycle;
        let Some(head) = self.queue.head_mut() else {
            return held;
        };
        if !head.is_ready(cycle) {
            return held;
        }

        let span = head.next_beat();
        let last = head.advance();
        self.stats.beats_delivered += 1;
        self.stats.bytes_delivered += span.len as u64;
        trace!(cycle, offset = span.offset, len = span.len, last, "beat");

        let retired = if last { self.queue.retire() } else { None };
        if let Some(done) = retired {
            self.stats.bursts_completed += 1;
            debug!(
                cycle,
                addr = done.base_address,
                beats = done.total_beats,
                ready_at = done.first_beat_ready_cycle,
                "burst complete"
            );
        }
        ReadOutput::beat(span, last)
    }

    /// Returns the input signals sampled on the next rising edge.
    pub const fn input(&self) -> &ReadInput {
        &self.input
    }

    /// Returns the input signals for the harness to drive.
    pub const fn input_mut(&mut self) -> &mut ReadInput {
        &mut self.input
    }

    /// Replaces all input signals at once.
    pub const fn set_input(&mut self, input: ReadInput) {
        self.input = input;
    }

    /// Returns the visible output signals.
    pub const fn output(&self) -> &ReadOutput {
        &self.visible
    }

    /// Returns the output signals staged for the next falling edge.
    pub const fn staged_output(&self) -> &ReadOutput {
        &self.staged
    }

    /// Returns the bytes of the visible `rdata`, if any beat has been presented.
    ///
    /// Like the bus, this keeps pointing at the last beat after `rvalid` drops;
    /// check [`ReadOutput::rvalid`] before consuming it.
    pub fn rdata(&self) -> Option<&[u8]> {
        self.visible
            .rdata
            .map(|span| self.memory.read_span(span.offset, span.len))
    }

    /// Returns the memory store.
    pub const fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    /// Returns the memory store for seeding.
    pub const fn memory_mut(&mut self) -> &mut MemoryStore {
        &mut self.memory
    }

    /// Returns the number of rising edges evaluated so far.
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Returns the number of accepted bursts not yet completed.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Returns the pending-transaction queue.
    pub const fn queue(&self) -> &PendingQueue {
        &self.queue
    }

    /// Returns the configured reset policy.
    pub const fn reset_policy(&self) -> ResetPolicy {
        self.reset_policy
    }

    /// Returns the worst-case first-beat latency of the latency model.
    pub fn max_latency(&self) -> u64 {
        self.latency.max_latency()
    }

    /// Returns the collected statistics.
    pub const fn stats(&self) -> &DramStats {
        &self.stats
    }
}

impl fmt::Debug for AxiDram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxiDram")
            .field("cycle", &self.cycle)
            .field("memory", &self.memory)
            .field("queue", &self.queue)
            .field("reset_policy", &self.reset_policy)
            .field("input", &self.input)
            .field("staged", &self.staged)
            .field("visible", &self.visible)
            .finish_non_exhaustive()
    }
}
