//! Pending-transaction queue for accepted read bursts.
//!
//! Accepted requests wait here in acceptance order. The queue provides:
//! 1. **Enqueue:** Append a descriptor when the AR handshake completes.
//! 2. **Head access:** Only the oldest burst is visible to the service logic.
//! 3. **Retire:** Remove the head once its final beat has been produced.
//!
//! There is no capacity limit; the model never applies backpressure on `arready`.

use std::collections::VecDeque;

use super::signals::DataSpan;
use crate::common::constants::MAX_SIZE_CODE;

/// One accepted, in-progress INCR read burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurstDescriptor {
    /// Starting byte offset.
    pub base_address: u64,
    /// Number of beats in the burst (`arlen + 1`).
    pub total_beats: u32,
    /// Transfer width in bytes (`1 << arsize`).
    pub bytes_per_beat: usize,
    /// Beats not yet produced; counts down to zero.
    pub beats_remaining: u32,
    /// Cycle at or after which the first beat may be produced.
    pub first_beat_ready_cycle: u64,
}

impl BurstDescriptor {
    /// Creates a descriptor from decoded AR channel fields.
    ///
    /// # Arguments
    ///
    /// * `base_address` - `araddr`.
    /// * `arlen` - Burst length minus one.
    /// * `arsize` - Log2 of the bytes per beat (three bits).
    /// * `first_beat_ready_cycle` - Cycle chosen by the latency model.
    pub fn new(base_address: u64, arlen: u8, arsize: u8, first_beat_ready_cycle: u64) -> Self {
        let total_beats = u32::from(arlen) + 1;
        Self {
            base_address,
            total_beats,
            bytes_per_beat: 1usize << (arsize & MAX_SIZE_CODE),
            beats_remaining: total_beats,
            first_beat_ready_cycle,
        }
    }

    /// Returns true once the latency model's delay has elapsed.
    #[inline]
    pub const fn is_ready(&self, cycle: u64) -> bool {
        cycle >= self.first_beat_ready_cycle
    }

    /// Index of the next beat to produce (0-based).
    #[inline]
    pub const fn beats_done(&self) -> u32 {
        self.total_beats - self.beats_remaining
    }

    /// Byte span of the next beat.
    pub fn next_beat(&self) -> DataSpan {
        DataSpan {
            offset: self.base_address + u64::from(self.beats_done()) * self.bytes_per_beat as u64,
            len: self.bytes_per_beat,
        }
    }

    /// Records one produced beat. Returns true if it was the last.
    pub fn advance(&mut self) -> bool {
        debug_assert!(self.beats_remaining > 0, "advanced a completed burst");
        self.beats_remaining -= 1;
        self.beats_remaining == 0
    }

    /// Total bytes transferred by the whole burst.
    pub fn total_bytes(&self) -> usize {
        self.total_beats as usize * self.bytes_per_beat
    }
}

/// FIFO of accepted bursts awaiting service.
#[derive(Debug, Clone, Default)]
pub struct PendingQueue {
    entries: VecDeque<BurstDescriptor>,
}

impl PendingQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of queued bursts.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no burst is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends a newly accepted burst at the tail.
    pub fn push(&mut self, desc: BurstDescriptor) {
        self.entries.push_back(desc);
    }

    /// Returns the oldest burst.
    pub fn head(&self) -> Option<&BurstDescriptor> {
        self.entries.front()
    }

    /// Returns the oldest burst for servicing.
    pub fn head_mut(&mut self) -> Option<&mut BurstDescriptor> {
        self.entries.front_mut()
    }

    /// Removes and returns the oldest burst.
    pub fn retire(&mut self) -> Option<BurstDescriptor> {
        self.entries.pop_front()
    }

    /// Drops every queued burst.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = &BurstDescriptor> {
        self.entries.iter()
    }
}
