//! Model statistics collection and reporting.
//!
//! This module tracks activity of the DRAM model. It provides:
//! 1. **Traffic:** Requests accepted, bursts completed, beats and bytes delivered.
//! 2. **Backpressure:** Cycles where a beat was presented but `rready` was low.
//! 3. **Occupancy:** Peak depth of the pending-transaction queue.

use serde::Serialize;

/// Counters updated by the protocol engine on each rising edge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DramStats {
    /// Rising edges evaluated.
    pub cycles: u64,
    /// Read requests accepted on the AR channel.
    pub requests_accepted: u64,
    /// Bursts whose final beat has been produced.
    pub bursts_completed: u64,
    /// Data beats produced.
    pub beats_delivered: u64,
    /// Data bytes produced.
    pub bytes_delivered: u64,
    /// Rising edges where `rvalid` was staged but the consumer was not ready.
    pub stall_cycles: u64,
    /// Rising edges with reset asserted.
    pub resets: u64,
    /// Largest number of bursts queued at once.
    pub max_queue_depth: usize,
}

impl DramStats {
    /// Average beats per completed burst, or zero before the first completes.
    pub fn beats_per_burst(&self) -> f64 {
        if self.bursts_completed == 0 {
            0.0
        } else {
            self.beats_delivered as f64 / self.bursts_completed as f64
        }
    }

    /// Fraction of cycles that produced a beat.
    pub fn bus_utilization(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.beats_delivered as f64 / self.cycles as f64
        }
    }

    /// Prints a formatted report to stdout.
    pub fn print(&self) {
        println!("\n==========================================================");
        println!("AXI DRAM MODEL STATISTICS");
        println!("==========================================================");
        println!("sim_cycles               {}", self.cycles);
        println!("requests_accepted        {}", self.requests_accepted);
        println!("bursts_completed         {}", self.bursts_completed);
        println!("beats_delivered          {}", self.beats_delivered);
        println!("bytes_delivered          {}", self.bytes_delivered);
        println!("beats_per_burst          {:.2}", self.beats_per_burst());
        println!("bus_utilization          {:.2}%", self.bus_utilization() * 100.0);
        println!("----------------------------------------------------------");
        println!("stall_cycles             {}", self.stall_cycles);
        println!("resets                   {}", self.resets);
        println!("max_queue_depth          {}", self.max_queue_depth);
        println!("==========================================================");
    }
}
