//! Simulation utilities and memory image loading.
//!
//! Provides the stepping helpers a verification harness needs around
//! [`AxiDram`](crate::AxiDram): issuing requests, collecting beats, holding
//! reset, and seeding the store from files.

/// Request/beat helpers for driving the model cycle by cycle.
pub mod harness;

/// Loading binary images into the memory store.
pub mod loader;

pub use harness::{Beat, Harness, ReadRequest};
