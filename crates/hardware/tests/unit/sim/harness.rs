//! # Harness Helper Tests
//!
//! Verifies request building, beat decoding, reset, and the timeout and
//! buffering behavior of the read master.

use crate::common::harness::{TestContext, pattern_dram};
use axi_dram_core::DramError;
use axi_dram_core::axi::ReadResponse;
use axi_dram_core::common::constants::{BURST_INCR, BURST_WRAP};
use axi_dram_core::memory::FixedLatency;
use axi_dram_core::sim::{Beat, Harness, ReadRequest};
use pretty_assertions::assert_eq;

// ══════════════════════════════════════════════════════════
// 1. Requests and beats
// ══════════════════════════════════════════════════════════

#[test]
fn test_read_request_builder() {
    let req = ReadRequest::new(0x80).beats(16).size(2);
    assert_eq!(req.addr, 0x80);
    assert_eq!(req.arlen(), 15);
    assert_eq!(req.width(), 4);
    assert_eq!(req.burst, BURST_INCR);
    assert_eq!(req.burst(BURST_WRAP).burst, BURST_WRAP);
}

#[test]
fn test_read_request_beats_clamped() {
    assert_eq!(ReadRequest::new(0).beats(0).beats, 1);
    assert_eq!(ReadRequest::new(0).beats(300).beats, 256);
    assert_eq!(ReadRequest::new(0).beats(256).arlen(), 255);
}

#[test]
fn test_out_of_range_beats_field_is_clamped_on_issue() {
    let mut req = ReadRequest::new(0);
    req.beats = 300;
    assert_eq!(req.beat_count(), 256);
    assert_eq!(req.arlen(), 255);
    req.beats = 0;
    assert_eq!(req.beat_count(), 1);
    assert_eq!(req.arlen(), 0);
}

#[test]
fn test_raw_beats_field_issues_clamped_burst() {
    let mut ctx = TestContext::new();
    let mut req = ReadRequest::new(0);
    req.beats = 300;
    let beats = ctx.read(req);
    assert_eq!(beats.len(), 256);
    assert!(beats[255].last);
}

#[test]
fn test_beat_as_le_u64() {
    let beat = Beat {
        cycle: 0,
        data: vec![0x30, 0x31, 0x32, 0x33],
        resp: ReadResponse::Okay,
        last: false,
    };
    assert_eq!(beat.as_le_u64(), 0x33323130);
}

// ══════════════════════════════════════════════════════════
// 2. Clocking
// ══════════════════════════════════════════════════════════

#[test]
fn test_reset_holds_for_cycles() {
    let mut ctx = TestContext::new();
    ctx.harness.reset(3).unwrap();
    assert_eq!(ctx.dram().cycle(), 3);
    assert_eq!(ctx.dram().stats().resets, 3);
    assert!(!ctx.dram().input().rst);
}

#[test]
fn test_issue_returns_accept_cycle_and_clears_arvalid() {
    let mut ctx = TestContext::new();
    ctx.run(5);
    let accepted = ctx.harness.issue(ReadRequest::new(0x10)).unwrap();
    assert_eq!(accepted, 6);
    assert!(!ctx.dram().input().arvalid);
    assert_eq!(ctx.dram().pending(), 1);
}

#[test]
fn test_poll_returns_beats_in_order() {
    let mut harness = Harness::new(pattern_dram(Box::new(FixedLatency::new(1))));
    let _ = harness.issue(ReadRequest::new(0x20).beats(2)).unwrap();

    let first = harness.poll().unwrap().unwrap();
    let second = harness.poll().unwrap().unwrap();
    assert_eq!(first.data, vec![0x20]);
    assert_eq!(second.data, vec![0x21]);
    assert!(second.last);
    assert_eq!(harness.poll().unwrap(), None);
}

#[test]
fn test_collect_burst_times_out_when_idle() {
    let mut ctx = TestContext::new();
    let err = ctx.harness.collect_burst(5).unwrap_err();
    assert!(matches!(err, DramError::Timeout { cycles: 5 }));
    assert_eq!(ctx.dram().cycle(), 5);
}

#[test]
fn test_rejected_burst_clears_arvalid() {
    let mut ctx = TestContext::new();
    let err = ctx
        .harness
        .issue(ReadRequest::new(0x10).burst(BURST_WRAP))
        .unwrap_err();
    assert!(matches!(err, DramError::UnsupportedBurst { .. }));
    assert!(!ctx.dram().input().arvalid);
    assert_eq!(ctx.dram().pending(), 0);
}

#[test]
fn test_into_inner_keeps_state() {
    let mut ctx = TestContext::new();
    let _ = ctx.read(ReadRequest::new(0x10));
    let dram = ctx.harness.into_inner();
    assert_eq!(dram.stats().bursts_completed, 1);
}
