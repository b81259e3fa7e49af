//! # Protocol Engine Tests
//!
//! Cycle-level tests of `AxiDram`: the reference read scenarios, first-beat
//! latency, backpressure, in-order completion, reset behavior, rejected
//! requests, and the two-phase output update.

use crate::common::harness::{TestContext, pattern_dram, pattern_value};
use crate::common::mocks::latency::{MockLatency, ScriptedLatency};
use axi_dram_core::axi::{ReadInput, ReadOutput, ReadResponse};
use axi_dram_core::common::constants::{BURST_FIXED, BURST_INCR, BURST_WRAP};
use axi_dram_core::config::ResetPolicy;
use axi_dram_core::memory::FixedLatency;
use axi_dram_core::sim::{Harness, ReadRequest};
use axi_dram_core::{AxiDram, DramError};
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Drives one AR request on the next rising edge, then drops `arvalid`.
fn issue(dram: &mut AxiDram, addr: u64, arlen: u8, arsize: u8) {
    dram.set_input(ReadInput {
        arvalid: true,
        araddr: addr,
        arlen,
        arsize,
        ..ReadInput::default()
    });
    dram.tick().unwrap();
    dram.input_mut().arvalid = false;
}

fn visible_beat(dram: &AxiDram) -> Option<(Vec<u8>, bool)> {
    let out = dram.output();
    out.rvalid
        .then(|| (dram.rdata().unwrap().to_vec(), out.rlast))
}

// ══════════════════════════════════════════════════════════
// 1. Reference read scenarios
// ══════════════════════════════════════════════════════════

#[test]
fn test_single_beat_read() {
    let mut ctx = TestContext::new();
    let beats = ctx.read(ReadRequest::new(0x10));

    assert_eq!(beats.len(), 1);
    assert_eq!(beats[0].data, vec![0x10]);
    assert_eq!(beats[0].resp, ReadResponse::Okay);
    assert!(beats[0].last);
    // Accepted on cycle 1, ten cycles of latency.
    assert_eq!(beats[0].cycle, 11);
}

#[rstest]
#[case::byte_burst(0x20, 4, 0)]
#[case::word_burst(0x30, 4, 2)]
#[case::halfword_burst(0x40, 8, 1)]
#[case::long_word_burst(0x80, 16, 2)]
fn test_incr_burst_scenarios(#[case] addr: u64, #[case] beats: u16, #[case] size: u8) {
    let mut ctx = TestContext::new();
    let req = ReadRequest::new(addr).beats(beats).size(size);
    let got = ctx.read(req);

    assert_eq!(got.len(), usize::from(beats));
    for (i, beat) in got.iter().enumerate() {
        assert_eq!(beat.data.len(), req.width());
        assert_eq!(beat.as_le_u64(), pattern_value(&req, i), "beat {i}");
        assert_eq!(beat.last, i + 1 == got.len(), "rlast on beat {i}");
        assert_eq!(beat.resp, ReadResponse::Okay);
    }
    // Once started, one beat per cycle.
    for pair in got.windows(2) {
        assert_eq!(pair[1].cycle, pair[0].cycle + 1);
    }
}

#[test]
fn test_word_beats_are_little_endian() {
    let mut ctx = TestContext::new();
    let beats = ctx.read(ReadRequest::new(0x30).beats(4).size(2));
    let values: Vec<u64> = beats.iter().map(|b| b.as_le_u64()).collect();
    assert_eq!(values, vec![0x33323130, 0x37363534, 0x3B3A3938, 0x3F3E3D3C]);
}

#[test]
fn test_halfword_burst_addresses() {
    let mut ctx = TestContext::new();
    let beats = ctx.read(ReadRequest::new(0x40).beats(8).size(1));
    let values: Vec<u64> = beats.iter().map(|b| b.as_le_u64()).collect();
    assert_eq!(
        values,
        vec![0x4140, 0x4342, 0x4544, 0x4746, 0x4948, 0x4B4A, 0x4D4C, 0x4F4E]
    );
}

#[test]
fn test_last_beat_of_store_is_readable() {
    let mut ctx = TestContext::new();
    let beats = ctx.read(ReadRequest::new(0x3FC).beats(4));
    let values: Vec<u64> = beats.iter().map(|b| b.as_le_u64()).collect();
    assert_eq!(values, vec![0xFC, 0xFD, 0xFE, 0xFF]);
}

// ══════════════════════════════════════════════════════════
// 2. Latency and handshake
// ══════════════════════════════════════════════════════════

#[test]
fn test_jittered_first_beat_latency_bounds() {
    let mut ctx = TestContext::jittered();
    for n in 0..50u64 {
        let req = ReadRequest::new(n * 4).beats(2);
        let accepted = ctx.harness.issue(req).unwrap();
        let beats = ctx.harness.collect_burst(20).unwrap();
        let latency = beats[0].cycle - accepted;
        assert!((10..=12).contains(&latency), "latency {latency} out of range");
        assert_eq!(beats[1].cycle, beats[0].cycle + 1);
    }
}

#[test]
fn test_arready_always_asserted() {
    let mut dram = pattern_dram(Box::new(FixedLatency::new(2)));
    assert!(dram.output().arready);
    issue(&mut dram, 0x0, 3, 0);
    for cycle in 0..10 {
        dram.input_mut().rst = cycle == 4;
        dram.tick().unwrap();
        assert!(dram.output().arready, "arready low after cycle {}", dram.cycle());
        assert!(dram.staged_output().arready);
    }
}

#[test]
fn test_zero_latency_beat_on_accept_cycle() {
    let mut mock = MockLatency::new();
    let _ = mock
        .expect_access_latency()
        .withf(|&addr| addr == 0x40)
        .times(1)
        .return_const(0u64);
    let _ = mock.expect_max_latency().return_const(0u64);

    let mut harness = Harness::new(pattern_dram(Box::new(mock)));
    let accepted = harness.issue(ReadRequest::new(0x40).beats(2)).unwrap();
    assert_eq!(harness.buffered(), 1);

    let beats = harness.collect_burst(4).unwrap();
    assert_eq!(beats[0].cycle, accepted);
    assert_eq!(beats[0].data, vec![0x40]);
    assert_eq!(beats[1].data, vec![0x41]);
    assert!(beats[1].last);
}

#[test]
fn test_outputs_change_only_on_falling_edge() {
    let mut dram = pattern_dram(Box::new(FixedLatency::new(0)));
    dram.set_input(ReadInput {
        arvalid: true,
        araddr: 0x10,
        ..ReadInput::default()
    });

    dram.eval(true).unwrap();
    assert!(dram.staged_output().rvalid);
    assert!(!dram.output().rvalid);
    assert_eq!(dram.rdata(), None);

    dram.eval(false).unwrap();
    assert!(dram.output().rvalid);
    assert!(dram.output().rlast);
    assert_eq!(dram.rdata(), Some(&[0x10][..]));
}

#[test]
fn test_request_accepted_while_rready_low() {
    let mut dram = pattern_dram(Box::new(FixedLatency::new(1)));
    dram.set_input(ReadInput {
        arvalid: true,
        araddr: 0x20,
        rready: false,
        ..ReadInput::default()
    });
    dram.tick().unwrap();
    dram.input_mut().arvalid = false;

    assert_eq!(dram.pending(), 1);
    assert_eq!(dram.stats().requests_accepted, 1);

    // Nothing is produced until the consumer is ready.
    for _ in 0..5 {
        dram.tick().unwrap();
        assert!(!dram.output().rvalid);
    }
    dram.input_mut().rready = true;
    dram.tick().unwrap();
    assert_eq!(visible_beat(&dram), Some((vec![0x20], true)));
}

// ══════════════════════════════════════════════════════════
// 3. Backpressure
// ══════════════════════════════════════════════════════════

#[test]
fn test_rready_low_holds_current_beat() {
    let mut dram = pattern_dram(Box::new(FixedLatency::new(2)));
    issue(&mut dram, 0x20, 3, 0);
    dram.tick().unwrap();
    dram.tick().unwrap();
    assert_eq!(dram.cycle(), 3);
    assert_eq!(visible_beat(&dram), Some((vec![0x20], false)));

    dram.input_mut().rready = false;
    for _ in 0..3 {
        dram.tick().unwrap();
        assert_eq!(visible_beat(&dram), Some((vec![0x20], false)));
    }
    assert_eq!(dram.stats().stall_cycles, 3);

    dram.input_mut().rready = true;
    let mut rest = Vec::new();
    for _ in 0..3 {
        dram.tick().unwrap();
        rest.push(visible_beat(&dram).unwrap());
    }
    assert_eq!(
        rest,
        vec![(vec![0x21], false), (vec![0x22], false), (vec![0x23], true)]
    );
    assert_eq!(dram.pending(), 0);
}

#[test]
fn test_rvalid_drops_after_last_beat_but_rlast_stays() {
    let mut dram = pattern_dram(Box::new(FixedLatency::new(1)));
    issue(&mut dram, 0x10, 0, 0);
    dram.tick().unwrap();
    assert_eq!(visible_beat(&dram), Some((vec![0x10], true)));

    dram.tick().unwrap();
    let out = dram.output();
    assert!(!out.rvalid);
    assert!(out.rlast);
    assert_eq!(dram.rdata(), Some(&[0x10][..]));
}

// ══════════════════════════════════════════════════════════
// 4. Ordering
// ══════════════════════════════════════════════════════════

#[test]
fn test_bursts_complete_in_acceptance_order() {
    // The second burst is due first but must wait for the head.
    let latency = ScriptedLatency::new(&[10, 1]);
    let mut harness = Harness::new(pattern_dram(Box::new(latency)));

    let a = ReadRequest::new(0x00).beats(4);
    let b = ReadRequest::new(0x100).beats(2).size(1);
    let a_cycle = harness.issue(a).unwrap();
    let _ = harness.issue(b).unwrap();
    assert_eq!(harness.dram().pending(), 2);
    assert_eq!(harness.dram().stats().max_queue_depth, 2);

    let first = harness.collect_burst(20).unwrap();
    let second = harness.collect_burst(20).unwrap();

    let a_values: Vec<u64> = first.iter().map(|b| b.as_le_u64()).collect();
    let b_values: Vec<u64> = second.iter().map(|b| b.as_le_u64()).collect();
    assert_eq!(a_values, vec![0x00, 0x01, 0x02, 0x03]);
    assert_eq!(b_values, vec![0x0100, 0x0302]);
    assert_eq!(first[0].cycle, a_cycle + 10);
    // Back to back: no idle cycle between the bursts.
    assert_eq!(second[0].cycle, first[3].cycle + 1);
    assert!(second[1].last);
}

#[test]
fn test_many_outstanding_bursts() {
    let mut ctx = TestContext::jittered();
    let reqs: Vec<ReadRequest> = (0..8u64)
        .map(|n| ReadRequest::new(n * 0x40).beats(4).size(2))
        .collect();
    for req in &reqs {
        let _ = ctx.harness.issue(*req).unwrap();
    }
    for req in &reqs {
        let beats = ctx.harness.collect_burst(64).unwrap();
        assert_eq!(beats.len(), 4);
        for (i, beat) in beats.iter().enumerate() {
            assert_eq!(beat.as_le_u64(), pattern_value(req, i));
        }
    }
    assert_eq!(ctx.harness.dram().stats().bursts_completed, 8);
}

// ══════════════════════════════════════════════════════════
// 5. Reset
// ══════════════════════════════════════════════════════════

#[test]
fn test_reset_clears_outputs_and_keeps_queue() {
    let mut dram = pattern_dram(Box::new(FixedLatency::new(3)));
    assert_eq!(dram.reset_policy(), ResetPolicy::KeepQueue);
    issue(&mut dram, 0x20, 3, 0);
    dram.tick().unwrap();
    dram.tick().unwrap();
    dram.tick().unwrap();
    assert_eq!(visible_beat(&dram), Some((vec![0x20], false)));
    dram.tick().unwrap();
    assert_eq!(visible_beat(&dram), Some((vec![0x21], false)));

    dram.input_mut().rst = true;
    dram.tick().unwrap();
    assert_eq!(*dram.output(), ReadOutput::default());
    assert_eq!(dram.pending(), 1);
    assert_eq!(dram.stats().resets, 1);

    dram.input_mut().rst = false;
    dram.tick().unwrap();
    assert_eq!(visible_beat(&dram), Some((vec![0x22], false)));
    dram.tick().unwrap();
    assert_eq!(visible_beat(&dram), Some((vec![0x23], true)));
    assert_eq!(dram.pending(), 0);
}

#[test]
fn test_reset_with_flush_policy_drops_queue() {
    let dram = pattern_dram(Box::new(FixedLatency::new(3)));
    let mut dram = dram.with_reset_policy(ResetPolicy::FlushQueue);
    issue(&mut dram, 0x20, 3, 0);
    issue(&mut dram, 0x40, 0, 0);
    assert_eq!(dram.pending(), 2);

    dram.input_mut().rst = true;
    dram.tick().unwrap();
    dram.input_mut().rst = false;
    assert_eq!(dram.pending(), 0);

    for _ in 0..20 {
        dram.tick().unwrap();
        assert!(!dram.output().rvalid);
    }
    assert_eq!(dram.stats().beats_delivered, 0);
}

#[test]
fn test_request_during_reset_is_ignored() {
    let mut dram = pattern_dram(Box::new(FixedLatency::new(1)));
    dram.set_input(ReadInput {
        arvalid: true,
        araddr: 0x10,
        rst: true,
        ..ReadInput::default()
    });
    dram.tick().unwrap();
    assert_eq!(dram.cycle(), 1);
    assert_eq!(dram.pending(), 0);
    assert_eq!(dram.stats().requests_accepted, 0);
}

// ══════════════════════════════════════════════════════════
// 6. Rejected requests
// ══════════════════════════════════════════════════════════

#[rstest]
#[case::fixed(BURST_FIXED)]
#[case::wrap(BURST_WRAP)]
#[case::reserved(3)]
#[case::out_of_field(BURST_INCR | 4)]
fn test_non_incr_burst_is_rejected(#[case] burst: u8) {
    let mut dram = pattern_dram(Box::new(FixedLatency::new(1)));
    dram.set_input(ReadInput {
        arvalid: true,
        araddr: 0x10,
        arburst: burst,
        ..ReadInput::default()
    });
    let before = *dram.staged_output();

    let err = dram.tick().unwrap_err();
    assert!(matches!(
        err,
        DramError::UnsupportedBurst { cycle: 1, burst: b } if b == burst
    ));
    assert_eq!(dram.cycle(), 1);
    assert_eq!(dram.pending(), 0);
    assert_eq!(*dram.staged_output(), before);
}

#[test]
fn test_beat_past_end_of_store_is_an_error() {
    let mut ctx = TestContext::new();
    let err = ctx
        .harness
        .read(ReadRequest::new(0x3FE).size(2), 0)
        .unwrap_err();
    assert!(matches!(
        err,
        DramError::AddressOutOfRange {
            offset: 0x3FE,
            len: 4,
            size: 1024
        }
    ));
}

#[test]
fn test_burst_running_past_end_is_rejected_on_accept() {
    // First beats fit; the burst as a whole does not.
    let mut ctx = TestContext::new();
    let accepted = ctx.harness.issue(ReadRequest::new(0x3FC).beats(4).size(1));
    let err = accepted.unwrap_err();
    assert!(matches!(
        err,
        DramError::AddressOutOfRange {
            offset: 0x3FC,
            len: 8,
            size: 1024
        }
    ));
    assert_eq!(ctx.dram().cycle(), 1);
    assert_eq!(ctx.dram().pending(), 0);
    assert_eq!(ctx.dram().stats().requests_accepted, 0);

    // The model keeps working for well-formed requests.
    let beats = ctx.read(ReadRequest::new(0x0).beats(2));
    let values: Vec<u64> = beats.iter().map(|b| b.as_le_u64()).collect();
    assert_eq!(values, vec![0x00, 0x01]);
    assert_eq!(ctx.dram().pending(), 0);
}

#[test]
fn test_rejected_burst_behind_queued_work_leaves_queue_intact() {
    let mut dram = pattern_dram(Box::new(FixedLatency::new(3)));
    issue(&mut dram, 0x20, 1, 0);
    dram.set_input(ReadInput {
        arvalid: true,
        araddr: 0x400,
        ..ReadInput::default()
    });
    assert!(dram.tick().is_err());
    dram.input_mut().arvalid = false;
    assert_eq!(dram.pending(), 1);

    let mut seen = Vec::new();
    for _ in 0..6 {
        dram.tick().unwrap();
        if let Some(beat) = visible_beat(&dram) {
            seen.push(beat);
        }
    }
    assert_eq!(seen, vec![(vec![0x20], false), (vec![0x21], true)]);
}

#[test]
fn test_huge_latency_saturates_instead_of_wrapping() {
    let mut dram = pattern_dram(Box::new(FixedLatency::new(u64::MAX)));
    issue(&mut dram, 0x10, 0, 0);
    assert_eq!(dram.queue().head().map(|d| d.first_beat_ready_cycle), Some(u64::MAX));
    for _ in 0..16 {
        dram.tick().unwrap();
        assert!(!dram.output().rvalid);
    }
    assert_eq!(dram.pending(), 1);
}

// ══════════════════════════════════════════════════════════
// 7. Statistics
// ══════════════════════════════════════════════════════════

#[test]
fn test_stats_track_traffic() {
    let mut ctx = TestContext::new();
    let _ = ctx.read(ReadRequest::new(0x30).beats(4).size(2));
    let _ = ctx.read(ReadRequest::new(0x10));

    let stats = ctx.dram().stats().clone();
    assert_eq!(stats.requests_accepted, 2);
    assert_eq!(stats.bursts_completed, 2);
    assert_eq!(stats.beats_delivered, 5);
    assert_eq!(stats.bytes_delivered, 17);
    assert_eq!(stats.stall_cycles, 0);
    assert_eq!(stats.cycles, ctx.dram().cycle());
}
