//! End-to-End Timing Scenarios.
//!
//! Whole-trace runs checking cycle counts that follow directly from the
//! pipeline depth, the width, and the forwarding configuration.

use pipesim_core::common::constants::PIPELINE_DEPTH;
use pipesim_core::config::BranchPolicy;
use pipesim_core::trace::{OpType, TraceRecord};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::builder::{RecordBuilder, alu, cbr, load};
use crate::common::harness::{IF_ID, TestContext, pipe_config};

/// `n` ALU ops writing distinct registers and reading none.
fn independent(n: u64) -> Vec<TraceRecord> {
    (0..n).map(|i| alu((i % 32) as u8, &[])).collect()
}

// ══════════════════════════════════════════════════════════
// 1. Fill and drain
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(1, 1)]
#[case(1, 10)]
#[case(2, 10)]
#[case(3, 10)]
#[case(4, 16)]
#[case(8, 5)]
fn independent_ops_halt_after_fill_latency(#[case] width: usize, #[case] n: u64) {
    let mut ctx = TestContext::with_config(
        independent(n),
        &pipe_config(width, false, false, BranchPolicy::None),
    );
    let expected = n.div_ceil(width as u64) + PIPELINE_DEPTH;
    assert_eq!(ctx.run_to_halt(200), expected);
    assert_eq!(ctx.pipeline.stats().retired_count, n);
}

#[rstest]
fn halting_op_retires_one_pipeline_depth_after_fetch(#[values(1, 2, 3)] width: usize) {
    let n = 7;
    let mut ctx = TestContext::with_config(
        independent(n),
        &pipe_config(width, false, false, BranchPolicy::None),
    );
    let halt = ctx.run_to_halt(100);
    let fetched = ctx.timeline.entered(n, IF_ID).expect("last op fetched");
    assert_eq!(halt, fetched + PIPELINE_DEPTH);
}

#[test]
fn ipc_approaches_width_for_long_independent_trace() {
    let mut ctx = TestContext::with_config(
        independent(400),
        &pipe_config(4, false, false, BranchPolicy::None),
    );
    ctx.run_to_halt(1000);
    assert!(ctx.pipeline.sim_stats().ipc() > 3.8);
}

// ══════════════════════════════════════════════════════════
// 2. Dependent pair, width 1
// ══════════════════════════════════════════════════════════

#[rstest]
#[case::no_forwarding(false, false, 2)]
#[case::exe_only(true, false, 2)]
#[case::mem_only(false, true, 2)]
#[case::full_forwarding(true, true, 0)]
fn alu_producer_stall_cycles(#[case] exe: bool, #[case] mem: bool, #[case] stalls: u64) {
    let mut ctx = TestContext::with_config(
        vec![alu(5, &[]), alu(6, &[5])],
        &pipe_config(1, exe, mem, BranchPolicy::None),
    );
    let halt = ctx.run_to_halt(20);
    assert_eq!(ctx.timeline.stall_cycles(2), stalls);
    assert_eq!(halt, 2 + PIPELINE_DEPTH + stalls);
}

#[rstest]
#[case::no_forwarding(false, 2)]
#[case::full_forwarding(true, 1)]
fn load_producer_stall_cycles(#[case] fwd: bool, #[case] stalls: u64) {
    let mut ctx = TestContext::with_config(
        vec![load(5, &[1]), alu(6, &[5])],
        &pipe_config(1, fwd, fwd, BranchPolicy::None),
    );
    ctx.run_to_halt(20);
    assert_eq!(ctx.timeline.stall_cycles(2), stalls);
}

#[rstest]
#[case::no_forwarding(false, 2)]
#[case::full_forwarding(true, 0)]
fn condition_code_dependency(#[case] fwd: bool, #[case] stalls: u64) {
    let cmp = RecordBuilder::new(OpType::Alu).src1(1).src2(2).cc_write().build();
    let mut ctx = TestContext::with_config(
        vec![cmp, cbr(0x80, true)],
        &pipe_config(1, fwd, fwd, BranchPolicy::None),
    );
    ctx.run_to_halt(20);
    assert_eq!(ctx.timeline.stall_cycles(2), stalls);
}

#[test]
fn consumer_two_behind_producer_stalls_once() {
    let mut ctx = TestContext::new(vec![alu(5, &[]), alu(9, &[]), alu(6, &[5])]);
    ctx.run_to_halt(20);
    assert_eq!(ctx.timeline.stall_cycles(3), 1);
}

#[test]
fn consumer_three_behind_producer_never_stalls() {
    let mut ctx = TestContext::new(vec![alu(5, &[]), alu(8, &[]), alu(9, &[]), alu(6, &[5])]);
    ctx.run_to_halt(20);
    assert_eq!(ctx.timeline.stall_cycles(4), 0);
}

// ══════════════════════════════════════════════════════════
// 3. Partial forwarding is no forwarding
// ══════════════════════════════════════════════════════════

#[test]
fn single_forwarding_path_matches_none_cycle_for_cycle() {
    let trace = vec![
        load(1, &[2]),
        alu(3, &[1]),
        alu(4, &[3, 1]),
        cbr(0x10, false),
        alu(5, &[4]),
        load(6, &[5]),
        alu(7, &[6]),
    ];
    let configs = [
        pipe_config(2, false, false, BranchPolicy::GShare),
        pipe_config(2, true, false, BranchPolicy::GShare),
        pipe_config(2, false, true, BranchPolicy::GShare),
    ];
    let dumps: Vec<Vec<String>> = configs
        .iter()
        .map(|cfg| {
            let mut ctx = TestContext::with_config(trace.clone(), cfg);
            let mut frames = Vec::new();
            while !ctx.pipeline.is_halted() {
                ctx.step();
                frames.push(ctx.pipeline.render_state());
            }
            frames
        })
        .collect();

    assert_eq!(dumps[0], dumps[1]);
    assert_eq!(dumps[0], dumps[2]);
}

// ══════════════════════════════════════════════════════════
// 4. State dump
// ══════════════════════════════════════════════════════════

#[test]
fn dump_shows_dependent_pair_waiting() {
    let mut ctx = TestContext::with_config(
        vec![alu(5, &[]), alu(6, &[5]), alu(7, &[])],
        &pipe_config(2, false, false, BranchPolicy::None),
    );
    ctx.steps(3);
    let expected = "\
--------------------------------------------
cycle count : 3 retired_instruction : 0
     FE:     ID:     EX:    MEM:
       2  ------       1  ------
       3  ------  ------  ------
";
    assert_eq!(ctx.pipeline.render_state(), expected);
}
