//! Execute and Memory Stage Tests.
//!
//! Verifies the lock-step pass-through of EX and MEM and the branch
//! resolution point: fetch resumes in the cycle a mispredicted branch
//! leaves EX.

use pipesim_core::config::BranchPolicy;
use pretty_assertions::assert_eq;

use crate::common::builder::{alu, cbr};
use crate::common::harness::{EX_MEM, ID_EX, IF_ID, MEM_WB, TestContext, pipe_config};

// ══════════════════════════════════════════════════════════
// 1. Pass-through
// ══════════════════════════════════════════════════════════

#[test]
fn lanes_move_one_latch_per_cycle() {
    let mut ctx = TestContext::with_config(
        vec![alu(1, &[]), alu(2, &[]), alu(3, &[])],
        &pipe_config(2, false, false, BranchPolicy::None),
    );
    ctx.steps(2);
    let id_ex = ctx.lanes(ID_EX);

    ctx.step();
    assert_eq!(ctx.lanes(EX_MEM), id_ex);
    let ex_mem = ctx.lanes(EX_MEM);

    ctx.step();
    assert_eq!(ctx.lanes(MEM_WB), ex_mem);
}

#[test]
fn every_op_spends_one_cycle_in_each_back_end_latch() {
    let mut ctx = TestContext::with_config(
        vec![alu(1, &[]), alu(2, &[1]), alu(3, &[2]), alu(4, &[])],
        &pipe_config(2, false, false, BranchPolicy::None),
    );
    ctx.run_to_halt(50);
    for (op, row) in ctx.timeline.ops() {
        let id_ex = row[ID_EX].expect("dispatched");
        assert_eq!(row[EX_MEM], Some(id_ex + 1), "op {op}");
        assert_eq!(row[MEM_WB], Some(id_ex + 2), "op {op}");
    }
}

// ══════════════════════════════════════════════════════════
// 2. Branch resolution
// ══════════════════════════════════════════════════════════

#[test]
fn fetch_resumes_when_mispredicted_branch_leaves_ex() {
    let mut ctx = TestContext::with_config(
        vec![cbr(0x40, false), alu(1, &[])],
        &pipe_config(1, false, false, BranchPolicy::AlwaysTaken),
    );

    ctx.step();
    assert!(ctx.pipeline.is_fetch_stalled());

    ctx.step();
    assert!(ctx.pipeline.is_fetch_stalled());
    assert_eq!(ctx.lanes(IF_ID), vec![None]);

    ctx.step();
    assert!(!ctx.pipeline.is_fetch_stalled());
    assert_eq!(ctx.lanes(EX_MEM), vec![Some(1)]);
    assert_eq!(ctx.lanes(IF_ID), vec![Some(2)]);

    assert_eq!(ctx.pipeline.sim_stats().stalls_control, 1);
    assert_eq!(ctx.pipeline.sim_stats().branch_mispredictions, 1);
}

#[test]
fn mispredicted_branch_costs_one_fetch_cycle() {
    let mut predicted = TestContext::with_config(
        vec![cbr(0x40, true), alu(1, &[])],
        &pipe_config(1, false, false, BranchPolicy::AlwaysTaken),
    );
    let mut mispredicted = TestContext::with_config(
        vec![cbr(0x40, false), alu(1, &[])],
        &pipe_config(1, false, false, BranchPolicy::AlwaysTaken),
    );

    assert_eq!(predicted.run_to_halt(20), 6);
    assert_eq!(mispredicted.run_to_halt(20), 7);
}
