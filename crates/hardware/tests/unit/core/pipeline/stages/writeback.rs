//! Writeback Stage Tests.
//!
//! Verifies retirement counting, the retired instruction mix, and halt
//! detection on the last instruction of the trace.

use pipesim_core::config::BranchPolicy;
use pipesim_core::core::pipeline::stages::wb_stage;
use pipesim_core::trace::{OpType, VecTrace};
use pipesim_core::{Config, Pipeline};

use crate::common::builder::{RecordBuilder, alu, cbr, load};
use crate::common::harness::{TestContext, pipe_config};

#[test]
fn empty_mem_wb_retires_nothing() {
    let mut p = Pipeline::new(VecTrace::new(vec![alu(1, &[])]), &Config::default()).unwrap();
    wb_stage(&mut p);
    assert_eq!(p.stats().retired_count, 0);
    assert!(!p.is_halted());
}

#[test]
fn halt_is_raised_when_last_op_retires() {
    let mut ctx = TestContext::new(vec![alu(1, &[]), alu(2, &[]), alu(3, &[])]);
    ctx.steps(6);
    assert!(!ctx.pipeline.is_halted());
    assert_eq!(ctx.pipeline.stats().retired_count, 2);

    ctx.step();
    assert!(ctx.pipeline.is_halted());
    assert_eq!(ctx.pipeline.stats().retired_count, 3);
}

#[test]
fn retired_count_is_frozen_after_halt() {
    let mut ctx = TestContext::new(vec![alu(1, &[]), alu(2, &[])]);
    let halt = ctx.run_to_halt(20);
    ctx.steps(10);
    assert_eq!(ctx.pipeline.stats().retired_count, 2);
    assert_eq!(ctx.pipeline.stats().cycle_count, halt + 10);
    assert!(ctx.pipeline.is_halted());
}

#[test]
fn full_group_retires_in_one_cycle() {
    let mut ctx = TestContext::with_config(
        (1..=4).map(|r| alu(r, &[])).collect(),
        &pipe_config(4, false, false, BranchPolicy::None),
    );
    ctx.steps(4);
    assert_eq!(ctx.pipeline.stats().retired_count, 0);
    ctx.step();
    assert_eq!(ctx.pipeline.stats().retired_count, 4);
    assert!(ctx.pipeline.is_halted());
}

#[test]
fn instruction_mix_by_class() {
    let store = RecordBuilder::new(OpType::Store).src1(1).src2(2).build();
    let other = RecordBuilder::new(OpType::Other).build();
    let mut ctx = TestContext::with_config(
        vec![alu(1, &[]), load(2, &[]), store, cbr(0x10, true), other, alu(3, &[])],
        &pipe_config(2, true, true, BranchPolicy::None),
    );
    ctx.run_to_halt(50);

    let s = ctx.pipeline.sim_stats();
    assert_eq!(
        (s.inst_alu, s.inst_load, s.inst_store, s.inst_branch, s.inst_other),
        (2, 1, 1, 1, 1)
    );
    assert_eq!(s.instructions_retired, 6);
    assert_eq!(s.instructions_fetched, 6);
}
