//! Pipeline simulator CLI.
//!
//! This binary is the entry point for running and preparing simulations. It performs:
//! 1. **Run:** Simulate a binary trace with a configuration file and/or flag overrides.
//! 2. **Gen:** Write a deterministic synthetic trace in the binary record format.
//!
//! Exit status: 0 when the last instruction retired, 1 on any error, 2 when the
//! cycle budget ran out first.

use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use pipesim_core::config::{BranchPolicy, Config};
use pipesim_core::sim::{RunOutcome, Simulator};
use pipesim_core::stats::{PipelineStats, StatsReport};
use pipesim_core::trace::{OpType, TraceRecord};

/// Exit status when the cycle budget ran out before the trace drained.
const EXIT_BUDGET_EXHAUSTED: u8 = 2;

/// Address of the first synthetic instruction.
const GEN_BASE_ADDR: u64 = 0x1000;

#[derive(Parser, Debug)]
#[command(
    name = "pipesim",
    author,
    version,
    about = "Trace-driven in-order superscalar pipeline simulator",
    long_about = "Simulate a W-wide FE/ID/EX/MEM/WB pipeline over a binary instruction trace.\n\nExamples:\n  pipesim gen trace.bin --count 1000 --pattern chain\n  pipesim run trace.bin --width 2 --exe-fwd --mem-fwd\n  pipesim run trace.bin --config pipe.json --bpred-policy 2 --json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate a trace until its last instruction retires.
    Run {
        /// Binary trace file.
        trace: PathBuf,

        /// JSON configuration file; flags below override it.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Pipeline width (lanes per stage).
        #[arg(short, long)]
        width: Option<usize>,

        /// Enable execute-stage forwarding.
        #[arg(long)]
        exe_fwd: bool,

        /// Enable memory-stage forwarding.
        #[arg(long)]
        mem_fwd: bool,

        /// Branch predictor: 0 = none, 1 = always taken, 2 = gshare.
        #[arg(long)]
        bpred_policy: Option<u8>,

        /// Stop after this many cycles.
        #[arg(long)]
        max_cycles: Option<u64>,

        /// Print the latch contents after every cycle.
        #[arg(long)]
        trace_pipeline: bool,

        /// Print final statistics as JSON instead of the text report.
        #[arg(long)]
        json: bool,
    },

    /// Write a synthetic trace.
    Gen {
        /// Output file.
        out: PathBuf,

        /// Number of instructions.
        #[arg(short = 'n', long)]
        count: u64,

        /// Dependency pattern of the generated instructions.
        #[arg(short, long, value_enum, default_value_t = Pattern::Independent)]
        pattern: Pattern,
    },
}

/// Shape of a generated trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Pattern {
    /// ALU operations with no register or condition-code overlap.
    Independent,
    /// Each ALU operation reads the previous one's destination.
    Chain,
    /// Loads, each immediately followed by an ALU operation using the loaded value.
    LoadUse,
    /// Compare/branch pairs with a repeating taken, taken, not-taken pattern.
    Branches,
}

/// Final result printed by `run --json`.
#[derive(Serialize)]
struct RunSummary<'a> {
    config: &'a Config,
    outcome: RunOutcome,
    #[serde(flatten)]
    counters: PipelineStats,
    stats: StatsReport,
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            trace,
            config,
            width,
            exe_fwd,
            mem_fwd,
            bpred_policy,
            max_cycles,
            trace_pipeline,
            json,
        } => load_config(config.as_deref()).and_then(|mut cfg| {
            if let Some(w) = width {
                cfg.pipeline.width = w;
            }
            cfg.pipeline.exe_forwarding |= exe_fwd;
            cfg.pipeline.mem_forwarding |= mem_fwd;
            if let Some(sel) = bpred_policy {
                cfg.pipeline.branch_predictor = BranchPolicy::try_from(sel)?;
            }
            if max_cycles.is_some() {
                cfg.general.max_cycles = max_cycles;
            }
            cfg.general.trace_pipeline |= trace_pipeline;
            cmd_run(&trace, &cfg, json)
        }),
        Commands::Gen {
            out,
            count,
            pattern,
        } => cmd_gen(&out, count, pattern).map(|()| RunOutcome::Halted),
    };

    match result {
        Ok(RunOutcome::Halted) => ExitCode::SUCCESS,
        Ok(RunOutcome::BudgetExhausted) => ExitCode::from(EXIT_BUDGET_EXHAUSTED),
        Err(e) => {
            eprintln!("error: {e}");
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

/// Installs the stderr log subscriber, filtered by `RUST_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Reads the configuration file if one was given, otherwise the defaults.
fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn Error>> {
    Ok(match path {
        Some(p) => Config::from_json_file(p)?,
        None => Config::default(),
    })
}

/// Runs one simulation and prints its statistics.
fn cmd_run(trace: &Path, config: &Config, json: bool) -> Result<RunOutcome, Box<dyn Error>> {
    let mut sim = Simulator::from_trace_file(trace, config)?;
    let outcome = sim.run()?;
    let stats = sim.pipeline.sim_stats();

    if json {
        let summary = RunSummary {
            config,
            outcome,
            counters: sim.pipeline.stats(),
            stats: stats.report(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let p = &config.pipeline;
        println!(
            "PIPELINE_WIDTH {}  EXE_FWD {}  MEM_FWD {}  BPRED {:?}",
            p.width, p.exe_forwarding, p.mem_forwarding, p.branch_predictor
        );
        if outcome == RunOutcome::BudgetExhausted {
            println!("[!] cycle budget exhausted before the trace drained");
        }
        stats.print();
    }
    Ok(outcome)
}

/// Writes `count` synthetic records following `pattern`.
fn cmd_gen(out: &Path, count: u64, pattern: Pattern) -> Result<(), Box<dyn Error>> {
    let mut w = BufWriter::new(File::create(out)?);
    for i in 0..count {
        w.write_all(&synth_record(pattern, i).to_bytes())?;
    }
    w.flush()?;
    tracing::info!(count, ?pattern, path = %out.display(), "trace written");
    Ok(())
}

/// Builds the `i`-th record of a synthetic trace.
fn synth_record(pattern: Pattern, i: u64) -> TraceRecord {
    let reg = |n: u64| (n % 30) as u8 + 1;
    let base = TraceRecord {
        inst_addr: GEN_BASE_ADDR + 4 * i,
        ..TraceRecord::default()
    };

    match pattern {
        Pattern::Independent => TraceRecord {
            dest: reg(i),
            dest_needed: true,
            ..base
        },
        Pattern::Chain => TraceRecord {
            dest: reg(i),
            dest_needed: true,
            src1_reg: reg(i.wrapping_sub(1)),
            src1_needed: i > 0,
            ..base
        },
        Pattern::LoadUse if i % 2 == 0 => TraceRecord {
            op_type: OpType::Load,
            dest: reg(i),
            dest_needed: true,
            ..base
        },
        Pattern::LoadUse => TraceRecord {
            dest: reg(i),
            dest_needed: true,
            src1_reg: reg(i - 1),
            src1_needed: true,
            ..base
        },
        Pattern::Branches if i % 2 == 0 => TraceRecord {
            cc_write: true,
            ..base
        },
        Pattern::Branches => TraceRecord {
            op_type: OpType::Cbr,
            cc_read: true,
            br_taken: (i / 2) % 3 != 2,
            ..base
        },
    }
}
