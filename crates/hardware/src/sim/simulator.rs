//! Simulator: a pipeline plus the run options that bound it.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Serialize;

use crate::common::error::SimError;
use crate::config::Config;
use crate::core::pipeline::Pipeline;
use crate::trace::{TraceReader, TraceSource};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// The last instruction of the trace retired.
    Halted,
    /// The cycle budget ran out first.
    BudgetExhausted,
}

/// Top-level simulator: the pipeline and its run options.
#[derive(Debug)]
pub struct Simulator<T: TraceSource> {
    /// The pipeline being driven.
    pub pipeline: Pipeline<T>,
    max_cycles: Option<u64>,
    trace_pipeline: bool,
}

impl Simulator<TraceReader<BufReader<File>>> {
    /// Opens a binary trace file and builds a simulator over it.
    ///
    /// # Errors
    ///
    /// [`SimError::Trace`] if the file cannot be opened, or
    /// [`SimError::Config`] if the configuration is invalid.
    pub fn from_trace_file(path: impl AsRef<Path>, config: &Config) -> Result<Self, SimError> {
        let reader = TraceReader::open(path)?;
        Self::new(reader, config)
    }
}

impl<T: TraceSource> Simulator<T> {
    /// Creates a simulator with the given trace and configuration.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] if the configuration is invalid.
    pub fn new(trace: T, config: &Config) -> Result<Self, SimError> {
        Ok(Self::from_pipeline(Pipeline::new(trace, config)?, config))
    }

    /// Wraps an already-built pipeline, taking the run options from `config`.
    pub const fn from_pipeline(pipeline: Pipeline<T>, config: &Config) -> Self {
        Self {
            pipeline,
            max_cycles: config.general.max_cycles,
            trace_pipeline: config.general.trace_pipeline,
        }
    }

    /// Advances the simulator by one clock cycle.
    ///
    /// # Errors
    ///
    /// Propagates trace read failures.
    pub fn tick(&mut self) -> Result<(), SimError> {
        self.pipeline.advance_cycle()
    }

    /// Runs until the pipeline halts or the cycle budget is spent.
    ///
    /// Prints the state dump to stdout after every cycle when
    /// `general.trace_pipeline` is set.
    ///
    /// # Errors
    ///
    /// Propagates trace read failures.
    pub fn run(&mut self) -> Result<RunOutcome, SimError> {
        let dump = self.trace_pipeline;
        self.run_with(|p| {
            if dump {
                print!("{}", p.render_state());
            }
        })
    }

    /// Runs like [`Simulator::run`], calling `on_cycle` after every cycle instead of printing.
    ///
    /// # Arguments
    ///
    /// * `on_cycle` - Observer invoked with the pipeline state at the end of each cycle.
    ///
    /// # Errors
    ///
    /// Propagates trace read failures.
    pub fn run_with(
        &mut self,
        mut on_cycle: impl FnMut(&Pipeline<T>),
    ) -> Result<RunOutcome, SimError> {
        loop {
            if self.pipeline.is_halted() {
                let stats = self.pipeline.stats();
                tracing::info!(
                    cycles = stats.cycle_count,
                    retired = stats.retired_count,
                    "simulation halted"
                );
                return Ok(RunOutcome::Halted);
            }
            if self
                .max_cycles
                .is_some_and(|max| self.pipeline.stats().cycle_count >= max)
            {
                tracing::warn!(
                    cycles = self.pipeline.stats().cycle_count,
                    "cycle budget exhausted before halt"
                );
                return Ok(RunOutcome::BudgetExhausted);
            }

            self.pipeline.advance_cycle()?;
            on_cycle(&self.pipeline);
        }
    }

    /// Cycle budget, if any.
    pub const fn max_cycles(&self) -> Option<u64> {
        self.max_cycles
    }
}
