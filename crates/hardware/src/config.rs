//! Configuration system for the pipeline simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Baseline pipeline shape (width, forwarding, branch policy).
//! 2. **Structures:** Hierarchical config for general run options and the pipeline.
//! 3. **Enums:** Branch predictor policy, selectable by name or numeric selector.
//!
//! Configuration is read once, either from JSON (`Config::from_json_file`) or
//! built from `Config::default()` plus command-line overrides, and is
//! immutable once a [`Pipeline`](crate::core::pipeline::Pipeline) is constructed.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
///
/// These values define the baseline pipeline when not explicitly
/// overridden in a configuration file or on the command line.
mod defaults {
    /// Default pipeline width (1 instruction per stage per cycle).
    pub const PIPELINE_WIDTH: usize = 1;

    /// Execute-stage forwarding is off by default.
    pub const EXE_FORWARDING: bool = false;

    /// Memory-stage forwarding is off by default.
    pub const MEM_FORWARDING: bool = false;
}

/// Branch prediction policy consulted by the fetch stage.
///
/// The numeric selectors (`0`, `1`, `2`) match the command-line
/// `--bpred-policy` flag; see [`BranchPolicy::try_from`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum BranchPolicy {
    /// No predictor: conditional branches never stall fetch and no oracle is built.
    #[default]
    None,
    /// Static predictor that always predicts taken.
    AlwaysTaken,
    /// Global-history predictor (history XOR PC into 2-bit counters).
    #[serde(alias = "Gshare")]
    GShare,
}

impl TryFrom<u8> for BranchPolicy {
    type Error = ConfigError;

    fn try_from(selector: u8) -> Result<Self, Self::Error> {
        match selector {
            0 => Ok(Self::None),
            1 => Ok(Self::AlwaysTaken),
            2 => Ok(Self::GShare),
            other => Err(ConfigError::UnknownBranchPolicy(other)),
        }
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// General run options.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Pipeline shape.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// Missing sections and fields take their defaults. The result is not
    /// validated; [`Pipeline::new`](crate::core::pipeline::Pipeline::new) validates it.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Checks construction-time contracts.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroWidth`] if the pipeline has no lanes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pipeline.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Print the latch contents after every cycle.
    #[serde(default)]
    pub trace_pipeline: bool,

    /// Stop after this many cycles even if the halting instruction has not retired.
    #[serde(default)]
    pub max_cycles: Option<u64>,
}

/// Pipeline shape and hazard-resolution options.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Lanes per stage (W).
    #[serde(default = "PipelineConfig::default_width")]
    pub width: usize,

    /// Execute-stage result forwarding.
    #[serde(default = "PipelineConfig::default_exe_forwarding")]
    pub exe_forwarding: bool,

    /// Memory-stage result forwarding.
    #[serde(default = "PipelineConfig::default_mem_forwarding")]
    pub mem_forwarding: bool,

    /// Branch predictor consulted for conditional branches at fetch.
    #[serde(default)]
    pub branch_predictor: BranchPolicy,
}

impl PipelineConfig {
    fn default_width() -> usize {
        defaults::PIPELINE_WIDTH
    }

    fn default_exe_forwarding() -> bool {
        defaults::EXE_FORWARDING
    }

    fn default_mem_forwarding() -> bool {
        defaults::MEM_FORWARDING
    }

    /// Whether hazards may be resolved by forwarding.
    ///
    /// Only true when both the execute-stage and the memory-stage paths are
    /// enabled; a single path on its own behaves exactly like no forwarding.
    pub const fn forwarding_enabled(&self) -> bool {
        self.exe_forwarding && self.mem_forwarding
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            width: defaults::PIPELINE_WIDTH,
            exe_forwarding: defaults::EXE_FORWARDING,
            mem_forwarding: defaults::MEM_FORWARDING,
            branch_predictor: BranchPolicy::default(),
        }
    }
}
