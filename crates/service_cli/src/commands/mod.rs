//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod run;

use crate::error::{CliError, Result};
use curve_pipeline::PipelineConfig;

/// Load a pipeline configuration from a TOML file.
pub fn load_config(path: &str) -> Result<PipelineConfig> {
    let raw = std::fs::read_to_string(path)?;
    toml::from_str(&raw).map_err(|e| CliError::Parse(e.to_string()))
}
