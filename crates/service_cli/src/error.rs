//! CLI error type.

use curve_pipeline::PipelineError;
use thiserror::Error;

/// Errors surfaced by the `curvecast` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Configuration parse error: {0}")]
    Parse(String),

    /// Pipeline construction failed
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Configuration resolved to an empty active set
    #[error("Nothing to run: {0}")]
    EmptyConfig(String),
}

/// Convenience result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
