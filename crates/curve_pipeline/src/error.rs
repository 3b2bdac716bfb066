//! Pipeline error types.

use spline_core::SplineError;
use thiserror::Error;

/// Errors raised while building or driving the pipeline.
///
/// Only structural configuration defects are fatal to construction; a curve
/// whose knots all fail to resolve, or a spline naming a missing curve, is
/// logged and excluded rather than raised (the pipeline favours availability
/// over completeness). Runtime per-update failures are scoped to the update
/// being processed and never surface through this type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// Two curve definitions share a name.
    #[error("Duplicate curve definition: {name}")]
    DuplicateCurve {
        /// The duplicated curve name
        name: String,
    },

    /// Two spline definitions share a name.
    #[error("Duplicate spline definition: {name}")]
    DuplicateSpline {
        /// The duplicated spline name
        name: String,
    },

    /// Spline-engine failure during recompute.
    #[error("Spline computation failed: {0}")]
    Spline(#[from] SplineError),
}
