//! Error types for spline construction and evaluation.

use thiserror::Error;

/// Spline operation errors.
///
/// Provides structured error handling for spline construction and
/// evaluation with descriptive context for each failure mode.
///
/// # Variants
///
/// - `InvalidSampleSet`: Too few sample points for construction
/// - `LengthMismatch`: X and Y arrays differ in length
/// - `DegenerateInterval`: Construction saw an interval of zero width
/// - `InvalidIncrement`: Non-positive sampling increment
///
/// # Examples
///
/// ```
/// use spline_core::SplineError;
///
/// let err = SplineError::InvalidSampleSet { got: 1, need: 2 };
/// assert_eq!(format!("{}", err), "Invalid sample set: got 1 points, need at least 2");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SplineError {
    /// Fewer sample points than the interpolant requires.
    #[error("Invalid sample set: got {got} points, need at least {need}")]
    InvalidSampleSet {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// X and Y sample arrays have different lengths.
    #[error("Sample length mismatch: {xs} x-values vs {ys} y-values")]
    LengthMismatch {
        /// Number of x-values provided
        xs: usize,
        /// Number of y-values provided
        ys: usize,
    },

    /// Two adjacent sample abscissae coincide, leaving an interval of zero
    /// width over which the interpolant is undefined. Raised at
    /// construction, before the zero gap can poison the solve.
    #[error("Degenerate interval: duplicate abscissa at x = {x}")]
    DegenerateInterval {
        /// The duplicated abscissa
        x: f64,
    },

    /// Sampling increment must be strictly positive.
    #[error("Invalid increment: {inc} (must be > 0)")]
    InvalidIncrement {
        /// The offending increment
        inc: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_sample_set_display() {
        let err = SplineError::InvalidSampleSet { got: 0, need: 2 };
        assert_eq!(
            format!("{}", err),
            "Invalid sample set: got 0 points, need at least 2"
        );
    }

    #[test]
    fn test_length_mismatch_display() {
        let err = SplineError::LengthMismatch { xs: 3, ys: 2 };
        assert_eq!(
            format!("{}", err),
            "Sample length mismatch: 3 x-values vs 2 y-values"
        );
    }

    #[test]
    fn test_degenerate_interval_display() {
        let err = SplineError::DegenerateInterval { x: 6.0 };
        assert_eq!(format!("{}", err), "Degenerate interval: duplicate abscissa at x = 6");
    }

    #[test]
    fn test_invalid_increment_display() {
        let err = SplineError::InvalidIncrement { inc: 0.0 };
        assert_eq!(format!("{}", err), "Invalid increment: 0 (must be > 0)");
    }
}
