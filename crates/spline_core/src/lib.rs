//! Cubic spline engine for sparse-to-dense curve construction.
//!
//! This crate provides the numerical core used by the curve pipeline:
//! a piecewise-cubic interpolant built from a sparse set of (x, y) sample
//! knots, with either natural or clamped boundary conditions.
//!
//! ## Core Type
//!
//! [`CubicSpline`] solves the classic tridiagonal system for the
//! second-derivative vector at construction (O(N)), then evaluates the
//! interpolant at arbitrary points via binary search (O(log N)).
//!
//! ## Boundary Conditions
//!
//! [`Boundary`] selects the condition at each end independently:
//! - `Natural`: second derivative pinned to zero
//! - `Clamped(slope)`: prescribed first derivative
//!
//! ## Example
//!
//! ```
//! use spline_core::CubicSpline;
//!
//! let xs = [3.0, 6.0, 12.0];
//! let ys = [1.0, 1.2, 1.5];
//!
//! let spline = CubicSpline::natural(&xs, &ys).unwrap();
//!
//! // Exact at the knots
//! let y = spline.value_at(6.0);
//! assert!((y - 1.2).abs() < 1e-12);
//!
//! // Dense series over [0, 12) at unit spacing
//! let (xd, z) = spline.sample(1.0, 12.0).unwrap();
//! assert_eq!(xd.len(), 12);
//! assert_eq!(z.len(), 12);
//! ```

mod cubic;
mod error;

pub use cubic::{Boundary, CubicSpline};
pub use error::SplineError;
