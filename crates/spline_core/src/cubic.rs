//! Natural/clamped cubic spline over sparse sample knots.

use crate::error::SplineError;

/// Boundary condition at one end of the spline.
///
/// The classic formulation lets the caller either pin the second derivative
/// to zero (a *natural* spline) or prescribe the first derivative at the
/// boundary (a *clamped* spline). Earlier formulations selected between the
/// two with a large-magnitude sentinel value; here the choice is an explicit
/// enum so a legitimate large slope can never be mistaken for "natural".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Boundary {
    /// Second derivative is zero at this end.
    Natural,
    /// First derivative is prescribed at this end.
    Clamped(f64),
}

/// Piecewise-cubic interpolant over sorted (x, y) sample knots.
///
/// Construction solves the tridiagonal system for the second-derivative
/// vector in O(N) time and O(N) extra space; evaluation locates the
/// bracketing interval by binary search and blends the cubic in O(log N).
/// Once constructed, the spline is immutable: [`value_at`](Self::value_at)
/// takes `&self` and is safe to call repeatedly and concurrently.
///
/// # Preconditions
///
/// The x-values must be strictly increasing. A *duplicated* abscissa is
/// rejected at construction as [`SplineError::DegenerateInterval`]; the
/// tridiagonal solve would otherwise divide by the zero-width interval and
/// poison the whole second-derivative vector with NaN. Ascending order
/// beyond that is assumed, not verified: the algorithm has no meaningful
/// answer for unsorted input. The curve pipeline sorts its knots before
/// handing them to this type.
///
/// # Example
///
/// ```
/// use spline_core::{Boundary, CubicSpline};
///
/// let xs = [0.0, 1.0, 2.0, 3.0];
/// let ys = [0.0, 1.0, 4.0, 9.0];
///
/// let natural = CubicSpline::natural(&xs, &ys).unwrap();
/// assert!((natural.value_at(2.0) - 4.0).abs() < 1e-12);
///
/// // Clamp the left end to slope 0, leave the right end natural
/// let clamped = CubicSpline::with_boundary(
///     &xs,
///     &ys,
///     Boundary::Clamped(0.0),
///     Boundary::Natural,
/// )
/// .unwrap();
/// assert!(clamped.value_at(0.5).is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct CubicSpline {
    /// Sample x-values, ascending
    xs: Vec<f64>,
    /// Sample y-values, parallel to `xs`
    ys: Vec<f64>,
    /// Second derivative at each sample knot
    y2: Vec<f64>,
}

impl CubicSpline {
    /// Construct a natural spline: second derivative zero at both ends.
    ///
    /// # Arguments
    ///
    /// * `xs` - Sample x-values, strictly increasing
    /// * `ys` - Corresponding y-values
    ///
    /// # Returns
    ///
    /// * `Ok(CubicSpline)` - Successfully constructed interpolant
    /// * `Err(SplineError::LengthMismatch)` - `xs` and `ys` differ in length
    /// * `Err(SplineError::InvalidSampleSet)` - Fewer than 2 sample points
    /// * `Err(SplineError::DegenerateInterval)` - Two adjacent x-values coincide
    pub fn natural(xs: &[f64], ys: &[f64]) -> Result<Self, SplineError> {
        Self::with_boundary(xs, ys, Boundary::Natural, Boundary::Natural)
    }

    /// Construct a spline with explicit boundary conditions at each end.
    ///
    /// The second-derivative vector is solved by the standard tridiagonal
    /// forward sweep and back substitution (Numerical Recipes `spline`),
    /// with the boundary rows chosen per [`Boundary`].
    ///
    /// # Arguments
    ///
    /// * `xs` - Sample x-values, strictly increasing
    /// * `ys` - Corresponding y-values
    /// * `lower` - Condition at `xs[0]`
    /// * `upper` - Condition at `xs[n-1]`
    pub fn with_boundary(
        xs: &[f64],
        ys: &[f64],
        lower: Boundary,
        upper: Boundary,
    ) -> Result<Self, SplineError> {
        if xs.len() != ys.len() {
            return Err(SplineError::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        let n = xs.len();
        if n < 2 {
            return Err(SplineError::InvalidSampleSet { got: n, need: 2 });
        }
        // Zero-width intervals would poison the solve with NaN; reject them
        // before the first division.
        for i in 1..n {
            if xs[i] == xs[i - 1] {
                return Err(SplineError::DegenerateInterval { x: xs[i] });
            }
        }

        let mut y2 = vec![0.0; n];
        let mut u = vec![0.0; n];

        match lower {
            Boundary::Natural => {
                y2[0] = 0.0;
                u[0] = 0.0;
            }
            Boundary::Clamped(yp1) => {
                y2[0] = -0.5;
                u[0] = (3.0 / (xs[1] - xs[0])) * ((ys[1] - ys[0]) / (xs[1] - xs[0]) - yp1);
            }
        }

        // Forward sweep of the tridiagonal elimination
        for i in 1..n - 1 {
            let sig = (xs[i] - xs[i - 1]) / (xs[i + 1] - xs[i - 1]);
            let p = sig * y2[i - 1] + 2.0;
            y2[i] = (sig - 1.0) / p;
            let mut ui = (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i])
                - (ys[i] - ys[i - 1]) / (xs[i] - xs[i - 1]);
            ui = (6.0 * ui / (xs[i + 1] - xs[i - 1]) - sig * u[i - 1]) / p;
            u[i] = ui;
        }

        let (qn, un) = match upper {
            Boundary::Natural => (0.0, 0.0),
            Boundary::Clamped(ypn) => {
                let h = xs[n - 1] - xs[n - 2];
                (0.5, (3.0 / h) * (ypn - (ys[n - 1] - ys[n - 2]) / h))
            }
        };
        y2[n - 1] = (un - qn * u[n - 2]) / (qn * y2[n - 2] + 1.0);

        // Back substitution finalises the second derivatives
        for k in (0..n - 1).rev() {
            y2[k] = y2[k] * y2[k + 1] + u[k];
        }

        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            y2,
        })
    }

    /// Second derivative at each sample knot.
    ///
    /// For natural boundary conditions the first and last entries are
    /// exactly `0.0`.
    #[inline]
    pub fn second_derivatives(&self) -> &[f64] {
        &self.y2
    }

    /// Number of sample knots.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Always `false`: construction rejects sample sets below 2 points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Evaluate the interpolant at `x`.
    ///
    /// Binary search locates the bracketing interval, then the value is the
    /// cubic blend of the interval endpoints and their second derivatives
    /// (Numerical Recipes `splint`). An `x` outside the sampled range
    /// extrapolates using the nearest boundary interval rather than failing.
    ///
    /// Construction rejects zero-width intervals, so evaluation is total.
    pub fn value_at(&self, x: f64) -> f64 {
        let mut klo = 0;
        let mut khi = self.xs.len() - 1;
        while khi - klo > 1 {
            let k = (khi + klo) >> 1;
            if self.xs[k] > x {
                khi = k;
            } else {
                klo = k;
            }
        }

        let h = self.xs[khi] - self.xs[klo];
        let a = (self.xs[khi] - x) / h;
        let b = (x - self.xs[klo]) / h;
        a * self.ys[klo]
            + b * self.ys[khi]
            + ((a * a * a - a) * self.y2[klo] + (b * b * b - b) * self.y2[khi]) * (h * h) / 6.0
    }

    /// Evaluate the dense series `x = 0, inc, 2·inc, …` below `x_max`.
    ///
    /// Produces `floor(x_max / inc)` evaluation points; the series always
    /// starts at zero regardless of where the sample knots begin, so the
    /// head of the series is boundary-interval extrapolation when the first
    /// knot sits above zero.
    ///
    /// # Arguments
    ///
    /// * `inc` - Spacing between evaluation points (must be > 0)
    /// * `x_max` - Exclusive upper bound of the series
    ///
    /// # Returns
    ///
    /// * `Ok((xd, z))` - Evaluation points and interpolated values, equal length
    /// * `Err(SplineError::InvalidIncrement)` - `inc` is zero, negative or NaN
    pub fn sample(&self, inc: f64, x_max: f64) -> Result<(Vec<f64>, Vec<f64>), SplineError> {
        if !(inc > 0.0) {
            return Err(SplineError::InvalidIncrement { inc });
        }

        let nx = (x_max / inc).floor() as usize;
        let mut xd = Vec::with_capacity(nx);
        let mut z = Vec::with_capacity(nx);
        for i in 0..nx {
            let x = i as f64 * inc;
            if x >= x_max {
                break;
            }
            xd.push(x);
            z.push(self.value_at(x));
        }
        Ok((xd, z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_natural_with_minimum_points() {
        let spline = CubicSpline::natural(&[0.0, 1.0], &[0.0, 2.0]).unwrap();
        assert_eq!(spline.len(), 2);
        assert!(!spline.is_empty());
    }

    #[test]
    fn test_too_few_points() {
        let result = CubicSpline::natural(&[1.0], &[2.0]);
        match result.unwrap_err() {
            SplineError::InvalidSampleSet { got, need } => {
                assert_eq!(got, 1);
                assert_eq!(need, 2);
            }
            other => panic!("Expected InvalidSampleSet, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_sample_set() {
        let result = CubicSpline::natural(&[], &[]);
        assert!(matches!(
            result.unwrap_err(),
            SplineError::InvalidSampleSet { got: 0, need: 2 }
        ));
    }

    #[test]
    fn test_mismatched_lengths() {
        let result = CubicSpline::natural(&[0.0, 1.0, 2.0], &[0.0, 1.0]);
        match result.unwrap_err() {
            SplineError::LengthMismatch { xs, ys } => {
                assert_eq!(xs, 3);
                assert_eq!(ys, 2);
            }
            other => panic!("Expected LengthMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_exact_at_knots() {
        let xs = [3.0, 6.0, 12.0, 24.0, 60.0];
        let ys = [1.0, 1.2, 1.5, 1.9, 2.4];
        let spline = CubicSpline::natural(&xs, &ys).unwrap();

        for (x, y) in xs.iter().zip(ys.iter()) {
            let got = spline.value_at(*x);
            assert!(
                (got - y).abs() <= 1e-9 * y.abs().max(1.0),
                "At x={}, expected y={}, got {}",
                x,
                y,
                got
            );
        }
    }

    #[test]
    fn test_natural_boundary_second_derivatives_exactly_zero() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = [0.0, 1.0, 4.0, 9.0, 16.0];
        let spline = CubicSpline::natural(&xs, &ys).unwrap();

        let y2 = spline.second_derivatives();
        assert_eq!(y2[0], 0.0);
        assert_eq!(y2[y2.len() - 1], 0.0);
    }

    #[test]
    fn test_interior_knot_preserves_endpoint_values() {
        let coarse = CubicSpline::natural(&[0.0, 2.0, 4.0], &[1.0, 3.0, 2.0]).unwrap();
        let fine = CubicSpline::natural(&[0.0, 1.0, 2.0, 4.0], &[1.0, 2.2, 3.0, 2.0]).unwrap();

        for x in [0.0, 4.0] {
            let a = coarse.value_at(x);
            let b = fine.value_at(x);
            assert!(
                (a - b).abs() < 1e-9,
                "Endpoint x={} moved: {} vs {}",
                x,
                a,
                b
            );
        }
    }

    #[test]
    fn test_duplicate_abscissa_rejected_at_construction() {
        let result = CubicSpline::natural(&[0.0, 1.0, 2.0, 2.0], &[0.0, 1.0, 4.0, 4.0]);
        match result.unwrap_err() {
            SplineError::DegenerateInterval { x } => assert_eq!(x, 2.0),
            other => panic!("Expected DegenerateInterval, got {:?}", other),
        }
    }

    #[test]
    fn test_interior_duplicate_never_yields_nan() {
        // An interior zero-width interval would put NaN into the tridiagonal
        // sweep and every evaluation below the duplicate; construction must
        // refuse it outright.
        let result = CubicSpline::natural(&[0.0, 2.0, 2.0, 5.0], &[0.0, 1.0, 1.5, 3.0]);
        assert!(matches!(
            result,
            Err(SplineError::DegenerateInterval { x }) if x == 2.0
        ));

        let clamped = CubicSpline::with_boundary(
            &[1.0, 1.0, 4.0],
            &[0.0, 0.5, 2.0],
            Boundary::Clamped(1.0),
            Boundary::Natural,
        );
        assert!(matches!(
            clamped,
            Err(SplineError::DegenerateInterval { x }) if x == 1.0
        ));
    }

    #[test]
    fn test_linear_data_stays_linear() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [0.0, 1.0, 2.0, 3.0];
        let spline = CubicSpline::natural(&xs, &ys).unwrap();

        for x in [0.5, 1.5, 2.5] {
            let y = spline.value_at(x);
            assert!((y - x).abs() < 1e-9, "At x={}, got {}", x, y);
        }
    }

    #[test]
    fn test_extrapolation_below_range() {
        // Two knots form a line; natural extrapolation continues it exactly.
        let spline = CubicSpline::natural(&[3.0, 6.0], &[1.0, 2.0]).unwrap();
        let y = spline.value_at(0.0);
        assert!((y - 0.0).abs() < 1e-12, "Expected 0.0, got {}", y);
    }

    #[test]
    fn test_extrapolation_above_range() {
        let spline = CubicSpline::natural(&[0.0, 1.0], &[0.0, 2.0]).unwrap();
        let y = spline.value_at(2.0);
        assert!((y - 4.0).abs() < 1e-12, "Expected 4.0, got {}", y);
    }

    #[test]
    fn test_clamped_boundary_slope() {
        // Flat data clamped to slope 1 at the left end: the finite-difference
        // derivative at the boundary matches the prescribed slope.
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [0.0, 0.0, 0.0, 0.0];
        let spline =
            CubicSpline::with_boundary(&xs, &ys, Boundary::Clamped(1.0), Boundary::Natural)
                .unwrap();

        let h = 1e-5;
        let slope = (spline.value_at(h) - spline.value_at(0.0)) / h;
        assert!(
            (slope - 1.0).abs() < 1e-3,
            "Boundary slope should be ~1.0, got {}",
            slope
        );
    }

    #[test]
    fn test_clamped_linear_slope_reproduces_line() {
        // Linear data with matching clamped slopes has zero curvature
        // everywhere, so midpoints are exact.
        let xs = [0.0, 1.0, 2.0];
        let ys = [0.0, 2.0, 4.0];
        let spline =
            CubicSpline::with_boundary(&xs, &ys, Boundary::Clamped(2.0), Boundary::Clamped(2.0))
                .unwrap();

        assert_relative_eq!(spline.value_at(0.5), 1.0, max_relative = 1e-9);
        assert_relative_eq!(spline.value_at(1.5), 3.0, max_relative = 1e-9);
    }

    #[test]
    fn test_sample_point_count_and_spacing() {
        let spline = CubicSpline::natural(&[3.0, 6.0, 12.0], &[1.0, 1.2, 1.5]).unwrap();
        let (xd, z) = spline.sample(1.0, 12.0).unwrap();

        assert_eq!(xd.len(), 12);
        assert_eq!(z.len(), 12);
        for (i, x) in xd.iter().enumerate() {
            assert!((x - i as f64).abs() < 1e-12);
        }
        assert!(z.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_sample_fractional_increment() {
        let spline = CubicSpline::natural(&[0.0, 1.0, 2.0], &[0.0, 1.0, 0.0]).unwrap();
        let (xd, _) = spline.sample(0.25, 2.0).unwrap();
        assert_eq!(xd.len(), 8);
        assert!((xd[7] - 1.75).abs() < 1e-12);
    }

    #[test]
    fn test_sample_rejects_bad_increment() {
        let spline = CubicSpline::natural(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
        for inc in [0.0, -1.0, f64::NAN] {
            assert!(matches!(
                spline.sample(inc, 10.0),
                Err(SplineError::InvalidIncrement { .. })
            ));
        }
    }

    #[test]
    fn test_sample_below_one_increment_is_empty() {
        let spline = CubicSpline::natural(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
        let (xd, z) = spline.sample(2.0, 1.0).unwrap();
        assert!(xd.is_empty());
        assert!(z.is_empty());
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        // Strictly increasing abscissae built from positive gaps
        fn knot_strategy() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
            (2usize..12).prop_flat_map(|n| {
                (
                    prop::collection::vec(0.1f64..10.0, n),
                    prop::collection::vec(-100.0f64..100.0, n),
                )
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(256))]

            #[test]
            fn prop_exact_at_knots((gaps, ys) in knot_strategy()) {
                let mut xs = Vec::with_capacity(gaps.len());
                let mut acc = 0.0;
                for g in &gaps {
                    acc += g;
                    xs.push(acc);
                }

                let spline = CubicSpline::natural(&xs, &ys).unwrap();
                for (x, y) in xs.iter().zip(ys.iter()) {
                    let got = spline.value_at(*x);
                    let tol = 1e-9 * y.abs().max(1.0);
                    prop_assert!(
                        (got - y).abs() <= tol,
                        "at x={} expected {} got {}", x, y, got
                    );
                }
            }

            #[test]
            fn prop_natural_ends_have_zero_curvature((gaps, ys) in knot_strategy()) {
                let mut xs = Vec::with_capacity(gaps.len());
                let mut acc = 0.0;
                for g in &gaps {
                    acc += g;
                    xs.push(acc);
                }

                let spline = CubicSpline::natural(&xs, &ys).unwrap();
                let y2 = spline.second_derivatives();
                prop_assert_eq!(y2[0], 0.0);
                prop_assert_eq!(y2[y2.len() - 1], 0.0);
            }
        }
    }
}
