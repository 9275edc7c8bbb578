//! features::second_order — causal difference features and the tension
//! combinator.
//!
//! Purpose
//! -------
//! Derive second-order diagnostics from the primary feature estimates:
//! causal first and second differences (velocity, curvature) and the
//! tension combinator `α(1 - e_hat) - β·l_hat` that trades normalized
//! entropy against normalized divergence.
//!
//! Key behaviors
//! -------------
//! - [`velocity`] returns `x[i] - x[i-1]` with NaN at position 0.
//! - [`curvature`] is the difference of the velocity, NaN at positions 0
//!   and 1.
//! - [`tension`] combines two caller-aligned series position-wise; a length
//!   mismatch is a configuration error.
//!
//! Invariants & assumptions
//! ------------------------
//! - All three transforms preserve length and index; differencing never
//!   looks ahead.
//! - NaN operands propagate NaN at that position only.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the leading-NaN pattern of both differences, the
//!   arithmetic of tension, NaN propagation, and the mismatch error.

use crate::features::errors::{FeatureError, FeatureResult};
use crate::series::TimeSeries;
use ndarray::Array1;

/// Causal first difference: `x[i] - x[i-1]`, NaN at position 0.
pub fn velocity(series: &TimeSeries) -> FeatureResult<TimeSeries> {
    let values = series.values();
    let n = values.len();
    let mut out = Array1::from_elem(n, f64::NAN);
    for i in 1..n {
        out[i] = values[i] - values[i - 1];
    }
    series.with_values(out)
}

/// Causal second difference: velocity of the velocity, NaN at positions 0
/// and 1.
pub fn curvature(series: &TimeSeries) -> FeatureResult<TimeSeries> {
    velocity(&velocity(series)?)
}

/// Tension between normalized entropy and divergence features:
/// `alpha·(1 - e_hat) - beta·l_hat`, position-wise.
///
/// Parameters
/// ----------
/// - `e_hat`, `l_hat`: caller-aligned normalized feature series of equal
///   length (align with [`TimeSeries::inner_join`] first if needed).
/// - `alpha`, `beta`: component weights.
///
/// Returns
/// -------
/// `FeatureResult<TimeSeries>` on `e_hat`'s index;
/// `Err(FeatureError::LengthMismatch)` when the inputs differ in length.
pub fn tension(
    e_hat: &TimeSeries, l_hat: &TimeSeries, alpha: f64, beta: f64,
) -> FeatureResult<TimeSeries> {
    if e_hat.len() != l_hat.len() {
        return Err(FeatureError::LengthMismatch { left: e_hat.len(), right: l_hat.len() });
    }
    let out = Array1::from_iter(
        e_hat
            .values()
            .iter()
            .zip(l_hat.values().iter())
            .map(|(&e, &l)| alpha * (1.0 - e) - beta * l),
    );
    e_hat.with_values(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The leading-NaN pattern and arithmetic of velocity and curvature.
    // - Tension arithmetic, NaN propagation, and the length-mismatch error.
    //
    // They intentionally DO NOT cover:
    // - Alignment of differently indexed inputs; callers join first.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the causal first difference and its single leading NaN.
    //
    // Given
    // -----
    // - Series (1, 4, 9, 16).
    //
    // Expect
    // ------
    // - Velocity (NaN, 3, 5, 7).
    fn velocity_first_difference_with_leading_nan() {
        // Arrange
        let series = TimeSeries::from_values(array![1.0, 4.0, 9.0, 16.0]).unwrap();

        // Act
        let v = velocity(&series).unwrap();

        // Assert
        assert!(v.values()[0].is_nan());
        assert_eq!(v.values()[1], 3.0);
        assert_eq!(v.values()[2], 5.0);
        assert_eq!(v.values()[3], 7.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify the causal second difference and its two leading NaNs.
    //
    // Given
    // -----
    // - Series (1, 4, 9, 16), whose second difference is constant 2.
    //
    // Expect
    // ------
    // - Curvature (NaN, NaN, 2, 2).
    fn curvature_second_difference_with_two_leading_nans() {
        // Arrange
        let series = TimeSeries::from_values(array![1.0, 4.0, 9.0, 16.0]).unwrap();

        // Act
        let c = curvature(&series).unwrap();

        // Assert
        assert!(c.values()[0].is_nan());
        assert!(c.values()[1].is_nan());
        assert_eq!(c.values()[2], 2.0);
        assert_eq!(c.values()[3], 2.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify the tension arithmetic and NaN propagation position-wise.
    //
    // Given
    // -----
    // - e_hat (0.2, NaN), l_hat (0.5, 0.5), α = 0.6, β = 0.4.
    //
    // Expect
    // ------
    // - Tension (0.6·0.8 - 0.4·0.5, NaN) = (0.28, NaN).
    fn tension_combines_weights_and_propagates_nan() {
        // Arrange
        let e_hat = TimeSeries::from_values(array![0.2, f64::NAN]).unwrap();
        let l_hat = TimeSeries::from_values(array![0.5, 0.5]).unwrap();

        // Act
        let t = tension(&e_hat, &l_hat, 0.6, 0.4).unwrap();

        // Assert
        assert!((t.values()[0] - 0.28).abs() < 1e-12);
        assert!(t.values()[1].is_nan());
    }

    #[test]
    // Purpose
    // -------
    // Verify that misaligned inputs are a configuration error.
    //
    // Given
    // -----
    // - Series of lengths 2 and 3.
    //
    // Expect
    // ------
    // - `Err(FeatureError::LengthMismatch { left: 2, right: 3 })`.
    fn tension_length_mismatch_is_error() {
        // Arrange
        let e_hat = TimeSeries::from_values(array![0.1, 0.2]).unwrap();
        let l_hat = TimeSeries::from_values(array![0.1, 0.2, 0.3]).unwrap();

        // Act
        let result = tension(&e_hat, &l_hat, 0.6, 0.4);

        // Assert
        assert!(matches!(result, Err(FeatureError::LengthMismatch { left: 2, right: 3 })));
    }
}
