//! features::scaling — causal normalization of raw feature estimates.
//!
//! Purpose
//! -------
//! Map unbounded feature estimates (entropy, FTLE) into the [0, 1] range the
//! tradability scorer expects, without ever looking ahead: trailing min-max
//! scaling for online use, and a minute-of-day percentile model fitted
//! offline on history and applied causally thereafter.
//!
//! Key behaviors
//! -------------
//! - [`minmax_causal`] scales each position against the trailing rolling
//!   minimum/maximum with a minimum window of 1, so early positions use a
//!   partial window rather than going invalid; an epsilon in the denominator
//!   keeps constant windows at 0 instead of dividing by zero.
//! - [`TodPercentileModel::fit`] groups historical observations by
//!   minute-of-day (0..=1439, UTC clock) and stores the sorted values per
//!   bucket.
//! - [`TodPercentileModel::transform`] maps each observation to its
//!   insertion-rank fraction within its bucket, NaN when the bucket is
//!   absent or empty.
//!
//! Invariants & assumptions
//! ------------------------
//! - Outputs lie in [0, 1] or are NaN; NaN inputs stay NaN.
//! - Both transforms are causal: position `i` depends only on positions
//!   ≤ `i` (the percentile model's history is fitted on a disjoint, earlier
//!   sample by the calling collaborator).
//!
//! Conventions
//! -----------
//! - Zero-range windows are a degenerate *data* condition handled by the
//!   epsilon, not an error; only `win == 0` is a configuration error.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the [0, 1] bound, the constant-window-to-zero rule,
//!   partial-window behavior at the head, NaN passthrough, the percentile
//!   rank arithmetic, and empty-bucket handling.

use crate::features::errors::FeatureResult;
use crate::features::validation::validate_window;
use crate::series::{TimeSeries, MINUTES_PER_DAY};
use ndarray::Array1;

/// Causal min-max scaling over a trailing window.
///
/// Parameters
/// ----------
/// - `x`: input series; gaps are `NAN`.
/// - `win`: trailing window for the min/max; must be positive. Positions
///   before a full window scale against the partial window seen so far
///   (minimum window of 1).
/// - `eps`: small constant added to the denominator so constant windows map
///   to 0 instead of dividing by zero.
///
/// Returns
/// -------
/// `FeatureResult<TimeSeries>`
///   - `(x - min) / (max - min + eps)` clipped to [0, 1], same length and
///     index as the input; NaN where the input is NaN. Gap values inside
///     the window are ignored for the min/max.
///   - `Err(FeatureError::ZeroWindow)` when `win == 0`.
pub fn minmax_causal(x: &TimeSeries, win: usize, eps: f64) -> FeatureResult<TimeSeries> {
    validate_window(win, "win")?;

    let values = x.values();
    let n = values.len();
    let mut out = Array1::from_elem(n, f64::NAN);

    for i in 0..n {
        let value = values[i];
        if value.is_nan() {
            continue;
        }
        let start = (i + 1).saturating_sub(win);
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &w in values.slice(ndarray::s![start..=i]).iter() {
            if w.is_nan() {
                continue;
            }
            lo = lo.min(w);
            hi = hi.max(w);
        }
        // The window always holds at least the current (non-NaN) value.
        out[i] = ((value - lo) / (hi - lo + eps)).clamp(0.0, 1.0);
    }

    x.with_values(out)
}

/// TodPercentileModel — minute-of-day percentile references, fitted offline.
///
/// Purpose
/// -------
/// Normalize an intraday feature against its own historical distribution at
/// the same minute of day, so regular intraday seasonality (open/close
/// activity bursts) does not masquerade as a regime change.
///
/// Fields
/// ------
/// - One sorted bucket of historical values per minute of day (0..=1439).
///
/// Invariants
/// ----------
/// - Buckets hold only finite values and stay sorted after `fit`.
///
/// Notes
/// -----
/// - Fit on history, then apply to live data; the transform itself never
///   updates the buckets, keeping the no-look-ahead contract with the
///   caller.
#[derive(Debug, Clone)]
pub struct TodPercentileModel {
    buckets: Vec<Vec<f64>>,
}

impl TodPercentileModel {
    /// Fit minute-of-day percentile references from historical data.
    ///
    /// Groups every valid (non-NaN) observation of `x` by the UTC
    /// minute-of-day of its timestamp and sorts each bucket. Observations
    /// whose timestamps cannot be bucketed are skipped.
    pub fn fit(x: &TimeSeries) -> Self {
        let mut buckets = vec![Vec::new(); MINUTES_PER_DAY];
        for i in 0..x.len() {
            let value = x.values()[i];
            if value.is_nan() {
                continue;
            }
            if let Some(minute) = x.minute_of_day(i) {
                buckets[minute].push(value);
            }
        }
        for bucket in &mut buckets {
            bucket.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        }
        TodPercentileModel { buckets }
    }

    /// Number of stored reference values for a minute-of-day bucket.
    pub fn bucket_len(&self, minute: usize) -> usize {
        self.buckets.get(minute).map_or(0, Vec::len)
    }

    /// Map observations to [0, 1] by minute-of-day percentile.
    ///
    /// For each position: look up the bucket of its minute-of-day; output
    /// the fraction of stored values less than or equal to the observation
    /// (insertion rank over bucket size), clipped to [0, 1]. NaN when the
    /// observation is NaN, the timestamp cannot be bucketed, or the bucket
    /// is empty.
    pub fn transform(&self, x: &TimeSeries) -> FeatureResult<TimeSeries> {
        let n = x.len();
        let mut out = Array1::from_elem(n, f64::NAN);

        for i in 0..n {
            let value = x.values()[i];
            if value.is_nan() {
                continue;
            }
            let Some(minute) = x.minute_of_day(i) else {
                continue;
            };
            let bucket = &self.buckets[minute];
            if bucket.is_empty() {
                continue;
            }
            let rank = bucket.partition_point(|&v| v <= value);
            out[i] = (rank as f64 / bucket.len() as f64).clamp(0.0, 1.0);
        }

        x.with_values(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The [0, 1] bound of minmax_causal and the constant-window-to-zero
    //   rule.
    // - Partial-window behavior at the head and NaN passthrough.
    // - Zero-window configuration errors.
    // - Percentile rank arithmetic, empty buckets, and fit/transform over
    //   multiple days sharing a minute bucket.
    //
    // They intentionally DO NOT cover:
    // - Leakage properties of the full pipeline; the integration test checks
    //   that appending data never changes earlier outputs.
    // -------------------------------------------------------------------------

    const DAY: i64 = 86_400;

    #[test]
    // Purpose
    // -------
    // Verify minmax output stays in [0, 1] and that the running extremes of
    // the trailing window map to 0 and (nearly) 1.
    //
    // Given
    // -----
    // - Series (3, 1, 4, 1, 5, 9, 2, 6) with win = 3, eps = 1e-9.
    //
    // Expect
    // ------
    // - All outputs within [0, 1]; window minima map to 0; window maxima map
    //   to within eps-rounding of 1.
    fn minmax_causal_output_bounded_and_extremes_mapped() {
        // Arrange
        let x = TimeSeries::from_values(array![3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0]).unwrap();

        // Act
        let scaled = minmax_causal(&x, 3, 1e-9).unwrap();

        // Assert
        for &v in scaled.values().iter() {
            assert!((0.0..=1.0).contains(&v), "output {v} out of [0,1]");
        }
        // Position 1 (value 1) is the trailing minimum of {3, 1}.
        assert_eq!(scaled.values()[1], 0.0);
        // Position 5 (value 9) is the trailing maximum of {1, 5, 9}.
        assert!(scaled.values()[5] > 0.999_999);
    }

    #[test]
    // Purpose
    // -------
    // Verify that a constant window yields 0, not NaN: the epsilon absorbs
    // the zero range.
    //
    // Given
    // -----
    // - A constant series of length 5, win = 3.
    //
    // Expect
    // ------
    // - Every output is exactly 0.0.
    fn minmax_causal_constant_window_yields_zero() {
        // Arrange
        let x = TimeSeries::from_values(array![7.0, 7.0, 7.0, 7.0, 7.0]).unwrap();

        // Act
        let scaled = minmax_causal(&x, 3, 1e-9).unwrap();

        // Assert
        for &v in scaled.values().iter() {
            assert_eq!(v, 0.0);
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the minimum-window-of-1 rule: the first position scales against
    // itself (output 0) instead of going invalid, and NaN inputs stay NaN
    // without poisoning later windows.
    //
    // Given
    // -----
    // - Series (2, NaN, 4) with win = 2.
    //
    // Expect
    // ------
    // - Output (0, NaN, finite): position 2's window {NaN, 4} ignores the
    //   gap.
    fn minmax_causal_partial_window_and_nan_passthrough() {
        // Arrange
        let x = TimeSeries::from_values(array![2.0, f64::NAN, 4.0]).unwrap();

        // Act
        let scaled = minmax_causal(&x, 2, 1e-9).unwrap();

        // Assert
        assert_eq!(scaled.values()[0], 0.0);
        assert!(scaled.values()[1].is_nan());
        assert_eq!(scaled.values()[2], 0.0, "window {{NaN, 4}} reduces to the constant 4");
    }

    #[test]
    // Purpose
    // -------
    // Verify that win = 0 is a configuration error.
    //
    // Given
    // -----
    // - Any series with win = 0.
    //
    // Expect
    // ------
    // - `Err(FeatureError::ZeroWindow { name: "win" })`.
    fn minmax_causal_zero_window_is_error() {
        // Arrange
        let x = TimeSeries::from_values(array![1.0, 2.0]).unwrap();

        // Act
        let result = minmax_causal(&x, 0, 1e-9);

        // Assert
        assert!(matches!(
            result,
            Err(crate::features::errors::FeatureError::ZeroWindow { name: "win" })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Verify percentile fit/transform across days that share minute buckets.
    //
    // Given
    // -----
    // - Three days of a single daily observation at 00:10 UTC with values
    //   1, 2, 3 fitted as history, then a transform of value 2 at the same
    //   minute.
    //
    // Expect
    // ------
    // - Bucket 10 holds 3 values; the transform of 2.0 is rank 2 / 3.
    fn tod_percentile_rank_fraction_matches_bucket() {
        // Arrange
        let ts_at_minute_10: Vec<i64> = (0..3).map(|d| d * DAY + 600).collect();
        let history =
            TimeSeries::new(ts_at_minute_10, array![1.0, 2.0, 3.0]).unwrap();
        let model = TodPercentileModel::fit(&history);
        let live = TimeSeries::new(vec![3 * DAY + 600], array![2.0]).unwrap();

        // Act
        let mapped = model.transform(&live).unwrap();

        // Assert
        assert_eq!(model.bucket_len(10), 3);
        let got = mapped.values()[0];
        assert!((got - 2.0 / 3.0).abs() < 1e-12, "expected 2/3, got {got}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that observations landing in an empty minute bucket map to NaN
    // rather than raising or extrapolating.
    //
    // Given
    // -----
    // - History only at minute 10; a live observation at minute 11.
    //
    // Expect
    // ------
    // - The transform output is NaN.
    fn tod_percentile_empty_bucket_is_nan() {
        // Arrange
        let history = TimeSeries::new(vec![600], array![1.0]).unwrap();
        let model = TodPercentileModel::fit(&history);
        let live = TimeSeries::new(vec![660], array![1.0]).unwrap();

        // Act
        let mapped = model.transform(&live).unwrap();

        // Assert
        assert!(mapped.values()[0].is_nan());
    }
}
