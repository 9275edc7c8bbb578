//! series — validated time-indexed container for causal feature pipelines.
//!
//! Purpose
//! -------
//! Provide the common data carrier for every estimator and transform in this
//! crate: a [`TimeSeries`] pairing a strictly increasing `i64` timestamp axis
//! (epoch seconds, UTC) with an `Array1<f64>` of values in which `f64::NAN`
//! is the explicit missing-value marker.
//!
//! Key behaviors
//! -------------
//! - Construct validated series via [`TimeSeries::new`], rejecting length
//!   mismatches and non-monotone timestamps with typed errors rather than
//!   panicking downstream.
//! - Offer [`TimeSeries::from_values`] for purely positional use (synthetic
//!   `0..n` index), which is what the rolling estimators and most tests need.
//! - Align two series on their common timestamps with
//!   [`TimeSeries::inner_join`], the primitive the tradability scorer builds
//!   on.
//! - Derive the minute-of-day bucket (0..=1439) of any position via
//!   [`TimeSeries::minute_of_day`] for the time-of-day percentile normalizer.
//!
//! Invariants & assumptions
//! ------------------------
//! - `index.len() == values.len()` and `index` is strictly increasing.
//! - Values may be `NAN` (gap marker) but never ±∞; infinities indicate a
//!   canonicalization bug upstream and are rejected at construction.
//! - All transforms in this crate are causal: output at position `i` depends
//!   only on positions ≤ `i`. The container itself enforces ordering only;
//!   causality is a property of the consuming algorithms.
//!
//! Conventions
//! -----------
//! - Timestamps are epoch seconds in UTC. Callers feeding minute bars use the
//!   bar-close timestamp; the synthetic index from `from_values` counts 0..n.
//! - Rolling transforms return a series with the *same* index and length as
//!   their input, with `NAN` at positions lacking a full window.
//!
//! Downstream usage
//! ----------------
//! - The feature estimators in [`crate::features`] consume `&TimeSeries` (or
//!   bare `&[f64]` for point estimators) and return new series.
//! - The scorer in [`crate::scoring`] inner-joins two feature series and the
//!   classifier consumes the resulting score series sequentially.
//!
//! Testing notes
//! -------------
//! - Unit tests cover constructor validation (mismatched lengths, ties,
//!   decreasing timestamps, infinities), inner-join alignment on partially
//!   overlapping indexes, and minute-of-day derivation for known timestamps.

use chrono::{TimeZone, Timelike, Utc};
use ndarray::Array1;

use crate::features::errors::{FeatureError, FeatureResult};

/// Minutes per day; minute-of-day buckets range over `0..MINUTES_PER_DAY`.
pub const MINUTES_PER_DAY: usize = 1440;

/// TimeSeries — strictly ordered (timestamp, value) pairs with NaN gaps.
///
/// Purpose
/// -------
/// Carry a causally ordered numeric series between the canonicalization
/// collaborator and the estimators in this crate. The value axis uses
/// `f64::NAN` as the explicit missing-value marker so rolling pipelines can
/// degrade gracefully during warm-up and across data gaps.
///
/// Invariants
/// ----------
/// - `index` is strictly increasing and has the same length as `values`.
/// - Every value is either finite or `NAN`; ±∞ never enters a constructed
///   series.
///
/// Notes
/// -----
/// - Cloning copies the underlying buffers; estimators borrow instead.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    index: Vec<i64>,
    values: Array1<f64>,
}

impl TimeSeries {
    /// Construct a validated series from a timestamp axis and values.
    ///
    /// Parameters
    /// ----------
    /// - `index`: epoch-second timestamps, strictly increasing.
    /// - `values`: observations aligned to `index`; `NAN` marks gaps.
    ///
    /// Returns
    /// -------
    /// `FeatureResult<TimeSeries>`
    ///   - `Ok` when lengths match, the index is strictly increasing, and no
    ///     value is ±∞.
    ///   - `Err(FeatureError::IndexMismatch)` on a length mismatch.
    ///   - `Err(FeatureError::NonMonotoneIndex)` on a tie or decrease.
    ///   - `Err(FeatureError::InfiniteValue)` on ±∞ in `values`.
    pub fn new(index: Vec<i64>, values: Array1<f64>) -> FeatureResult<Self> {
        if index.len() != values.len() {
            return Err(FeatureError::IndexMismatch {
                left: index.len(),
                right: values.len(),
            });
        }
        for pair in index.windows(2) {
            if pair[1] <= pair[0] {
                return Err(FeatureError::NonMonotoneIndex { prev: pair[0], next: pair[1] });
            }
        }
        for (position, &value) in values.iter().enumerate() {
            if value.is_infinite() {
                return Err(FeatureError::InfiniteValue { position, value });
            }
        }
        Ok(TimeSeries { index, values })
    }

    /// Construct a series with a synthetic `0..n` index.
    ///
    /// Used by positional pipelines and tests that have no timestamp axis.
    /// Never fails on ordering (the synthetic index is increasing by
    /// construction) but still rejects ±∞ values.
    pub fn from_values(values: Array1<f64>) -> FeatureResult<Self> {
        let index = (0..values.len() as i64).collect();
        Self::new(index, values)
    }

    /// Number of positions in the series.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the series holds no positions.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrow the timestamp axis.
    pub fn index(&self) -> &[i64] {
        &self.index
    }

    /// Borrow the value axis.
    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    /// Build a new series carrying `values` on this series' index.
    ///
    /// The shared index is cloned; `values` must match its length. This is
    /// the constructor rolling transforms use to keep output aligned with
    /// input.
    pub fn with_values(&self, values: Array1<f64>) -> FeatureResult<Self> {
        Self::new(self.index.clone(), values)
    }

    /// Minute-of-day bucket (0..=1439) of the timestamp at `position`.
    ///
    /// Returns `None` when `position` is out of range or the timestamp does
    /// not map to a representable UTC datetime.
    pub fn minute_of_day(&self, position: usize) -> Option<usize> {
        let ts = *self.index.get(position)?;
        let dt = Utc.timestamp_opt(ts, 0).single()?;
        Some((dt.hour() * 60 + dt.minute()) as usize)
    }

    /// Inner-join two series on their common timestamps.
    ///
    /// Parameters
    /// ----------
    /// - `other`: series to align against.
    ///
    /// Returns
    /// -------
    /// `(index, left_values, right_values)` restricted to timestamps present
    /// in both series, in increasing order. Positions absent from either side
    /// are dropped; `NAN` values survive the join (a gap is still a shared
    /// position).
    ///
    /// Notes
    /// -----
    /// - Linear two-pointer merge over the already sorted indexes; O(n + m)
    ///   with one allocation per output axis.
    pub fn inner_join(&self, other: &TimeSeries) -> (Vec<i64>, Vec<f64>, Vec<f64>) {
        let mut index = Vec::new();
        let mut left = Vec::new();
        let mut right = Vec::new();

        let (mut i, mut j) = (0usize, 0usize);
        while i < self.len() && j < other.len() {
            match self.index[i].cmp(&other.index[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    index.push(self.index[i]);
                    left.push(self.values[i]);
                    right.push(other.values[j]);
                    i += 1;
                    j += 1;
                }
            }
        }
        (index, left, right)
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
    // - Constructor validation: length mismatch, ties, decreasing timestamps,
    //   and ±∞ rejection.
    // - Inner-join alignment on partially overlapping indexes.
    // - Minute-of-day derivation for known UTC timestamps.
    //
    // They intentionally DO NOT cover:
    // - Causality of the transforms consuming TimeSeries; those properties
    //   are asserted in the feature modules and the integration test.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that a well-formed (index, values) pair constructs and exposes
    // its axes unchanged.
    //
    // Given
    // -----
    // - Three increasing timestamps and three finite values.
    //
    // Expect
    // ------
    // - `TimeSeries::new` returns Ok with matching len/index/values.
    fn timeseries_new_valid_input_succeeds() {
        // Arrange
        let index = vec![10_i64, 20, 30];
        let values = array![1.0, f64::NAN, 3.0];

        // Act
        let series = TimeSeries::new(index.clone(), values).expect("valid series");

        // Assert
        assert_eq!(series.len(), 3);
        assert_eq!(series.index(), &index[..]);
        assert!(series.values()[1].is_nan());
    }

    #[test]
    // Purpose
    // -------
    // Ensure mismatched axis lengths are rejected with IndexMismatch.
    //
    // Given
    // -----
    // - Two timestamps but three values.
    //
    // Expect
    // ------
    // - `Err(FeatureError::IndexMismatch { left: 2, right: 3 })`.
    fn timeseries_new_length_mismatch_returns_error() {
        // Arrange
        let index = vec![10_i64, 20];
        let values = array![1.0, 2.0, 3.0];

        // Act
        let result = TimeSeries::new(index, values);

        // Assert
        match result {
            Err(FeatureError::IndexMismatch { left, right }) => {
                assert_eq!((left, right), (2, 3));
            }
            other => panic!("expected IndexMismatch, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure tied and decreasing timestamps are both rejected.
    //
    // Given
    // -----
    // - One index with a tie, one with a decrease.
    //
    // Expect
    // ------
    // - Both return `Err(FeatureError::NonMonotoneIndex { .. })`.
    fn timeseries_new_non_monotone_index_returns_error() {
        // Arrange
        let tied = TimeSeries::new(vec![10, 10, 20], array![1.0, 2.0, 3.0]);
        let decreasing = TimeSeries::new(vec![10, 5, 20], array![1.0, 2.0, 3.0]);

        // Act & Assert
        assert!(matches!(tied, Err(FeatureError::NonMonotoneIndex { .. })));
        assert!(matches!(decreasing, Err(FeatureError::NonMonotoneIndex { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Ensure ±∞ values are rejected while NaN gaps are accepted.
    //
    // Given
    // -----
    // - A series containing +∞ at position 1.
    //
    // Expect
    // ------
    // - `Err(FeatureError::InfiniteValue { position: 1, .. })`.
    fn timeseries_new_infinite_value_returns_error() {
        // Arrange
        let result = TimeSeries::new(vec![0, 1, 2], array![1.0, f64::INFINITY, 3.0]);

        // Act & Assert
        match result {
            Err(FeatureError::InfiniteValue { position, value }) => {
                assert_eq!(position, 1);
                assert!(value.is_infinite());
            }
            other => panic!("expected InfiniteValue, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that inner_join keeps exactly the shared timestamps, in order,
    // with values taken from each side.
    //
    // Given
    // -----
    // - Left series on {0,1,2}, right series on {1,2,3}.
    //
    // Expect
    // ------
    // - Join index {1,2} with the corresponding value pairs.
    fn timeseries_inner_join_keeps_common_timestamps() {
        // Arrange
        let left = TimeSeries::new(vec![0, 1, 2], array![0.1, 0.2, 0.3]).unwrap();
        let right = TimeSeries::new(vec![1, 2, 3], array![0.4, 0.5, 0.6]).unwrap();

        // Act
        let (index, lv, rv) = left.inner_join(&right);

        // Assert
        assert_eq!(index, vec![1, 2]);
        assert_eq!(lv, vec![0.2, 0.3]);
        assert_eq!(rv, vec![0.4, 0.5]);
    }

    #[test]
    // Purpose
    // -------
    // Verify minute-of-day derivation against a hand-computed timestamp.
    //
    // Given
    // -----
    // - 2021-01-01 09:30:00 UTC = 1609493400 epoch seconds.
    //
    // Expect
    // ------
    // - Bucket 9 * 60 + 30 = 570.
    fn timeseries_minute_of_day_matches_utc_clock() {
        // Arrange
        let series = TimeSeries::new(vec![1_609_493_400], array![1.0]).unwrap();

        // Act
        let bucket = series.minute_of_day(0);

        // Assert
        assert_eq!(bucket, Some(570));
        assert_eq!(series.minute_of_day(1), None);
    }
}
