//! features::smoothing — causal exponential moving average.
//!
//! Purpose
//! -------
//! Smooth feature and score series with a causal EMA before thresholding,
//! so single-bar spikes do not reach the hysteresis classifier.
//!
//! Key behaviors
//! -------------
//! - [`ema`] applies `y[i] = α·x[i] + (1-α)·y[i-1]` with `α = 2/(span+1)`
//!   and `y[0] = x[0]`.
//! - Gap policy: a NaN input emits NaN at that position while the recursion
//!   continues from the last smoothed value, so one gap does not poison the
//!   rest of the stream. This mirrors how the upstream pipeline's gaps are
//!   expected to behave and is pinned by a dedicated test.
//!
//! Invariants & assumptions
//! ------------------------
//! - Output preserves length and index; the first valid input seeds the
//!   recursion unchanged.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the recursion arithmetic, the seed behavior, the gap
//!   policy, and the zero-span configuration error.

use crate::features::errors::FeatureResult;
use crate::features::validation::validate_span;
use crate::series::TimeSeries;
use ndarray::Array1;

/// Causal exponential moving average with weight `α = 2/(span+1)`.
///
/// Parameters
/// ----------
/// - `series`: input series; gaps are `NAN`.
/// - `span`: smoothing span; must be positive.
///
/// Returns
/// -------
/// `FeatureResult<TimeSeries>`
///   - The smoothed series: `y[0] = x[0]`,
///     `y[i] = α·x[i] + (1-α)·y[i-1]`. NaN inputs emit NaN and the
///     recursion resumes from the last smoothed value.
///   - `Err(FeatureError::ZeroSpan)` when `span == 0`.
pub fn ema(series: &TimeSeries, span: usize) -> FeatureResult<TimeSeries> {
    validate_span(span)?;

    let alpha = 2.0 / (span as f64 + 1.0);
    let values = series.values();
    let mut out = Array1::from_elem(values.len(), f64::NAN);

    let mut state: Option<f64> = None;
    for (i, &x) in values.iter().enumerate() {
        if x.is_nan() {
            continue;
        }
        let y = match state {
            None => x,
            Some(prev) => alpha * x + (1.0 - alpha) * prev,
        };
        out[i] = y;
        state = Some(y);
    }

    series.with_values(out)
}
