//! features::ftle — finite-time Lyapunov exponent via the Rosenstein method.
//!
//! Purpose
//! -------
//! Estimate the local trajectory divergence rate of a scalar series from
//! nearest-neighbor tracking in delay-embedded space (Rosenstein et al.
//! 1993), point and rolling. A positive estimate flags locally chaotic,
//! fast-diverging dynamics; values near zero flag neutral or mean-reverting
//! behavior.
//!
//! Key behaviors
//! -------------
//! - [`ftle_rosenstein`] embeds the trailing window, pairs every anchor with
//!   its nearest Euclidean neighbor outside a Theiler band, tracks the pair's
//!   divergence over `horizon` forward steps, fits the slope of
//!   `ln(distance)` against the step by ordinary least squares, and
//!   aggregates per-anchor slopes with the median so outlier anchors cannot
//!   dominate.
//! - [`rolling_ftle_rosenstein`] applies the point estimator causally over
//!   trailing windows, aligned to the window end, with NaN until the window
//!   is fully populated.
//!
//! Invariants & assumptions
//! ------------------------
//! - Distances are clamped to `MIN_DISTANCE` before the logarithm, so exact
//!   neighbor coincidences never produce −∞.
//! - The estimate is NaN whenever fewer than `horizon + 2` embedded vectors
//!   exist; insufficiency never raises.
//! - Neighbors are restricted to anchors that also have `horizon` forward
//!   steps, so every tracked divergence is defined at all steps.
//!
//! Conventions
//! -----------
//! - The point estimator takes bare `&[f64]` and returns `f64`; the rolling
//!   transform carries the window configuration and returns
//!   [`FeatureResult`].
//!
//! Downstream usage
//! ----------------
//! - The orchestrating collaborator normalizes this output (see
//!   [`crate::features::scaling`]) into the `l_hat` feature consumed by the
//!   tradability scorer.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the fully chaotic logistic map against its known
//!   exponent ln 2, rolling/point equivalence at the final position, warm-up
//!   NaN behavior, and the NaN sentinel for short inputs.

use statrs::statistics::{Data, OrderStatistics};

use crate::features::embedding::{delay_embed, embedding_count};
use crate::features::errors::FeatureResult;
use crate::features::validation::validate_window;
use crate::series::TimeSeries;
use ndarray::Array1;

/// Floor applied to neighbor distances before taking logarithms.
const MIN_DISTANCE: f64 = 1e-8;

/// Finite-time Lyapunov exponent of the trailing window, Rosenstein method.
///
/// Parameters
/// ----------
/// - `values`: scalar series; NaN entries are dropped, then the last
///   `window` valid samples are used.
/// - `window`: trailing window length over valid samples.
/// - `m`: embedding dimension, ≥ 2.
/// - `tau`: embedding delay, ≥ 1.
/// - `horizon`: forward steps tracked per neighbor pair, ≥ 2 (a slope needs
///   at least two points).
/// - `theiler`: temporal exclusion band; neighbor candidates must differ
///   from the anchor index by more than this.
///
/// Returns
/// -------
/// Median over anchors of the OLS slope of `ln(distance)` versus step
/// `k = 1..=horizon`, in nats per step. NaN when the configuration is
/// degenerate, fewer than `horizon + 2` embedded vectors exist, or no
/// anchor finds an admissible neighbor.
pub fn ftle_rosenstein(
    values: &[f64], window: usize, m: usize, tau: usize, horizon: usize, theiler: usize,
) -> f64 {
    if window == 0 || m < 2 || tau == 0 || horizon < 2 {
        return f64::NAN;
    }
    let valid: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    let start = valid.len().saturating_sub(window);
    let tail = &valid[start..];

    let count = embedding_count(tail.len(), m, tau);
    if count < horizon + 2 {
        return f64::NAN;
    }
    let vectors = delay_embed(tail, m, tau);

    // Anchors (and neighbors) must leave room for the full forward track.
    let tracked = count - horizon;
    let mut slopes = Vec::with_capacity(tracked);
    for anchor in 0..tracked {
        let Some(neighbor) = nearest_neighbor(&vectors, anchor, tracked, theiler) else {
            continue;
        };

        let slope = divergence_slope(&vectors, anchor, neighbor, horizon);
        if slope.is_finite() {
            slopes.push(slope);
        }
    }

    if slopes.is_empty() {
        return f64::NAN;
    }
    let mut data = Data::new(slopes);
    data.median()
}

/// Causal rolling FTLE, aligned to the window end.
///
/// Each output position `i ≥ window - 1` equals [`ftle_rosenstein`] applied
/// to `series[i-window+1 ..= i]`; earlier positions are NaN (full-window
/// requirement). Fails with `FeatureError::ZeroWindow` when `window == 0`.
pub fn rolling_ftle_rosenstein(
    series: &TimeSeries, window: usize, m: usize, tau: usize, horizon: usize, theiler: usize,
) -> FeatureResult<TimeSeries> {
    validate_window(window, "window")?;

    let values = series.values();
    let n = values.len();
    let mut out = Array1::from_elem(n, f64::NAN);

    for i in 0..n {
        if i + 1 < window {
            continue;
        }
        let trailing: Vec<f64> = values
            .slice(ndarray::s![i + 1 - window..=i])
            .iter()
            .copied()
            .collect();
        out[i] = ftle_rosenstein(&trailing, window, m, tau, horizon, theiler);
    }

    series.with_values(out)
}

/// Squared Euclidean distance between two embedded vectors.
fn euclidean_sq(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Nearest Euclidean neighbor of `anchor` among `0..limit`, excluding the
/// Theiler band `|anchor - candidate| ≤ theiler`.
fn nearest_neighbor(
    vectors: &[Vec<f64>], anchor: usize, limit: usize, theiler: usize,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for candidate in 0..limit {
        if anchor.abs_diff(candidate) <= theiler {
            continue;
        }
        let dist = euclidean_sq(&vectors[anchor], &vectors[candidate]);
        if best.map_or(true, |(_, d)| dist < d) {
            best = Some((candidate, dist));
        }
    }
    best.map(|(index, _)| index)
}

/// OLS slope of `ln(distance)` against forward step `k = 1..=horizon` for
/// one anchor/neighbor pair, with distances floored at [`MIN_DISTANCE`].
fn divergence_slope(vectors: &[Vec<f64>], anchor: usize, neighbor: usize, horizon: usize) -> f64 {
    let k_mean = (horizon + 1) as f64 / 2.0;
    let mut y_sum = 0.0;
    let mut logs = Vec::with_capacity(horizon);
    for k in 1..=horizon {
        let dist = euclidean_sq(&vectors[anchor + k], &vectors[neighbor + k])
            .sqrt()
            .max(MIN_DISTANCE);
        let log_dist = dist.ln();
        logs.push(log_dist);
        y_sum += log_dist;
    }
    let y_mean = y_sum / horizon as f64;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (offset, log_dist) in logs.iter().enumerate() {
        let dk = (offset + 1) as f64 - k_mean;
        numerator += dk * (log_dist - y_mean);
        denominator += dk * dk;
    }
    numerator / denominator
}
