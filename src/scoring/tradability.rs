//! scoring::tradability — weighted tradability score over aligned features.
//!
//! Purpose
//! -------
//! Combine the normalized entropy feature `e_hat` and the normalized
//! divergence feature `l_hat` into a single per-position tradability score
//! in [0, 1]: high when the market looks structured and stable, low when it
//! looks random or locally divergent.
//!
//! Key behaviors
//! -------------
//! - [`ScoreWeights`] validates the component weights at construction, so
//!   scoring itself cannot fail on configuration.
//! - [`score_tradability`] inner-joins the two feature series on their
//!   common timestamps, computes `w1·(1 - e) + w2·(1 - l)` position-wise,
//!   and clips to [0, 1].
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are expected in [0, 1]; out-of-range values are tolerated and
//!   the clip keeps the score bounded regardless.
//! - NaN in either feature propagates NaN at that position; the score index
//!   is the join of the two inputs.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the weight validation, the clip behavior on
//!   out-of-range inputs, NaN propagation, join alignment, and a
//!   hand-computed weighted combination.

use crate::scoring::errors::{ScoreError, ScoreResult};
use crate::series::TimeSeries;
use ndarray::Array1;

/// ScoreWeights — validated component weights for the tradability score.
///
/// Purpose
/// -------
/// Hold the entropy weight `w1` and the divergence weight `w2`. Validation
/// happens once at construction; the scorer trusts the invariants
/// afterwards.
///
/// Invariants
/// ----------
/// - Both weights are finite and non-negative.
///
/// Notes
/// -----
/// - The weights are not forced to sum to 1; the output clip keeps the
///   score in [0, 1] either way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    w1: f64,
    w2: f64,
}

impl ScoreWeights {
    /// Construct validated score weights.
    ///
    /// Parameters
    /// ----------
    /// - `w1`: weight on `1 - e_hat` (entropy component).
    /// - `w2`: weight on `1 - l_hat` (divergence component).
    ///
    /// Returns
    /// -------
    /// `ScoreResult<ScoreWeights>`
    ///   - `Err(ScoreError::InvalidWeight)` when a weight is non-finite or
    ///     negative.
    pub fn new(w1: f64, w2: f64) -> ScoreResult<Self> {
        if !w1.is_finite() || w1 < 0.0 {
            return Err(ScoreError::InvalidWeight { name: "w1", value: w1 });
        }
        if !w2.is_finite() || w2 < 0.0 {
            return Err(ScoreError::InvalidWeight { name: "w2", value: w2 });
        }
        Ok(ScoreWeights { w1, w2 })
    }

    /// Weight on the entropy component.
    pub fn w1(&self) -> f64 {
        self.w1
    }

    /// Weight on the divergence component.
    pub fn w2(&self) -> f64 {
        self.w2
    }
}

impl Default for ScoreWeights {
    /// Default weighting: entropy 0.6, divergence 0.4.
    fn default() -> Self {
        ScoreWeights { w1: 0.6, w2: 0.4 }
    }
}

/// Weighted tradability score over two aligned feature series.
///
/// Parameters
/// ----------
/// - `e_hat`: normalized entropy feature (high = disordered).
/// - `l_hat`: normalized divergence feature (high = locally unstable).
/// - `weights`: validated component weights.
///
/// Returns
/// -------
/// `ScoreResult<TimeSeries>`
///   - `w1·(1 - e) + w2·(1 - l)` clipped to [0, 1], on the inner join of
///     the two input indexes. Timestamps absent from either side are
///     dropped; NaN in either feature yields NaN at that position.
pub fn score_tradability(
    e_hat: &TimeSeries, l_hat: &TimeSeries, weights: ScoreWeights,
) -> ScoreResult<TimeSeries> {
    let (index, e_vals, l_vals) = e_hat.inner_join(l_hat);
    let scores = Array1::from_iter(e_vals.iter().zip(l_vals.iter()).map(|(&e, &l)| {
        (weights.w1() * (1.0 - e) + weights.w2() * (1.0 - l)).clamp(0.0, 1.0)
    }));
    Ok(TimeSeries::new(index, scores)?)
}
