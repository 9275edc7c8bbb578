//! scoring::errors — shared error types for the scoring subtree.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used by the tradability scorer
//! and the hysteresis state classifier. Like the feature subtree, errors
//! here are reserved for configuration failures; per-observation data
//! problems flow through the pipeline as NaN.
//!
//! Key behaviors
//! -------------
//! - Define [`ScoreResult`] and [`ScoreError`] as the canonical result and
//!   error types for score and classifier configuration.
//! - Attach human-readable `Display` messages to each variant.
//! - Implement `From<ScoreError> for PyErr` behind the `python-bindings`
//!   feature, mapping configuration failures to `ValueError` in Python.
//!
//! Invariants & assumptions
//! ------------------------
//! - Variants cover only fail-fast constructor checks: non-finite or
//!   negative weights, inverted thresholds, zero confirmation counts. A NaN
//!   score at classification time is *data*, not configuration, and resets
//!   the classifier's counters instead of raising.
//!
//! Conventions
//! -----------
//! - Error messages are phrased in terms of domain constraints ("weights
//!   must be finite and non-negative", "tau_y must be below tau_g").
//! - Feature-side configuration failures live in `features::errors`, not
//!   here.
//!
//! Testing notes
//! -------------
//! - Unit tests verify that each variant's `Display` message embeds its
//!   payload.

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, PyErr};

pub type ScoreResult<T> = Result<T, ScoreError>;

/// ScoreError — configuration failures in the scoring subtree.
///
/// Variants
/// --------
/// - `InvalidWeight`: a score weight is non-finite or negative.
/// - `InvalidThresholds`: the YELLOW/GREEN thresholds are non-finite or not
///   strictly ordered (`tau_y < tau_g` required).
/// - `ZeroCount`: a confirmation count (`k_up` or `k_down`) is 0, which
///   would let a single observation flip the state.
/// - `Series`: a feature-subtree failure surfaced while the scorer was
///   assembling its output series.
///
/// Notes
/// -----
/// - Implements [`std::error::Error`] and [`std::fmt::Display`] for
///   idiomatic `?`-based propagation; `From<FeatureError>` lets the scorer
///   use `?` on series construction.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreError {
    /// A score weight must be finite and non-negative.
    InvalidWeight { name: &'static str, value: f64 },

    /// Classifier thresholds must be finite with `tau_y < tau_g`.
    InvalidThresholds { tau_y: f64, tau_g: f64 },

    /// A confirmation count must be positive.
    ZeroCount { name: &'static str },

    /// A feature-subtree error raised while building the score series.
    Series(crate::features::errors::FeatureError),
}

impl std::error::Error for ScoreError {}

impl std::fmt::Display for ScoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreError::InvalidWeight { name, value } => {
                write!(f, "{name} must be finite and non-negative; got {value}.")
            }
            ScoreError::InvalidThresholds { tau_y, tau_g } => {
                write!(
                    f,
                    "Thresholds must be finite with tau_y < tau_g; got tau_y = {tau_y}, \
                     tau_g = {tau_g}."
                )
            }
            ScoreError::ZeroCount { name } => {
                write!(f, "{name} must be positive.")
            }
            ScoreError::Series(err) => write!(f, "{err}"),
        }
    }
}

impl From<crate::features::errors::FeatureError> for ScoreError {
    fn from(err: crate::features::errors::FeatureError) -> ScoreError {
        ScoreError::Series(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<ScoreError> for PyErr {
    fn from(err: ScoreError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
