//! features::errors — shared error types for the feature estimators.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used across the feature subtree
//! (series container, entropy, FTLE, scaling, second-order, smoothing). This
//! keeps configuration failures typed and localized while the estimators
//! absorb data-insufficiency into NaN sentinels.
//!
//! Key behaviors
//! -------------
//! - Define [`FeatureResult`] and [`FeatureError`] as the canonical result
//!   and error types for feature construction and rolling transforms.
//! - Attach human-readable `Display` messages to each variant so diagnostics
//!   are meaningful without additional context.
//! - Implement `From<FeatureError> for PyErr` behind the `python-bindings`
//!   feature, mapping configuration failures to `ValueError` in Python.
//!
//! Invariants & assumptions
//! ------------------------
//! - `FeatureError` is reserved for *configuration* failures (zero windows,
//!   misaligned inputs, malformed series). Short or degenerate data windows
//!   never raise; the estimators return NaN instead, so rolling pipelines
//!   degrade gracefully during warm-up.
//! - Variants are small, cloneable, and cheap to construct in hot paths.
//!
//! Conventions
//! -----------
//! - Error messages are phrased in terms of domain constraints ("window must
//!   be positive", "index must be strictly increasing") rather than
//!   implementation detail.
//! - Scoring and classifier configuration failures live in
//!   `scoring::errors`, not here.
//!
//! Downstream usage
//! ----------------
//! - Rolling transforms and the [`crate::series::TimeSeries`] constructor
//!   return [`FeatureResult<T>`]; point estimators return bare `f64` with a
//!   NaN sentinel and never error.
//!
//! Testing notes
//! -------------
//! - Unit tests verify that each variant's `Display` message embeds its
//!   payload (offending sizes, positions, values).

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, PyErr};

pub type FeatureResult<T> = Result<T, FeatureError>;

/// FeatureError — configuration failures in the feature subtree.
///
/// Purpose
/// -------
/// Represent every fail-fast condition the feature estimators can hit:
/// malformed series containers, zero-sized windows or spans, and misaligned
/// position-wise inputs.
///
/// Variants
/// --------
/// - `IndexMismatch`: a series was built from axes of different lengths.
/// - `NonMonotoneIndex`: a timestamp tie or decrease in the index axis.
/// - `InfiniteValue`: ±∞ in a value axis (NaN gaps are allowed, infinities
///   are not).
/// - `ZeroWindow`: a rolling window or normalization window of size 0.
/// - `ZeroSpan`: an EMA span of 0.
/// - `LengthMismatch`: position-wise combinators (e.g. tension) given inputs
///   of different lengths.
///
/// Notes
/// -----
/// - Implements [`std::error::Error`] and [`std::fmt::Display`] for
///   idiomatic `?`-based propagation.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureError {
    // ---- Series container validation ----
    /// Index and value axes have different lengths.
    IndexMismatch { left: usize, right: usize },

    /// Timestamp axis is not strictly increasing.
    NonMonotoneIndex { prev: i64, next: i64 },

    /// A value is ±∞; only finite values and NaN gap markers are allowed.
    InfiniteValue { position: usize, value: f64 },

    // ---- Transform configuration ----
    /// A rolling or normalization window must be positive.
    ZeroWindow { name: &'static str },

    /// The EMA span must be positive.
    ZeroSpan,

    /// Position-wise inputs must have equal lengths.
    LengthMismatch { left: usize, right: usize },
}

impl std::error::Error for FeatureError {}

impl std::fmt::Display for FeatureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureError::IndexMismatch { left, right } => {
                write!(f, "Index length {left} does not match value length {right}.")
            }
            FeatureError::NonMonotoneIndex { prev, next } => {
                write!(
                    f,
                    "Timestamp axis must be strictly increasing; got {next} after {prev}."
                )
            }
            FeatureError::InfiniteValue { position, value } => {
                write!(f, "Infinite value {value} at position {position}; use NaN for gaps.")
            }
            FeatureError::ZeroWindow { name } => {
                write!(f, "{name} must be positive.")
            }
            FeatureError::ZeroSpan => write!(f, "span must be positive."),
            FeatureError::LengthMismatch { left, right } => {
                write!(
                    f,
                    "Position-wise inputs must have equal lengths; got {left} and {right}."
                )
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<FeatureError> for PyErr {
    fn from(err: FeatureError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Display formatting for FeatureError variants.
    // - Embedding of payload values (sizes, positions, names) into messages.
    //
    // They intentionally DO NOT cover:
    // - The `From<FeatureError> for PyErr` conversion, which requires the
    //   Python C API and is exercised by Python-level tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that IndexMismatch embeds both lengths in its message.
    //
    // Given
    // -----
    // - An IndexMismatch with lengths 2 and 3.
    //
    // Expect
    // ------
    // - The Display string contains "2" and "3".
    fn feature_error_index_mismatch_includes_lengths_in_display() {
        // Arrange
        let err = FeatureError::IndexMismatch { left: 2, right: 3 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains('2') && msg.contains('3'), "message should embed lengths: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that ZeroWindow names the offending parameter.
    //
    // Given
    // -----
    // - A ZeroWindow for parameter "win".
    //
    // Expect
    // ------
    // - The Display string contains "win".
    fn feature_error_zero_window_names_parameter_in_display() {
        // Arrange
        let err = FeatureError::ZeroWindow { name: "win" };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("win"), "message should name the parameter: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that InfiniteValue reports the position of the bad value.
    //
    // Given
    // -----
    // - An InfiniteValue at position 7.
    //
    // Expect
    // ------
    // - The Display string contains "7".
    fn feature_error_infinite_value_includes_position_in_display() {
        // Arrange
        let err = FeatureError::InfiniteValue { position: 7, value: f64::INFINITY };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains('7'), "message should embed the position: {msg}");
    }
}
