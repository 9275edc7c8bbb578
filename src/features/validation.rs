//! features::validation — shared configuration guards for feature transforms.
//!
//! Purpose
//! -------
//! Centralize the fail-fast configuration checks shared by the rolling
//! estimators, normalizers, and smoother, so each module enforces the same
//! rules through one code path.
//!
//! Key behaviors
//! -------------
//! - Reject zero-sized rolling/normalization windows via [`validate_window`].
//! - Reject zero EMA spans via [`validate_span`].
//!
//! Invariants & assumptions
//! ------------------------
//! - These guards cover *configuration* only. Data sufficiency (short or
//!   gap-ridden windows) is never validated here; the estimators absorb it
//!   into NaN sentinels per the crate's error-handling policy.
//!
//! Conventions
//! -----------
//! - Guards return [`FeatureResult<()>`] and never panic; a successful
//!   return guarantees the named parameter is usable downstream.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the success path and each rejection branch.

use crate::features::errors::{FeatureError, FeatureResult};

/// Validate a rolling or normalization window size.
///
/// Parameters
/// ----------
/// - `window`: requested trailing window length.
/// - `name`: parameter name used in the error message (e.g. `"window"`,
///   `"win"`).
///
/// Returns
/// -------
/// `FeatureResult<()>`
///   - `Ok(())` when `window > 0`.
///   - `Err(FeatureError::ZeroWindow)` otherwise.
pub fn validate_window(window: usize, name: &'static str) -> FeatureResult<()> {
    if window == 0 {
        return Err(FeatureError::ZeroWindow { name });
    }
    Ok(())
}

/// Validate an EMA span.
///
/// Returns `Err(FeatureError::ZeroSpan)` when `span == 0`, `Ok(())`
/// otherwise.
pub fn validate_span(span: usize) -> FeatureResult<()> {
    if span == 0 {
        return Err(FeatureError::ZeroSpan);
    }
    Ok(())
}
