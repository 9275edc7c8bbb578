//! params — structured, serializable pipeline configuration.
//!
//! Purpose
//! -------
//! Bundle every tunable of the diagnostics pipeline into one immutable,
//! serde-deserializable object with sensible defaults, so a run is fully
//! described by a small JSON file and two runs with equal params are
//! bit-for-bit reproducible.
//!
//! Key behaviors
//! -------------
//! - Every sub-struct implements `Default` with the pipeline's reference
//!   configuration and derives `Deserialize` with per-field default
//!   merging, so a JSON file only needs to name the fields it overrides.
//! - [`Params::from_path`] loads and parses a JSON file in one call.
//! - [`ScoreParams`] converts into the validated scoring objects
//!   ([`ScoreWeights`], [`Thresholds`], [`Hysteresis`]), which is where
//!   numeric validation happens.
//!
//! Invariants & assumptions
//! ------------------------
//! - Params objects are plain data: construction never validates numeric
//!   ranges (the estimators and the scoring constructors do, fail-fast).
//!
//! Conventions
//! -----------
//! - Field names match the JSON keys one-to-one; no renaming attributes.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the default values, partial-JSON merging, and the
//!   conversion into validated scoring objects.

use crate::scoring::{Hysteresis, ScoreResult, ScoreWeights, Thresholds};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Permutation entropy configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeParams {
    /// Rolling window length in observations.
    pub window: usize,
    /// Embedding dimension.
    pub m: usize,
    /// Embedding delay.
    pub tau: usize,
}

impl Default for PeParams {
    fn default() -> Self {
        PeParams { window: 60, m: 3, tau: 1 }
    }
}

/// Sample entropy configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampEnParams {
    /// Template dimension.
    pub m: usize,
    /// Tolerance multiplier on the robust scale (MAD-based sigma).
    pub r: f64,
}

impl Default for SampEnParams {
    fn default() -> Self {
        SampEnParams { m: 2, r: 0.2 }
    }
}

/// Rosenstein FTLE configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FtleParams {
    /// Rolling window length in observations.
    pub window: usize,
    /// Embedding dimension.
    pub m: usize,
    /// Embedding delay.
    pub tau: usize,
    /// Forward divergence horizon in embedded steps.
    pub horizon: usize,
    /// Theiler exclusion band for neighbor search.
    pub theiler: usize,
}

impl Default for FtleParams {
    fn default() -> Self {
        FtleParams { window: 200, m: 3, tau: 1, horizon: 10, theiler: 2 }
    }
}

/// Causal normalization configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationParams {
    /// Trailing min-max window (one regular trading session by default).
    pub win: usize,
    /// Denominator epsilon for zero-range windows.
    pub eps: f64,
}

impl Default for NormalizationParams {
    fn default() -> Self {
        NormalizationParams { win: 390, eps: 1e-9 }
    }
}

/// Score smoothing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingParams {
    /// EMA span applied to the score before classification.
    pub ema_span: usize,
}

impl Default for SmoothingParams {
    fn default() -> Self {
        SmoothingParams { ema_span: 3 }
    }
}

/// Scoring and classifier configuration.
///
/// Plain data; convert into the validated objects with [`Self::weights`],
/// [`Self::thresholds`], and [`Self::hysteresis`] before use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreParams {
    /// Weight on the entropy component.
    pub w1: f64,
    /// Weight on the divergence component.
    pub w2: f64,
    /// RED confirmation threshold.
    pub tau_y: f64,
    /// GREEN confirmation threshold.
    pub tau_g: f64,
    /// Consecutive confirmations required for GREEN.
    pub k_up: usize,
    /// Consecutive confirmations required for RED.
    pub k_down: usize,
    /// Minimum observations between accepted flips.
    pub min_flip_spacing: usize,
}

impl Default for ScoreParams {
    fn default() -> Self {
        ScoreParams {
            w1: 0.6,
            w2: 0.4,
            tau_y: 0.45,
            tau_g: 0.65,
            k_up: 2,
            k_down: 1,
            min_flip_spacing: 3,
        }
    }
}

impl ScoreParams {
    /// Validated score weights.
    pub fn weights(&self) -> ScoreResult<ScoreWeights> {
        ScoreWeights::new(self.w1, self.w2)
    }

    /// Validated classifier thresholds.
    pub fn thresholds(&self) -> ScoreResult<Thresholds> {
        Thresholds::new(self.tau_y, self.tau_g)
    }

    /// Validated hysteresis configuration.
    pub fn hysteresis(&self) -> ScoreResult<Hysteresis> {
        Hysteresis::new(self.k_up, self.k_down, self.min_flip_spacing)
    }
}

/// Params — full pipeline configuration for one instrument.
///
/// Purpose
/// -------
/// One object describing a complete run: the instrument, the bar cadence,
/// and every estimator/scorer tunable. Loaded from JSON with per-field
/// default merging, so configuration files stay small.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Instrument identifier (exchange symbol).
    pub symbol: String,
    /// Bar cadence, e.g. "1min".
    pub granularity: String,
    pub pe: PeParams,
    pub sampen: SampEnParams,
    pub ftle: FtleParams,
    pub normalization: NormalizationParams,
    pub smoothing: SmoothingParams,
    pub score: ScoreParams,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            symbol: "SPY".to_string(),
            granularity: "1min".to_string(),
            pe: PeParams::default(),
            sampen: SampEnParams::default(),
            ftle: FtleParams::default(),
            normalization: NormalizationParams::default(),
            smoothing: SmoothingParams::default(),
            score: ScoreParams::default(),
        }
    }
}

impl Params {
    /// Load params from a JSON file, merging absent fields from defaults.
    ///
    /// Parameters
    /// ----------
    /// - `path`: path to a JSON object; any subset of fields may appear.
    ///
    /// Returns
    /// -------
    /// `Result<Params, ParamsError>`
    ///   - `Err(ParamsError::Io)` when the file cannot be read.
    ///   - `Err(ParamsError::Parse)` when the contents are not valid JSON
    ///     for this schema.
    pub fn from_path(path: &Path) -> Result<Self, ParamsError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// ParamsError — failures loading a configuration file.
#[derive(Debug)]
pub enum ParamsError {
    /// The file could not be read.
    Io(std::io::Error),
    /// The contents did not parse as a Params JSON object.
    Parse(serde_json::Error),
}

impl std::error::Error for ParamsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParamsError::Io(err) => Some(err),
            ParamsError::Parse(err) => Some(err),
        }
    }
}

impl std::fmt::Display for ParamsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamsError::Io(err) => write!(f, "Failed to read params file: {err}"),
            ParamsError::Parse(err) => write!(f, "Failed to parse params file: {err}"),
        }
    }
}

impl From<std::io::Error> for ParamsError {
    fn from(err: std::io::Error) -> Self {
        ParamsError::Io(err)
    }
}

impl From<serde_json::Error> for ParamsError {
    fn from(err: serde_json::Error) -> Self {
        ParamsError::Parse(err)
    }
}
