//! tradability — nonlinear time-series diagnostics and trading-permission
//! signal, with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the diagnostics pipeline to Python via the `_tradability`
//! extension module. The pipeline turns a causal stream of price
//! observations into a stable discrete trading-permission state
//! (RED / YELLOW / GREEN) through permutation entropy, sample entropy, the
//! Rosenstein finite-time Lyapunov exponent, causal normalization, a
//! weighted tradability score, and a hysteresis classifier.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`series`, `features`, `scoring`,
//!   `params`) as the public crate surface.
//! - Define `#[pyfunction]` wrappers for the point estimators and a
//!   `#[pyclass]` wrapper for the hysteresis classifier, guarded by the
//!   `python-bindings` feature.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner Rust modules; this file performs
//!   only FFI glue, input validation, and error mapping.
//! - Estimators are pure and causal; the classifier context is the only
//!   cross-call state and each Python classifier instance owns exactly one.
//!
//! Conventions
//! -----------
//! - Errors from core Rust code are rich error types internally and become
//!   `ValueError` at the PyO3 boundary.
//! - Python callers pass plain sequences of floats; NaN marks gaps, exactly
//!   as in the Rust API.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend directly on the inner modules and can
//!   ignore the PyO3 items guarded by the `python-bindings` feature.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules
//!   and by `tests/integration_signal_pipeline.rs`; smoke tests for the
//!   bindings live on the Python side.

pub mod features;
pub mod params;
pub mod scoring;
pub mod series;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*};

#[cfg(feature = "python-bindings")]
use crate::scoring::{ClassifierContext, Hysteresis, Thresholds, TradingState};

/// Normalized permutation entropy of a sequence.
///
/// Python signature: `permutation_entropy(values, m=3, tau=1)`. NaN values
/// mark gaps and are dropped before embedding; NaN is returned when too few
/// valid samples remain.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (values, m = 3, tau = 1))]
fn permutation_entropy(values: Vec<f64>, m: usize, tau: usize) -> f64 {
    features::permutation_entropy(&values, m, tau)
}

/// Sample entropy of a sequence with a MAD-scaled tolerance.
///
/// Python signature: `sample_entropy(values, m=2, r=0.2)`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (values, m = 2, r = 0.2))]
fn sample_entropy(values: Vec<f64>, m: usize, r: f64) -> f64 {
    features::sample_entropy(&values, m, r)
}

/// Rosenstein finite-time Lyapunov exponent of a sequence.
///
/// Python signature:
/// `ftle_rosenstein(values, window=200, m=3, tau=1, horizon=10, theiler=2)`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (values, window = 200, m = 3, tau = 1, horizon = 10, theiler = 2))]
fn ftle_rosenstein(
    values: Vec<f64>, window: usize, m: usize, tau: usize, horizon: usize, theiler: usize,
) -> f64 {
    features::ftle_rosenstein(&values, window, m, tau, horizon, theiler)
}

#[cfg(feature = "python-bindings")]
fn state_to_str(state: TradingState) -> &'static str {
    match state {
        TradingState::Red => "RED",
        TradingState::Yellow => "YELLOW",
        TradingState::Green => "GREEN",
    }
}

#[cfg(feature = "python-bindings")]
fn state_from_str(name: &str) -> PyResult<TradingState> {
    match name {
        "RED" => Ok(TradingState::Red),
        "YELLOW" => Ok(TradingState::Yellow),
        "GREEN" => Ok(TradingState::Green),
        other => Err(PyValueError::new_err(format!(
            "initial_state must be one of RED, YELLOW, GREEN; got {other:?}"
        ))),
    }
}

/// TradabilityClassifier — Python-facing wrapper for the hysteresis
/// classifier.
///
/// Purpose
/// -------
/// Expose [`ClassifierContext`] to Python with string-valued states, one
/// instance per classified stream.
///
/// Key behaviors
/// -------------
/// - Validate thresholds and counts at construction; stepping never raises.
/// - `step(score)` consumes one score and returns the debounced state as
///   `"RED"`, `"YELLOW"`, or `"GREEN"`; NaN scores reset the confirmation
///   counters and hold the state.
///
/// Invariants
/// ----------
/// - Accepted flips are at least `min_flip_spacing` observations apart.
///
/// Notes
/// -----
/// - Native Rust callers should use [`ClassifierContext`] directly; this
///   type exists solely for the PyO3 binding surface.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "tradability")]
pub struct TradabilityClassifier {
    /// Underlying Rust classifier context.
    inner: ClassifierContext,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl TradabilityClassifier {
    #[new]
    #[pyo3(
        signature = (
            initial_state = "YELLOW",
            tau_y = 0.45,
            tau_g = 0.65,
            k_up = 2,
            k_down = 1,
            min_flip_spacing = 3,
        ),
        text_signature = "(initial_state='YELLOW', tau_y=0.45, tau_g=0.65, k_up=2, \
                          k_down=1, min_flip_spacing=3)"
    )]
    pub fn new(
        initial_state: &str, tau_y: f64, tau_g: f64, k_up: usize, k_down: usize,
        min_flip_spacing: usize,
    ) -> PyResult<Self> {
        let state = state_from_str(initial_state)?;
        let thresholds = Thresholds::new(tau_y, tau_g)?;
        let hysteresis = Hysteresis::new(k_up, k_down, min_flip_spacing)?;
        Ok(TradabilityClassifier { inner: ClassifierContext::new(state, thresholds, hysteresis) })
    }

    /// Consume one score and return the debounced state.
    pub fn step(&mut self, score: f64) -> &'static str {
        state_to_str(self.inner.step(score))
    }

    /// Consume a sequence of scores and return one state per position.
    pub fn classify(&mut self, scores: Vec<f64>) -> Vec<&'static str> {
        scores.into_iter().map(|s| state_to_str(self.inner.step(s))).collect()
    }

    /// The current debounced state.
    #[getter]
    pub fn state(&self) -> &'static str {
        state_to_str(self.inner.state())
    }
}

/// _tradability — PyO3 module initializer for the Python extension.
///
/// Registers the point estimators and the classifier on the extension
/// module. Invoked automatically by Python when importing the compiled
/// extension; never called directly by user code.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _tradability<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(permutation_entropy, m)?)?;
    m.add_function(wrap_pyfunction!(sample_entropy, m)?)?;
    m.add_function(wrap_pyfunction!(ftle_rosenstein, m)?)?;
    m.add_class::<TradabilityClassifier>()?;
    Ok(())
}
