//! features — nonlinear diagnostics and causal transforms for price series.
//!
//! Purpose
//! -------
//! Collect the feature engine of the crate: permutation and sample entropy,
//! the Rosenstein finite-time Lyapunov exponent, causal normalization
//! (trailing min-max and minute-of-day percentiles), second-order
//! differences with the tension combinator, and exponential smoothing. These
//! turn a validated, causally ordered price or return series into the
//! bounded `e_hat`/`l_hat` features the tradability scorer consumes.
//!
//! Key behaviors
//! -------------
//! - Expose point estimators over bare `&[f64]`
//!   ([`permutation_entropy`], [`sample_entropy`], [`ftle_rosenstein`]) that
//!   report data insufficiency as NaN, never as an error.
//! - Expose rolling, window-end-aligned transforms over
//!   [`crate::series::TimeSeries`] ([`rolling_permutation_entropy`],
//!   [`rolling_ftle_rosenstein`], [`minmax_causal`], [`velocity`],
//!   [`curvature`], [`tension`], [`ema`]) that preserve the input's length
//!   and index.
//! - Centralize configuration guards in [`validation`] and typed failures
//!   in [`errors`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Every transform is causal: output at position `i` depends only on
//!   positions ≤ `i`. Appending observations never changes earlier outputs.
//! - Normalized entropy lies in [0, 1] or is NaN; min-max and percentile
//!   outputs are clipped to [0, 1].
//! - Ordinal patterns break ties by first occurrence, keeping every
//!   entropy estimate reproducible bit-for-bit.
//! - All functions here are pure: no I/O, no logging, no global state. They
//!   may run concurrently across symbols or windows without coordination.
//!
//! Conventions
//! -----------
//! - Configuration failures (zero windows/spans, misaligned inputs) return
//!   [`FeatureError`]; degenerate data (zero ranges, tiny distances) is
//!   absorbed by epsilon clamping; short windows yield NaN.
//!
//! Downstream usage
//! ----------------
//! - Typical pipeline:
//!
//!   ```rust
//!   use tradability::features::prelude::*;
//!   use tradability::series::TimeSeries;
//!   use ndarray::Array1;
//!
//!   # fn main() -> Result<(), tradability::features::FeatureError> {
//!   let closes = TimeSeries::from_values(Array1::linspace(100.0, 101.0, 64))?;
//!   let pe = rolling_permutation_entropy(&closes, 60, 3, 1)?;
//!   let e_hat = minmax_causal(&pe, 60, 1e-9)?;
//!   # Ok(())
//!   # }
//!   ```
//!
//! - The scoring subtree joins two normalized features and classifies the
//!   resulting score sequence; see [`crate::scoring`].
//!
//! Testing notes
//! -------------
//! - Each module carries unit tests for its estimator's documented
//!   properties; `tests/integration_signal_pipeline.rs` exercises the full
//!   chain from raw closes to debounced states.

pub mod embedding;
pub mod errors;
pub mod ftle;
pub mod scaling;
pub mod second_order;
pub mod smoothing;
pub mod validation;

pub mod entropy;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::entropy::{permutation_entropy, rolling_permutation_entropy, sample_entropy};
pub use self::errors::{FeatureError, FeatureResult};
pub use self::ftle::{ftle_rosenstein, rolling_ftle_rosenstein};
pub use self::scaling::{minmax_causal, TodPercentileModel};
pub use self::second_order::{curvature, tension, velocity};
pub use self::smoothing::ema;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use tradability::features::prelude::*;
//
// to import the main feature surface in a single line.

pub mod prelude {
    pub use super::entropy::{permutation_entropy, rolling_permutation_entropy, sample_entropy};
    pub use super::errors::{FeatureError, FeatureResult};
    pub use super::ftle::{ftle_rosenstein, rolling_ftle_rosenstein};
    pub use super::scaling::{minmax_causal, TodPercentileModel};
    pub use super::second_order::{curvature, tension, velocity};
    pub use super::smoothing::ema;
}
