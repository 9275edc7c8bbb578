//! scoring — tradability score and hysteresis state classifier.
//!
//! Purpose
//! -------
//! Collapse the normalized feature series from [`crate::features`] into a
//! single per-position tradability score and then into a stable discrete
//! RED / YELLOW / GREEN trading-permission state.
//!
//! Key behaviors
//! -------------
//! - [`score_tradability`] joins the entropy and divergence features on
//!   their common timestamps and emits a weighted score clipped to [0, 1].
//! - [`ClassifierContext`] debounces the score stream with run-length
//!   confirmation counters and a minimum spacing between accepted flips.
//!
//! Invariants & assumptions
//! ------------------------
//! - Configuration is validated once at construction ([`ScoreWeights`],
//!   [`Thresholds`], [`Hysteresis`]); scoring and stepping never fail on
//!   data.
//! - NaN scores are neutral observations: they reset the classifier's
//!   counters and hold the state.
//!
//! Downstream usage
//! ----------------
//! - Score, smooth, then classify:
//!
//!   ```rust
//!   use tradability::scoring::prelude::*;
//!   use tradability::series::TimeSeries;
//!   use ndarray::array;
//!
//!   # fn main() -> Result<(), tradability::scoring::ScoreError> {
//!   let e_hat = TimeSeries::from_values(array![0.2, 0.3])?;
//!   let l_hat = TimeSeries::from_values(array![0.4, 0.1])?;
//!   let score = score_tradability(&e_hat, &l_hat, ScoreWeights::default())?;
//!   let mut ctx = ClassifierContext::new(
//!       TradingState::Yellow,
//!       Thresholds::default(),
//!       Hysteresis::default(),
//!   );
//!   let states = ctx.classify(&score);
//!   # let _ = states;
//!   # Ok(())
//!   # }
//!   ```
//!
//! Testing notes
//! -------------
//! - Each module carries its own unit tests; the end-to-end chain from raw
//!   prices to states lives in `tests/integration_signal_pipeline.rs`.

pub mod errors;
pub mod state_machine;
pub mod tradability;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{ScoreError, ScoreResult};
pub use self::state_machine::{ClassifierContext, Hysteresis, Thresholds, TradingState};
pub use self::tradability::{score_tradability, ScoreWeights};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::errors::{ScoreError, ScoreResult};
    pub use super::state_machine::{ClassifierContext, Hysteresis, Thresholds, TradingState};
    pub use super::tradability::{score_tradability, ScoreWeights};
}
