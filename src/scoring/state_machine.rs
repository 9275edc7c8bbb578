//! scoring::state_machine — hysteresis classifier over tradability scores.
//!
//! Purpose
//! -------
//! Turn a noisy per-observation tradability score into a stable discrete
//! trading-permission state (RED / YELLOW / GREEN) using run-length
//! confirmation counters and a minimum spacing between accepted state
//! flips.
//!
//! Key behaviors
//! -------------
//! - [`Thresholds`] and [`Hysteresis`] validate their configuration at
//!   construction; stepping cannot fail afterwards.
//! - [`ClassifierContext::step`] consumes one score and emits the debounced
//!   state: scores at or above `tau_g` extend the up run, scores at or
//!   below `tau_y` extend the down run, anything in between — including NaN
//!   — resets both runs.
//! - A desired state change is accepted only when at least
//!   `min_flip_spacing` observations have passed since the last accepted
//!   flip.
//!
//! Invariants & assumptions
//! ------------------------
//! - GREEN confirmation is checked before RED, so a configuration where
//!   both runs qualify simultaneously resolves upward deterministically.
//! - `min_flip_spacing` counts observations, not wall-clock time; the
//!   stepping API deliberately takes no timestamp.
//! - The context starts as if a flip had just aged out
//!   (`last_flip = -min_flip_spacing`), so a confirmed run at the head of
//!   the stream flips immediately.
//! - One context per symbol; the caller owns and threads it. No global
//!   state.
//!
//! Downstream usage
//! ----------------
//! - Feed smoothed scores in order:
//!
//!   ```rust
//!   use tradability::scoring::prelude::*;
//!   # fn main() -> Result<(), tradability::scoring::ScoreError> {
//!   let mut ctx = ClassifierContext::new(
//!       TradingState::Yellow,
//!       Thresholds::default(),
//!       Hysteresis::default(),
//!   );
//!   let state = ctx.step(0.7);
//!   # let _ = state;
//!   # Ok(())
//!   # }
//!   ```
//!
//! Testing notes
//! -------------
//! - Unit tests pin a hand-traced nine-score sequence, the NaN reset
//!   policy, the flip-spacing bound under random scores, and the
//!   constructor guards.

use crate::scoring::errors::{ScoreError, ScoreResult};
use crate::series::TimeSeries;

/// Discrete trading-permission state.
///
/// `Red` forbids new risk, `Yellow` allows holding but not adding, `Green`
/// permits trading. The classifier only ever moves between these on
/// confirmed, spaced flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradingState {
    Red,
    Yellow,
    Green,
}

/// Thresholds — validated score cutoffs for the run counters.
///
/// `tau_g` is the GREEN confirmation threshold (score ≥ `tau_g` extends the
/// up run); `tau_y` is the RED confirmation threshold (score ≤ `tau_y`
/// extends the down run). Scores strictly between the two are neutral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    tau_y: f64,
    tau_g: f64,
}

impl Thresholds {
    /// Construct validated thresholds.
    ///
    /// Returns
    /// -------
    /// `ScoreResult<Thresholds>`
    ///   - `Err(ScoreError::InvalidThresholds)` when either threshold is
    ///     non-finite or `tau_y ≥ tau_g`.
    pub fn new(tau_y: f64, tau_g: f64) -> ScoreResult<Self> {
        if !tau_y.is_finite() || !tau_g.is_finite() || tau_y >= tau_g {
            return Err(ScoreError::InvalidThresholds { tau_y, tau_g });
        }
        Ok(Thresholds { tau_y, tau_g })
    }

    /// RED confirmation threshold.
    pub fn tau_y(&self) -> f64 {
        self.tau_y
    }

    /// GREEN confirmation threshold.
    pub fn tau_g(&self) -> f64 {
        self.tau_g
    }
}

impl Default for Thresholds {
    /// Default cutoffs: `tau_y = 0.45`, `tau_g = 0.65`.
    fn default() -> Self {
        Thresholds { tau_y: 0.45, tau_g: 0.65 }
    }
}

/// Hysteresis — validated debouncing configuration.
///
/// `k_up` consecutive confirming scores are required before GREEN, `k_down`
/// before RED, and accepted flips must be at least `min_flip_spacing`
/// observations apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hysteresis {
    k_up: usize,
    k_down: usize,
    min_flip_spacing: usize,
}

impl Hysteresis {
    /// Construct validated hysteresis configuration.
    ///
    /// Returns
    /// -------
    /// `ScoreResult<Hysteresis>`
    ///   - `Err(ScoreError::ZeroCount)` when `k_up` or `k_down` is 0 (a
    ///     zero count would flip on no evidence at all).
    ///     `min_flip_spacing = 0` is allowed and disables spacing.
    pub fn new(k_up: usize, k_down: usize, min_flip_spacing: usize) -> ScoreResult<Self> {
        if k_up == 0 {
            return Err(ScoreError::ZeroCount { name: "k_up" });
        }
        if k_down == 0 {
            return Err(ScoreError::ZeroCount { name: "k_down" });
        }
        Ok(Hysteresis { k_up, k_down, min_flip_spacing })
    }

    /// Consecutive confirmations required for GREEN.
    pub fn k_up(&self) -> usize {
        self.k_up
    }

    /// Consecutive confirmations required for RED.
    pub fn k_down(&self) -> usize {
        self.k_down
    }

    /// Minimum observations between accepted flips.
    pub fn min_flip_spacing(&self) -> usize {
        self.min_flip_spacing
    }
}

impl Default for Hysteresis {
    /// Default debouncing: `k_up = 2`, `k_down = 1`, `min_flip_spacing = 3`.
    fn default() -> Self {
        Hysteresis { k_up: 2, k_down: 1, min_flip_spacing: 3 }
    }
}

/// ClassifierContext — per-symbol state of the hysteresis classifier.
///
/// Purpose
/// -------
/// Carry the current state, the confirmation run counters, and the position
/// of the last accepted flip across calls. The caller owns exactly one
/// context per classified stream and feeds scores strictly in order.
///
/// Fields
/// ------
/// - Current debounced state, up/down run counters, the observation index
///   of the last accepted flip, and the next observation index.
///
/// Invariants
/// ----------
/// - Accepted flips are at least `min_flip_spacing` observations apart.
/// - Counters reset on every accepted flip and on every neutral (or NaN)
///   score.
#[derive(Debug, Clone)]
pub struct ClassifierContext {
    thresholds: Thresholds,
    hysteresis: Hysteresis,
    state: TradingState,
    up_count: usize,
    down_count: usize,
    last_flip: i64,
    position: i64,
}

impl ClassifierContext {
    /// Construct a context starting from `initial_state`.
    ///
    /// The spacing clock starts as if a flip had just aged out, so a
    /// confirmed run at the head of the stream can flip immediately.
    pub fn new(initial_state: TradingState, thresholds: Thresholds, hysteresis: Hysteresis) -> Self {
        ClassifierContext {
            thresholds,
            hysteresis,
            state: initial_state,
            up_count: 0,
            down_count: 0,
            last_flip: -(hysteresis.min_flip_spacing() as i64),
            position: 0,
        }
    }

    /// Current debounced state.
    pub fn state(&self) -> TradingState {
        self.state
    }

    /// Consume one score and emit the debounced state.
    ///
    /// Parameters
    /// ----------
    /// - `score`: the tradability score at the next observation. NaN is a
    ///   neutral observation: both run counters reset and the state holds.
    ///
    /// Returns
    /// -------
    /// The state *after* this observation was processed, including any
    /// accepted flip.
    pub fn step(&mut self, score: f64) -> TradingState {
        if score.is_nan() {
            // Gaps carry no evidence in either direction.
            self.up_count = 0;
            self.down_count = 0;
        } else if score >= self.thresholds.tau_g() {
            self.up_count += 1;
            self.down_count = 0;
        } else if score <= self.thresholds.tau_y() {
            self.down_count += 1;
            self.up_count = 0;
        } else {
            self.up_count = 0;
            self.down_count = 0;
        }

        // GREEN before RED: simultaneous qualification resolves upward.
        let desired = if self.up_count >= self.hysteresis.k_up() {
            TradingState::Green
        } else if self.down_count >= self.hysteresis.k_down() {
            TradingState::Red
        } else {
            TradingState::Yellow
        };

        let spacing_ok =
            self.position - self.last_flip >= self.hysteresis.min_flip_spacing() as i64;
        if desired != self.state && spacing_ok {
            self.state = desired;
            self.last_flip = self.position;
            self.up_count = 0;
            self.down_count = 0;
        }

        self.position += 1;
        self.state
    }

    /// Classify a score series in order, one state per position.
    ///
    /// NaN scores are stepped like any other observation (they reset the
    /// counters and emit the held state), so the output has the same length
    /// as the input.
    pub fn classify(&mut self, scores: &TimeSeries) -> Vec<TradingState> {
        scores.values().iter().map(|&s| self.step(s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - A hand-traced nine-score sequence through confirmation, rejection
    //   during the spacing window, and delayed re-confirmation.
    // - The NaN reset policy.
    // - The flip-spacing bound under random scores.
    // - Constructor guards for thresholds and counts.
    //
    // They intentionally DO NOT cover:
    // - Score construction; the scorer has its own tests and the
    //   integration test chains both.
    // -------------------------------------------------------------------------

    fn default_context() -> ClassifierContext {
        ClassifierContext::new(TradingState::Yellow, Thresholds::default(), Hysteresis::default())
    }

    #[test]
    // Purpose
    // -------
    // Trace the full acceptance/rejection behavior through a known score
    // sequence with the default configuration.
    //
    // Given
    // -----
    // - Scores (0.5, 0.7, 0.7, 0.3, 0.3, 0.3, 0.7, 0.7, 0.7), starting
    //   YELLOW with defaults (tau_y 0.45, tau_g 0.65, k_up 2, k_down 1,
    //   spacing 3).
    //
    // Expect
    // ------
    // - States (YELLOW, YELLOW, GREEN, GREEN, GREEN, RED, RED, RED, GREEN):
    //   the GREEN flip at position 2 blocks the confirmed RED until
    //   position 5, which in turn blocks the next GREEN until position 8.
    fn classifier_hand_traced_sequence_with_spacing_rejections() {
        // Arrange
        let mut ctx = default_context();
        let scores = [0.5, 0.7, 0.7, 0.3, 0.3, 0.3, 0.7, 0.7, 0.7];
        let expected = [
            TradingState::Yellow,
            TradingState::Yellow,
            TradingState::Green,
            TradingState::Green,
            TradingState::Green,
            TradingState::Red,
            TradingState::Red,
            TradingState::Red,
            TradingState::Green,
        ];

        // Act
        let states: Vec<TradingState> = scores.iter().map(|&s| ctx.step(s)).collect();

        // Assert
        assert_eq!(states, expected);
    }

    #[test]
    // Purpose
    // -------
    // Verify the NaN policy: a gap resets both run counters, so a
    // confirmation run interrupted by NaN must start over.
    //
    // Given
    // -----
    // - Defaults (k_up = 2); scores (0.7, NaN, 0.7, 0.7).
    //
    // Expect
    // ------
    // - States (YELLOW, YELLOW, YELLOW, GREEN): the gap discards the first
    //   up observation.
    fn classifier_nan_resets_confirmation_run() {
        // Arrange
        let mut ctx = default_context();

        // Act
        let states: Vec<TradingState> =
            [0.7, f64::NAN, 0.7, 0.7].iter().map(|&s| ctx.step(s)).collect();

        // Assert
        assert_eq!(
            states,
            vec![
                TradingState::Yellow,
                TradingState::Yellow,
                TradingState::Yellow,
                TradingState::Green
            ]
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify the spacing bound holds for arbitrary inputs: no two accepted
    // flips are ever closer than min_flip_spacing observations.
    //
    // Given
    // -----
    // - 2000 uniform random scores in [0, 1] (seeded), defaults with
    //   spacing 3.
    //
    // Expect
    // ------
    // - Every pair of consecutive state changes in the output is at least
    //   3 positions apart.
    fn classifier_accepted_flips_respect_min_spacing() {
        // Arrange
        let mut rng = StdRng::seed_from_u64(7);
        let mut ctx = default_context();

        // Act
        let states: Vec<TradingState> =
            (0..2000).map(|_| ctx.step(rng.gen_range(0.0..1.0))).collect();

        // Assert
        let mut last_change: Option<usize> = None;
        for i in 1..states.len() {
            if states[i] != states[i - 1] {
                if let Some(prev) = last_change {
                    assert!(i - prev >= 3, "flips at {prev} and {i} violate spacing");
                }
                last_change = Some(i);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that classify emits one state per score position, including
    // NaN gaps.
    //
    // Given
    // -----
    // - A three-score series with a NaN in the middle.
    //
    // Expect
    // ------
    // - Three output states.
    fn classify_emits_one_state_per_position() {
        // Arrange
        let mut ctx = default_context();
        let scores = crate::series::TimeSeries::from_values(Array1::from(vec![
            0.5,
            f64::NAN,
            0.5,
        ]))
        .unwrap();

        // Act
        let states = ctx.classify(&scores);

        // Assert
        assert_eq!(states.len(), 3);
    }

    #[test]
    // Purpose
    // -------
    // Verify the constructor guards: inverted thresholds and zero
    // confirmation counts are configuration errors.
    //
    // Given
    // -----
    // - tau_y = 0.7 ≥ tau_g = 0.4; then k_up = 0.
    //
    // Expect
    // ------
    // - `Err(ScoreError::InvalidThresholds)` and
    //   `Err(ScoreError::ZeroCount)` respectively.
    fn classifier_config_guards_reject_bad_input() {
        // Arrange / Act
        let inverted = Thresholds::new(0.7, 0.4);
        let zero_up = Hysteresis::new(0, 1, 3);

        // Assert
        assert!(matches!(inverted, Err(ScoreError::InvalidThresholds { .. })));
        assert!(matches!(zero_up, Err(ScoreError::ZeroCount { name: "k_up" })));
    }
}
