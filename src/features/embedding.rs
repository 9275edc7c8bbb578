//! features::embedding — delay embedding and ordinal-pattern encoding.
//!
//! Purpose
//! -------
//! Provide the two reconstruction primitives shared by the entropy and FTLE
//! estimators: delay embedding of a scalar series into m-dimensional state
//! vectors, and the deterministic rank-order (ordinal pattern) encoding of a
//! window.
//!
//! Key behaviors
//! -------------
//! - [`delay_embed`] builds all overlapping vectors
//!   `(x[t], x[t+τ], …, x[t+(m-1)τ])` for `t = 0..n-(m-1)τ`.
//! - [`ordinal_pattern`] returns the rank of each component under a *stable*
//!   sort, so ties break by first occurrence and the encoding is reproducible
//!   bit-for-bit.
//!
//! Invariants & assumptions
//! ------------------------
//! - Callers pass NaN-free windows; the entropy estimators drop gaps before
//!   embedding and the FTLE estimator filters its window first.
//! - `m ≥ 2` and `τ ≥ 1` for a meaningful embedding; callers enforce this by
//!   returning a NaN estimate for degenerate configurations.
//!
//! Conventions
//! -----------
//! - A pattern is the vector `p` with `p[k]` = rank of component `k`, the
//!   same encoding the ordinal-pattern literature uses (two stable argsorts).
//!
//! Testing notes
//! -------------
//! - Unit tests pin the stable tie-breaking rule, the pattern of monotone
//!   windows, and the embedded vector count `n - (m-1)τ`.

use std::cmp::Ordering;

/// Number of embedding vectors available for a series of length `n`.
///
/// Zero when the series is shorter than the embedding length `(m-1)·τ + 1`.
pub(crate) fn embedding_count(n: usize, m: usize, tau: usize) -> usize {
    let span = (m - 1) * tau;
    if n > span { n - span } else { 0 }
}

/// Build all overlapping delay-embedding vectors of dimension `m`, delay `τ`.
///
/// Parameters
/// ----------
/// - `values`: NaN-free scalar series.
/// - `m`: embedding dimension (≥ 2).
/// - `tau`: delay between components (≥ 1).
///
/// Returns
/// -------
/// Vectors `(x[t], x[t+τ], …, x[t+(m-1)τ])` for each admissible anchor `t`,
/// in anchor order; empty when the series is too short.
pub(crate) fn delay_embed(values: &[f64], m: usize, tau: usize) -> Vec<Vec<f64>> {
    let count = embedding_count(values.len(), m, tau);
    let mut vectors = Vec::with_capacity(count);
    for t in 0..count {
        let mut v = Vec::with_capacity(m);
        for k in 0..m {
            v.push(values[t + k * tau]);
        }
        vectors.push(v);
    }
    vectors
}

/// Ordinal pattern of a window: the rank of each component under a stable
/// sort.
///
/// Ties break by first occurrence (stable ordering), so equal values keep
/// their temporal order and the encoding is deterministic. For a strictly
/// increasing window the pattern is the identity `0, 1, …, m-1`.
pub(crate) fn ordinal_pattern(window: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..window.len()).collect();
    // Stable sort: equal values retain first-occurrence order.
    order.sort_by(|&a, &b| window[a].partial_cmp(&window[b]).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0usize; window.len()];
    for (rank, &position) in order.iter().enumerate() {
        ranks[position] = rank;
    }
    ranks
}
