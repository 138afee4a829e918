//! ssa::wcorr — weighted correlation between reconstructed series.
//!
//! Purpose
//! -------
//! Quantify how well two reconstructed components are separated. Two
//! series are w-orthogonal when their trajectory matrices are orthogonal in
//! the Frobenius inner product; the w-correlation normalizes that inner
//! product to `[-1, 1]`. Near-zero off-diagonal entries suggest a grouping
//! that separates components cleanly; large entries suggest eigentriples
//! that belong to the same group.
//!
//! Key behaviors
//! -------------
//! - [`wcorr_weights`] returns `w_t = min(t + 1, L, K, n − t)`, the number of
//!   times series position `t` appears in the trajectory matrix.
//! - [`wcorr_matrix`] returns the symmetric matrix
//!   `ρ_ab = (F_a, F_b)_w / (‖F_a‖_w · ‖F_b‖_w)` with
//!   `(F, G)_w = Σ_t w_t F_t G_t`.
//!
//! Invariants & assumptions
//! ------------------------
//! - All series share the length `n` of the weights.
//! - Any pair involving a series of zero w-norm has correlation `0.0`,
//!   including that series' diagonal entry; every other diagonal entry is
//!   `1.0`.
//!
//! Downstream usage
//! ----------------
//! - `SSADecomposition::elementary_wcorr` applies this to the `d` elementary
//!   reconstructions; `Reconstruction::wcorr` applies it to grouped ones.
use crate::ssa::{averaging::anti_diagonal_len, embedding::TrajectoryShape};
use ndarray::{Array1, Array2, ArrayView1};

/// Weights `w_t = min(t + 1, L, K, n − t)` for `t = 0, …, n − 1`.
pub fn wcorr_weights(shape: &TrajectoryShape) -> Array1<f64> {
    Array1::from_iter((0..shape.n).map(|t| anti_diagonal_len(t, shape.window, shape.lags) as f64))
}

/// Weighted correlation matrix of `series` under `weights`.
///
/// # Panics
/// - If a series' length differs from `weights.len()` (ndarray shape
///   mismatch in the elementwise product).
pub fn wcorr_matrix(series: &[ArrayView1<'_, f64>], weights: &Array1<f64>) -> Array2<f64> {
    let m = series.len();
    let norms: Vec<f64> = series.iter().map(|f| w_inner(f, f, weights).sqrt()).collect();

    let mut rho = Array2::<f64>::zeros((m, m));
    for a in 0..m {
        if norms[a] == 0.0 {
            continue;
        }
        rho[[a, a]] = 1.0;
        for b in (a + 1)..m {
            if norms[b] == 0.0 {
                continue;
            }
            let r = (w_inner(&series[a], &series[b], weights) / (norms[a] * norms[b]))
                .clamp(-1.0, 1.0);
            rho[[a, b]] = r;
            rho[[b, a]] = r;
        }
    }
    rho
}

fn w_inner(f: &ArrayView1<'_, f64>, g: &ArrayView1<'_, f64>, weights: &Array1<f64>) -> f64 {
    (f * g * weights).sum()
}
