//! ssa::decomposition — SVD of the trajectory matrix and its eigentriples.
//!
//! Purpose
//! -------
//! Factor an `L×K` trajectory matrix `X` as `X = U · diag(σ) · Vᵀ` and expose
//! the rank-one *eigentriples* `X_i = σ_i · u_i v_iᵀ` whose sum reproduces `X`.
//! This is the only step of SSA that calls into dense linear algebra.
//!
//! Key behaviors
//! -------------
//! - [`decompose`] copies `X` from `ndarray` into a `nalgebra::DMatrix`, runs
//!   `try_svd` with the engine's tolerance and iteration cap, and copies the
//!   factors back into `ndarray` storage in descending singular-value order.
//! - [`SpectralDecomposition::sum_eigentriples`] forms `Σ_{i∈G} X_i` as one
//!   product `U_G · diag(σ_G) · V_Gᵀ` instead of materializing each term.
//! - Diagnostics: [`contributions`](SpectralDecomposition::contributions)
//!   (σ_i² / Σσ²) and [`numerical_rank`](SpectralDecomposition::numerical_rank).
//!
//! Invariants & assumptions
//! ------------------------
//! - The full thin SVD is kept: `d = min(L, K)` triples, never truncated to
//!   the algebraic rank. Near-zero singular values still yield valid (if
//!   negligible) eigentriples.
//! - `singular_values` is non-increasing and non-negative.
//! - An eigentriple whose singular value is exactly zero is the zero matrix.
//! - `Σ_i X_i = X` to floating-point tolerance (relative error well below
//!   1e-9 for well-conditioned inputs).
//!
//! Conventions
//! -----------
//! - `u` is `L×d` (columns are left singular vectors), `vt` is `d×K` (rows
//!   are right singular vectors), matching the `U · S · Vᵀ` convention.
//! - Indices `0..d` refer to positions after sorting by descending σ.
//!
//! Downstream usage
//! ----------------
//! - The engine stores one [`SpectralDecomposition`] per fit and asks it for
//!   grouped sums during reconstruction.
//!
//! Testing notes
//! -------------
//! - Unit tests check the reconstruction identity, ordering, orthonormality
//!   of `u`, the zero-σ rule, diagnostics, and the non-convergence path.
use crate::ssa::{
    errors::{SSAError, SSAResult},
    options::SSAOptions,
};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2, ArrayView1, Axis};

/// SpectralDecomposition — ordered SVD factors of a trajectory matrix.
///
/// Fields
/// ------
/// - `u`: `Array2<f64>` (`L×d`)
///   Orthonormal left singular vectors.
/// - `singular_values`: `Array1<f64>` (`d`)
///   Non-increasing, non-negative singular values.
/// - `vt`: `Array2<f64>` (`d×K`)
///   Orthonormal right singular vectors stored as rows.
///
/// Invariants
/// ----------
/// - `u.ncols() == singular_values.len() == vt.nrows() == min(L, K)`.
///
/// Performance
/// -----------
/// - Storage is `O((L + K)·d)`; individual eigentriples (`O(L·K)` each) are
///   only built on request.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralDecomposition {
    u: Array2<f64>,
    singular_values: Array1<f64>,
    vt: Array2<f64>,
}

impl SpectralDecomposition {
    pub(crate) fn from_parts(u: Array2<f64>, singular_values: Array1<f64>, vt: Array2<f64>) -> Self {
        debug_assert_eq!(u.ncols(), singular_values.len());
        debug_assert_eq!(vt.nrows(), singular_values.len());
        SpectralDecomposition { u, singular_values, vt }
    }

    /// Number of eigentriples `d = min(L, K)`.
    pub fn rank(&self) -> usize {
        self.singular_values.len()
    }

    /// `(L, K)` of the decomposed matrix.
    pub fn dim(&self) -> (usize, usize) {
        (self.u.nrows(), self.vt.ncols())
    }

    pub fn u(&self) -> &Array2<f64> {
        &self.u
    }

    pub fn singular_values(&self) -> &Array1<f64> {
        &self.singular_values
    }

    pub fn vt(&self) -> &Array2<f64> {
        &self.vt
    }

    /// Left singular vector `u_i`, or `None` if `index ≥ d`.
    pub fn left_vector(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.rank()).then(|| self.u.column(index))
    }

    /// Right singular vector `v_i`, or `None` if `index ≥ d`.
    pub fn right_vector(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.rank()).then(|| self.vt.row(index))
    }

    /// Eigentriple `X_i = σ_i · u_i v_iᵀ`, or `None` if `index ≥ d`.
    ///
    /// Returns the zero `L×K` matrix when `σ_i == 0`.
    pub fn eigentriple(&self, index: usize) -> Option<Array2<f64>> {
        (index < self.rank()).then(|| self.sum_eigentriples([index]))
    }

    /// All `d` eigentriples in descending singular-value order.
    ///
    /// Allocates `d` matrices of shape `L×K`; prefer
    /// [`sum_eigentriples`](Self::sum_eigentriples) when only grouped sums
    /// are needed.
    pub fn eigentriples(&self) -> Vec<Array2<f64>> {
        (0..self.rank()).map(|i| self.sum_eigentriples([i])).collect()
    }

    /// sum_eigentriples — grouped sum `Σ_{i∈G} σ_i · u_i v_iᵀ`.
    ///
    /// Parameters
    /// ----------
    /// - `indices`: `IntoIterator<Item = usize>`
    ///   Eigentriple indices to include. Each must be `< d`; repeated
    ///   indices are counted once per occurrence.
    ///
    /// Returns
    /// -------
    /// `Array2<f64>`
    ///   The `L×K` sum. An empty index set yields the zero matrix.
    ///
    /// Panics
    /// ------
    /// - Panics if an index is `≥ d`. Public entry points validate group
    ///   indices before calling this.
    ///
    /// Notes
    /// -----
    /// - Computed as `(U_G · diag(σ_G)) · V_Gᵀ`, one `L×|G|` by `|G|×K`
    ///   product, which equals the term-by-term sum of eigentriples.
    pub fn sum_eigentriples<I>(&self, indices: I) -> Array2<f64>
    where
        I: IntoIterator<Item = usize>,
    {
        let idx: Vec<usize> = indices.into_iter().collect();
        if idx.is_empty() {
            return Array2::zeros(self.dim());
        }
        let mut weighted_u = self.u.select(Axis(1), &idx);
        for (mut column, &k) in weighted_u.columns_mut().into_iter().zip(&idx) {
            column *= self.singular_values[k];
        }
        weighted_u.dot(&self.vt.select(Axis(0), &idx))
    }

    /// Share of `‖X‖²_F` carried by each eigentriple: `σ_i² / Σ_j σ_j²`.
    ///
    /// All zeros when every singular value is zero.
    pub fn contributions(&self) -> Array1<f64> {
        let total: f64 = self.singular_values.iter().map(|s| s * s).sum();
        if total == 0.0 {
            return Array1::zeros(self.rank());
        }
        self.singular_values.mapv(|s| s * s / total)
    }

    /// Numerical rank of the decomposed matrix.
    ///
    /// Counts singular values above `σ_max · max(L, K) · ε`, the usual
    /// matrix-rank threshold. Always `≤ d`.
    pub fn numerical_rank(&self) -> usize {
        let (rows, cols) = self.dim();
        let sigma_max = self.singular_values.iter().copied().fold(0.0_f64, f64::max);
        let tol = sigma_max * rows.max(cols) as f64 * f64::EPSILON;
        self.singular_values.iter().filter(|&&s| s > tol).count()
    }
}

/// decompose — thin SVD of a trajectory matrix.
///
/// Purpose
/// -------
/// Compute `X = U · diag(σ) · Vᵀ` with `nalgebra` and return the factors in
/// descending singular-value order as `ndarray` containers.
///
/// Parameters
/// ----------
/// - `trajectory`: `&Array2<f64>`
///   `L×K` trajectory matrix with finite entries.
/// - `options`: `&SSAOptions`
///   Supplies `svd_eps` and `svd_max_iter` for `DMatrix::try_svd`.
///
/// Returns
/// -------
/// `SSAResult<SpectralDecomposition>`
///   `d = min(L, K)` triples, untruncated.
///
/// Errors
/// ------
/// - `SSAError::DecompositionFailed`
///   `nalgebra` reports non-convergence within `svd_max_iter` sweeps, or did
///   not return both singular-vector factors. Not retried.
///
/// Notes
/// -----
/// - Singular values are re-sorted explicitly with a stable sort, so ties
///   keep `nalgebra`'s relative order.
pub fn decompose(
    trajectory: &Array2<f64>, options: &SSAOptions,
) -> SSAResult<SpectralDecomposition> {
    let (rows, cols) = trajectory.dim();
    let failed = SSAError::DecompositionFailed { rows, cols, max_iter: options.svd_max_iter };

    let svd = to_dmatrix(trajectory)
        .try_svd(true, true, options.svd_eps, options.svd_max_iter)
        .ok_or_else(|| failed.clone())?;
    let (u, v_t) = match (svd.u, svd.v_t) {
        (Some(u), Some(v_t)) => (u, v_t),
        _ => return Err(failed),
    };
    let sigma = svd.singular_values;
    let d = sigma.len();

    let mut order: Vec<usize> = (0..d).collect();
    order.sort_by(|&a, &b| sigma[b].total_cmp(&sigma[a]));

    let singular_values = Array1::from_iter(order.iter().map(|&k| sigma[k]));
    let u = Array2::from_shape_fn((rows, d), |(i, c)| u[(i, order[c])]);
    let vt = Array2::from_shape_fn((d, cols), |(r, j)| v_t[(order[r], j)]);

    Ok(SpectralDecomposition::from_parts(u, singular_values, vt))
}

// ---- Helper methods ----

/// to_dmatrix — copy an `ndarray` matrix into a `nalgebra::DMatrix`.
///
/// Bridges the two linear-algebra crates by building the column-major
/// `DMatrix` element by element; no values are altered.
fn to_dmatrix(matrix: &Array2<f64>) -> DMatrix<f64> {
    DMatrix::from_fn(matrix.nrows(), matrix.ncols(), |i, j| matrix[[i, j]])
}
