//! ssa::engine — fit and reconstruct: the public SSA workflow.
//!
//! Purpose
//! -------
//! Orchestrate embedding, spectral decomposition, grouping, and diagonal
//! averaging into two operations:
//!
//! ```text
//! fit(series, L)            -> SSADecomposition
//! reconstruct(decomp, G)    -> Reconstruction { name -> series }
//! ```
//!
//! Key behaviors
//! -------------
//! - [`SSAEngine`] carries only configuration ([`SSAOptions`]); it holds no
//!   per-series state and can be shared freely.
//! - [`SSAEngine::fit`] validates the series, resolves the window (default
//!   `n / 2`), embeds, and decomposes. The resulting [`SSADecomposition`] is
//!   immutable and owns everything later reconstructions need.
//! - [`SSAEngine::reconstruct`] (or [`SSADecomposition::reconstruct`])
//!   resolves the grouping, sums each group's eigentriples, and averages
//!   the anti-diagonals of each sum into a length-`n` series.
//!
//! Invariants & assumptions
//! ------------------------
//! - A decomposition exists only in the fitted state; there is no partial
//!   or mutable state and no teardown beyond dropping the value.
//! - Reconstruction is a pure function of `(decomposition, grouping)`:
//!   repeated calls give identical output and calls may run concurrently on
//!   a shared `&SSADecomposition`.
//! - With no grouping, the single reconstructed series equals the input
//!   series to floating-point tolerance.
//! - For a grouping that partitions `0..d` (plus residuals), the group
//!   series sum to the full reconstruction.
//!
//! Conventions
//! -----------
//! - The residual group is retained when
//!   `max |X_res| > residual_tolerance · max |X|`, with `X` the trajectory
//!   matrix and `X_res` the summed unclaimed eigentriples.
//! - Diagnostics go through `tracing` events; the host application decides
//!   whether and where they are recorded.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use rust_ssa::ssa::prelude::*;
//!
//! let series: Vec<f64> = (0..10).map(f64::from).collect();
//! let decomposition = SSAEngine::default().fit(&series, Some(3))?;
//! let grouping = Grouping::new().with_group("trend", [0, 1])?;
//! let parts = decomposition.reconstruct(Some(&grouping))?;
//! assert_eq!(parts.names().next(), Some("trend"));
//! # Ok::<(), SSAError>(())
//! ```
//!
//! Testing notes
//! -------------
//! - Unit tests below cover fit/reconstruct on small series, the residual
//!   tolerance, accessors, and w-correlations. The spec-level properties
//!   (completeness, additivity, idempotence, rank bound) are exercised in
//!   `tests/integration_ssa_pipeline.rs`.
use crate::ssa::{
    averaging::diagonal_average,
    decomposition::{SpectralDecomposition, decompose},
    embedding::{TrajectoryShape, embed},
    errors::SSAResult,
    grouping::{GroupKind, Grouping, group},
    options::SSAOptions,
    validation::{resolve_window, validate_series},
    wcorr::{wcorr_matrix, wcorr_weights},
};
use ndarray::{Array1, Array2, ArrayView1};
use std::collections::BTreeSet;

/// SSAEngine — configured entry point for fitting and reconstruction.
///
/// Fields
/// ------
/// - `options`: [`SSAOptions`]
///   Numerical settings copied into every decomposition this engine fits.
///
/// Notes
/// -----
/// - Stateless across calls; independent fits may run in parallel on the
///   same engine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SSAEngine {
    pub options: SSAOptions,
}

impl SSAEngine {
    pub fn new(options: SSAOptions) -> Self {
        SSAEngine { options }
    }

    /// fit — embed and decompose a series.
    ///
    /// Parameters
    /// ----------
    /// - `series`: `&[f64]`
    ///   Evenly spaced, gap-free observations; `n ≥ 2`, all finite.
    /// - `window`: `Option<usize>`
    ///   Window length `L` with `1 ≤ L ≤ n`; `None` selects `n / 2`.
    ///
    /// Returns
    /// -------
    /// `SSAResult<SSADecomposition>`
    ///   Immutable decomposition with `d = min(L, n − L + 1)` eigentriples.
    ///
    /// Errors
    /// ------
    /// - `SSAError::InsufficientData` / `SSAError::InvalidData` for a series
    ///   that is too short or holds NaN / ±∞.
    /// - `SSAError::InvalidWindow` for `L ∉ [1, n]`.
    /// - `SSAError::DecompositionFailed` if the SVD does not converge.
    pub fn fit(&self, series: &[f64], window: Option<usize>) -> SSAResult<SSADecomposition> {
        validate_series(series)?;
        let window = resolve_window(series.len(), window)?;
        let shape = TrajectoryShape::new(series.len(), window)?;

        let trajectory = embed(series, window)?;
        let spectrum = decompose(&trajectory, &self.options)?;
        let scale = trajectory.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));

        tracing::debug!(
            n = shape.n,
            window = shape.window,
            lags = shape.lags,
            rank = spectrum.rank(),
            "fitted SSA decomposition"
        );

        Ok(SSADecomposition {
            series: Array1::from(series.to_vec()),
            shape,
            trajectory,
            spectrum,
            scale,
            options: self.options,
        })
    }

    /// Reconstruct `decomposition` under `groups`; see
    /// [`SSADecomposition::reconstruct`].
    pub fn reconstruct(
        &self, decomposition: &SSADecomposition, groups: Option<&Grouping>,
    ) -> SSAResult<Reconstruction> {
        decomposition.reconstruct(groups)
    }
}

/// SSADecomposition — the fitted state of one `(series, window)` pair.
///
/// Purpose
/// -------
/// Hold the input series, its trajectory matrix, and the ordered SVD
/// factors, and answer reconstruction and diagnostic queries without ever
/// mutating them.
///
/// Fields
/// ------
/// - `series`: `Array1<f64>` — the fitted observations (length `n`).
/// - `shape`: [`TrajectoryShape`] — `(n, L, K)`.
/// - `trajectory`: `Array2<f64>` — the `L×K` trajectory matrix.
/// - `spectrum`: [`SpectralDecomposition`] — `d = min(L, K)` triples.
/// - `scale`: `f64` — `max |X|`, the reference for the residual tolerance.
/// - `options`: [`SSAOptions`] — settings of the engine that fitted it.
///
/// Invariants
/// ----------
/// - Fields are private and never change after `fit`.
/// - `spectrum.dim() == shape.dim()` and `spectrum.rank() ==
///   shape.rank_bound()`.
///
/// Notes
/// -----
/// - `Send + Sync`; share by reference across threads for concurrent
///   reconstructions.
#[derive(Debug, Clone, PartialEq)]
pub struct SSADecomposition {
    series: Array1<f64>,
    shape: TrajectoryShape,
    trajectory: Array2<f64>,
    spectrum: SpectralDecomposition,
    scale: f64,
    options: SSAOptions,
}

impl SSADecomposition {
    pub fn series(&self) -> &Array1<f64> {
        &self.series
    }

    pub fn shape(&self) -> TrajectoryShape {
        self.shape
    }

    /// Window length `L`.
    pub fn window(&self) -> usize {
        self.shape.window
    }

    /// Lag count `K = n − L + 1`.
    pub fn lags(&self) -> usize {
        self.shape.lags
    }

    /// Number of eigentriples `d = min(L, K)`.
    pub fn rank(&self) -> usize {
        self.spectrum.rank()
    }

    pub fn trajectory(&self) -> &Array2<f64> {
        &self.trajectory
    }

    pub fn spectrum(&self) -> &SpectralDecomposition {
        &self.spectrum
    }

    pub fn options(&self) -> &SSAOptions {
        &self.options
    }

    /// Singular values in descending order.
    pub fn singular_values(&self) -> &Array1<f64> {
        self.spectrum.singular_values()
    }

    pub fn contributions(&self) -> Array1<f64> {
        self.spectrum.contributions()
    }

    pub fn numerical_rank(&self) -> usize {
        self.spectrum.numerical_rank()
    }

    pub fn eigentriple(&self, index: usize) -> Option<Array2<f64>> {
        self.spectrum.eigentriple(index)
    }

    pub fn eigentriples(&self) -> Vec<Array2<f64>> {
        self.spectrum.eigentriples()
    }

    /// reconstruct — one series per resolved group.
    ///
    /// Parameters
    /// ----------
    /// - `groups`: `Option<&Grouping>`
    ///   `None` reconstructs the whole series as `"reconstruction"`.
    ///   Otherwise each named group is reconstructed in insertion order and
    ///   unclaimed eigentriples form a trailing `"residuals"` group unless
    ///   their sum is zero within tolerance.
    ///
    /// Returns
    /// -------
    /// `SSAResult<Reconstruction>`
    ///   Ordered components, each a length-`n` series.
    ///
    /// Errors
    /// ------
    /// - `SSAError::InvalidGroup` if a group references an index `≥ d`.
    ///   Raised before any matrix is summed; no partial result is returned.
    pub fn reconstruct(&self, groups: Option<&Grouping>) -> SSAResult<Reconstruction> {
        let threshold = self.options.residual_tolerance * self.scale;
        let resolved = group(self.rank(), groups, |residual| {
            let x_res = self.spectrum.sum_eigentriples(residual.iter().copied());
            x_res.iter().any(|v| v.abs() > threshold)
        })?;

        let components = resolved
            .into_iter()
            .map(|g| {
                let series = match g.kind {
                    // Every eigentriple: the trajectory itself, exactly.
                    GroupKind::Full => diagonal_average(self.trajectory.view()),
                    _ => self.reconstruct_indices(&g.indices),
                };
                ReconstructedComponent { name: g.name, indices: g.indices, kind: g.kind, series }
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            groups = ?components.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            "reconstructed SSA groups"
        );

        Ok(Reconstruction { components, shape: self.shape })
    }

    /// Elementary reconstructions: one length-`n` series per eigentriple.
    pub fn elementary_series(&self) -> Vec<Array1<f64>> {
        (0..self.rank()).map(|i| self.reconstruct_indices(&BTreeSet::from([i]))).collect()
    }

    /// `d×d` w-correlation matrix of the elementary reconstructions.
    pub fn elementary_wcorr(&self) -> Array2<f64> {
        let series = self.elementary_series();
        let views: Vec<ArrayView1<'_, f64>> = series.iter().map(|s| s.view()).collect();
        wcorr_matrix(&views, &wcorr_weights(&self.shape))
    }

    fn reconstruct_indices(&self, indices: &BTreeSet<usize>) -> Array1<f64> {
        let x_group = self.spectrum.sum_eigentriples(indices.iter().copied());
        diagonal_average(x_group.view())
    }
}

/// One reconstructed group.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconstructedComponent {
    pub name: String,
    pub indices: BTreeSet<usize>,
    pub kind: GroupKind,
    pub series: Array1<f64>,
}

/// Reconstruction — ordered mapping from group name to reconstructed series.
///
/// Order follows the grouping's insertion order with `"residuals"` last.
/// Produced fresh by every reconstruction call; owns its data.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconstruction {
    components: Vec<ReconstructedComponent>,
    shape: TrajectoryShape,
}

impl Reconstruction {
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Group names in output order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|c| c.name.as_str())
    }

    /// Series reconstructed for group `name`, if present.
    pub fn get(&self, name: &str) -> Option<&Array1<f64>> {
        self.components.iter().find(|c| c.name == name).map(|c| &c.series)
    }

    pub fn component(&self, name: &str) -> Option<&ReconstructedComponent> {
        self.components.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReconstructedComponent> {
        self.components.iter()
    }

    /// Elementwise sum of all components (length `n`).
    ///
    /// Equals the input series when the groups partition every eigentriple.
    pub fn total(&self) -> Array1<f64> {
        self.components.iter().fold(Array1::zeros(self.shape.n), |acc, c| acc + &c.series)
    }

    /// w-correlation matrix between the components, in output order.
    pub fn wcorr(&self) -> Array2<f64> {
        let views: Vec<ArrayView1<'_, f64>> =
            self.components.iter().map(|c| c.series.view()).collect();
        wcorr_matrix(&views, &wcorr_weights(&self.shape))
    }

    pub fn into_components(self) -> Vec<ReconstructedComponent> {
        self.components
    }
}

impl IntoIterator for Reconstruction {
    type Item = ReconstructedComponent;
    type IntoIter = std::vec::IntoIter<ReconstructedComponent>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ssa::{
        errors::SSAError,
        grouping::{FULL_RECONSTRUCTION, RESIDUALS},
    };
    use approx::assert_abs_diff_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `fit` defaults and accessor consistency.
    // - `reconstruct` with no grouping, with residuals kept and dropped,
    //   and with invalid indices.
    // - `Reconstruction` lookup helpers and w-correlations.
    //
    // They intentionally DO NOT cover:
    // - Property-style checks over many windows; see the integration tests.
    // -------------------------------------------------------------------------

    const TOL: f64 = 1e-9;

    fn harmonic_series(n: usize) -> Vec<f64> {
        (0..n)
            .map(|t| {
                let t = t as f64;
                1.0 + 0.02 * t + (std::f64::consts::TAU * t / 12.0).sin() + 0.2 * (1.7 * t).cos()
            })
            .collect()
    }

    #[test]
    // Purpose
    // -------
    // Verify that `fit` applies the default window and exposes a consistent
    // shape.
    //
    // Given
    // -----
    // - A series of length 30 and `window = None`.
    //
    // Expect
    // ------
    // - L = 15, K = 16, d = 15; trajectory and spectrum dimensions agree.
    fn fit_default_window_and_accessors() {
        // Arrange
        let series = harmonic_series(30);

        // Act
        let decomposition = SSAEngine::default().fit(&series, None).unwrap();

        // Assert
        assert_eq!(decomposition.window(), 15);
        assert_eq!(decomposition.lags(), 16);
        assert_eq!(decomposition.rank(), 15);
        assert_eq!(decomposition.trajectory().dim(), (15, 16));
        assert_eq!(decomposition.spectrum().dim(), (15, 16));
        assert_eq!(decomposition.singular_values().len(), 15);
        assert_eq!(decomposition.series().len(), 30);
    }

    #[test]
    // Purpose
    // -------
    // Check the canonical ramp example end to end.
    //
    // Given
    // -----
    // - series = [0, 1, …, 9], L = 3, no grouping.
    //
    // Expect
    // ------
    // - One "reconstruction" group equal to the input within 1e-9.
    fn reconstruct_without_groups_returns_input() {
        // Arrange
        let series: Vec<f64> = (0..10).map(f64::from).collect();
        let decomposition = SSAEngine::default().fit(&series, Some(3)).unwrap();

        // Act
        let parts = decomposition.reconstruct(None).unwrap();

        // Assert
        assert_eq!(parts.names().collect::<Vec<_>>(), vec![FULL_RECONSTRUCTION]);
        let rec = parts.get(FULL_RECONSTRUCTION).unwrap();
        assert_eq!(rec.len(), 10);
        for (&a, &b) in rec.iter().zip(&series) {
            assert_abs_diff_eq!(a, b, epsilon = TOL);
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure a residual group with signal is kept and reconstructs the
    // unclaimed part.
    //
    // Given
    // -----
    // - A generic series, L = 4 (d = 4), groups {"A": [0, 1]}.
    //
    // Expect
    // ------
    // - Groups ["A", "residuals"]; residual indices {2, 3}; A + residuals
    //   equals the input.
    fn reconstruct_keeps_nonzero_residuals() {
        // Arrange
        let series = harmonic_series(20);
        let decomposition = SSAEngine::default().fit(&series, Some(4)).unwrap();
        let grouping = Grouping::new().with_group("A", [0, 1]).unwrap();

        // Act
        let parts = decomposition.reconstruct(Some(&grouping)).unwrap();

        // Assert
        assert_eq!(parts.names().collect::<Vec<_>>(), vec!["A", RESIDUALS]);
        let residual = parts.component(RESIDUALS).unwrap();
        assert_eq!(residual.indices, BTreeSet::from([2, 3]));
        assert_eq!(residual.kind, GroupKind::Residual);
        for (&a, &b) in parts.total().iter().zip(&series) {
            assert_abs_diff_eq!(a, b, epsilon = TOL);
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure numerically-zero residuals are omitted.
    //
    // Given
    // -----
    // - A ramp (trajectory rank 2) with L = 3, so d = 3 and σ₃ ≈ 0;
    //   groups {"trend": [0, 1]}.
    //
    // Expect
    // ------
    // - Only "trend" is returned, and it equals the ramp.
    fn reconstruct_omits_zero_residuals() {
        // Arrange
        let series: Vec<f64> = (0..10).map(f64::from).collect();
        let decomposition = SSAEngine::default().fit(&series, Some(3)).unwrap();
        let grouping = Grouping::new().with_group("trend", [0, 1]).unwrap();

        // Act
        let parts = decomposition.reconstruct(Some(&grouping)).unwrap();

        // Assert
        assert_eq!(parts.names().collect::<Vec<_>>(), vec!["trend"]);
        for (&a, &b) in parts.get("trend").unwrap().iter().zip(&series) {
            assert_abs_diff_eq!(a, b, epsilon = TOL);
        }
    }

    #[test]
    fn reconstruct_rejects_index_beyond_rank() {
        let decomposition = SSAEngine::default().fit(&harmonic_series(12), Some(3)).unwrap();
        let grouping = Grouping::new().with_group("bad", [0, 3]).unwrap();
        assert_eq!(
            decomposition.reconstruct(Some(&grouping)),
            Err(SSAError::InvalidGroup { name: "bad".to_string(), index: 3, rank: 3 })
        );
    }

    #[test]
    fn fit_rejects_window_longer_than_series() {
        let result = SSAEngine::default().fit(&[1.0, 2.0, 3.0, 4.0, 5.0], Some(6));
        assert_eq!(result, Err(SSAError::InvalidWindow { window: 6, n: 5 }));
    }

    #[test]
    // Purpose
    // -------
    // Check elementary w-correlations: symmetric, unit diagonal for
    // non-degenerate components, entries within [-1, 1].
    //
    // Given
    // -----
    // - A harmonic series of length 48 with L = 12.
    //
    // Expect
    // ------
    // - A 12×12 symmetric matrix bounded by 1 in absolute value.
    fn elementary_wcorr_is_symmetric_and_bounded() {
        // Arrange
        let decomposition = SSAEngine::default().fit(&harmonic_series(48), Some(12)).unwrap();

        // Act
        let rho = decomposition.elementary_wcorr();

        // Assert
        assert_eq!(rho.dim(), (12, 12));
        assert_eq!(rho[[0, 0]], 1.0);
        for ((i, j), &r) in rho.indexed_iter() {
            assert!(r.abs() <= 1.0);
            assert_eq!(r, rho[[j, i]]);
        }
    }

    #[test]
    fn reconstruction_wcorr_matches_component_count() {
        let decomposition = SSAEngine::default().fit(&harmonic_series(36), Some(12)).unwrap();
        let grouping = Grouping::from_pairs([("trend", vec![0]), ("season", vec![1, 2])]).unwrap();
        let parts = decomposition.reconstruct(Some(&grouping)).unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts.wcorr().dim(), (3, 3));
    }
}
