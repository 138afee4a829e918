//! ssa — singular spectrum analysis of a univariate series.
//!
//! Purpose
//! -------
//! Decompose an evenly spaced series into additive components (trend,
//! oscillations, noise) without a parametric model. The pipeline is:
//!
//! ```text
//! series ──embed──▶ X (L×K) ──SVD──▶ {(σᵢ, uᵢ, vᵢ)} ──group──▶ {X_I}
//!        ◀─────────────── diagonal average ───────────────────┘
//! ```
//!
//! Key behaviors
//! -------------
//! - [`embedding`] builds the Hankel trajectory matrix `X[i, j] = f[i + j]`.
//! - [`decomposition`] computes the ordered SVD of `X` and exposes its
//!   rank-1 eigentriples, contributions, and numerical rank.
//! - [`grouping`] resolves named eigentriple index groups and the implicit
//!   `"residuals"` group.
//! - [`averaging`] maps any `L×K` matrix back to a length-`n` series.
//! - [`engine`] ties these together behind [`SSAEngine::fit`] and
//!   [`SSADecomposition::reconstruct`].
//! - [`wcorr`] measures separability of reconstructed components.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are finite, evenly spaced, gap-free real values with `n ≥ 2`;
//!   the window satisfies `1 ≤ L ≤ n`. Both are checked in [`validation`]
//!   before any matrix is built.
//! - Every failure is reported as an [`SSAError`] through [`SSAResult`];
//!   panics indicate programming errors only.
//! - All fitted state is immutable; reconstruction never mutates the
//!   decomposition.
//!
//! Conventions
//! -----------
//! - Eigentriples are indexed from 0 in order of non-increasing singular
//!   value.
//! - Numerical settings (SVD tolerance and iteration cap, residual
//!   tolerance) live in [`SSAOptions`].
//! - Diagnostics are emitted as `tracing` events at `debug`/`trace` level.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use rust_ssa::ssa::prelude::*;
//!
//! let series: Vec<f64> = (0..40).map(|t| (t as f64 * 0.5).sin() + 0.1 * t as f64).collect();
//! let decomposition = SSAEngine::default().fit(&series, None)?;
//! let full = decomposition.reconstruct(None)?;
//! assert_eq!(full.get("reconstruction").map(|s| s.len()), Some(40));
//! # Ok::<(), SSAError>(())
//! ```
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its own operation.
//! - `tests/integration_ssa_pipeline.rs` checks the end-to-end properties:
//!   completeness, additivity over partitions, rank bound, idempotence,
//!   concurrent use, and log capture.

pub mod averaging;
pub mod decomposition;
pub mod embedding;
pub mod engine;
pub mod errors;
pub mod grouping;
pub mod options;
pub mod validation;
pub mod wcorr;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::averaging::diagonal_average;
pub use self::decomposition::{SpectralDecomposition, decompose};
pub use self::embedding::{TrajectoryShape, embed};
pub use self::engine::{ReconstructedComponent, Reconstruction, SSADecomposition, SSAEngine};
pub use self::errors::{SSAError, SSAResult};
pub use self::grouping::{FULL_RECONSTRUCTION, GroupKind, Grouping, RESIDUALS, ResolvedGroup, group};
pub use self::options::SSAOptions;
pub use self::validation::{resolve_window, validate_series};
pub use self::wcorr::{wcorr_matrix, wcorr_weights};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_ssa::ssa::prelude::*;
//
// to import the fit/reconstruct surface in a single line.

pub mod prelude {
    pub use super::engine::{Reconstruction, SSADecomposition, SSAEngine};
    pub use super::errors::{SSAError, SSAResult};
    pub use super::grouping::Grouping;
    pub use super::options::SSAOptions;
}
