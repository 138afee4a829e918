//! SSA options — numerical configuration for decomposition and grouping.
//!
//! Purpose
//! -------
//! Collect the numerical knobs of the SSA pipeline in one validated value:
//! the SVD convergence threshold and iteration cap, and the tolerance used
//! to decide whether the implicit residual group carries any signal.
//!
//! Key behaviors
//! -------------
//! - [`SSAOptions::new`] validates every field and returns an
//!   [`SSAError::InvalidOption`] naming the offending knob.
//! - [`SSAOptions::default`] reproduces the settings used by
//!   `nalgebra::DMatrix::svd` (`5·ε`, no iteration cap) and a relative
//!   residual tolerance of `1e-10`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `svd_eps` is finite and strictly positive.
//! - `svd_max_iter == 0` means "iterate until convergence", following the
//!   `nalgebra` convention; any positive value caps the number of QR sweeps.
//! - `residual_tolerance` is finite and non-negative. It is *relative*: the
//!   residual matrix counts as zero when `max |x| ≤ residual_tolerance ·
//!   max |trajectory|`.
//!
//! Downstream usage
//! ----------------
//! - Pass to [`SSAEngine::new`](crate::ssa::engine::SSAEngine::new); every
//!   decomposition produced by that engine carries a copy.
//!
//! Testing notes
//! -------------
//! - Unit tests verify defaults, field preservation, and each rejection.

use crate::ssa::errors::{SSAError, SSAResult};

/// Default relative tolerance below which the residual group is omitted.
pub const DEFAULT_RESIDUAL_TOLERANCE: f64 = 1e-10;

/// Default SVD convergence threshold (matches `nalgebra`'s `svd`).
pub const DEFAULT_SVD_EPS: f64 = 5.0 * f64::EPSILON;

/// SSAOptions — numerical configuration for an SSA engine.
///
/// Fields
/// ------
/// - `svd_eps`: `f64`
///   Convergence threshold handed to `nalgebra`'s bidiagonal QR iteration.
/// - `svd_max_iter`: `usize`
///   Maximum number of QR sweeps; `0` disables the cap.
/// - `residual_tolerance`: `f64`
///   Relative threshold for treating the summed residual matrix as zero.
///
/// Notes
/// -----
/// - Small and `Copy`; engines and decompositions store it by value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SSAOptions {
    pub svd_eps: f64,
    pub svd_max_iter: usize,
    pub residual_tolerance: f64,
}

impl SSAOptions {
    /// Construct validated options.
    ///
    /// # Errors
    /// - [`SSAError::InvalidOption`] if `svd_eps` is not finite and positive.
    /// - [`SSAError::InvalidOption`] if `residual_tolerance` is negative or
    ///   not finite.
    pub fn new(svd_eps: f64, svd_max_iter: usize, residual_tolerance: f64) -> SSAResult<Self> {
        if !svd_eps.is_finite() || svd_eps <= 0.0 {
            return Err(SSAError::InvalidOption {
                name: "svd_eps",
                value: svd_eps,
                reason: "SVD tolerance must be finite and strictly positive.",
            });
        }
        if !residual_tolerance.is_finite() || residual_tolerance < 0.0 {
            return Err(SSAError::InvalidOption {
                name: "residual_tolerance",
                value: residual_tolerance,
                reason: "Residual tolerance must be finite and non-negative.",
            });
        }
        Ok(SSAOptions { svd_eps, svd_max_iter, residual_tolerance })
    }
}

impl Default for SSAOptions {
    fn default() -> Self {
        SSAOptions {
            svd_eps: DEFAULT_SVD_EPS,
            svd_max_iter: 0,
            residual_tolerance: DEFAULT_RESIDUAL_TOLERANCE,
        }
    }
}
