//! ssa::validation — shared input guards for the SSA pipeline.
//!
//! Purpose
//! -------
//! Centralize the checks on series length, finiteness, and window length
//! so that embedding and fitting reject malformed inputs in one consistent
//! way before any matrix is allocated.
//!
//! Key behaviors
//! -------------
//! - [`validate_series`] enforces `n ≥ 2` and finiteness of every value.
//! - [`resolve_window`] applies the default window `n / 2` and enforces
//!   `1 ≤ window ≤ n`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Index semantics (monotone, evenly spaced timestamps) are the caller's
//!   concern; the series is taken to be positional.
//! - Both helpers are pure and never panic.
//!
//! Testing notes
//! -------------
//! - Unit tests cover every error branch and the default-window rule.

use crate::ssa::errors::{SSAError, SSAResult};

/// Validate that a series can be embedded.
///
/// Errors
/// ------
/// - `SSAError::InsufficientData` when `data.len() < 2`.
/// - `SSAError::InvalidData(value)` for the first NaN or ±∞ entry.
pub fn validate_series(data: &[f64]) -> SSAResult<()> {
    if data.len() < 2 {
        return Err(SSAError::InsufficientData { n: data.len() });
    }

    for &value in data {
        if !value.is_finite() {
            return Err(SSAError::InvalidData(value));
        }
    }

    Ok(())
}

/// Resolve the window length for a series of length `n`.
///
/// Parameters
/// ----------
/// - `n`: `usize`
///   Series length. Must be at least 2.
/// - `window`: `Option<usize>`
///   Requested window length `L`. `None` selects `n / 2` (integer
///   division), which is at least 1 whenever `n ≥ 2`.
///
/// Returns
/// -------
/// `SSAResult<usize>`
///   The window length to embed with.
///
/// Errors
/// ------
/// - `SSAError::InsufficientData` when `n < 2`.
/// - `SSAError::InvalidWindow` when the requested window is 0 or exceeds `n`.
///
/// Examples
/// --------
/// ```rust
/// # use rust_ssa::ssa::validation::resolve_window;
/// assert_eq!(resolve_window(10, None).unwrap(), 5);
/// assert_eq!(resolve_window(10, Some(3)).unwrap(), 3);
/// assert!(resolve_window(5, Some(6)).is_err());
/// ```
pub fn resolve_window(n: usize, window: Option<usize>) -> SSAResult<usize> {
    if n < 2 {
        return Err(SSAError::InsufficientData { n });
    }
    let window = window.unwrap_or(n / 2);
    if window == 0 || window > n {
        return Err(SSAError::InvalidWindow { window, n });
    }
    Ok(window)
}
