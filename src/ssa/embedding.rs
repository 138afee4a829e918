//! Trajectory embedding: a length-`n` series as an `L×K` matrix of lagged windows.
//!
//! With window `L` and `K = n − L + 1` lags, column `j` of the trajectory
//! matrix is `series[j..j + L]`, so element `(i, j)` is `series[i + j]` and
//! every anti-diagonal `i + j = const` holds a single series value.
use crate::ssa::{
    errors::SSAResult,
    validation::{resolve_window, validate_series},
};
use ndarray::Array2;

/// Dimensions of a trajectory matrix.
///
/// - `n`: series length
/// - `window`: `L`, number of rows
/// - `lags`: `K = n − L + 1`, number of columns
///
/// Invariant: `1 ≤ window ≤ n` and `window + lags == n + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrajectoryShape {
    pub n: usize,
    pub window: usize,
    pub lags: usize,
}

impl TrajectoryShape {
    /// Validate `(n, window)` and derive the lag count.
    ///
    /// # Errors
    /// - [`SSAError::InsufficientData`](crate::ssa::errors::SSAError::InsufficientData) if `n < 2`.
    /// - [`SSAError::InvalidWindow`](crate::ssa::errors::SSAError::InvalidWindow) if `window == 0`
    ///   or `window > n`.
    pub fn new(n: usize, window: usize) -> SSAResult<Self> {
        let window = resolve_window(n, Some(window))?;
        Ok(TrajectoryShape { n, window, lags: n - window + 1 })
    }

    /// Number of eigentriples a full SVD produces: `min(L, K)`.
    pub fn rank_bound(&self) -> usize {
        self.window.min(self.lags)
    }

    /// `(L, K)`, matching `ndarray`'s `dim()` of the trajectory matrix.
    pub fn dim(&self) -> (usize, usize) {
        (self.window, self.lags)
    }
}

/// Embed `series` into its `L×K` trajectory matrix.
///
/// # Errors
/// - `InsufficientData` / `InvalidData` if the series is shorter than 2 or
///   holds a non-finite value.
/// - `InvalidWindow` if `window ∉ [1, n]`.
///
/// # Example
/// ```rust
/// # use rust_ssa::ssa::embedding::embed;
/// let x = embed(&[0.0, 1.0, 2.0, 3.0], 2).unwrap();
/// assert_eq!(x.dim(), (2, 3));
/// assert_eq!(x[[1, 2]], 3.0);
/// ```
pub fn embed(series: &[f64], window: usize) -> SSAResult<Array2<f64>> {
    validate_series(series)?;
    let shape = TrajectoryShape::new(series.len(), window)?;
    Ok(Array2::from_shape_fn(shape.dim(), |(i, j)| series[i + j]))
}
