//! utils — Python-to-Rust conversion helpers for the PyO3 bindings.
//!
//! Everything here is compiled only with the `python-bindings` feature and
//! returns `PyResult`, so callers in `lib.rs` can use `?` directly.
#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::PyTypeError,
    prelude::*,
    types::{PyAny, PyDict},
};

#[cfg(feature = "python-bindings")]
use crate::ssa::{
    grouping::Grouping,
    options::{DEFAULT_RESIDUAL_TOLERANCE, DEFAULT_SVD_EPS, SSAOptions},
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

/// Coerce a 1-D numpy array, pandas Series, or float sequence into a
/// read-only contiguous `float64` array.
///
/// # Errors
/// - `TypeError` if the object is none of the accepted kinds.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Build a [`Grouping`] from a `dict[str, Sequence[int]]`, keeping the
/// dict's insertion order.
///
/// # Errors
/// - `TypeError` for non-string keys or values that are not integer
///   sequences.
/// - `ValueError` (via `SSAError`) for the reserved name `"residuals"`.
#[cfg(feature = "python-bindings")]
pub fn extract_grouping(groups: &Bound<'_, PyDict>) -> PyResult<Grouping> {
    let mut grouping = Grouping::new();
    for (key, value) in groups.iter() {
        let name: String = key
            .extract()
            .map_err(|_| PyTypeError::new_err("group names must be str"))?;
        let indices: Vec<usize> = value.extract().map_err(|_| {
            PyTypeError::new_err(format!(
                "group {name:?} must map to a sequence of non-negative ints"
            ))
        })?;
        grouping.insert(name, indices)?;
    }
    Ok(grouping)
}

/// Merge optional Python overrides with the [`SSAOptions`] defaults.
///
/// # Errors
/// - `ValueError` if the resulting options fail validation.
#[cfg(feature = "python-bindings")]
pub fn extract_options(
    svd_eps: Option<f64>, svd_max_iter: Option<usize>, residual_tolerance: Option<f64>,
) -> PyResult<SSAOptions> {
    let opts = SSAOptions::new(
        svd_eps.unwrap_or(DEFAULT_SVD_EPS),
        svd_max_iter.unwrap_or(0),
        residual_tolerance.unwrap_or(DEFAULT_RESIDUAL_TOLERANCE),
    )?;
    Ok(opts)
}
