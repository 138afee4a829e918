//! rust_ssa — singular spectrum analysis with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the SSA decomposition to Python via the `_rust_ssa` extension
//! module. When the `python-bindings` feature is enabled, this module defines
//! the Python-facing class and submodule used by the `rust_ssa` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust module (`ssa`) as the public crate surface.
//! - Define the `SSA` `#[pyclass]` wrapper and the `#[pymodule]` initializer
//!   for the `_rust_ssa` Python extension.
//! - Create and register the Python submodule `decomposition` under
//!   `rust_ssa` so that dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work happens in [`ssa`]; this file performs only FFI glue,
//!   input conversion, and error mapping.
//! - The Python-visible class mirrors the invariants of
//!   [`SSADecomposition`](ssa::SSADecomposition): it is built fitted and is
//!   never mutated afterwards.
//!
//! Conventions
//! -----------
//! - Python-exposed classes live under `_rust_ssa.<submodule>` and are
//!   typically wrapped by thin pure-Python facades in the top-level
//!   `rust_ssa` package.
//! - Errors from core Rust code travel as [`SSAError`](ssa::SSAError) and are
//!   converted to `ValueError` at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend on [`ssa`] directly and can ignore the
//!   items guarded by the `python-bindings` feature.
//! - The Python packaging layer imports `_rust_ssa` and re-exports
//!   `rust_ssa.decomposition.SSA`.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in [`ssa`] and by
//!   `tests/integration_ssa_pipeline.rs`.

pub mod ssa;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray2};

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::PyValueError,
    prelude::*,
    types::{PyAny, PyDict},
};

#[cfg(feature = "python-bindings")]
use crate::{
    ssa::engine::{SSADecomposition, SSAEngine},
    utils::{extract_f64_array, extract_grouping, extract_options},
};

/// SSA — Python-facing wrapper for a fitted SSA decomposition.
///
/// Purpose
/// -------
/// Fit a series on construction and expose the singular spectrum and
/// grouped reconstructions to Python callers.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `SSA(data, /, window=None, svd_eps=None, svd_max_iter=None, residual_tolerance=None)`:
/// - `data`: `&PyAny`
///   One-dimensional array-like of finite `f64` values, length ≥ 2.
/// - `window`: `Option<usize>`
///   Window length `L`; defaults to `len(data) // 2`.
/// - `svd_eps`, `svd_max_iter`, `residual_tolerance`
///   Optional overrides of the [`SSAOptions`](ssa::SSAOptions) defaults.
///
/// Fields
/// ------
/// - `inner`: [`SSADecomposition`]
///   Fitted state answering every accessor and reconstruction.
///
/// Notes
/// -----
/// - Native Rust code should call [`SSAEngine::fit`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_ssa.decomposition", frozen)]
pub struct SSA {
    inner: SSADecomposition,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl SSA {
    #[new]
    #[pyo3(
        signature = (data, window = None, svd_eps = None, svd_max_iter = None, residual_tolerance = None),
        text_signature = "(data, /, window=None, svd_eps=None, svd_max_iter=None, \
                          residual_tolerance=None)"
    )]
    pub fn new<'py>(
        py: Python<'py>, data: &Bound<'py, PyAny>, window: Option<usize>, svd_eps: Option<f64>,
        svd_max_iter: Option<usize>, residual_tolerance: Option<f64>,
    ) -> PyResult<Self> {
        let options = extract_options(svd_eps, svd_max_iter, residual_tolerance)?;
        let arr = extract_f64_array(py, data)?;
        let series = arr.as_slice().map_err(|_| {
            PyValueError::new_err("data must be a 1-D contiguous float64 array or sequence")
        })?;

        let inner = SSAEngine::new(options).fit(series, window)?;
        Ok(SSA { inner })
    }

    /// Window length L.
    #[getter]
    pub fn window(&self) -> usize {
        self.inner.window()
    }

    /// Lag count K = n − L + 1.
    #[getter]
    pub fn lags(&self) -> usize {
        self.inner.lags()
    }

    /// Number of eigentriples d = min(L, K).
    #[getter]
    pub fn rank(&self) -> usize {
        self.inner.rank()
    }

    #[getter]
    pub fn singular_values(&self) -> Vec<f64> {
        self.inner.singular_values().to_vec()
    }

    #[getter]
    pub fn contributions(&self) -> Vec<f64> {
        self.inner.contributions().to_vec()
    }

    /// Reconstruct one series per group.
    ///
    /// `groups` maps names to eigentriple index lists; `None` returns the
    /// full reconstruction under the key `"reconstruction"`.
    #[pyo3(signature = (groups = None), text_signature = "(self, /, groups=None)")]
    pub fn reconstruct<'py>(
        &self, py: Python<'py>, groups: Option<&Bound<'py, PyDict>>,
    ) -> PyResult<Bound<'py, PyDict>> {
        let grouping = groups.map(extract_grouping).transpose()?;
        let parts = self.inner.reconstruct(grouping.as_ref())?;

        let out = PyDict::new(py);
        for component in parts {
            out.set_item(component.name, component.series.into_pyarray(py))?;
        }
        Ok(out)
    }

    /// d×d w-correlation matrix of the elementary reconstructions.
    pub fn wcorr<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.elementary_wcorr().into_pyarray(py)
    }
}

/// _rust_ssa — PyO3 module initializer for the Python extension.
///
/// Creates the `decomposition` submodule, attaches it to `_rust_ssa`, and
/// registers it in `sys.modules` as `rust_ssa.decomposition` so it is
/// importable by dotted path.
///
/// # Errors
/// - `PyErr` if creating the submodule or updating `sys.modules` fails.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_ssa<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let decomposition_mod = PyModule::new(_py, "decomposition")?;
    decomposition(_py, m, &decomposition_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("rust_ssa.decomposition", decomposition_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn decomposition<'py>(
    _py: Python, rust_ssa: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<SSA>()?;
    rust_ssa.add_submodule(m)?;
    Ok(())
}
