//! ssa::grouping — named eigentriple groups and their resolution.
//!
//! Purpose
//! -------
//! Represent a caller's grouping of eigentriple indices into named
//! components (trend, seasonal, …) as an explicit, ordered type, and resolve
//! it against a concrete decomposition rank into the list of groups to
//! reconstruct, including the implicit residual group.
//!
//! Key behaviors
//! -------------
//! - [`Grouping`] stores `name → BTreeSet<usize>` in insertion order,
//!   rejecting duplicate names and the reserved name [`RESIDUALS`].
//! - [`group`] validates every index against the rank `d` before any
//!   computation, appends a [`RESIDUALS`] group for unclaimed indices when
//!   the caller-supplied predicate reports a non-zero residual sum, and
//!   falls back to a single [`FULL_RECONSTRUCTION`] group when no grouping
//!   is given.
//!
//! Invariants & assumptions
//! ------------------------
//! - Explicit groups may overlap. Several groups can claim the same
//!   eigentriple to build overlapping exploratory views; the grouping is
//!   then not a partition and the group reconstructions no longer add up to
//!   the series. Overlap is reported at `debug` level, never rejected.
//! - Output order is caller insertion order, with [`RESIDUALS`] last.
//! - An empty explicit group is allowed and reconstructs to zeros.
//! - Resolution is pure: the same `(d, grouping)` always resolves to the
//!   same groups.
//!
//! Conventions
//! -----------
//! - Indices refer to eigentriples in descending singular-value order.
//! - The residual predicate receives the (non-empty) residual index set;
//!   the engine implements it by summing those eigentriples and comparing
//!   against its relative tolerance.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the default group, validation failures, overlap,
//!   ordering, and both residual outcomes using stub predicates.
use crate::ssa::errors::{SSAError, SSAResult};
use std::collections::BTreeSet;

/// Name of the implicit group of unclaimed eigentriples.
pub const RESIDUALS: &str = "residuals";

/// Name of the single group produced when no grouping is supplied.
pub const FULL_RECONSTRUCTION: &str = "reconstruction";

/// Grouping — ordered, named sets of eigentriple indices.
///
/// Invariants
/// ----------
/// - Names are unique and never equal to [`RESIDUALS`].
/// - Indices are *not* checked here; they are validated against the rank
///   when the grouping is resolved by [`group`].
///
/// Examples
/// --------
/// ```rust
/// # use rust_ssa::ssa::grouping::Grouping;
/// let grouping = Grouping::new()
///     .with_group("trend", [0, 3])?
///     .with_group("season", [1, 2])?;
/// assert_eq!(grouping.names().collect::<Vec<_>>(), vec!["trend", "season"]);
/// # Ok::<(), rust_ssa::ssa::SSAError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grouping {
    groups: Vec<(String, BTreeSet<usize>)>,
}

impl Grouping {
    pub fn new() -> Self {
        Grouping::default()
    }

    /// Append a named group.
    ///
    /// # Errors
    /// - [`SSAError::ReservedGroupName`] if `name == "residuals"`.
    /// - [`SSAError::DuplicateGroupName`] if `name` is already present.
    pub fn insert<S, I>(&mut self, name: S, indices: I) -> SSAResult<()>
    where
        S: Into<String>,
        I: IntoIterator<Item = usize>,
    {
        let name = name.into();
        if name == RESIDUALS {
            return Err(SSAError::ReservedGroupName(name));
        }
        if self.get(&name).is_some() {
            return Err(SSAError::DuplicateGroupName(name));
        }
        self.groups.push((name, indices.into_iter().collect()));
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_group<S, I>(mut self, name: S, indices: I) -> SSAResult<Self>
    where
        S: Into<String>,
        I: IntoIterator<Item = usize>,
    {
        self.insert(name, indices)?;
        Ok(self)
    }

    /// Build a grouping from `(name, indices)` pairs, keeping their order.
    pub fn from_pairs<P, S, I>(pairs: P) -> SSAResult<Self>
    where
        P: IntoIterator<Item = (S, I)>,
        S: Into<String>,
        I: IntoIterator<Item = usize>,
    {
        let mut grouping = Grouping::new();
        for (name, indices) in pairs {
            grouping.insert(name, indices)?;
        }
        Ok(grouping)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&BTreeSet<usize>> {
        self.groups.iter().find(|(n, _)| n == name).map(|(_, idx)| idx)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<usize>)> {
        self.groups.iter().map(|(n, idx)| (n.as_str(), idx))
    }

    /// Union of all explicit index sets.
    pub fn claimed(&self) -> BTreeSet<usize> {
        self.groups.iter().flat_map(|(_, idx)| idx.iter().copied()).collect()
    }

    /// `true` when at least one index belongs to two or more groups.
    pub fn has_overlap(&self) -> bool {
        let total: usize = self.groups.iter().map(|(_, idx)| idx.len()).sum();
        total != self.claimed().len()
    }

    /// Check every index against the decomposition rank `d`.
    ///
    /// # Errors
    /// - [`SSAError::InvalidGroup`] for the first group (in insertion order)
    ///   holding an index `≥ rank`, reporting its largest offending index.
    pub fn validate(&self, rank: usize) -> SSAResult<()> {
        for (name, indices) in &self.groups {
            if let Some(&index) = indices.last() {
                if index >= rank {
                    return Err(SSAError::InvalidGroup { name: name.clone(), index, rank });
                }
            }
        }
        Ok(())
    }
}

/// How a resolved group came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// The single all-indices group used when no grouping is supplied.
    Full,
    /// A caller-named group.
    Explicit,
    /// Indices claimed by no explicit group.
    Residual,
}

/// A group ready for reconstruction.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedGroup {
    pub name: String,
    pub indices: BTreeSet<usize>,
    pub kind: GroupKind,
}

/// group — resolve an optional grouping against rank `d`.
///
/// Parameters
/// ----------
/// - `rank`: `usize`
///   Number of eigentriples `d`.
/// - `groups`: `Option<&Grouping>`
///   Caller grouping. `None` yields one [`FULL_RECONSTRUCTION`] group over
///   `0..d`.
/// - `residual_is_nonzero`: `FnMut(&BTreeSet<usize>) -> bool`
///   Decides whether the summed residual eigentriples differ from zero.
///   Only called when some index is unclaimed.
///
/// Returns
/// -------
/// `SSAResult<Vec<ResolvedGroup>>`
///   Explicit groups in insertion order, then [`RESIDUALS`] if retained.
///
/// Errors
/// ------
/// - `SSAError::InvalidGroup` if any explicit index is `≥ d`. Raised before
///   the residual predicate runs, so no work is done on invalid input.
pub fn group<F>(
    rank: usize, groups: Option<&Grouping>, mut residual_is_nonzero: F,
) -> SSAResult<Vec<ResolvedGroup>>
where
    F: FnMut(&BTreeSet<usize>) -> bool,
{
    let Some(grouping) = groups else {
        return Ok(vec![ResolvedGroup {
            name: FULL_RECONSTRUCTION.to_string(),
            indices: (0..rank).collect(),
            kind: GroupKind::Full,
        }]);
    };

    grouping.validate(rank)?;
    if grouping.has_overlap() {
        tracing::debug!(
            groups = ?grouping.names().collect::<Vec<_>>(),
            "explicit eigentriple groups overlap"
        );
    }

    let mut resolved: Vec<ResolvedGroup> = grouping
        .iter()
        .map(|(name, indices)| ResolvedGroup {
            name: name.to_string(),
            indices: indices.clone(),
            kind: GroupKind::Explicit,
        })
        .collect();

    let claimed = grouping.claimed();
    let residual: BTreeSet<usize> = (0..rank).filter(|i| !claimed.contains(i)).collect();
    if !residual.is_empty() && residual_is_nonzero(&residual) {
        resolved.push(ResolvedGroup {
            name: RESIDUALS.to_string(),
            indices: residual,
            kind: GroupKind::Residual,
        });
    } else {
        tracing::trace!(unclaimed = residual.len(), "residual group omitted");
    }

    Ok(resolved)
}
