//! Submodule defining the error taxonomy used across the crate.
//!
//! Errors are grouped by subsystem, mirroring the way the crate's modules
//! are organized: [`ModelError`] for malformed-model conditions, and
//! [`SolveError`] for the terminal outcome of a solve (infeasible, malformed,
//! or time-limited). `InvariantViolation`-class failures (a broken
//! consistency-level guarantee) are treated as programming errors and
//! surface as panics from `debug_assert!`/`assert!` rather than as a
//! variant here — see [`crate::invariant::SetCoverInvariant::check_consistency`].

use crate::base_types::SubsetIdx;
use crate::model::FeasibilityReport;

/// Errors surfaced while building or mutating a [`crate::model::Model`].
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum ModelError {
    /// A subset's cost was set to a non-finite value (`NaN` or infinite).
    #[error("subset {subset} was given a non-finite cost {cost}")]
    NonFiniteCost {
        /// The offending subset.
        subset: SubsetIdx,
        /// The non-finite cost value.
        cost: f64,
    },
    /// A subset's cost was negative.
    #[error("subset {subset} was given a negative cost {cost}")]
    NegativeCost {
        /// The offending subset.
        subset: SubsetIdx,
        /// The negative cost value.
        cost: f64,
    },
    /// A column was found to contain a repeated element after sorting, which
    /// violates the strictly-ascending invariant required to build row
    /// views and compressed representations.
    #[error("subset {subset} contains element {element} more than once after sorting")]
    RepeatedElementInSubset {
        /// The offending subset.
        subset: SubsetIdx,
        /// The repeated element, as a raw index.
        element: u32,
    },
    /// `create_sparse_row_view` was called on columns that are not sorted.
    #[error("cannot build a row view: subset {subset} is not sorted ascending")]
    UnsortedColumn {
        /// The offending subset.
        subset: SubsetIdx,
    },
    /// An operation that requires the row view was called before one was
    /// built.
    #[error("row view has not been built for this model; call create_sparse_row_view first")]
    RowViewNotBuilt,
    /// `set_subset_cost` or similar was asked to operate on an out-of-range
    /// subset index.
    #[error("subset index {0} is out of range")]
    SubsetOutOfRange(SubsetIdx),
}

/// The terminal status of a solve attempt, returned by the CFT engine and
/// any other top-level entry point that can fail in more than one way.
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum SolveError {
    /// The model is infeasible: some element is covered by no subset.
    #[error("model is infeasible: {0}")]
    Infeasible(#[from] FeasibilityReport),
    /// The model itself is malformed (independent of feasibility).
    #[error(transparent)]
    MalformedModel(#[from] ModelError),
    /// The wall-clock deadline was exceeded before convergence. The best
    /// feasible solution found so far is preserved by the caller; this
    /// variant only communicates that the bound may be restricted.
    #[error("time limit exceeded after {iterations} iterations, best cost so far {best_cost}")]
    TimeLimitExceeded {
        /// Number of iterations completed before the deadline.
        iterations: usize,
        /// Cost of the best feasible solution found before the deadline.
        best_cost: f64,
    },
}
