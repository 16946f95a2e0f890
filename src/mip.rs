//! Submodule providing [`MipAdapter`], the seam between this crate's
//! heuristic/matheuristic solvers and an external MIP solver.
//!
//! Universal MIP solving is out of scope for this crate (it is delegated to
//! an external linear/integer solver via a thin adapter); this trait defines
//! that boundary without committing to any concrete backend, the same way
//! the teacher defines an algorithm's trait surface in one place and leaves
//! interchangeable concrete implementations to downstream crates.

use std::time::Duration;

use crate::cft::PrimalDualState;
use crate::model::Model;

/// An external MIP (or LP-relaxation) solver capable of solving a
/// [`Model`] to optimality or near-optimality within a time budget.
///
/// No implementation ships in this crate; downstream crates provide
/// concrete adapters (e.g. wrapping a solver's FFI bindings) and translate
/// their native result into a [`PrimalDualState`].
pub trait MipAdapter {
    /// The adapter's own error type.
    type Error: std::error::Error;

    /// Solves `model`, optionally bounded by `time_limit`.
    fn solve(&self, model: &Model, time_limit: Option<Duration>) -> Result<PrimalDualState, Self::Error>;
}
