//! Submodule providing the [`SolutionGenerator`] trait shared by every
//! heuristic/local-search generator.

use crate::invariant::{ConsistencyLevel, SetCoverInvariant};
use crate::views::Focus;

/// A deterministic (given its inputs and an optional RNG seed) operator
/// that mutates a [`SetCoverInvariant`] restricted to a [`Focus`], either
/// producing a new feasible solution or improving an existing one.
///
/// Each implementation declares the consistency level it needs on entry
/// and guarantees on exit; callers must lift the invariant to
/// [`SolutionGenerator::required_level`] (via
/// [`SetCoverInvariant::recompute`]) before calling
/// [`SolutionGenerator::next_solution`].
pub trait SolutionGenerator {
    /// The minimum consistency level the invariant must already be at.
    fn required_level(&self) -> ConsistencyLevel;

    /// The consistency level guaranteed once `next_solution` returns.
    fn restored_level(&self) -> ConsistencyLevel;

    /// Mutates `invariant`, touching only subsets in `focus`.
    fn next_solution(&mut self, invariant: &mut SetCoverInvariant<'_>, focus: &Focus);
}
