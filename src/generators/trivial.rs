//! Submodule providing [`TrivialSolutionGenerator`].

use crate::generators::trait_def::SolutionGenerator;
use crate::invariant::{ConsistencyLevel, SetCoverInvariant};
use crate::views::Focus;

/// Selects every subset in focus. The simplest possible generator; useful
/// as a baseline and as a way to seed a feasible-but-expensive starting
/// solution for local search.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrivialSolutionGenerator;

impl SolutionGenerator for TrivialSolutionGenerator {
    fn required_level(&self) -> ConsistencyLevel {
        ConsistencyLevel::Inconsistent
    }

    fn restored_level(&self) -> ConsistencyLevel {
        ConsistencyLevel::CostAndCoverage
    }

    fn next_solution(&mut self, invariant: &mut SetCoverInvariant<'_>, focus: &Focus) {
        let num_subsets = invariant.model().num_subsets();
        for subset in focus.iter(num_subsets) {
            invariant.select(subset, self.restored_level());
        }
    }
}
