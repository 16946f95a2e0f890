//! Submodule providing [`RandomSolutionGenerator`].

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::base_types::SubsetIdx;
use crate::generators::trait_def::SolutionGenerator;
use crate::invariant::{ConsistencyLevel, SetCoverInvariant};
use crate::views::Focus;

/// Shuffles the focused subsets with a seeded RNG, then greedily selects
/// any subset that still covers at least one uncovered element.
#[derive(Debug)]
pub struct RandomSolutionGenerator {
    rng: SmallRng,
}

impl RandomSolutionGenerator {
    /// Builds a generator seeded deterministically from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: SmallRng::seed_from_u64(seed) }
    }
}

impl SolutionGenerator for RandomSolutionGenerator {
    fn required_level(&self) -> ConsistencyLevel {
        ConsistencyLevel::CostAndCoverage
    }

    fn restored_level(&self) -> ConsistencyLevel {
        ConsistencyLevel::FreeAndUncovered
    }

    fn next_solution(&mut self, invariant: &mut SetCoverInvariant<'_>, focus: &Focus) {
        let num_subsets = invariant.model().num_subsets();
        let mut shuffled: Vec<SubsetIdx> = focus.iter(num_subsets).collect();
        shuffled.shuffle(&mut self.rng);

        for subset in shuffled {
            if invariant.is_selected(subset) {
                continue;
            }
            if invariant.compute_num_free_elements(subset) > 0 {
                invariant.select(subset, self.restored_level());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base_types::ElementIdx;
    use crate::model::Model;

    #[test]
    fn produces_a_feasible_selection_covering_every_element() {
        let mut model = Model::new();
        let s0 = model.add_empty_subset(1.0);
        model.add_element_to_subset(ElementIdx(0), s0);
        let s1 = model.add_empty_subset(2.0);
        model.add_element_to_subset(ElementIdx(1), s1);
        model.add_element_to_subset(ElementIdx(2), s1);

        let mut invariant = SetCoverInvariant::new(&model);
        let mut generator = RandomSolutionGenerator::new(42);
        generator.next_solution(&mut invariant, &Focus::all(model.num_subsets()));

        assert_eq!(invariant.num_uncovered(), 0);
    }
}
