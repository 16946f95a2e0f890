//! Submodule providing [`GuidedLocalSearch`].

use crate::base_types::{Cost, SubsetIdx};
use crate::generators::heap::AdjustableHeap;
use crate::generators::trait_def::SolutionGenerator;
use crate::invariant::{ConsistencyLevel, SetCoverInvariant};
use crate::views::Focus;

/// Tunables for [`GuidedLocalSearch`].
#[derive(Debug, Clone)]
pub struct GuidedLocalSearchConfig {
    /// Scales the starting cost into the fixed penalization factor
    /// `alpha * current_cost / num_subsets`.
    pub alpha: f64,
    /// Hard cap on the number of remove-then-penalize rounds.
    pub max_iterations: usize,
}

impl Default for GuidedLocalSearchConfig {
    fn default() -> Self {
        Self { alpha: 0.5, max_iterations: 10_000 }
    }
}

/// Steepest-descent-with-penalties local search in the style of Voudouris
/// and Tsang's Guided Local Search. `priority_heap` ranks every focused
/// subset by the augmented-cost impact of flipping it: a redundant,
/// selected subset is ranked by its augmented cost (real cost plus a fixed
/// penalization factor times how often it has been penalized) as a removal
/// candidate, while an unselected subset is ranked by its *negated*
/// augmented cost as an addition candidate, so popping the heap's maximum
/// always yields whichever single flip (add or remove) has the largest
/// immediate impact. A non-redundant selected subset can't be removed
/// without breaking feasibility, so it is simply never entered into the
/// heap. After each flip, whichever remaining selected subset has the
/// highest utility (`cost / (1 + times_penalized)`) is penalized to
/// discourage the search from converging back onto it. Finishes with a
/// cleanup pass deselecting any subset still redundant.
#[derive(Debug)]
pub struct GuidedLocalSearch {
    config: GuidedLocalSearchConfig,
    times_penalized: Vec<u32>,
}

impl GuidedLocalSearch {
    /// Builds a search with the given config.
    #[must_use]
    pub fn new(config: GuidedLocalSearchConfig) -> Self {
        Self { config, times_penalized: Vec::new() }
    }

    fn augmented_cost(&self, subset: SubsetIdx, cost: Cost, penalization_factor: f64) -> Cost {
        cost + penalization_factor * f64::from(self.times_penalized[subset.index()])
    }

    fn utility(&self, subset: SubsetIdx, cost: Cost) -> Cost {
        cost / (1.0 + f64::from(self.times_penalized[subset.index()]))
    }
}

impl SolutionGenerator for GuidedLocalSearch {
    fn required_level(&self) -> ConsistencyLevel {
        ConsistencyLevel::Redundancy
    }

    fn restored_level(&self) -> ConsistencyLevel {
        ConsistencyLevel::Redundancy
    }

    fn next_solution(&mut self, invariant: &mut SetCoverInvariant<'_>, focus: &Focus) {
        let num_subsets = invariant.model().num_subsets();
        if self.times_penalized.len() != num_subsets {
            self.times_penalized = vec![0; num_subsets];
        }
        let penalization_factor = if num_subsets == 0 { 0.0 } else { self.config.alpha * invariant.cost() / num_subsets as f64 };

        let mut priority_heap: AdjustableHeap<2> = AdjustableHeap::with_capacity(num_subsets);
        let mut utility_heap: AdjustableHeap<2> = AdjustableHeap::with_capacity(num_subsets);
        for subset in focus.iter(num_subsets) {
            let cost = invariant.model().cost(subset);
            if invariant.is_selected(subset) {
                utility_heap.push(self.utility(subset, cost), subset.index());
                if invariant.is_redundant(subset) {
                    priority_heap.push(self.augmented_cost(subset, cost, penalization_factor), subset.index());
                }
            } else {
                priority_heap.push(-self.augmented_cost(subset, cost, penalization_factor), subset.index());
            }
        }

        for _ in 0..self.config.max_iterations {
            let Some((_, payload)) = priority_heap.pop_max() else { break };
            let subset = SubsetIdx(payload as u32);

            invariant.clear_removability_information();
            if invariant.is_selected(subset) {
                invariant.deselect(subset, self.restored_level());
                utility_heap.remove(subset.index());

                for &removed in invariant.newly_non_removable_subsets() {
                    priority_heap.remove(removed.index());
                }
                for &added in invariant.newly_removable_subsets() {
                    if invariant.is_selected(added) {
                        let cost = invariant.model().cost(added);
                        priority_heap.push(self.augmented_cost(added, cost, penalization_factor), added.index());
                    }
                }
                // the subset just vacated is an addition candidate again.
                let cost = invariant.model().cost(subset);
                priority_heap.push(-self.augmented_cost(subset, cost, penalization_factor), subset.index());
            } else {
                invariant.select(subset, self.restored_level());
                let cost = invariant.model().cost(subset);
                utility_heap.push(self.utility(subset, cost), subset.index());
                if invariant.is_redundant(subset) {
                    priority_heap.push(self.augmented_cost(subset, cost, penalization_factor), subset.index());
                }
                for &added in invariant.newly_removable_subsets() {
                    if invariant.is_selected(added) && added != subset {
                        let c = invariant.model().cost(added);
                        priority_heap.push(self.augmented_cost(added, c, penalization_factor), added.index());
                    }
                }
            }

            if let Some((_, penalized_payload)) = utility_heap.pop_max() {
                let penalized = SubsetIdx(penalized_payload as u32);
                self.times_penalized[penalized.index()] += 1;
                let cost = invariant.model().cost(penalized);
                utility_heap.push(self.utility(penalized, cost), penalized.index());
                if priority_heap.contains(penalized.index()) {
                    priority_heap.update_priority(
                        penalized.index(),
                        self.augmented_cost(penalized, cost, penalization_factor),
                    );
                }
            }
        }

        for subset in focus.iter(num_subsets) {
            if invariant.is_selected(subset) && invariant.compute_is_redundant(subset) {
                invariant.deselect(subset, self.restored_level());
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
    fn removes_redundancy_and_keeps_feasibility() {
        // Scenario B of spec.md §8: all three subsets selected and
        // pairwise redundant.
        let mut model = Model::new();
        let s0 = model.add_empty_subset(1.0);
        model.add_element_to_subset(ElementIdx(0), s0);
        model.add_element_to_subset(ElementIdx(1), s0);
        let s1 = model.add_empty_subset(1.0);
        model.add_element_to_subset(ElementIdx(1), s1);
        model.add_element_to_subset(ElementIdx(2), s1);
        let s2 = model.add_empty_subset(1.0);
        model.add_element_to_subset(ElementIdx(0), s2);
        model.add_element_to_subset(ElementIdx(2), s2);
        model.sort_elements_in_subsets().unwrap();
        model.create_sparse_row_view().unwrap();

        let mut invariant = SetCoverInvariant::new(&model);
        for j in 0..3 {
            invariant.select(SubsetIdx(j), ConsistencyLevel::Redundancy);
        }

        let mut search = GuidedLocalSearch::new(GuidedLocalSearchConfig { max_iterations: 10, ..GuidedLocalSearchConfig::default() });
        search.next_solution(&mut invariant, &Focus::all(3));

        assert_eq!(invariant.num_uncovered(), 0);
        invariant.check_consistency(ConsistencyLevel::Redundancy);
        for subset in invariant.selected_subsets() {
            assert!(!invariant.is_redundant(subset));
        }
    }
}
