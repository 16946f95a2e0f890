//! Submodule providing [`SteepestSearch`] and [`LazySteepestSearch`].

use crate::base_types::SubsetIdx;
use crate::generators::heap::AdjustableHeap;
use crate::generators::trait_def::SolutionGenerator;
use crate::invariant::{ConsistencyLevel, SetCoverInvariant};
use crate::views::Focus;

/// Given a feasible solution, repeatedly removes the most expensive
/// currently-redundant selected subset (the removal giving the largest
/// immediate cost improvement), preserving feasibility throughout. Keeps a
/// live max-heap of redundant subsets, updated from
/// [`SetCoverInvariant::newly_removable_subsets`] /
/// [`SetCoverInvariant::newly_non_removable_subsets`] after every removal.
#[derive(Debug, Default, Clone, Copy)]
pub struct SteepestSearch;

impl SolutionGenerator for SteepestSearch {
    fn required_level(&self) -> ConsistencyLevel {
        ConsistencyLevel::Redundancy
    }

    fn restored_level(&self) -> ConsistencyLevel {
        ConsistencyLevel::Redundancy
    }

    fn next_solution(&mut self, invariant: &mut SetCoverInvariant<'_>, focus: &Focus) {
        let num_subsets = invariant.model().num_subsets();
        let mut heap: AdjustableHeap<16> = AdjustableHeap::with_capacity(num_subsets);
        for subset in focus.iter(num_subsets) {
            if invariant.is_selected(subset) && invariant.is_redundant(subset) {
                heap.push(invariant.model().cost(subset), subset.index());
            }
        }

        while let Some((_, payload)) = heap.pop_max() {
            let subset = SubsetIdx(payload as u32);
            invariant.clear_removability_information();
            invariant.deselect(subset, self.restored_level());
            for &removed in invariant.newly_non_removable_subsets() {
                heap.remove(removed.index());
            }
            for &added in invariant.newly_removable_subsets() {
                if invariant.is_selected(added) {
                    heap.push(invariant.model().cost(added), added.index());
                }
            }
        }
    }
}

/// Equivalent to [`SteepestSearch`] but without a live heap: sorts the
/// currently-selected focus subsets by descending cost once, then walks
/// that order a single time, checking redundancy on demand and deselecting
/// whenever it still holds. Cheaper when the selection is already small
/// (e.g. right after a generator like [`super::GreedySolutionGenerator`]).
#[derive(Debug, Default, Clone, Copy)]
pub struct LazySteepestSearch;

impl SolutionGenerator for LazySteepestSearch {
    fn required_level(&self) -> ConsistencyLevel {
        ConsistencyLevel::CostAndCoverage
    }

    fn restored_level(&self) -> ConsistencyLevel {
        ConsistencyLevel::CostAndCoverage
    }

    fn next_solution(&mut self, invariant: &mut SetCoverInvariant<'_>, focus: &Focus) {
        let num_subsets = invariant.model().num_subsets();
        let mut selected: Vec<SubsetIdx> =
            focus.iter(num_subsets).filter(|&j| invariant.is_selected(j)).collect();
        selected.sort_unstable_by(|&a, &b| {
            invariant.model().cost(b).total_cmp(&invariant.model().cost(a))
        });

        for subset in selected {
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

    fn redundant_scenario() -> Model {
        // Scenario B of spec.md §8: 3 subsets, each pair covers all 3
        // elements, so selecting all three makes every one redundant.
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
        model
    }

    #[test]
    fn steepest_search_reduces_to_the_two_cheapest() {
        let model = redundant_scenario();
        let mut invariant = SetCoverInvariant::new(&model);
        for j in 0..3 {
            invariant.select(SubsetIdx(j), ConsistencyLevel::Redundancy);
        }
        SteepestSearch.next_solution(&mut invariant, &Focus::all(3));
        assert_eq!(invariant.num_uncovered(), 0);
        assert_eq!(invariant.selected_subsets().count(), 2);
        invariant.check_consistency(ConsistencyLevel::Redundancy);
    }

    #[test]
    fn lazy_steepest_search_matches_eager_on_the_same_scenario() {
        let model = redundant_scenario();
        let mut invariant = SetCoverInvariant::new(&model);
        for j in 0..3 {
            invariant.select(SubsetIdx(j), ConsistencyLevel::CostAndCoverage);
        }
        LazySteepestSearch.next_solution(&mut invariant, &Focus::all(3));
        assert_eq!(invariant.selected_subsets().count(), 2);
    }
}
