//! Primal refinement phase of the three-phase engine: a multiplier-based
//! greedy construction followed by a redundancy-removal cleanup pass.

use bitvec::vec::BitVec;

use crate::base_types::{Cost, SubsetIdx};
use crate::generators::heap::AdjustableHeap;
use crate::generators::steepest::LazySteepestSearch;
use crate::generators::trait_def::SolutionGenerator;
use crate::invariant::{ConsistencyLevel, SetCoverInvariant};
use crate::lagrangian::DualState;
use crate::model::Model;
use crate::views::Focus;

/// Builds a feasible selection over `model` (typically a core model) using
/// the multiplier-weighted greedy described in `spec.md` §4.5.2, then runs
/// [`LazySteepestSearch`] to drop whatever turned out redundant.
///
/// For a candidate column `j` covering `k` currently-uncovered elements
/// with adjusted reduced cost `γ = c_j - Σ(u_i for i uncovered in S_j)`:
/// `k == 0` removes the candidate from consideration; `γ > 0` scores it
/// `γ / k`; `γ <= 0` scores it `γ * k`. The column with the minimum score is
/// picked repeatedly. `γ` is maintained incrementally: whenever an element
/// transitions from uncovered to covered, every subset touching its row
/// has that element's multiplier added back (it no longer contributes to
/// any subset's "uncovered" sum).
#[must_use]
pub fn run<'model>(model: &'model Model, dual_state: &DualState) -> SetCoverInvariant<'model> {
    let mut invariant = SetCoverInvariant::new(model);
    invariant.recompute(ConsistencyLevel::FreeAndUncovered);
    let num_subsets = model.num_subsets();

    let mut adjusted_reduced_cost: Vec<Cost> = dual_state.reduced_costs.clone();
    let mut heap: AdjustableHeap<16> = AdjustableHeap::with_capacity(num_subsets);
    for j in 0..num_subsets {
        push_priority(&invariant, &adjusted_reduced_cost, &mut heap, SubsetIdx(j as u32));
    }

    let mut subset_seen = BitVec::repeat(false, num_subsets);
    while let Some((_, payload)) = heap.pop_max() {
        let subset = SubsetIdx(payload as u32);
        if invariant.is_selected(subset) || invariant.compute_num_free_elements(subset) == 0 {
            continue;
        }

        let newly_covered: Vec<_> =
            model.column(subset).as_slice().iter().filter(|&&e| invariant.coverage(e) == 0).copied().collect();
        invariant.select(subset, ConsistencyLevel::FreeAndUncovered);

        subset_seen.fill(false);
        for element in newly_covered {
            let Some(row) = model.row(element) else { continue };
            for &touched in row.as_slice() {
                if subset_seen[touched.index()] {
                    continue;
                }
                subset_seen.set(touched.index(), true);
                adjusted_reduced_cost[touched.index()] += dual_state.multipliers[element.index()];
                if invariant.is_selected(touched) {
                    continue;
                }
                if invariant.num_free_elements(touched) == 0 {
                    heap.remove(touched.index());
                } else {
                    heap.update_priority(
                        touched.index(),
                        priority(adjusted_reduced_cost[touched.index()], invariant.num_free_elements(touched)),
                    );
                }
            }
        }
    }

    LazySteepestSearch.next_solution(&mut invariant, &Focus::all(num_subsets));
    invariant
}

fn push_priority(
    invariant: &SetCoverInvariant<'_>,
    adjusted_reduced_cost: &[Cost],
    heap: &mut AdjustableHeap<16>,
    subset: SubsetIdx,
) {
    if invariant.is_selected(subset) {
        return;
    }
    let free = invariant.num_free_elements(subset);
    if free == 0 {
        return;
    }
    heap.push(priority(adjusted_reduced_cost[subset.index()], free), subset.index());
}

/// Negated so the max-heap pops the minimum-score candidate first.
fn priority(gamma: Cost, free: usize) -> f64 {
    let score = if gamma > 0.0 { gamma / free as f64 } else { gamma * free as f64 };
    -score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base_types::ElementIdx;

    fn scenario_a() -> Model {
        let mut model = Model::new();
        let s0 = model.add_empty_subset(1.0);
        model.add_element_to_subset(ElementIdx(0), s0);
        let s1 = model.add_empty_subset(2.0);
        model.add_element_to_subset(ElementIdx(1), s1);
        model.add_element_to_subset(ElementIdx(2), s1);
        let s2 = model.add_empty_subset(1.0);
        model.add_element_to_subset(ElementIdx(1), s2);
        let s3 = model.add_empty_subset(1.0);
        model.add_element_to_subset(ElementIdx(2), s3);
        model.sort_elements_in_subsets().unwrap();
        model.create_sparse_row_view().unwrap();
        model
    }

    #[test]
    fn produces_a_feasible_non_redundant_solution() {
        let model = scenario_a();
        let dual_state = DualState::zeroed(model.num_elements(), model.num_subsets());
        let invariant = run(&model, &dual_state);

        assert_eq!(invariant.num_uncovered(), 0);
        for subset in invariant.selected_subsets() {
            assert!(!invariant.compute_is_redundant(subset));
        }
    }
}
