//! Submodule providing [`GreedySolutionGenerator`], Chvátal's greedy set
//! cover with a 16-ary priority heap.

use bitvec::vec::BitVec;

use crate::base_types::SubsetIdx;
use crate::generators::heap::AdjustableHeap;
use crate::generators::trait_def::SolutionGenerator;
use crate::invariant::{ConsistencyLevel, SetCoverInvariant};
use crate::views::Focus;

/// Chvátal's greedy: repeatedly selects the subset maximizing
/// `num_free_elements[j] / c_j`, achieving the `1 + ln|E|` approximation
/// guarantee. Requires the model's row view to be built (to find which
/// subsets are touched by a newly-covered element).
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedySolutionGenerator;

impl SolutionGenerator for GreedySolutionGenerator {
    fn required_level(&self) -> ConsistencyLevel {
        ConsistencyLevel::FreeAndUncovered
    }

    fn restored_level(&self) -> ConsistencyLevel {
        ConsistencyLevel::FreeAndUncovered
    }

    fn next_solution(&mut self, invariant: &mut SetCoverInvariant<'_>, focus: &Focus) {
        let num_subsets = invariant.model().num_subsets();
        let mut heap: AdjustableHeap<16> = AdjustableHeap::with_capacity(num_subsets);
        for subset in focus.iter(num_subsets) {
            if invariant.is_selected(subset) {
                continue;
            }
            push_priority(invariant, &mut heap, subset);
        }

        let mut subset_seen = BitVec::repeat(false, num_subsets);
        while let Some((_, payload)) = heap.pop_max() {
            let subset = SubsetIdx(payload as u32);
            if invariant.is_selected(subset) || invariant.compute_num_free_elements(subset) == 0 {
                continue;
            }

            let newly_coverable: Vec<_> = invariant
                .model()
                .column(subset)
                .as_slice()
                .iter()
                .filter(|&&e| invariant.coverage(e) == 0)
                .copied()
                .collect();
            invariant.select(subset, self.restored_level());

            subset_seen.fill(false);
            for element in newly_coverable {
                let Some(row) = invariant.model().row(element) else { continue };
                for &touched in row.as_slice() {
                    if subset_seen[touched.index()] {
                        continue;
                    }
                    subset_seen.set(touched.index(), true);
                    if !heap.contains(touched.index()) || invariant.is_selected(touched) {
                        continue;
                    }
                    let free = invariant.num_free_elements(touched);
                    if free == 0 {
                        heap.remove(touched.index());
                    } else {
                        let cost = invariant.model().cost(touched);
                        heap.update_priority(touched.index(), priority(free, cost));
                    }
                }
            }
        }
    }
}

pub(crate) fn push_priority(invariant: &SetCoverInvariant<'_>, heap: &mut AdjustableHeap<16>, subset: SubsetIdx) {
    let free = invariant.num_free_elements(subset);
    if free == 0 {
        return;
    }
    let cost = invariant.model().cost(subset);
    heap.push(priority(free, cost), subset.index());
}

pub(crate) fn priority(free: usize, cost: f64) -> f64 {
    if cost <= 0.0 { f64::INFINITY } else { free as f64 / cost }
}
