//! Submodule providing [`ElementDegreeSolutionGenerator`] and its lazy
//! variant.

use crate::base_types::{Cost, ElementIdx, SubsetIdx};
use crate::generators::trait_def::SolutionGenerator;
use crate::invariant::{ConsistencyLevel, SetCoverInvariant};
use crate::views::Focus;

/// Picks uncovered elements in increasing order of degree (row length);
/// for each, chooses the focused, uncovered-contributing subset minimizing
/// `c_j / num_free_elements[j]` (ties broken toward the larger free
/// count), using the cross-product `c_j * free(j') - c_{j'} * free(j)` to
/// compare ratios without floating-point division.
#[derive(Debug, Default, Clone, Copy)]
pub struct ElementDegreeSolutionGenerator;

impl SolutionGenerator for ElementDegreeSolutionGenerator {
    fn required_level(&self) -> ConsistencyLevel {
        ConsistencyLevel::FreeAndUncovered
    }

    fn restored_level(&self) -> ConsistencyLevel {
        ConsistencyLevel::FreeAndUncovered
    }

    fn next_solution(&mut self, invariant: &mut SetCoverInvariant<'_>, focus: &Focus) {
        loop {
            let Some(element) = min_degree_uncovered_element(invariant) else { break };
            let Some(row) = invariant.model().row(element) else { break };
            let candidate = row
                .as_slice()
                .iter()
                .copied()
                .filter(|&j| focus.contains(j) && !invariant.is_selected(j))
                .filter_map(|j| {
                    let free = invariant.num_free_elements(j);
                    (free > 0).then_some((invariant.model().cost(j), free, j))
                })
                .fold(None, pick_better);
            let Some((_, _, subset)) = candidate else { break };
            invariant.select(subset, self.restored_level());
        }
    }
}

/// Lazy variant: does not require `num_free_elements` to be maintained,
/// computing free counts on demand and skipping a candidate whenever
/// `c_j * |S_j| > best_cost * best_free` (the static column size is an
/// upper bound on the true free count, so this filter never rejects a
/// subset that could have beaten the current best).
#[derive(Debug, Default, Clone, Copy)]
pub struct LazyElementDegreeSolutionGenerator;

impl SolutionGenerator for LazyElementDegreeSolutionGenerator {
    fn required_level(&self) -> ConsistencyLevel {
        ConsistencyLevel::CostAndCoverage
    }

    fn restored_level(&self) -> ConsistencyLevel {
        ConsistencyLevel::CostAndCoverage
    }

    fn next_solution(&mut self, invariant: &mut SetCoverInvariant<'_>, focus: &Focus) {
        loop {
            let Some(element) = min_degree_uncovered_element(invariant) else { break };
            let Some(row) = invariant.model().row(element) else { break };

            let mut best: Option<(Cost, usize, SubsetIdx)> = None;
            for &j in row.as_slice() {
                if !focus.contains(j) || invariant.is_selected(j) {
                    continue;
                }
                let cost = invariant.model().cost(j);
                let static_size = invariant.model().column(j).len();
                if let Some((best_cost, best_free, _)) = best
                    && cost * static_size as f64 > best_cost * best_free as f64
                {
                    continue;
                }
                let free = invariant.compute_num_free_elements(j);
                if free == 0 {
                    continue;
                }
                best = pick_better(best, (cost, free, j));
            }
            let Some((_, _, subset)) = best else { break };
            invariant.select(subset, self.restored_level());
        }
    }
}

fn pick_better(
    best: Option<(Cost, usize, SubsetIdx)>,
    candidate: (Cost, usize, SubsetIdx),
) -> Option<(Cost, usize, SubsetIdx)> {
    let Some((best_cost, best_free, _)) = best else { return Some(candidate) };
    let (cost, free, _) = candidate;
    // cost/free < best_cost/best_free  <=>  cost*best_free < best_cost*free
    let cross = cost * best_free as f64 - best_cost * free as f64;
    if cross < 0.0 {
        Some(candidate)
    } else if cross > 0.0 {
        best
    } else if free > best_free {
        Some(candidate)
    } else {
        best
    }
}

fn min_degree_uncovered_element(invariant: &SetCoverInvariant<'_>) -> Option<ElementIdx> {
    (0..invariant.model().num_elements())
        .map(ElementIdx)
        .filter(|&e| invariant.coverage(e) == 0)
        .min_by_key(|&e| invariant.model().row(e).map_or(0, |row| row.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base_types::ElementIdx as E;
    use crate::model::Model;

    fn scenario_a() -> Model {
        let mut model = Model::new();
        let s0 = model.add_empty_subset(1.0);
        model.add_element_to_subset(E(0), s0);
        let s1 = model.add_empty_subset(2.0);
        model.add_element_to_subset(E(1), s1);
        model.add_element_to_subset(E(2), s1);
        let s2 = model.add_empty_subset(1.0);
        model.add_element_to_subset(E(1), s2);
        let s3 = model.add_empty_subset(1.0);
        model.add_element_to_subset(E(2), s3);
        model.sort_elements_in_subsets().unwrap();
        model.create_sparse_row_view().unwrap();
        model
    }

    #[test]
    fn eager_and_lazy_both_reach_feasibility() {
        let model = scenario_a();

        let mut eager_invariant = SetCoverInvariant::new(&model);
        eager_invariant.recompute(ConsistencyLevel::FreeAndUncovered);
        ElementDegreeSolutionGenerator.next_solution(&mut eager_invariant, &Focus::all(model.num_subsets()));
        assert_eq!(eager_invariant.num_uncovered(), 0);

        let mut lazy_invariant = SetCoverInvariant::new(&model);
        LazyElementDegreeSolutionGenerator.next_solution(&mut lazy_invariant, &Focus::all(model.num_subsets()));
        lazy_invariant.recompute(ConsistencyLevel::FreeAndUncovered);
        assert_eq!(lazy_invariant.num_uncovered(), 0);
    }
}
