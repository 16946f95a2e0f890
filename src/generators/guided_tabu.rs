//! Submodule providing [`GuidedTabuSearch`].

use std::collections::VecDeque;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::base_types::{Cost, SubsetIdx};
use crate::generators::trait_def::SolutionGenerator;
use crate::invariant::{ConsistencyLevel, SetCoverInvariant};
use crate::views::Focus;

/// Tunables for [`GuidedTabuSearch`], following the crate's
/// config-struct-with-hand-rolled-`Default` convention.
#[derive(Debug, Clone)]
pub struct GuidedTabuConfig {
    /// Length of the FIFO tabu list (short-term memory).
    pub tabu_list_length: usize,
    /// Scales the per-subset penalty into the augmented cost
    /// `c_j * (1 + penalty_factor * times_penalized[j])`.
    pub penalty_factor: f64,
    /// Hard cap on search iterations.
    pub max_iterations: usize,
    /// Width of the "within epsilon of the maximum utility" penalization
    /// band.
    pub epsilon: f64,
}

impl Default for GuidedTabuConfig {
    fn default() -> Self {
        Self { tabu_list_length: 10, penalty_factor: 0.1, max_iterations: 1000, epsilon: 1e-9 }
    }
}

/// Short-term (FIFO tabu list) plus long-term (per-subset penalty counter)
/// memory local search over the selection. Explores both "add an
/// unselected subset" and "remove a redundant selected subset" moves,
/// scored by an augmented cost that grows with how often a subset has been
/// penalized, and restores the best feasible solution seen at the end.
#[derive(Debug)]
pub struct GuidedTabuSearch {
    config: GuidedTabuConfig,
    rng: SmallRng,
    tabu: VecDeque<SubsetIdx>,
    times_penalized: Vec<u32>,
}

impl GuidedTabuSearch {
    /// Builds a search with the given config, seeded deterministically.
    #[must_use]
    pub fn new(config: GuidedTabuConfig, seed: u64) -> Self {
        Self { config, rng: SmallRng::seed_from_u64(seed), tabu: VecDeque::new(), times_penalized: Vec::new() }
    }

    fn augmented_cost(&self, subset: SubsetIdx, cost: Cost) -> Cost {
        cost * (1.0 + self.config.penalty_factor * f64::from(self.times_penalized[subset.index()]))
    }

    fn utility(&self, subset: SubsetIdx, cost: Cost) -> Cost {
        cost / (1.0 + f64::from(self.times_penalized[subset.index()]))
    }

    fn is_tabu(&self, subset: SubsetIdx) -> bool {
        self.tabu.contains(&subset)
    }
}

impl SolutionGenerator for GuidedTabuSearch {
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

        let mut best_cost = invariant.cost();
        let mut best_feasible = invariant.num_uncovered() == 0;
        let mut best_solution = invariant.export_solution();

        for _ in 0..self.config.max_iterations {
            let mut best_move: Option<(Cost, SubsetIdx)> = None;
            for subset in focus.iter(num_subsets) {
                let cost = invariant.model().cost(subset);
                let selected = invariant.is_selected(subset);
                if selected && !invariant.is_redundant(subset) {
                    continue;
                }
                let delta =
                    if selected { -self.augmented_cost(subset, cost) } else { self.augmented_cost(subset, cost) };
                let would_improve_real_cost = if selected {
                    invariant.cost() - cost < best_cost
                } else {
                    invariant.cost() + cost < best_cost
                };
                let admissible = !self.is_tabu(subset) || would_improve_real_cost;
                if !admissible {
                    continue;
                }
                if best_move.is_none_or(|(best_delta, _)| delta < best_delta) {
                    best_move = Some((delta, subset));
                }
            }

            let Some((_, chosen)) = best_move else { break };
            invariant.clear_removability_information();
            invariant.flip(chosen, self.restored_level());

            self.tabu.push_back(chosen);
            if self.tabu.len() > self.config.tabu_list_length {
                self.tabu.pop_front();
            }

            let max_utility = focus
                .iter(num_subsets)
                .filter(|&j| invariant.is_selected(j))
                .map(|j| self.utility(j, invariant.model().cost(j)))
                .fold(f64::NEG_INFINITY, f64::max);
            let near_max: Vec<SubsetIdx> = focus
                .iter(num_subsets)
                .filter(|&j| invariant.is_selected(j))
                .filter(|&j| (self.utility(j, invariant.model().cost(j)) - max_utility).abs() <= self.config.epsilon)
                .collect();
            for subset in near_max {
                if self.rng.gen_bool(0.5) {
                    self.times_penalized[subset.index()] += 1;
                }
            }

            if invariant.num_uncovered() == 0 && (invariant.cost() < best_cost || !best_feasible) {
                best_cost = invariant.cost();
                best_feasible = true;
                best_solution = invariant.export_solution();
            }
        }

        if best_feasible {
            invariant.import_solution(&best_solution);
            invariant.recompute(self.restored_level());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base_types::ElementIdx;
    use crate::model::Model;

    #[test]
    fn never_regresses_past_a_known_feasible_starting_cost() {
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

        let mut invariant = SetCoverInvariant::new(&model);
        invariant.select(SubsetIdx(0), ConsistencyLevel::Redundancy);
        invariant.select(SubsetIdx(1), ConsistencyLevel::Redundancy);
        let starting_cost = invariant.cost();

        let config = GuidedTabuConfig { max_iterations: 50, ..GuidedTabuConfig::default() };
        let mut search = GuidedTabuSearch::new(config, 7);
        search.next_solution(&mut invariant, &Focus::all(model.num_subsets()));

        assert_eq!(invariant.num_uncovered(), 0);
        assert!(invariant.cost() <= starting_cost + 1e-9);
    }
}
