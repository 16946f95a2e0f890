//! The top-level three-phase engine orchestrator.

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::base_types::{Cost, SubsetIdx};
use crate::cft::column_fixing;
use crate::cft::config::CftConfig;
use crate::cft::greedy_primal_phase;
use crate::cft::primal_dual_state::PrimalDualState;
use crate::cft::subgradient_phase;
use crate::errors::SolveError;
use crate::generators::{GreedySolutionGenerator, SolutionGenerator};
use crate::invariant::{ConsistencyLevel, SetCoverInvariant};
use crate::lagrangian::{DualState, StepSizer};
use crate::model::{Model, SolutionProto};
use crate::views::{Focus, FullToCoreModel};

/// Runs the three-phase (dual refinement / primal refinement / column
/// fixing) loop described in `spec.md` §4.5 over a pricing-backed core
/// model, returning the best feasible solution found paired with the dual
/// state that certifies its quality.
///
/// Fixing and pricing-refresh each rebuild [`FullToCoreModel`]'s core from
/// different, mutually-inconsistent views of the current core (the fixing
/// pass's reduced costs are only valid for the pre-refresh core). Rather
/// than reconcile the two, each round performs at most one: pricing-refresh
/// only fires when fixing found nothing new to fix.
pub struct CftEngine;

impl CftEngine {
    /// Solves `model`, returning `Err(SolveError::Infeasible)` up front if
    /// some element is covered by no subset, or
    /// `Err(SolveError::TimeLimitExceeded)` if `config.time_limit` elapses
    /// before the round budget is exhausted (the best solution found so far
    /// is still retrievable via [`CftEngine::solve_with_incumbent`]).
    pub fn solve(model: &Model, config: &CftConfig) -> Result<PrimalDualState, SolveError> {
        Self::solve_with_incumbent(model, config).map_err(|(err, _)| err)
    }

    /// Same as [`CftEngine::solve`], but on a time-limit failure also
    /// returns the best incumbent found before the deadline.
    pub fn solve_with_incumbent(
        model: &Model,
        config: &CftConfig,
    ) -> Result<PrimalDualState, (SolveError, PrimalDualState)> {
        let feasibility = model.compute_feasibility();
        if !feasibility.is_feasible() {
            return Err((SolveError::Infeasible(feasibility), PrimalDualState {
                solution: SolutionProto::default(),
                dual_state: DualState::zeroed(model.num_elements(), model.num_subsets()),
            }));
        }

        let mut invariant = SetCoverInvariant::new(model);
        invariant.recompute(ConsistencyLevel::FreeAndUncovered);
        GreedySolutionGenerator.next_solution(&mut invariant, &Focus::all(model.num_subsets()));

        let mut best_cost: Cost = invariant.cost();
        let mut best_solution = invariant.export_solution();
        let mut best_dual_state = DualState::zeroed(model.num_elements(), model.num_subsets());

        let initial_focus: Vec<SubsetIdx> = invariant.selected_subsets().collect();
        let mut pricing = FullToCoreModel::new(model, &initial_focus);

        let mut step = StepSizer::new_default().step();
        let mut rng = SmallRng::seed_from_u64(0x5EED_CAFE);
        let start = Instant::now();

        for round in 0..config.max_rounds {
            if time_limit_exceeded(config.time_limit, start) {
                let incumbent = PrimalDualState { solution: best_solution, dual_state: best_dual_state };
                return Err((SolveError::TimeLimitExceeded { iterations: round, best_cost }, incumbent));
            }

            let core_model = pricing.core().core_model();
            if core_model.num_subsets() == 0 {
                break;
            }

            let phase1 = subgradient_phase::run(core_model, step, best_cost, config);
            step = phase1.final_step;

            let phase2 = greedy_primal_phase::run(core_model, &phase1.best);
            let core_selected: Vec<SubsetIdx> = phase2.selected_subsets().collect();

            let mut full_selected: Vec<SubsetIdx> = pricing.core().fixed_full_subsets().to_vec();
            full_selected.extend(core_selected.iter().map(|&s| pricing.core().to_full_subset(s)));
            full_selected.sort_unstable_by_key(SubsetIdx::index);
            full_selected.dedup();
            let candidate_cost: Cost = full_selected.iter().map(|&s| model.cost(s)).sum();

            if candidate_cost < best_cost - 1e-9 {
                tracing::info!(round, cost = candidate_cost, "cft: improved incumbent");
                best_cost = candidate_cost;
                best_solution = SolutionProto {
                    num_subsets: model.num_subsets() as i64,
                    cost: candidate_cost,
                    subsets: full_selected.iter().map(|s| s.index() as i64).collect(),
                };
                best_dual_state = phase1.best.clone();
            }

            let fixed_core = column_fixing::run(core_model, &phase1.best.reduced_costs, config);
            if fixed_core.is_empty() {
                let mut jittered = phase1.best.multipliers.clone();
                column_fixing::jitter_multipliers(&mut jittered, config, &mut rng);
                pricing.update_core(&jittered, phase1.best.lower_bound, &core_selected);
                continue;
            }

            let fixed_full: Vec<SubsetIdx> = fixed_core.iter().map(|&s| pricing.core().to_full_subset(s)).collect();
            pricing.fix_full_columns(&fixed_full);
        }

        Ok(PrimalDualState { solution: best_solution, dual_state: best_dual_state })
    }
}

fn time_limit_exceeded(time_limit: Option<Duration>, start: Instant) -> bool {
    time_limit.is_some_and(|limit| start.elapsed() >= limit)
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

    fn infeasible_model() -> Model {
        let mut model = Model::new();
        model.add_empty_subset(1.0);
        model.resize_num_elements(1);
        model
    }

    #[test]
    fn reports_infeasible_models_up_front() {
        let model = infeasible_model();
        let config = CftConfig { max_rounds: 1, ..CftConfig::default() };
        let result = CftEngine::solve(&model, &config);
        assert!(matches!(result, Err(SolveError::Infeasible(_))));
    }

    #[test]
    fn finds_a_feasible_solution_at_or_below_the_greedy_cost() {
        let model = scenario_a();
        let config = CftConfig { max_rounds: 5, ..CftConfig::default() };
        let state = CftEngine::solve(&model, &config).expect("scenario_a is feasible");
        assert_eq!(state.solution.subsets.len(), state.solution.subsets.iter().collect::<std::collections::HashSet<_>>().len());
        assert!(state.cost() <= 3.0 + 1e-6);
        assert!(state.lower_bound() <= state.cost() + 1e-6);
    }
}
