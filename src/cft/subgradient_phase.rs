//! Dual refinement phase of the three-phase engine: a subgradient ascent
//! restricted to a core model, using a minimal-cover-shaped subgradient to
//! avoid overshoot on heavily shared elements.

use crate::base_types::{Cost, SubsetIdx};
use crate::cft::config::CftConfig;
use crate::lagrangian::{DualState, LagrangianConfig, LagrangianEngine, StepSizer, Stopper};
use crate::model::Model;

/// Outcome of one call to [`run`]: the best dual state found over `model`
/// and the step size the next phase should resume from.
#[derive(Debug, Clone)]
pub struct SubgradientPhaseResult {
    /// Best dual state (multipliers/reduced costs/lower bound) found over
    /// the core model passed to [`run`].
    pub best: DualState,
    /// Step size at exit, to seed the next round's [`StepSizer`].
    pub final_step: f64,
}

/// Runs the subgradient ascent main loop over `model` (typically a
/// [`crate::views::CoreModel::core_model`]), starting the step size from
/// `initial_step` and using `upper_bound` as the feasible bound driving
/// [`LagrangianEngine::update_multipliers`].
///
/// Exit tests, in order of precedence: the `10 * |E|` (capped by
/// `config.subgradient_iteration_cap`) iteration budget; the minimal-cover
/// subgradient's squared norm falling to or below
/// `config.subgradient_epsilon`; or, evaluated every
/// `config.subgradient_period` iterations, negligible absolute (`< 1`) and
/// relative (`< 0.1%`) lower-bound progress over that window.
#[must_use]
pub fn run(model: &Model, initial_step: f64, upper_bound: Cost, config: &CftConfig) -> SubgradientPhaseResult {
    let engine = LagrangianEngine::new(model, LagrangianConfig::default());
    let mut multipliers = engine.initialize_multipliers();
    let mut reduced_costs = engine.compute_reduced_costs(&multipliers);
    let mut best = DualState {
        lower_bound: engine.compute_lagrangian_value(&multipliers, &reduced_costs),
        multipliers: multipliers.clone(),
        reduced_costs: reduced_costs.clone(),
    };

    let mut step_sizer = StepSizer::with_step(initial_step);
    let mut period_stopper = Stopper::new(config.subgradient_period, 0.001, 1.0);

    let max_iterations = (10 * model.num_elements()).max(1).min(config.subgradient_iteration_cap);
    for _ in 0..max_iterations {
        let lagrangian_value = engine.compute_lagrangian_value(&multipliers, &reduced_costs);
        step_sizer.observe(lagrangian_value);
        if lagrangian_value > best.lower_bound {
            best = DualState {
                lower_bound: lagrangian_value,
                multipliers: multipliers.clone(),
                reduced_costs: reduced_costs.clone(),
            };
        }

        let subgradient = minimal_cover_subgradient(model, &reduced_costs);
        let norm_sq: f64 = subgradient.iter().map(|s| s * s).sum();
        if norm_sq <= config.subgradient_epsilon {
            break;
        }
        if period_stopper.observe(lagrangian_value) {
            break;
        }

        engine.update_multipliers(step_sizer.step(), lagrangian_value, upper_bound, &subgradient, &mut multipliers);
        engine.parallel_compute_reduced_costs(&multipliers, &mut reduced_costs);
    }

    SubgradientPhaseResult { best, final_step: step_sizer.step() }
}

/// Shapes the raw subgradient (`s_i = 1 - |{j : ĉ_j<0, i ∈ S_j}|`, which can
/// be deeply negative for heavily shared elements) into a "minimal cover"
/// correction: candidate columns with `ĉ_j < 0` are considered in descending
/// order of reduced cost (least negative first); a candidate is accepted,
/// and `+1` added back to each of its elements, only while every one of its
/// elements is still strictly negative (still in need of a covering
/// column). This recovers a near-minimum set of "winning" columns per
/// element rather than leaving every negative-reduced-cost column's full
/// weight counted against it, which otherwise overshoots on heavily shared
/// elements.
fn minimal_cover_subgradient(model: &Model, reduced_costs: &[Cost]) -> Vec<f64> {
    let mut subgradient = vec![1.0; model.num_elements()];
    let negative: Vec<usize> =
        reduced_costs.iter().enumerate().filter(|&(_, &c)| c < 0.0).map(|(j, _)| j).collect();

    for &j in &negative {
        for &e in model.column(SubsetIdx(j as u32)).as_slice() {
            subgradient[e.index()] -= 1.0;
        }
    }

    let mut candidates: Vec<(Cost, usize)> = negative.iter().map(|&j| (reduced_costs[j], j)).collect();
    candidates.sort_by(|a, b| b.0.total_cmp(&a.0));

    for (_, j) in candidates {
        let column = model.column(SubsetIdx(j as u32));
        if column.as_slice().iter().all(|&e| subgradient[e.index()] < 0.0) {
            for &e in column.as_slice() {
                subgradient[e.index()] += 1.0;
            }
        }
    }
    subgradient
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
    fn lower_bound_never_exceeds_a_known_feasible_cost() {
        let model = scenario_a();
        let result = run(&model, 0.1, 3.0, &CftConfig::default());
        assert!(result.best.lower_bound <= 3.0 + 1e-6);
    }
}
