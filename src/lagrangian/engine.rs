//! Submodule providing [`LagrangianEngine`], the Lagrangian lower-bound
//! computation over a [`Model`].

use crate::base_types::Cost;
use crate::lagrangian::dual_state::DualState;
use crate::lagrangian::step_sizer::StepSizer;
use crate::lagrangian::stopper::Stopper;
use crate::lagrangian::task_pool::TaskPool;
use crate::model::Model;

/// Tunables for [`LagrangianEngine::compute_lower_bound`]'s main loop.
#[derive(Debug, Clone)]
pub struct LagrangianConfig {
    /// Hard cap on subgradient iterations.
    pub max_iterations: usize,
    /// Multiplier clamp upper bound (`u_i <= multiplier_cap`).
    pub multiplier_cap: f64,
    /// Minimum chunk size handed to the [`TaskPool`] per slice task.
    pub chunk_size: usize,
}

impl Default for LagrangianConfig {
    fn default() -> Self {
        Self { max_iterations: 1000, multiplier_cap: 1.0e6, chunk_size: 256 }
    }
}

/// Computes Lagrangian lower bounds for a [`Model`]: multiplier
/// initialization, reduced costs, subgradients, and the main subgradient
/// ascent loop, with an optional [`TaskPool`] for the column-wise passes.
#[derive(Debug)]
pub struct LagrangianEngine<'model> {
    model: &'model Model,
    config: LagrangianConfig,
    pool: TaskPool,
}

impl<'model> LagrangianEngine<'model> {
    /// Builds an engine running every slice task inline on the calling
    /// thread.
    #[must_use]
    pub fn new(model: &'model Model, config: LagrangianConfig) -> Self {
        Self { model, config, pool: TaskPool::inline() }
    }

    /// Builds an engine that schedules slice tasks on `pool`.
    #[must_use]
    pub fn with_pool(model: &'model Model, config: LagrangianConfig, pool: TaskPool) -> Self {
        Self { model, config, pool }
    }

    /// `u_i = min_{j: i in S_j} c_j / |S_j|`. Elements touched by no subset
    /// (an infeasible model) get `u_i = 0`.
    #[must_use]
    pub fn initialize_multipliers(&self) -> Vec<f64> {
        let mut multipliers = vec![f64::INFINITY; self.model.num_elements()];
        for (j, column) in self.model.columns().iter().enumerate() {
            if column.is_empty() {
                continue;
            }
            let ratio = self.model.costs()[j] / column.len() as f64;
            for &element in column.as_slice() {
                let slot = &mut multipliers[element.index()];
                if ratio < *slot {
                    *slot = ratio;
                }
            }
        }
        for u in &mut multipliers {
            if !u.is_finite() {
                *u = 0.0;
            }
        }
        multipliers
    }

    /// `ĉ_j(u) = c_j - sum(u_i for i in S_j)`, one slice task per chunk of
    /// subset indices.
    #[must_use]
    pub fn compute_reduced_costs(&self, multipliers: &[f64]) -> Vec<Cost> {
        let mut reduced_costs = vec![0.0; self.model.num_subsets()];
        self.parallel_compute_reduced_costs(multipliers, &mut reduced_costs);
        reduced_costs
    }

    /// Column-wise reduced-cost computation, writing into the caller's
    /// `reduced_costs` buffer (one disjoint slice per task).
    pub fn parallel_compute_reduced_costs(&self, multipliers: &[f64], reduced_costs: &mut [Cost]) {
        debug_assert_eq!(reduced_costs.len(), self.model.num_subsets());
        let model = self.model;
        let costs = model.costs();
        let chunk_size = self.config.chunk_size;
        self.pool.for_each_chunk_mut(reduced_costs, chunk_size, |start, chunk| {
            for (offset, slot) in chunk.iter_mut().enumerate() {
                let j = start + offset;
                let sum: f64 = model
                    .column(crate::base_types::SubsetIdx(j as u32))
                    .as_slice()
                    .iter()
                    .map(|&e| multipliers[e.index()])
                    .sum();
                *slot = costs[j] - sum;
            }
        });
    }

    /// `s_i = 1 - |{j : ĉ_j < 0, i in S_j}|`.
    #[must_use]
    pub fn compute_subgradient(&self, reduced_costs: &[Cost]) -> Vec<f64> {
        let mut subgradient = vec![1.0; self.model.num_elements()];
        for (j, column) in self.model.columns().iter().enumerate() {
            if reduced_costs[j] >= 0.0 {
                continue;
            }
            for &element in column.as_slice() {
                subgradient[element.index()] -= 1.0;
            }
        }
        subgradient
    }

    /// `L(u) = sum(u_i) + sum(ĉ_j for ĉ_j < 0)`.
    #[must_use]
    pub fn compute_lagrangian_value(&self, multipliers: &[f64], reduced_costs: &[Cost]) -> Cost {
        let sum_u: f64 = multipliers.iter().sum();
        let sum_negative: f64 = reduced_costs.iter().filter(|&&c| c < 0.0).sum();
        sum_u + sum_negative
    }

    /// `u_i <- clamp(u_i + step * (UB - L) / |s|^2 * s_i, 0, multiplier_cap)`.
    pub fn update_multipliers(
        &self,
        step: f64,
        lagrangian_value: Cost,
        upper_bound: Cost,
        subgradient: &[f64],
        multipliers: &mut [f64],
    ) {
        let norm_sq: f64 = subgradient.iter().map(|s| s * s).sum();
        if norm_sq <= f64::EPSILON {
            return;
        }
        let scale = step * (upper_bound - lagrangian_value) / norm_sq;
        for (u, &s) in multipliers.iter_mut().zip(subgradient) {
            *u = (*u + scale * s).clamp(0.0, self.config.multiplier_cap);
        }
    }

    /// Runs the subgradient ascent main loop (`spec.md` §4.4): repeatedly
    /// updates the multipliers, tracks the best lower bound seen, and stops
    /// early via [`Stopper`] or after `max_iterations`. Returns the best
    /// dual state found.
    #[must_use]
    pub fn compute_lower_bound(&self, upper_bound: Cost) -> DualState {
        let mut multipliers = self.initialize_multipliers();
        let mut reduced_costs = self.compute_reduced_costs(&multipliers);
        let mut best = DualState {
            lower_bound: self.compute_lagrangian_value(&multipliers, &reduced_costs),
            multipliers: multipliers.clone(),
            reduced_costs: reduced_costs.clone(),
        };

        let mut step_sizer = StepSizer::new_default();
        let mut stopper = Stopper::new_default();

        for _ in 0..self.config.max_iterations {
            let lagrangian_value = self.compute_lagrangian_value(&multipliers, &reduced_costs);
            step_sizer.observe(lagrangian_value);
            if lagrangian_value > best.lower_bound {
                best = DualState {
                    lower_bound: lagrangian_value,
                    multipliers: multipliers.clone(),
                    reduced_costs: reduced_costs.clone(),
                };
            }
            if stopper.observe(lagrangian_value) {
                break;
            }

            let subgradient = self.compute_subgradient(&reduced_costs);
            self.update_multipliers(step_sizer.step(), lagrangian_value, upper_bound, &subgradient, &mut multipliers);
            self.parallel_compute_reduced_costs(&multipliers, &mut reduced_costs);
        }

        best
    }
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
        model
    }

    #[test]
    fn lower_bound_never_exceeds_a_known_feasible_cost() {
        let model = scenario_a();
        let engine = LagrangianEngine::new(&model, LagrangianConfig::default());
        // {s0, s1} is feasible with cost 3.
        let bound = engine.compute_lower_bound(3.0);
        assert!(bound.lower_bound <= 3.0 + 1e-6, "LB {} should not exceed a feasible UB", bound.lower_bound);
    }

    #[test]
    fn reduced_costs_match_their_definition() {
        let model = scenario_a();
        let engine = LagrangianEngine::new(&model, LagrangianConfig::default());
        let multipliers = vec![0.5, 0.5, 0.5];
        let reduced = engine.compute_reduced_costs(&multipliers);
        assert!((reduced[0] - 0.5).abs() < 1e-9);
        assert!((reduced[1] - 1.0).abs() < 1e-9);
    }
}
