//! Submodule providing [`FullToCoreModel`], the pricing-backed core model
//! that keeps a full-model dual state alongside a compacted [`CoreModel`]
//! and periodically refreshes the core from full-model reduced costs.

use bitvec::vec::BitVec;

use crate::base_types::{Cost, SubsetIdx};
use crate::lagrangian::{LagrangianConfig, LagrangianEngine};
use crate::model::Model;
use crate::views::core_model::CoreModel;

/// The pricing-refresh outcome of [`FullToCoreModel::update_core`]: whether
/// the core was rebuilt this call, and (if so) the old/new core sizes for
/// logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreRefresh {
    /// `true` if the countdown reached zero and the core was rebuilt.
    pub refreshed: bool,
    /// Number of columns in the core before the refresh.
    pub old_core_size: usize,
    /// Number of columns in the core after the refresh (equal to
    /// `old_core_size` if `!refreshed`).
    pub new_core_size: usize,
}

/// A [`CoreModel`] paired with a dual state over the *full* model and a
/// pricing countdown, per `spec.md` §4.6.
#[derive(Debug)]
pub struct FullToCoreModel<'model> {
    full: &'model Model,
    core: CoreModel,
    full_multipliers: Vec<f64>,
    active_rows: BitVec,
    fixed_full_subsets: Vec<SubsetIdx>,
    countdown: usize,
    /// Current pricing period: the countdown value a refresh resets to,
    /// separate from `countdown` itself (which ticks down to zero) so
    /// [`FullToCoreModel::adjust_countdown_period`] can scale it from its own
    /// prior value rather than from the already-exhausted countdown.
    period: usize,
    countdown_cap: usize,
}

impl<'model> FullToCoreModel<'model> {
    /// Builds the initial core over `initial_focus`, with a countdown
    /// starting at 10 and capped at `min(1000, |E| / 3)`.
    #[must_use]
    pub fn new(full: &'model Model, initial_focus: &[SubsetIdx]) -> Self {
        let active_rows = BitVec::repeat(true, full.num_elements());
        let core = CoreModel::build(full, initial_focus, &active_rows, Vec::new());
        let countdown_cap = (full.num_elements() / 3).min(1000).max(1);
        Self {
            full,
            core,
            full_multipliers: vec![0.0; full.num_elements()],
            active_rows,
            fixed_full_subsets: Vec::new(),
            countdown: 10,
            period: 10,
            countdown_cap,
        }
    }

    /// The current compacted core model and its index maps.
    #[must_use]
    pub fn core(&self) -> &CoreModel {
        &self.core
    }

    /// Iterations remaining before the next pricing refresh.
    #[must_use]
    pub fn countdown(&self) -> usize {
        self.countdown
    }

    /// Fixes `full_subsets` permanently into the solution: their rows are
    /// pruned from `active_rows` and the core is rebuilt over the
    /// remaining focus. Mirrors `SubModelView::fix_more_columns` at the
    /// full-model level.
    pub fn fix_full_columns(&mut self, full_subsets: &[SubsetIdx]) {
        for &subset in full_subsets {
            self.fixed_full_subsets.push(subset);
            for &element in self.full.column(subset).as_slice() {
                self.active_rows.set(element.index(), false);
            }
        }
        let focus: Vec<SubsetIdx> = self.core.core_model().columns().iter().enumerate().filter_map(|(i, _)| {
            let full_subset = self.core.to_full_subset(SubsetIdx(i as u32));
            (!self.fixed_full_subsets.contains(&full_subset)).then_some(full_subset)
        }).collect();
        self.core = CoreModel::build(self.full, &focus, &self.active_rows, self.fixed_full_subsets.clone());
        self.countdown += 10;
    }

    /// Decrements the pricing countdown; when it reaches zero, lifts the
    /// core multipliers to full-model multipliers (`core_multipliers`,
    /// indexed by core element), recomputes full reduced costs and a
    /// lower bound, and rebuilds the core from the union of: the current
    /// best solution, the `5*|E|` most negative full reduced costs, and
    /// each row's best 5 covering columns by reduced cost. On a refresh,
    /// also adapts the next countdown period from how much the core lower
    /// bound (`core_lower_bound`) has closed the gap to the freshly
    /// recomputed full lower bound, via [`FullToCoreModel::adjust_countdown_period`].
    pub fn update_core(
        &mut self,
        core_multipliers: &[f64],
        core_lower_bound: Cost,
        best_core_solution: &[SubsetIdx],
    ) -> CoreRefresh {
        let old_core_size = self.core.core_model().num_subsets();
        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown > 0 {
            return CoreRefresh { refreshed: false, old_core_size, new_core_size: old_core_size };
        }

        for (core_idx, &u) in core_multipliers.iter().enumerate() {
            let full_element = self.core.to_full_element(crate::base_types::ElementIdx(core_idx as u32));
            self.full_multipliers[full_element.index()] = u;
        }

        let engine = LagrangianEngine::new(self.full, LagrangianConfig::default());
        let reduced_costs = engine.compute_reduced_costs(&self.full_multipliers);
        let full_lower_bound = engine.compute_lagrangian_value(&self.full_multipliers, &reduced_costs);

        let mut best_solution_full: Vec<SubsetIdx> =
            best_core_solution.iter().map(|&core_subset| self.core.to_full_subset(core_subset)).collect();

        let mut ranked: Vec<(Cost, SubsetIdx)> = reduced_costs
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c < 0.0)
            .map(|(j, &c)| (c, SubsetIdx(j as u32)))
            .collect();
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
        let cap = (5 * self.full.num_elements()).max(1);
        let mut focus_set: Vec<SubsetIdx> = ranked.iter().take(cap).map(|&(_, j)| j).collect();

        for element_idx in 0..self.full.num_elements() {
            if !self.active_rows[element_idx] {
                continue;
            }
            let element = crate::base_types::ElementIdx(element_idx as u32);
            let Some(row) = self.full.row(element) else { continue };
            let mut covering: Vec<(Cost, SubsetIdx)> =
                row.as_slice().iter().map(|&j| (reduced_costs[j.index()], j)).collect();
            covering.sort_by(|a, b| a.0.total_cmp(&b.0));
            focus_set.extend(covering.into_iter().take(5).map(|(_, j)| j));
        }

        focus_set.append(&mut best_solution_full);
        focus_set.sort_unstable_by_key(|&j| j.index());
        focus_set.dedup();
        focus_set.retain(|j| !self.fixed_full_subsets.contains(j));

        self.core = CoreModel::build(self.full, &focus_set, &self.active_rows, self.fixed_full_subsets.clone());
        self.adjust_countdown_period(core_lower_bound, full_lower_bound);
        CoreRefresh { refreshed: true, old_core_size, new_core_size: self.core.core_model().num_subsets() }
    }

    /// Adjusts the next pricing period given how much the core lower bound
    /// closed the gap to the full lower bound: `period <- min(cap, k *
    /// period)` with `k` in `{10, 5, 2}` for gaps `<= 1e-6`, `<= 2%`,
    /// `<= 20%`, otherwise reset to 10. Also resets the countdown to the
    /// new period. Called by [`FullToCoreModel::update_core`] every time a
    /// refresh completes.
    pub fn adjust_countdown_period(&mut self, core_lower_bound: Cost, full_lower_bound: Cost) {
        let gap = if full_lower_bound.abs() > f64::EPSILON {
            (full_lower_bound - core_lower_bound).abs() / full_lower_bound.abs()
        } else {
            0.0
        };
        let k = if gap <= 1e-6 {
            10
        } else if gap <= 0.02 {
            5
        } else if gap <= 0.20 {
            2
        } else {
            self.period = 10;
            self.countdown = self.period;
            return;
        };
        self.period = (self.period * k).min(self.countdown_cap);
        self.countdown = self.period;
    }
}
