//! Column-fixing (diving) phase of the three-phase engine: commits a batch
//! of promising columns permanently into the solution so the next round's
//! core model is strictly smaller.

use bitvec::vec::BitVec;
use rand::Rng;

use crate::base_types::{Cost, SubsetIdx};
use crate::cft::config::CftConfig;
use crate::generators::heap::AdjustableHeap;
use crate::generators::greedy::{priority, push_priority};
use crate::invariant::{ConsistencyLevel, SetCoverInvariant};
use crate::model::Model;

/// Picks the columns to fix this round: every column with
/// `ĉ_j < config.fixing_reduced_cost_threshold`, accepted greedily by most
/// negative reduced cost first, rejecting any that would over-cover a row
/// already claimed by an earlier acceptance (so the accepted set is an
/// independent set of the "shares an element" overlap graph). If fewer than
/// `⌈fixing_min_fraction * |E|⌉` columns survive, tops up with a Chvátal
/// greedy pass (ignoring the disjointness constraint) restricted to
/// unfixed columns until that count is reached or every column is fixed.
#[must_use]
pub fn run(model: &Model, reduced_costs: &[Cost], config: &CftConfig) -> Vec<SubsetIdx> {
    let num_elements = model.num_elements();
    let mut candidates: Vec<(Cost, SubsetIdx)> = reduced_costs
        .iter()
        .enumerate()
        .filter(|&(_, &c)| c < config.fixing_reduced_cost_threshold)
        .map(|(j, &c)| (c, SubsetIdx(j as u32)))
        .collect();
    candidates.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut covered = vec![false; num_elements];
    let mut fixed = Vec::new();
    for (_, subset) in candidates {
        let column = model.column(subset);
        if column.as_slice().iter().any(|&e| covered[e.index()]) {
            continue;
        }
        for &e in column.as_slice() {
            covered[e.index()] = true;
        }
        fixed.push(subset);
    }

    let target =
        ((config.fixing_min_fraction * num_elements as f64).ceil() as usize).clamp(1, model.num_subsets().max(1));
    if fixed.len() < target {
        top_up_with_greedy(model, &mut fixed, target);
    }
    fixed
}

fn top_up_with_greedy(model: &Model, fixed: &mut Vec<SubsetIdx>, target: usize) {
    let num_subsets = model.num_subsets();
    let mut invariant = SetCoverInvariant::new(model);
    invariant.recompute(ConsistencyLevel::FreeAndUncovered);
    for &subset in fixed.iter() {
        invariant.select(subset, ConsistencyLevel::FreeAndUncovered);
    }

    let mut heap: AdjustableHeap<16> = AdjustableHeap::with_capacity(num_subsets);
    for j in 0..num_subsets {
        push_priority(&invariant, &mut heap, SubsetIdx(j as u32));
    }

    let mut subset_seen = BitVec::repeat(false, num_subsets);
    while fixed.len() < target {
        let Some((_, payload)) = heap.pop_max() else { break };
        let subset = SubsetIdx(payload as u32);
        if invariant.is_selected(subset) || invariant.compute_num_free_elements(subset) == 0 {
            continue;
        }

        let newly_covered: Vec<_> =
            model.column(subset).as_slice().iter().filter(|&&e| invariant.coverage(e) == 0).copied().collect();
        invariant.select(subset, ConsistencyLevel::FreeAndUncovered);
        fixed.push(subset);

        subset_seen.fill(false);
        for element in newly_covered {
            let Some(row) = model.row(element) else { continue };
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
                    heap.update_priority(touched.index(), priority(free, model.cost(touched)));
                }
            }
        }
    }
}

/// Multiplies each multiplier by a uniform sample in `config.multiplier_jitter`
/// to diversify the next round's dual phase after fixing.
pub fn jitter_multipliers(multipliers: &mut [f64], config: &CftConfig, rng: &mut impl Rng) {
    let (low, high) = config.multiplier_jitter;
    for u in multipliers {
        *u *= rng.gen_range(low..=high);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base_types::ElementIdx;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

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
    fn fixes_at_least_the_minimum_fraction() {
        let model = scenario_a();
        let reduced_costs = vec![-1.0, -1.0, -1.0, -1.0];
        let config = CftConfig { fixing_min_fraction: 0.5, fixing_reduced_cost_threshold: -0.5, ..CftConfig::default() };
        let fixed = run(&model, &reduced_costs, &config);
        let target = ((0.5 * model.num_elements() as f64).ceil() as usize).max(1);
        assert!(fixed.len() >= target);
    }

    #[test]
    fn jitter_keeps_multipliers_within_the_configured_range() {
        let mut multipliers = vec![1.0, 2.0, 3.0];
        let config = CftConfig::default();
        let mut rng = SmallRng::seed_from_u64(5);
        jitter_multipliers(&mut multipliers, &config, &mut rng);
        assert!(multipliers[0] >= 0.9 && multipliers[0] <= 2.2);
    }
}
