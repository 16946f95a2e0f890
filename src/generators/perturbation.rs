//! Perturbation helpers: deliberately break part of a feasible solution so
//! a generator has room to rebuild it differently, returning the cleared
//! subsets for use as the next generator's focus.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::base_types::SubsetIdx;
use crate::invariant::{ConsistencyLevel, SetCoverInvariant};
use crate::model::IntersectingSubsetsRange;
use crate::views::Focus;

/// Picks `k` selected subsets uniformly at random (restricted to `focus`),
/// deselects each, and also deselects every subset intersecting it (so the
/// elements they used to cover are genuinely reopened). Stops as soon as at
/// least `k` subsets have been cleared in total.
pub fn clear_random_subsets(
    k: usize,
    invariant: &mut SetCoverInvariant<'_>,
    focus: &Focus,
    rng: &mut impl Rng,
) -> Vec<SubsetIdx> {
    let num_subsets = invariant.model().num_subsets();
    let mut candidates: Vec<SubsetIdx> =
        focus.iter(num_subsets).filter(|&j| invariant.is_selected(j)).collect();
    candidates.shuffle(rng);

    let mut cleared = Vec::new();
    for seed in candidates {
        if cleared.len() >= k {
            break;
        }
        if !invariant.is_selected(seed) {
            continue;
        }
        invariant.deselect(seed, ConsistencyLevel::CostAndCoverage);
        cleared.push(seed);

        let intersecting: Vec<SubsetIdx> =
            IntersectingSubsetsRange::new(invariant.model(), seed).collect();
        for subset in intersecting {
            if invariant.is_selected(subset) {
                invariant.deselect(subset, ConsistencyLevel::CostAndCoverage);
                cleared.push(subset);
            }
        }
    }
    cleared
}

/// Collects selected subsets (restricted to `focus`) that contain at least
/// one over-covered element (coverage > 1), shuffles them, truncates to
/// `k`, and deselects the survivors.
pub fn clear_most_covered_elements(
    k: usize,
    invariant: &mut SetCoverInvariant<'_>,
    focus: &Focus,
    rng: &mut impl Rng,
) -> Vec<SubsetIdx> {
    let num_subsets = invariant.model().num_subsets();
    let mut candidates: Vec<SubsetIdx> = focus
        .iter(num_subsets)
        .filter(|&j| invariant.is_selected(j))
        .filter(|&j| invariant.model().column(j).as_slice().iter().any(|&e| invariant.coverage(e) > 1))
        .collect();
    candidates.shuffle(rng);
    candidates.truncate(k);

    for &subset in &candidates {
        invariant.deselect(subset, ConsistencyLevel::CostAndCoverage);
    }
    candidates
}
