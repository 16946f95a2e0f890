//! Submodule providing [`FeasibilityReport`], the detailed result of
//! [`crate::model::Model::compute_feasibility`].

use crate::base_types::{ElementIdx, SubsetIdx};

/// Detailed result of a feasibility check over a [`crate::model::Model`].
/// `spec.md` names a boolean `ComputeFeasibility` contract; this expands it
/// (per `SPEC_FULL.md` §4.1, grounded on `set_cover_model.cc`'s collection
/// of diagnostic detail) while [`FeasibilityReport::is_feasible`] preserves
/// the original boolean contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeasibilityReport {
    /// Elements covered by no subset.
    pub uncovered_elements: Vec<ElementIdx>,
    /// Subsets whose cost is non-finite or negative.
    pub invalid_cost_subsets: Vec<SubsetIdx>,
    /// Subsets with no elements. Logged but not fatal to feasibility.
    pub empty_subsets: Vec<SubsetIdx>,
}

impl FeasibilityReport {
    /// A model is feasible iff every element is covered by at least one
    /// subset and every cost is finite and non-negative. Empty subsets do
    /// not affect feasibility.
    #[must_use]
    pub fn is_feasible(&self) -> bool {
        self.uncovered_elements.is_empty() && self.invalid_cost_subsets.is_empty()
    }
}

impl core::fmt::Display for FeasibilityReport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} uncovered element(s), {} subset(s) with an invalid cost, {} empty subset(s)",
            self.uncovered_elements.len(),
            self.invalid_cost_subsets.len(),
            self.empty_subsets.len()
        )
    }
}

impl std::error::Error for FeasibilityReport {}
