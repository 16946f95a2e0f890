//! Submodule providing [`DualState`], the multipliers/reduced-costs/bound
//! triple produced by the Lagrangian engine.

use crate::base_types::Cost;

/// A snapshot of the Lagrangian dual: one multiplier per element, one
/// reduced cost per subset, and the resulting lower bound.
#[derive(Debug, Clone, PartialEq)]
pub struct DualState {
    /// `u_i`, one per element.
    pub multipliers: Vec<f64>,
    /// `ĉ_j(u)`, one per subset.
    pub reduced_costs: Vec<Cost>,
    /// `L(u)`.
    pub lower_bound: Cost,
}

impl DualState {
    /// A zeroed dual state of the given shape.
    #[must_use]
    pub fn zeroed(num_elements: usize, num_subsets: usize) -> Self {
        Self { multipliers: vec![0.0; num_elements], reduced_costs: vec![0.0; num_subsets], lower_bound: 0.0 }
    }
}
