//! Submodule providing [`PrimalDualState`], the public return value of a
//! [`super::CftEngine`] run.

use crate::base_types::Cost;
use crate::lagrangian::DualState;
use crate::model::SolutionProto;

/// A feasible solution paired with the dual state that certifies how close
/// it is to optimal (`solution.cost - dual_state.lower_bound` is the
/// optimality gap).
#[derive(Debug, Clone)]
pub struct PrimalDualState {
    /// The best feasible solution found so far, over the full model.
    pub solution: SolutionProto,
    /// The dual state (multipliers, reduced costs, lower bound) that
    /// produced or accompanied `solution`.
    pub dual_state: DualState,
}

impl PrimalDualState {
    /// Convenience accessor: the solution's cost.
    #[must_use]
    pub fn cost(&self) -> Cost {
        self.solution.cost
    }

    /// Convenience accessor: the certified lower bound.
    #[must_use]
    pub fn lower_bound(&self) -> Cost {
        self.dual_state.lower_bound
    }

    /// The proven optimality gap, `cost - lower_bound`. Never negative for a
    /// valid dual state paired with a feasible solution of that cost.
    #[must_use]
    pub fn gap(&self) -> Cost {
        (self.cost() - self.lower_bound()).max(0.0)
    }
}
