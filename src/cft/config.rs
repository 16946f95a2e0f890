//! Submodule providing [`CftConfig`].

use std::time::Duration;

/// Tunables for [`super::CftEngine`], following the crate's
/// config-struct-with-hand-rolled-`Default` convention (mirrors
/// [`crate::lagrangian::LagrangianConfig`]).
#[derive(Debug, Clone)]
pub struct CftConfig {
    /// Hard cap on the number of outer (dual/primal/fixing) loop rounds.
    pub max_rounds: usize,
    /// Absolute cap on phase-1 subgradient iterations, independent of the
    /// `10 * |E|` budget.
    pub subgradient_iteration_cap: usize,
    /// Squared-norm threshold below which the minimal-cover subgradient is
    /// considered converged.
    pub subgradient_epsilon: f64,
    /// Window, in iterations, of phase 1's periodic exit test.
    pub subgradient_period: usize,
    /// Reduced-cost threshold a column must clear (be strictly below) to be
    /// a column-fixing candidate.
    pub fixing_reduced_cost_threshold: f64,
    /// Fraction of `|E|` that must be fixed per round
    /// (`ceil(fixing_min_fraction * |E|)`), topped up by a greedy cover if
    /// short.
    pub fixing_min_fraction: f64,
    /// Multiplier jitter range applied after column fixing to diversify the
    /// next round's dual phase.
    pub multiplier_jitter: (f64, f64),
    /// Wall-clock budget for the whole run. `None` means no limit.
    pub time_limit: Option<Duration>,
}

impl Default for CftConfig {
    fn default() -> Self {
        Self {
            max_rounds: 100,
            subgradient_iteration_cap: 10_000,
            subgradient_epsilon: 1e-6,
            subgradient_period: 300,
            fixing_reduced_cost_threshold: -0.001,
            fixing_min_fraction: 1.0 / 200.0,
            multiplier_jitter: (0.9, 1.1),
            time_limit: None,
        }
    }
}
