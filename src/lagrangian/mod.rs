//! Submodule providing the Lagrangian lower-bound computation: multiplier
//! initialization, reduced costs, subgradients, and the adaptive
//! step-size/stopping policies driving the main loop.

pub mod dual_state;
#[allow(clippy::module_inception)]
pub mod engine;
pub mod step_sizer;
pub mod stopper;
pub mod task_pool;

pub use dual_state::DualState;
pub use engine::{LagrangianConfig, LagrangianEngine};
pub use step_sizer::StepSizer;
pub use stopper::Stopper;
pub use task_pool::TaskPool;
