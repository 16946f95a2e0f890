//! Submodule providing the [`SolutionGenerator`] trait and its
//! implementations: constructive heuristics (trivial, random, greedy,
//! element-degree), local search (steepest descent, guided tabu search,
//! guided local search), and the perturbation helpers used to restart a
//! stalled local search.

pub mod element_degree;
pub mod greedy;
pub mod guided_local_search;
pub mod guided_tabu;
pub mod heap;
pub mod perturbation;
pub mod random;
pub mod steepest;
pub mod trait_def;
pub mod trivial;

pub use element_degree::{ElementDegreeSolutionGenerator, LazyElementDegreeSolutionGenerator};
pub use greedy::GreedySolutionGenerator;
pub use guided_local_search::{GuidedLocalSearch, GuidedLocalSearchConfig};
pub use guided_tabu::{GuidedTabuConfig, GuidedTabuSearch};
pub use heap::AdjustableHeap;
pub use perturbation::{clear_most_covered_elements, clear_random_subsets};
pub use random::RandomSolutionGenerator;
pub use steepest::{LazySteepestSearch, SteepestSearch};
pub use trait_def::SolutionGenerator;
pub use trivial::TrivialSolutionGenerator;
