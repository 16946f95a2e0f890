#![doc = include_str!("../README.md")]

//! Core data model, incremental invariant, and heuristic/matheuristic search
//! procedures for the weighted set-cover problem: given a universe `E` of
//! elements and a family of subsets `S_j` of `E` with positive costs `c_j`,
//! find a selection `K` minimizing `sum(c_j for j in K)` subject to
//! `union(S_j for j in K) == E`.
//!
//! File-format readers/writers, MIP-solver bindings, CLI plumbing, and a
//! concrete thread pool are treated as external collaborators and are
//! represented here, where relevant, only as narrow trait interfaces.

pub mod base_types;
pub mod cft;
pub mod errors;
pub mod generators;
pub mod invariant;
pub mod io;
pub mod lagrangian;
pub mod mip;
pub mod model;
pub mod views;

/// Re-exports of the most commonly used types, for `use set_cover::prelude::*;`.
pub mod prelude {
    pub use crate::base_types::{CompressedList, Cost, Decision, ElementIdx, SubsetIdx};
    pub use crate::cft::{CftConfig, CftEngine, PrimalDualState};
    pub use crate::errors::{ModelError, SolveError};
    pub use crate::generators::SolutionGenerator;
    pub use crate::invariant::{ConsistencyLevel, SetCoverInvariant};
    pub use crate::io::{ModelReader, SolutionWriter};
    pub use crate::mip::MipAdapter;
    pub use crate::model::Model;
    pub use crate::views::Focus;
}
