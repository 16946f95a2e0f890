//! Submodule providing the canonical, in-memory schema described in
//! `spec.md` §6.1. Wire-level (de)serialization of these structs is an
//! external collaborator's concern; this crate only guarantees a
//! structural, order-preserving round-trip through them via
//! [`crate::model::Model::export_as_proto`] /
//! [`crate::model::Model::import_from_proto`].

use crate::base_types::{Cost, ElementIdx};

/// One subset, as it appears in [`ModelProto`]: a cost and a sorted,
/// duplicate-free list of element indices.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubsetProto {
    /// The subset's cost.
    pub cost: Cost,
    /// The subset's elements, sorted ascending.
    pub elements: Vec<ElementIdx>,
}

/// Canonical representation of a [`crate::model::Model`]: subsets ordered
/// by their index, each with a sorted element list.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelProto {
    /// The model's subsets, in index order.
    pub subsets: Vec<SubsetProto>,
}

/// Canonical representation of a solution: the number of subsets in the
/// model it was computed over, its cost, and the selected subset indices in
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolutionProto {
    /// Number of subsets in the model the solution refers to.
    pub num_subsets: i64,
    /// The solution's cost.
    pub cost: Cost,
    /// Selected subset indices, in insertion order.
    pub subsets: Vec<i64>,
}
