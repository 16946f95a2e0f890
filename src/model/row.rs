//! Submodule providing [`SparseRow`], the subsets containing one element.

use crate::base_types::SubsetIdx;

/// The subsets containing one element. An ordered list of [`SubsetIdx`],
/// strictly increasing by construction: [`crate::model::Model::create_sparse_row_view`]
/// builds every row by scanning columns in ascending order, which produces a
/// strictly-ascending row automatically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SparseRow {
    subsets: Vec<SubsetIdx>,
}

impl SparseRow {
    /// Returns an empty row with the given capacity hint.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { subsets: Vec::with_capacity(capacity) }
    }

    /// Appends a subset index. Callers are responsible for appending in
    /// ascending column order, which is how `create_sparse_row_view` uses
    /// this method.
    pub fn push(&mut self, subset: SubsetIdx) {
        debug_assert!(self.subsets.last().is_none_or(|&last| last < subset));
        self.subsets.push(subset);
    }

    /// The subsets containing this row's element, strictly ascending.
    #[must_use]
    pub fn as_slice(&self) -> &[SubsetIdx] {
        &self.subsets
    }

    /// Number of subsets containing this row's element.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subsets.len()
    }

    /// `true` if no subset contains this row's element.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subsets.is_empty()
    }
}
