//! Submodule providing [`IntersectingSubsetsRange`], a lazy iterator over
//! the subsets that share at least one element with a seed subset.

use bitvec::vec::BitVec;

use crate::base_types::SubsetIdx;
use crate::model::Model;

/// Lazily iterates over every subset that intersects `seed` (shares at
/// least one element with it), excluding `seed` itself and never yielding a
/// subset twice.
///
/// Walks the elements of `S_seed` in column order; for each element, walks
/// the element's row in ascending subset order. A seen-bitset is allocated
/// on first use (not eagerly, since many callers only consume a handful of
/// items before stopping).
pub struct IntersectingSubsetsRange<'model> {
    model: &'model Model,
    seed: SubsetIdx,
    element_cursor: usize,
    row_cursor: usize,
    seen: Option<BitVec>,
}

impl<'model> IntersectingSubsetsRange<'model> {
    /// Builds the lazy iterator over subsets intersecting `seed`. The model
    /// must already have a row view built.
    #[must_use]
    pub fn new(model: &'model Model, seed: SubsetIdx) -> Self {
        Self { model, seed, element_cursor: 0, row_cursor: 0, seen: None }
    }

    fn mark_seen(&mut self, subset: SubsetIdx) -> bool {
        let seen = self.seen.get_or_insert_with(|| BitVec::repeat(false, self.model.num_subsets()));
        if seen[subset.index()] {
            return false;
        }
        seen.set(subset.index(), true);
        true
    }
}

impl Iterator for IntersectingSubsetsRange<'_> {
    type Item = SubsetIdx;

    fn next(&mut self) -> Option<SubsetIdx> {
        let seed_column = self.model.column(self.seed);
        loop {
            let Some(&element) = seed_column.as_slice().get(self.element_cursor) else {
                return None;
            };
            let row = self.model.row(element).expect("row view must be built before iterating intersecting subsets");
            let row_slice = row.as_slice();
            while let Some(&candidate) = row_slice.get(self.row_cursor) {
                self.row_cursor += 1;
                if candidate == self.seed {
                    continue;
                }
                if self.mark_seen(candidate) {
                    return Some(candidate);
                }
            }
            self.element_cursor += 1;
            self.row_cursor = 0;
        }
    }
}
