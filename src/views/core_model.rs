//! Submodule providing [`CoreModel`], a materialized compacted [`Model`]
//! over a focus of columns and surviving rows, with two-way index maps back
//! to the full model.

use bitvec::vec::BitVec;

use crate::base_types::{ElementIdx, SubsetIdx};
use crate::model::Model;

/// A compacted [`Model`] built from a subset of a full model's columns and
/// the rows they still intersect, plus the index maps needed to translate
/// core indices back to full-model indices (and vice versa).
///
/// Rebuilt from scratch by [`CoreModel::build`] whenever the focus or the
/// fixed-column set changes; this crate favors the simplicity of a full
/// rebuild over incremental patching, matching `spec.md` §4.6's description
/// of `CoreModel` as materializing a fresh compacted model.
#[derive(Debug, Clone)]
pub struct CoreModel {
    core: Model,
    core_to_full_subset: Vec<SubsetIdx>,
    full_to_core_subset: Vec<Option<SubsetIdx>>,
    core_to_full_element: Vec<ElementIdx>,
    full_to_core_element: Vec<Option<ElementIdx>>,
    fixed_full_subsets: Vec<SubsetIdx>,
}

impl CoreModel {
    /// Builds a core model over `focus` columns of `full`, restricted to
    /// the rows flagged active in `active_rows` (indexed by full element
    /// index). `fixed_full_subsets` is carried through unchanged, as the
    /// record of which full-model columns are already permanently
    /// selected.
    #[must_use]
    pub fn build(
        full: &Model,
        focus: &[SubsetIdx],
        active_rows: &BitVec,
        fixed_full_subsets: Vec<SubsetIdx>,
    ) -> Self {
        let mut full_to_core_element = vec![None; full.num_elements()];
        let mut core_to_full_element = Vec::new();
        for element_idx in 0..full.num_elements() {
            if active_rows[element_idx] {
                let core_element = ElementIdx::try_from(core_to_full_element.len()).expect("core fits in u32");
                full_to_core_element[element_idx] = Some(core_element);
                core_to_full_element.push(ElementIdx::try_from(element_idx).expect("index fits"));
            }
        }

        let mut core = Model::new();
        let mut full_to_core_subset = vec![None; full.num_subsets()];
        let mut core_to_full_subset = Vec::with_capacity(focus.len());
        for &full_subset in focus {
            let core_subset = core.add_empty_subset(full.cost(full_subset));
            full_to_core_subset[full_subset.index()] = Some(core_subset);
            core_to_full_subset.push(full_subset);
            for &full_element in full.column(full_subset).as_slice() {
                if let Some(core_element) = full_to_core_element[full_element.index()] {
                    core.add_element_to_subset(core_element, core_subset);
                }
            }
        }
        let _ = core.sort_elements_in_subsets();
        let _ = core.create_sparse_row_view();

        Self {
            core,
            core_to_full_subset,
            full_to_core_subset,
            core_to_full_element,
            full_to_core_element,
            fixed_full_subsets,
        }
    }

    /// The compacted model itself.
    #[must_use]
    pub fn core_model(&self) -> &Model {
        &self.core
    }

    /// Maps a core subset index back to its full-model index.
    #[must_use]
    pub fn to_full_subset(&self, core: SubsetIdx) -> SubsetIdx {
        self.core_to_full_subset[core.index()]
    }

    /// Maps a full-model subset index to its core index, if it is in focus.
    #[must_use]
    pub fn to_core_subset(&self, full: SubsetIdx) -> Option<SubsetIdx> {
        self.full_to_core_subset.get(full.index()).copied().flatten()
    }

    /// Maps a core element index back to its full-model index.
    #[must_use]
    pub fn to_full_element(&self, core: ElementIdx) -> ElementIdx {
        self.core_to_full_element[core.index()]
    }

    /// Maps a full-model element index to its core index, if its row
    /// survived.
    #[must_use]
    pub fn to_core_element(&self, full: ElementIdx) -> Option<ElementIdx> {
        self.full_to_core_element.get(full.index()).copied().flatten()
    }

    /// Full-model subset indices already fixed into the solution (carried
    /// through, not part of the core model itself).
    #[must_use]
    pub fn fixed_full_subsets(&self) -> &[SubsetIdx] {
        &self.fixed_full_subsets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base_types::ElementIdx;

    #[test]
    fn core_model_round_trips_indices() {
        let mut full = Model::new();
        let s0 = full.add_empty_subset(1.0);
        full.add_element_to_subset(ElementIdx(0), s0);
        let s1 = full.add_empty_subset(2.0);
        full.add_element_to_subset(ElementIdx(1), s1);
        full.add_element_to_subset(ElementIdx(2), s1);

        let active_rows = BitVec::repeat(true, full.num_elements());
        let core = CoreModel::build(&full, &[SubsetIdx(1)], &active_rows, Vec::new());

        assert_eq!(core.core_model().num_subsets(), 1);
        assert_eq!(core.core_model().num_elements(), 2);
        assert_eq!(core.to_full_subset(SubsetIdx(0)), SubsetIdx(1));
        assert_eq!(core.to_core_subset(SubsetIdx(1)), Some(SubsetIdx(0)));
        assert_eq!(core.to_core_subset(SubsetIdx(0)), None);
        assert_eq!(core.to_full_element(ElementIdx(0)), ElementIdx(1));
        assert_eq!(core.to_core_element(ElementIdx(1)), Some(ElementIdx(0)));
        assert_eq!(core.to_core_element(ElementIdx(0)), None);
    }
}
