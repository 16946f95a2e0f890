//! Submodule providing [`SubModelView`], the lightweight column/row focus
//! kept alongside the full [`Model`] during CFT's fixing/diving phase.

use bitvec::vec::BitVec;

use crate::base_types::SubsetIdx;
use crate::model::Model;

/// A focus over a [`Model`]'s columns together with the set of rows
/// (elements) still needing coverage, without materializing a compacted
/// model. `fix_more_columns` permanently removes columns from further
/// consideration and prunes the rows they cover; `set_focus` only changes
/// which columns are under consideration.
#[derive(Debug)]
pub struct SubModelView<'model> {
    model: &'model Model,
    focus: Vec<SubsetIdx>,
    active_rows: BitVec,
    fixed: BitVec,
    column_sizes: Vec<usize>,
}

impl<'model> SubModelView<'model> {
    /// A view over the whole model: every row active, no column fixed, an
    /// empty focus (call [`SubModelView::set_focus`] to populate it).
    #[must_use]
    pub fn new(model: &'model Model) -> Self {
        Self {
            model,
            focus: Vec::new(),
            active_rows: BitVec::repeat(true, model.num_elements()),
            fixed: BitVec::repeat(false, model.num_subsets()),
            column_sizes: vec![0; model.num_subsets()],
        }
    }

    /// The underlying full model.
    #[must_use]
    pub fn model(&self) -> &'model Model {
        self.model
    }

    /// The columns currently in focus.
    #[must_use]
    pub fn focus(&self) -> &[SubsetIdx] {
        &self.focus
    }

    /// Number of rows (elements) not yet covered by a fixed column.
    #[must_use]
    pub fn num_active_rows(&self) -> usize {
        self.active_rows.count_ones()
    }

    /// `true` if `element`'s row has not yet been pruned by fixing.
    #[must_use]
    pub fn is_row_active(&self, element: crate::base_types::ElementIdx) -> bool {
        self.active_rows[element.index()]
    }

    /// `true` if `subset` has been permanently fixed into the solution.
    #[must_use]
    pub fn is_fixed(&self, subset: SubsetIdx) -> bool {
        self.fixed[subset.index()]
    }

    /// Number of active rows `subset` still intersects.
    #[must_use]
    pub fn column_size(&self, subset: SubsetIdx) -> usize {
        self.column_sizes[subset.index()]
    }

    /// Replaces the focus column list and recomputes each focused column's
    /// intersection size with the currently active rows.
    pub fn set_focus(&mut self, columns: &[SubsetIdx]) {
        self.focus = columns.to_vec();
        self.recompute_sizes();
    }

    /// Marks `columns` as fixed: their sizes drop to zero and every row
    /// they cover is pruned (removed from consideration, since a fixed
    /// column permanently covers it). Recomputes the remaining focus
    /// columns' sizes against the newly-pruned row set.
    pub fn fix_more_columns(&mut self, columns: &[SubsetIdx]) {
        for &subset in columns {
            self.fixed.set(subset.index(), true);
            self.column_sizes[subset.index()] = 0;
            for &element in self.model.column(subset).as_slice() {
                self.active_rows.set(element.index(), false);
            }
        }
        self.recompute_sizes();
    }

    fn recompute_sizes(&mut self) {
        for &subset in &self.focus {
            if self.fixed[subset.index()] {
                self.column_sizes[subset.index()] = 0;
                continue;
            }
            let size = self
                .model
                .column(subset)
                .as_slice()
                .iter()
                .filter(|&&e| self.active_rows[e.index()])
                .count();
            self.column_sizes[subset.index()] = size;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base_types::ElementIdx;

    fn scenario_a() -> Model {
        let mut model = Model::new();
        let s0 = model.add_empty_subset(1.0);
        model.add_element_to_subset(ElementIdx(0), s0);
        let s1 = model.add_empty_subset(2.0);
        model.add_element_to_subset(ElementIdx(1), s1);
        model.add_element_to_subset(ElementIdx(2), s1);
        model
    }

    #[test]
    fn fixing_a_column_prunes_its_rows_and_shrinks_overlapping_sizes() {
        let model = scenario_a();
        let mut view = SubModelView::new(&model);
        view.set_focus(&[SubsetIdx(0), SubsetIdx(1)]);
        assert_eq!(view.column_size(SubsetIdx(1)), 2);

        view.fix_more_columns(&[SubsetIdx(0)]);
        assert!(view.is_fixed(SubsetIdx(0)));
        assert!(!view.is_row_active(ElementIdx(0)));
        assert_eq!(view.num_active_rows(), 2);
        // subset 1 does not touch element 0, so its size is unaffected.
        assert_eq!(view.column_size(SubsetIdx(1)), 2);
    }
}
