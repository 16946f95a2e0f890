//! Submodule providing [`SetCoverInvariant`], the incremental candidate
//! assignment.

use std::collections::HashMap;

use bitvec::vec::BitVec;

use crate::base_types::{Cost, Decision, ElementIdx, SubsetIdx};
use crate::invariant::ConsistencyLevel;
use crate::model::{Model, SolutionProto};

/// The incremental candidate assignment over a [`Model`]: which subsets are
/// selected, and the derived metrics that depend on that selection, kept up
/// to date at one of four explicit [`ConsistencyLevel`]s.
///
/// Borrows the model read-only; owns its own coverage/selection/trace
/// state. Must be reset via [`SetCoverInvariant::clear`] before reuse across
/// a different model.
#[derive(Debug)]
pub struct SetCoverInvariant<'model> {
    model: &'model Model,
    level: ConsistencyLevel,

    is_selected: BitVec,
    coverage: Vec<u32>,
    cost: Cost,

    num_uncovered: usize,
    num_free_elements: Vec<usize>,

    num_non_overcovered: Vec<usize>,
    is_redundant: BitVec,

    trace: Vec<Decision>,
    newly_removable_subsets: Vec<SubsetIdx>,
    newly_non_removable_subsets: Vec<SubsetIdx>,
}

impl<'model> SetCoverInvariant<'model> {
    /// Creates a new invariant over `model`, with every subset unselected.
    /// Starts at [`ConsistencyLevel::Inconsistent`]; call
    /// [`SetCoverInvariant::recompute`] to lift it.
    #[must_use]
    pub fn new(model: &'model Model) -> Self {
        let num_subsets = model.num_subsets();
        let num_elements = model.num_elements();
        Self {
            model,
            level: ConsistencyLevel::Inconsistent,
            is_selected: BitVec::repeat(false, num_subsets),
            coverage: vec![0; num_elements],
            cost: 0.0,
            num_uncovered: num_elements,
            num_free_elements: model.columns().iter().map(|c| c.len()).collect(),
            num_non_overcovered: model.columns().iter().map(|c| c.len()).collect(),
            is_redundant: model.columns().iter().map(crate::model::SparseColumn::is_empty).collect(),
            trace: Vec::new(),
            newly_removable_subsets: Vec::new(),
            newly_non_removable_subsets: Vec::new(),
        }
    }

    /// Resets the invariant to its just-constructed state, so it can be
    /// reused over the same model (or, after re-binding, a different one of
    /// matching shape).
    pub fn clear(&mut self) {
        self.is_selected.fill(false);
        self.coverage.fill(0);
        self.cost = 0.0;
        self.num_uncovered = self.model.num_elements();
        for (free, column) in self.num_free_elements.iter_mut().zip(self.model.columns()) {
            *free = column.len();
        }
        for (non_over, column) in self.num_non_overcovered.iter_mut().zip(self.model.columns()) {
            *non_over = column.len();
        }
        for (i, mut redundant) in self.is_redundant.iter_mut().enumerate() {
            *redundant = self.model.columns()[i].is_empty();
        }
        self.trace.clear();
        self.newly_removable_subsets.clear();
        self.newly_non_removable_subsets.clear();
        self.level = ConsistencyLevel::Inconsistent;
    }

    /// The model this invariant is tracking.
    #[must_use]
    pub fn model(&self) -> &'model Model {
        self.model
    }

    /// The current consistency level.
    #[must_use]
    pub fn level(&self) -> ConsistencyLevel {
        self.level
    }

    /// `true` if `subset` is currently selected.
    #[must_use]
    pub fn is_selected(&self, subset: SubsetIdx) -> bool {
        self.is_selected[subset.index()]
    }

    /// The current objective value: the sum of the costs of selected
    /// subsets. Valid from [`ConsistencyLevel::CostAndCoverage`].
    #[must_use]
    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// Number of selected subsets covering `element`. Valid from
    /// [`ConsistencyLevel::CostAndCoverage`].
    #[must_use]
    pub fn coverage(&self, element: ElementIdx) -> u32 {
        self.coverage[element.index()]
    }

    /// Number of elements covered by no selected subset. Valid from
    /// [`ConsistencyLevel::FreeAndUncovered`].
    #[must_use]
    pub fn num_uncovered(&self) -> usize {
        self.num_uncovered
    }

    /// Number of elements of `subset` covered by no selected subset. Valid
    /// from [`ConsistencyLevel::FreeAndUncovered`].
    #[must_use]
    pub fn num_free_elements(&self, subset: SubsetIdx) -> usize {
        self.num_free_elements[subset.index()]
    }

    /// Number of elements of `subset` covered at most once. Valid from
    /// [`ConsistencyLevel::Redundancy`].
    #[must_use]
    pub fn num_non_overcovered(&self, subset: SubsetIdx) -> usize {
        self.num_non_overcovered[subset.index()]
    }

    /// `true` if every element of `subset` is covered at least twice (so
    /// deselecting it preserves feasibility). Valid from
    /// [`ConsistencyLevel::Redundancy`].
    #[must_use]
    pub fn is_redundant(&self, subset: SubsetIdx) -> bool {
        self.is_redundant[subset.index()]
    }

    /// Subsets that transitioned to redundant during the most recent
    /// select/deselect call. Cleared by
    /// [`SetCoverInvariant::clear_removability_information`].
    #[must_use]
    pub fn newly_removable_subsets(&self) -> &[SubsetIdx] {
        &self.newly_removable_subsets
    }

    /// Subsets that transitioned away from redundant during the most recent
    /// select/deselect call.
    #[must_use]
    pub fn newly_non_removable_subsets(&self) -> &[SubsetIdx] {
        &self.newly_non_removable_subsets
    }

    /// Clears the newly-(non-)removable lists.
    pub fn clear_removability_information(&mut self) {
        self.newly_removable_subsets.clear();
        self.newly_non_removable_subsets.clear();
    }

    /// The decision trace so far.
    #[must_use]
    pub fn trace(&self) -> &[Decision] {
        &self.trace
    }

    /// Iterates over the currently-selected subsets, ascending.
    pub fn selected_subsets(&self) -> impl Iterator<Item = SubsetIdx> + '_ {
        self.is_selected
            .iter()
            .enumerate()
            .filter_map(|(i, selected)| selected.then(|| SubsetIdx::try_from(i).expect("index fits")))
    }

    /// Selects `subset`. A no-op if it is already selected. Requires (and
    /// restores) at least `level`.
    pub fn select(&mut self, subset: SubsetIdx, level: ConsistencyLevel) {
        if self.is_selected(subset) {
            return;
        }
        self.is_selected.set(subset.index(), true);
        self.cost += self.model.cost(subset);
        self.trace.push(Decision::select(subset));
        self.apply_coverage_delta(subset, 1, level);
        self.level = self.level.max(level);
    }

    /// Deselects `subset`. A no-op if it is not currently selected.
    /// Requires (and restores) at least `level`.
    pub fn deselect(&mut self, subset: SubsetIdx, level: ConsistencyLevel) {
        if !self.is_selected(subset) {
            return;
        }
        self.is_selected.set(subset.index(), false);
        self.cost -= self.model.cost(subset);
        self.trace.push(Decision::deselect(subset));
        self.apply_coverage_delta(subset, -1, level);
        self.level = self.level.max(level);
    }

    /// Sugar for `select`/`deselect` of the opposite of the subset's
    /// current polarity.
    pub fn flip(&mut self, subset: SubsetIdx, level: ConsistencyLevel) {
        if self.is_selected(subset) {
            self.deselect(subset, level);
        } else {
            self.select(subset, level);
        }
    }

    fn apply_coverage_delta(&mut self, subset: SubsetIdx, sign: i32, level: ConsistencyLevel) {
        debug_assert!(sign == 1 || sign == -1);
        let need_free_and_uncovered = level >= ConsistencyLevel::FreeAndUncovered;
        let need_redundancy = level >= ConsistencyLevel::Redundancy;

        for &element in self.model.column(subset).as_slice() {
            let before = self.coverage[element.index()];
            let after = (before as i64 + i64::from(sign)) as u32;
            self.coverage[element.index()] = after;

            if need_free_and_uncovered && before == 0 && after == 1 {
                self.num_uncovered -= 1;
                self.for_each_subset_touching(element, |inv, j| inv.num_free_elements[j.index()] -= 1);
            } else if need_free_and_uncovered && before == 1 && after == 0 {
                self.num_uncovered += 1;
                self.for_each_subset_touching(element, |inv, j| inv.num_free_elements[j.index()] += 1);
            }

            if need_redundancy && before == 1 && after == 2 {
                self.for_each_subset_touching(element, |inv, j| {
                    inv.num_non_overcovered[j.index()] -= 1;
                    if inv.num_non_overcovered[j.index()] == 0 && !inv.is_redundant[j.index()] {
                        inv.is_redundant.set(j.index(), true);
                        inv.newly_removable_subsets.push(j);
                    }
                });
            } else if need_redundancy && before == 2 && after == 1 {
                self.for_each_subset_touching(element, |inv, j| {
                    inv.num_non_overcovered[j.index()] += 1;
                    if inv.num_non_overcovered[j.index()] == 1 && inv.is_redundant[j.index()] {
                        inv.is_redundant.set(j.index(), false);
                        inv.newly_non_removable_subsets.push(j);
                    }
                });
            }
        }
    }

    fn for_each_subset_touching(&mut self, element: ElementIdx, mut f: impl FnMut(&mut Self, SubsetIdx)) {
        let row = self.model.row(element).expect(
            "consistency levels FreeAndUncovered and above require the model's row view to be built",
        );
        // Collected up front: `f` mutably borrows `self`, which the row
        // slice (borrowed from `self.model`) does not alias, but both can't
        // be held across the closure call without a short-lived copy.
        let subsets: Vec<SubsetIdx> = row.as_slice().to_vec();
        for subset in subsets {
            f(self, subset);
        }
    }

    /// Replaces `is_selected` wholesale and recomputes `cost` and
    /// `coverage` from scratch, reaching [`ConsistencyLevel::CostAndCoverage`].
    /// Higher levels must be explicitly lifted with
    /// [`SetCoverInvariant::recompute`].
    ///
    /// # Panics
    ///
    /// Panics if `selection.len() != self.model.num_subsets()`.
    pub fn load_solution(&mut self, selection: &[bool]) {
        assert_eq!(selection.len(), self.model.num_subsets());
        self.is_selected = selection.iter().collect();
        self.coverage.fill(0);
        self.cost = 0.0;
        for (i, &selected) in selection.iter().enumerate() {
            if !selected {
                continue;
            }
            let subset = SubsetIdx::try_from(i).expect("index fits");
            self.cost += self.model.cost(subset);
            for &element in self.model.column(subset).as_slice() {
                self.coverage[element.index()] += 1;
            }
        }
        self.trace.clear();
        for subset in self.selected_subsets().collect::<Vec<_>>() {
            self.trace.push(Decision::select(subset));
        }
        self.level = ConsistencyLevel::CostAndCoverage;
    }

    /// Brings the invariant from its current level up to `target`,
    /// reconstructing the missing fields from `coverage` and the model's
    /// columns/rows.
    pub fn recompute(&mut self, target: ConsistencyLevel) {
        if self.level >= target {
            return;
        }
        if target >= ConsistencyLevel::FreeAndUncovered && self.level < ConsistencyLevel::FreeAndUncovered {
            self.num_uncovered = self.coverage.iter().filter(|&&c| c == 0).count();
            for (j, column) in self.model.columns().iter().enumerate() {
                self.num_free_elements[j] =
                    column.as_slice().iter().filter(|&&e| self.coverage[e.index()] == 0).count();
            }
        }
        if target >= ConsistencyLevel::Redundancy && self.level < ConsistencyLevel::Redundancy {
            for (j, column) in self.model.columns().iter().enumerate() {
                self.num_non_overcovered[j] =
                    column.as_slice().iter().filter(|&&e| self.coverage[e.index()] <= 1).count();
                self.is_redundant.set(j, self.num_non_overcovered[j] == 0);
            }
        }
        self.level = target;
    }

    /// `O(|S_j|)` redundancy test using only the live `coverage` array,
    /// independent of whether `num_non_overcovered`/`is_redundant` are
    /// being maintained.
    #[must_use]
    pub fn compute_is_redundant(&self, subset: SubsetIdx) -> bool {
        self.model.column(subset).as_slice().iter().all(|&e| self.coverage[e.index()] >= 2)
    }

    /// `O(|S_j|)` live free-element count, independent of whether
    /// `num_free_elements` is being maintained.
    #[must_use]
    pub fn compute_num_free_elements(&self, subset: SubsetIdx) -> usize {
        self.model.column(subset).as_slice().iter().filter(|&&e| self.coverage[e.index()] == 0).count()
    }

    /// Replaces the trace with an equivalent, minimal sequence containing
    /// each finally-selected subset exactly once, as a positive decision,
    /// in the order its most recent selection occurred. `cost` and
    /// `coverage` are unchanged.
    pub fn compress_trace(&mut self) {
        let mut last_select_position: HashMap<SubsetIdx, usize> = HashMap::new();
        for (position, decision) in self.trace.iter().enumerate() {
            if decision.is_select() {
                last_select_position.insert(decision.subset(), position);
            }
        }
        let mut entries: Vec<(usize, SubsetIdx)> = self
            .selected_subsets()
            .filter_map(|subset| last_select_position.get(&subset).map(|&pos| (pos, subset)))
            .collect();
        entries.sort_unstable_by_key(|&(pos, _)| pos);
        self.trace = entries.into_iter().map(|(_, subset)| Decision::select(subset)).collect();
    }

    /// Exports the current selection as a canonical solution, in trace
    /// insertion order.
    #[must_use]
    pub fn export_solution(&self) -> SolutionProto {
        SolutionProto {
            num_subsets: self.model.num_subsets() as i64,
            cost: self.cost,
            subsets: self
                .trace
                .iter()
                .filter(|d| d.is_select())
                .map(|d| d.subset())
                .filter(|&s| self.is_selected(s))
                .map(|s| i64::from(s.0))
                .collect(),
        }
    }

    /// Loads a selection from its canonical solution representation.
    pub fn import_solution(&mut self, solution: &SolutionProto) {
        assert_eq!(solution.num_subsets as usize, self.model.num_subsets());
        let mut selected = vec![false; self.model.num_subsets()];
        for &raw in &solution.subsets {
            selected[raw as usize] = true;
        }
        self.load_solution(&selected);
    }

    /// Expensive consistency audit, intended for tests: recomputes every
    /// field from scratch up to `level` and asserts it matches the
    /// maintained state.
    ///
    /// # Panics
    ///
    /// Panics (this is a programming-error guard, not a recoverable
    /// condition) if any invariant of `spec.md` §3 is violated at `level`.
    pub fn check_consistency(&self, level: ConsistencyLevel) {
        let mut expected_coverage = vec![0u32; self.model.num_elements()];
        let mut expected_cost = 0.0;
        for subset in self.selected_subsets() {
            expected_cost += self.model.cost(subset);
            for &element in self.model.column(subset).as_slice() {
                expected_coverage[element.index()] += 1;
            }
        }
        assert!((expected_cost - self.cost).abs() < 1e-6, "cost is inconsistent with the selection");
        assert_eq!(expected_coverage, self.coverage, "coverage is inconsistent with the selection");

        if level >= ConsistencyLevel::FreeAndUncovered {
            let expected_uncovered = expected_coverage.iter().filter(|&&c| c == 0).count();
            assert_eq!(expected_uncovered, self.num_uncovered);
            for (j, column) in self.model.columns().iter().enumerate() {
                let expected_free =
                    column.as_slice().iter().filter(|&&e| expected_coverage[e.index()] == 0).count();
                assert_eq!(expected_free, self.num_free_elements[j], "num_free_elements[{j}] is inconsistent");
            }
        }

        if level >= ConsistencyLevel::Redundancy {
            for (j, column) in self.model.columns().iter().enumerate() {
                let expected_non_over =
                    column.as_slice().iter().filter(|&&e| expected_coverage[e.index()] <= 1).count();
                assert_eq!(
                    expected_non_over, self.num_non_overcovered[j],
                    "num_non_overcovered[{j}] is inconsistent"
                );
                assert_eq!(
                    expected_non_over == 0,
                    self.is_redundant[j],
                    "is_redundant[{j}] is inconsistent"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;

    fn scenario_a() -> Model {
        let mut model = Model::new();
        let s0 = model.add_empty_subset(1.0);
        model.add_element_to_subset(ElementIdx(0), s0);
        let s1 = model.add_empty_subset(2.0);
        model.add_element_to_subset(ElementIdx(1), s1);
        model.add_element_to_subset(ElementIdx(2), s1);
        let s2 = model.add_empty_subset(1.0);
        model.add_element_to_subset(ElementIdx(1), s2);
        let s3 = model.add_empty_subset(1.0);
        model.add_element_to_subset(ElementIdx(2), s3);
        model.sort_elements_in_subsets().unwrap();
        model.create_sparse_row_view().unwrap();
        model
    }

    #[test]
    fn select_and_deselect_maintain_cost_and_coverage() {
        let model = scenario_a();
        let mut inv = SetCoverInvariant::new(&model);
        inv.select(SubsetIdx(0), ConsistencyLevel::Redundancy);
        inv.select(SubsetIdx(1), ConsistencyLevel::Redundancy);
        assert_eq!(inv.cost(), 3.0);
        assert_eq!(inv.coverage(ElementIdx(0)), 1);
        assert_eq!(inv.coverage(ElementIdx(1)), 1);
        assert_eq!(inv.coverage(ElementIdx(2)), 1);
        assert_eq!(inv.num_uncovered(), 0);
        inv.check_consistency(ConsistencyLevel::Redundancy);

        inv.deselect(SubsetIdx(0), ConsistencyLevel::Redundancy);
        assert_eq!(inv.cost(), 2.0);
        assert_eq!(inv.coverage(ElementIdx(0)), 0);
        assert_eq!(inv.num_uncovered(), 1);
        inv.check_consistency(ConsistencyLevel::Redundancy);
    }

    #[test]
    fn redundancy_tracks_newly_removable_subsets() {
        // Scenario B of spec.md §8.
        let mut model = Model::new();
        let s0 = model.add_empty_subset(1.0);
        model.add_element_to_subset(ElementIdx(0), s0);
        model.add_element_to_subset(ElementIdx(1), s0);
        let s1 = model.add_empty_subset(1.0);
        model.add_element_to_subset(ElementIdx(1), s1);
        model.add_element_to_subset(ElementIdx(2), s1);
        let s2 = model.add_empty_subset(1.0);
        model.add_element_to_subset(ElementIdx(0), s2);
        model.add_element_to_subset(ElementIdx(2), s2);
        model.sort_elements_in_subsets().unwrap();
        model.create_sparse_row_view().unwrap();

        let mut inv = SetCoverInvariant::new(&model);
        inv.select(SubsetIdx(0), ConsistencyLevel::Redundancy);
        inv.select(SubsetIdx(1), ConsistencyLevel::Redundancy);
        assert!(!inv.is_redundant(SubsetIdx(0)));
        assert!(!inv.is_redundant(SubsetIdx(1)));

        inv.clear_removability_information();
        inv.select(SubsetIdx(2), ConsistencyLevel::Redundancy);
        // All three elements are now double-covered: every selected subset
        // is redundant.
        assert!(inv.is_redundant(SubsetIdx(0)));
        assert!(inv.is_redundant(SubsetIdx(1)));
        assert!(inv.is_redundant(SubsetIdx(2)));
        assert_eq!(inv.newly_removable_subsets().len(), 3);
    }

    #[test]
    fn compress_trace_keeps_one_positive_decision_per_final_subset() {
        let model = scenario_a();
        let mut inv = SetCoverInvariant::new(&model);
        inv.select(SubsetIdx(0), ConsistencyLevel::Redundancy);
        inv.select(SubsetIdx(1), ConsistencyLevel::Redundancy);
        inv.select(SubsetIdx(2), ConsistencyLevel::Redundancy);
        inv.deselect(SubsetIdx(2), ConsistencyLevel::Redundancy);
        let cost_before = inv.cost();
        let coverage_before: Vec<u32> = (0..model.num_elements())
            .map(|i| inv.coverage(ElementIdx::try_from(i).unwrap()))
            .collect();

        inv.compress_trace();

        assert_eq!(inv.trace().len(), 2);
        assert!(inv.trace().iter().all(Decision::is_select));
        assert_eq!(inv.cost(), cost_before);
        let coverage_after: Vec<u32> = (0..model.num_elements())
            .map(|i| inv.coverage(ElementIdx::try_from(i).unwrap()))
            .collect();
        assert_eq!(coverage_before, coverage_after);
    }
}
