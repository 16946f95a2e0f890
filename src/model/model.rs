//! Submodule providing [`Model`], the full set-cover instance.

use crate::base_types::{CompressedList, Cost, ElementIdx, SubsetIdx};
use crate::errors::ModelError;
use crate::model::column::SparseColumn;
use crate::model::feasibility::FeasibilityReport;
use crate::model::intersecting::IntersectingSubsetsRange;
use crate::model::proto::{ModelProto, SubsetProto};
use crate::model::row::SparseRow;
use crate::model::stats::{Stats, compute_stats};

/// The full set-cover instance: elements, subsets, costs, and the optional
/// derived row view and compressed representations.
///
/// The model owns its costs, columns, rows, and compressed views. Values
/// are never mutated once an [`crate::invariant::SetCoverInvariant`] is
/// live over the model, other than through [`Model::set_subset_cost`],
/// which the caller must not invoke while an invariant is live.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Model {
    name: Option<String>,
    subset_costs: Vec<Cost>,
    columns: Vec<SparseColumn>,
    num_elements: usize,
    rows: Option<Vec<SparseRow>>,
    compressed_columns: Option<Vec<CompressedList<ElementIdx>>>,
    compressed_rows: Option<Vec<CompressedList<SubsetIdx>>>,
    timestamp: u64,
}

impl Model {
    /// Returns a new, empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an informational name for this model. Has no effect on any
    /// algorithm; useful only for logging.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// The model's informational name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of subsets currently in the model.
    #[must_use]
    pub fn num_subsets(&self) -> usize {
        self.columns.len()
    }

    /// Number of elements currently in the universe.
    #[must_use]
    pub fn num_elements(&self) -> usize {
        self.num_elements
    }

    /// Total number of (subset, element) incidences across all columns.
    #[must_use]
    pub fn num_nonzeros(&self) -> usize {
        self.columns.iter().map(SparseColumn::len).sum()
    }

    /// Monotonically-increasing timestamp, bumped by [`Model::set_subset_cost`].
    #[must_use]
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Cost of the given subset.
    #[must_use]
    pub fn cost(&self, subset: SubsetIdx) -> Cost {
        self.subset_costs[subset.index()]
    }

    /// All subset costs, indexed by [`SubsetIdx`].
    #[must_use]
    pub fn costs(&self) -> &[Cost] {
        &self.subset_costs
    }

    /// The column (elements) of the given subset.
    #[must_use]
    pub fn column(&self, subset: SubsetIdx) -> &SparseColumn {
        &self.columns[subset.index()]
    }

    /// Every column, indexed by [`SubsetIdx`].
    #[must_use]
    pub fn columns(&self) -> &[SparseColumn] {
        &self.columns
    }

    /// The row (containing subsets) of the given element, if the row view
    /// has been built.
    #[must_use]
    pub fn row(&self, element: ElementIdx) -> Option<&SparseRow> {
        self.rows.as_ref().map(|rows| &rows[element.index()])
    }

    /// `true` once [`Model::create_sparse_row_view`] has succeeded.
    #[must_use]
    pub fn has_row_view(&self) -> bool {
        self.rows.is_some()
    }

    /// Appends a subset with the given cost, returning its index. Indices
    /// are assigned in creation order and never recycled.
    ///
    /// A non-finite or negative cost does not abort the append (the subset
    /// is still created, so indices stay stable) but is logged and will be
    /// surfaced later by [`Model::compute_feasibility`].
    pub fn add_empty_subset(&mut self, cost: Cost) -> SubsetIdx {
        let idx = SubsetIdx::try_from(self.columns.len()).expect("model grew beyond u32::MAX subsets");
        if !cost.is_finite() {
            tracing::warn!(subset = %idx, cost, "add_empty_subset: non-finite cost");
        } else if cost < 0.0 {
            tracing::warn!(subset = %idx, cost, "add_empty_subset: negative cost");
        }
        self.subset_costs.push(cost);
        self.columns.push(SparseColumn::new());
        self.invalidate_views();
        idx
    }

    /// Appends an element to the most recently added subset. Growing the
    /// element index grows the model's element count.
    ///
    /// # Panics
    ///
    /// Panics if no subset has been added yet.
    pub fn add_element_to_last_subset(&mut self, element: ElementIdx) {
        let last = SubsetIdx::try_from(self.columns.len() - 1).expect("model has at least one subset");
        self.add_element_to_subset(element, last);
    }

    /// Appends an element to subset `j`. If `j` is beyond the current
    /// number of subsets, the model grows to include it (new subsets get a
    /// cost of `0.0` and are logged, since an implicit cost is unusual).
    pub fn add_element_to_subset(&mut self, element: ElementIdx, subset: SubsetIdx) {
        while subset.index() >= self.columns.len() {
            let grown = SubsetIdx::try_from(self.columns.len()).expect("model grew beyond u32::MAX subsets");
            tracing::warn!(subset = %grown, "add_element_to_subset: implicitly growing the model with a zero-cost subset");
            self.subset_costs.push(0.0);
            self.columns.push(SparseColumn::new());
        }
        self.num_elements = self.num_elements.max(element.index() + 1);
        self.columns[subset.index()].push(element);
        self.invalidate_views();
    }

    /// Updates the cost of an existing subset and bumps the model's
    /// timestamp. The caller must not do this while an
    /// [`crate::invariant::SetCoverInvariant`] is live over this model.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::SubsetOutOfRange`] if `subset` does not exist.
    pub fn set_subset_cost(&mut self, subset: SubsetIdx, cost: Cost) -> Result<(), ModelError> {
        let slot = self.subset_costs.get_mut(subset.index()).ok_or(ModelError::SubsetOutOfRange(subset))?;
        *slot = cost;
        self.timestamp += 1;
        Ok(())
    }

    /// Reserves capacity for at least `n` subsets.
    pub fn reserve_num_subsets(&mut self, n: usize) {
        self.subset_costs.reserve(n);
        self.columns.reserve(n);
    }

    /// Reserves capacity for at least `n` more elements in subset `j`.
    pub fn reserve_num_elements_in_subset(&mut self, n: usize, subset: SubsetIdx) {
        if let Some(column) = self.columns.get_mut(subset.index()) {
            column.reserve(n);
        }
    }

    /// Grows the model to have at least `n` subsets, each with cost `0.0`.
    /// Never shrinks an existing model.
    pub fn resize_num_subsets(&mut self, n: usize) {
        while self.columns.len() < n {
            self.add_empty_subset(0.0);
        }
    }

    /// Grows the model's element count to at least `n`. Never shrinks.
    pub fn resize_num_elements(&mut self, n: usize) {
        self.num_elements = self.num_elements.max(n);
    }

    /// Radix-sorts each column's elements in place and checks for repeated
    /// indices.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::RepeatedElementInSubset`] for the first subset
    /// found to contain a repeated element.
    pub fn sort_elements_in_subsets(&mut self) -> Result<(), ModelError> {
        for (i, column) in self.columns.iter_mut().enumerate() {
            if let Err(element) = column.sort_and_dedup() {
                let subset = SubsetIdx::try_from(i).expect("index fits");
                return Err(ModelError::RepeatedElementInSubset { subset, element: element.0 });
            }
        }
        Ok(())
    }

    /// Builds the row view from the current columns. Requires (and
    /// enforces) that every column is already strictly ascending.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnsortedColumn`] if some column is not sorted,
    /// or [`ModelError::RepeatedElementInSubset`] if a column contains a
    /// repeated element.
    pub fn create_sparse_row_view(&mut self) -> Result<(), ModelError> {
        for (i, column) in self.columns.iter().enumerate() {
            if !column.is_sorted() {
                let subset = SubsetIdx::try_from(i).expect("index fits");
                return Err(ModelError::UnsortedColumn { subset });
            }
            for window in column.as_slice().windows(2) {
                if window[0] == window[1] {
                    let subset = SubsetIdx::try_from(i).expect("index fits");
                    return Err(ModelError::RepeatedElementInSubset { subset, element: window[0].0 });
                }
            }
        }

        let mut degree = vec![0usize; self.num_elements];
        for column in &self.columns {
            for &element in column.as_slice() {
                degree[element.index()] += 1;
            }
        }

        let mut rows: Vec<SparseRow> = degree.iter().map(|&d| SparseRow::with_capacity(d)).collect();
        for (i, column) in self.columns.iter().enumerate() {
            let subset = SubsetIdx::try_from(i).expect("index fits");
            for &element in column.as_slice() {
                rows[element.index()].push(subset);
            }
        }

        self.rows = Some(rows);
        self.compressed_columns = None;
        self.compressed_rows = None;
        Ok(())
    }

    /// Builds delta-varint compressed encodings of both the column and row
    /// views.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::RowViewNotBuilt`] if the row view has not been
    /// built yet.
    pub fn create_compressed_views(&mut self) -> Result<(), ModelError> {
        let rows = self.rows.as_ref().ok_or(ModelError::RowViewNotBuilt)?;
        self.compressed_columns =
            Some(self.columns.iter().map(|column| CompressedList::from_sorted(column.as_slice())).collect());
        self.compressed_rows = Some(rows.iter().map(|row| CompressedList::from_sorted(row.as_slice())).collect());
        Ok(())
    }

    /// The compressed column view, if built.
    #[must_use]
    pub fn compressed_columns(&self) -> Option<&[CompressedList<ElementIdx>]> {
        self.compressed_columns.as_deref()
    }

    /// The compressed row view, if built.
    #[must_use]
    pub fn compressed_rows(&self) -> Option<&[CompressedList<SubsetIdx>]> {
        self.compressed_rows.as_deref()
    }

    /// Checks model feasibility: every element must be covered by at least
    /// one subset, every cost finite and non-negative. Empty subsets are
    /// reported but do not affect feasibility.
    #[must_use]
    pub fn compute_feasibility(&self) -> FeasibilityReport {
        let mut report = FeasibilityReport::default();

        let mut covered = vec![false; self.num_elements];
        for column in &self.columns {
            for &element in column.as_slice() {
                covered[element.index()] = true;
            }
        }
        for (i, &is_covered) in covered.iter().enumerate() {
            if !is_covered {
                report.uncovered_elements.push(ElementIdx::try_from(i).expect("index fits"));
            }
        }

        for (i, &cost) in self.subset_costs.iter().enumerate() {
            if !cost.is_finite() || cost < 0.0 {
                report.invalid_cost_subsets.push(SubsetIdx::try_from(i).expect("index fits"));
            }
        }

        for (i, column) in self.columns.iter().enumerate() {
            if column.is_empty() {
                let subset = SubsetIdx::try_from(i).expect("index fits");
                tracing::warn!(subset = %subset, "compute_feasibility: empty subset");
                report.empty_subsets.push(subset);
            }
        }

        report
    }

    /// Lazily iterates over the subsets that share at least one element
    /// with `seed` (excluding `seed` itself, each yielded at most once).
    /// Requires the row view to be built.
    #[must_use]
    pub fn intersecting_subsets(&self, seed: SubsetIdx) -> IntersectingSubsetsRange<'_> {
        IntersectingSubsetsRange::new(self, seed)
    }

    /// Descriptive statistics of the column sizes (`|S_j|`).
    #[must_use]
    pub fn column_size_stats(&self) -> Option<Stats> {
        let sizes: Vec<f64> = self.columns.iter().map(|c| c.len() as f64).collect();
        compute_stats(&sizes)
    }

    /// Descriptive statistics of the row sizes, if the row view is built.
    #[must_use]
    pub fn row_size_stats(&self) -> Option<Stats> {
        let rows = self.rows.as_ref()?;
        let sizes: Vec<f64> = rows.iter().map(|r| r.len() as f64).collect();
        compute_stats(&sizes)
    }

    /// Descriptive statistics of the subset costs.
    #[must_use]
    pub fn cost_stats(&self) -> Option<Stats> {
        compute_stats(&self.subset_costs)
    }

    /// Exports the model to its canonical, order-preserving representation.
    /// Subsets are ordered by their current index; the caller should have
    /// already run [`Model::sort_elements_in_subsets`] for the round-trip
    /// property (`import(export(m)) == m`, structurally) to hold.
    #[must_use]
    pub fn export_as_proto(&self) -> ModelProto {
        ModelProto {
            subsets: self
                .columns
                .iter()
                .zip(self.subset_costs.iter())
                .map(|(column, &cost)| SubsetProto { cost, elements: column.as_slice().to_vec() })
                .collect(),
        }
    }

    /// Rebuilds a model from its canonical representation. The proto's
    /// subset order defines the materialized model's indexing.
    #[must_use]
    pub fn import_from_proto(proto: &ModelProto) -> Self {
        let mut model = Self::new();
        for subset in &proto.subsets {
            model.add_empty_subset(subset.cost);
            for &element in &subset.elements {
                model.add_element_to_last_subset(element);
            }
        }
        model
    }

    fn invalidate_views(&mut self) {
        self.rows = None;
        self.compressed_columns = None;
        self.compressed_rows = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_model() -> Model {
        // Scenario A of spec.md §8: elements {0,1,2}.
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
        model
    }

    #[test]
    fn feasibility_holds_for_the_toy_model() {
        let model = toy_model();
        assert!(model.compute_feasibility().is_feasible());
    }

    #[test]
    fn infeasible_model_reports_uncovered_elements() {
        // Scenario C of spec.md §8.
        let mut model = Model::new();
        model.resize_num_elements(3);
        let s0 = model.add_empty_subset(1.0);
        model.add_element_to_subset(ElementIdx(0), s0);
        let s1 = model.add_empty_subset(1.0);
        model.add_element_to_subset(ElementIdx(2), s1);

        let report = model.compute_feasibility();
        assert!(!report.is_feasible());
        assert_eq!(report.uncovered_elements, vec![ElementIdx(1)]);
    }

    #[test]
    fn row_view_round_trips_to_the_original_columns() {
        let mut model = toy_model();
        model.sort_elements_in_subsets().unwrap();
        model.create_sparse_row_view().unwrap();

        let mut reconstructed: Vec<Vec<ElementIdx>> = vec![Vec::new(); model.num_subsets()];
        for element_idx in 0..model.num_elements() {
            let element = ElementIdx::try_from(element_idx).unwrap();
            for &subset in model.row(element).unwrap().as_slice() {
                reconstructed[subset.index()].push(element);
            }
        }
        for (i, column) in model.columns().iter().enumerate() {
            assert_eq!(column.as_slice(), reconstructed[i].as_slice());
        }
    }

    #[test]
    fn proto_round_trip_is_structural() {
        let mut model = toy_model();
        model.sort_elements_in_subsets().unwrap();
        let proto = model.export_as_proto();
        let reimported = Model::import_from_proto(&proto);
        assert_eq!(reimported.export_as_proto(), proto);
    }

    #[test]
    fn compressed_views_round_trip_through_the_row_view() {
        let mut model = toy_model();
        model.sort_elements_in_subsets().unwrap();
        model.create_sparse_row_view().unwrap();
        model.create_compressed_views().unwrap();

        for (i, column) in model.columns().iter().enumerate() {
            let subset = SubsetIdx::try_from(i).unwrap();
            let compressed = &model.compressed_columns().unwrap()[subset.index()];
            assert_eq!(compressed.to_vec(), column.as_slice());
        }
    }
}
