//! Submodule providing [`SparseColumn`], the elements contained in one
//! subset.

use crate::base_types::ElementIdx;

/// The elements contained in one subset `S_j`. An ordered list of
/// [`ElementIdx`], strictly increasing once [`SparseColumn::sort_and_dedup`]
/// has been run (which [`crate::model::Model::sort_elements_in_subsets`]
/// does for every column, and [`crate::model::Model::create_sparse_row_view`]
/// requires).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SparseColumn {
    elements: Vec<ElementIdx>,
    sorted: bool,
}

impl SparseColumn {
    /// Returns an empty column.
    #[must_use]
    pub fn new() -> Self {
        Self { elements: Vec::new(), sorted: true }
    }

    /// Reserves capacity for at least `additional` more elements.
    pub fn reserve(&mut self, additional: usize) {
        self.elements.reserve(additional);
    }

    /// Appends an element, as built by `AddElement`. Clears the sorted flag
    /// unless the column is still trivially sorted (appends in order).
    pub fn push(&mut self, element: ElementIdx) {
        if let Some(&last) = self.elements.last()
            && last >= element
        {
            self.sorted = false;
        }
        self.elements.push(element);
    }

    /// The elements of this column, in their current (not necessarily
    /// sorted) order.
    #[must_use]
    pub fn as_slice(&self) -> &[ElementIdx] {
        &self.elements
    }

    /// Number of elements in this column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// `true` if this column contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// `true` if the column is currently known to be strictly ascending.
    #[must_use]
    pub const fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Radix-sorts the elements of this column in place (LSD, 4 byte-wide
    /// passes over the 32-bit index), then checks for and reports a
    /// repeated element. `std::sort`-style comparison sort is an equally
    /// correct, simpler fallback here if radix sort's extra bookkeeping ever
    /// stops paying for itself on real workloads; see
    /// [`crate::model::radix_sort_u32`].
    pub fn sort_and_dedup(&mut self) -> Result<(), ElementIdx> {
        let mut raw: Vec<u32> = self.elements.iter().map(|e| e.0).collect();
        super::radix_sort_u32(&mut raw);
        self.elements = raw.into_iter().map(ElementIdx).collect();
        self.sorted = true;
        for window in self.elements.windows(2) {
            if window[0] == window[1] {
                return Err(window[0]);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_repeated_element_after_sort() {
        let mut column = SparseColumn::new();
        column.push(ElementIdx(3));
        column.push(ElementIdx(1));
        column.push(ElementIdx(1));
        assert_eq!(column.sort_and_dedup(), Err(ElementIdx(1)));
        assert_eq!(column.as_slice(), &[ElementIdx(1), ElementIdx(1), ElementIdx(3)]);
    }

    #[test]
    fn sorts_ascending() {
        let mut column = SparseColumn::new();
        for e in [5u32, 2, 9, 1] {
            column.push(ElementIdx(e));
        }
        column.sort_and_dedup().unwrap();
        assert_eq!(column.as_slice(), &[ElementIdx(1), ElementIdx(2), ElementIdx(5), ElementIdx(9)]);
    }
}
