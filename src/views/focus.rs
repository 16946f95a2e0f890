//! Submodule providing [`Focus`], the subset-restriction argument shared by
//! every [`crate::generators::SolutionGenerator`].

use bitvec::vec::BitVec;

use crate::base_types::SubsetIdx;

/// Restricts a generator's attention to a subset of the model's columns.
/// `spec.md` §4.3 describes this as "a list or bool vector"; both
/// representations are kept so callers can pick whichever is cheaper to
/// build for their use case.
#[derive(Debug, Clone)]
pub enum Focus {
    /// Every subset of the model is in focus.
    All,
    /// Exactly the listed subsets are in focus, in the given order.
    Indices(Vec<SubsetIdx>),
    /// Subset `j` is in focus iff the `j`-th bit is set.
    Mask(BitVec),
}

impl Focus {
    /// A focus over `0..num_subsets`.
    #[must_use]
    pub fn all(num_subsets: usize) -> Self {
        let _ = num_subsets;
        Self::All
    }

    /// `true` if `subset` is in this focus.
    #[must_use]
    pub fn contains(&self, subset: SubsetIdx) -> bool {
        match self {
            Self::All => true,
            Self::Indices(indices) => indices.contains(&subset),
            Self::Mask(mask) => mask.get(subset.index()).is_some_and(|bit| *bit),
        }
    }

    /// Iterates over the focused subsets in ascending index order, given
    /// the model's total subset count (needed to expand [`Focus::All`]).
    pub fn iter(&self, num_subsets: usize) -> Box<dyn Iterator<Item = SubsetIdx> + '_> {
        match self {
            Self::All => Box::new((0..num_subsets).map(|i| SubsetIdx(i as u32))),
            Self::Indices(indices) => Box::new(indices.iter().copied()),
            Self::Mask(mask) => {
                Box::new(mask.iter_ones().map(|i| SubsetIdx(i as u32)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_contains_every_index() {
        let focus = Focus::all(5);
        assert!(focus.contains(SubsetIdx(4)));
        assert_eq!(focus.iter(5).count(), 5);
    }

    #[test]
    fn indices_restricts_membership() {
        let focus = Focus::Indices(vec![SubsetIdx(1), SubsetIdx(3)]);
        assert!(focus.contains(SubsetIdx(1)));
        assert!(!focus.contains(SubsetIdx(2)));
        assert_eq!(focus.iter(5).collect::<Vec<_>>(), vec![SubsetIdx(1), SubsetIdx(3)]);
    }

    #[test]
    fn mask_restricts_membership() {
        let mut mask = BitVec::repeat(false, 4);
        mask.set(2, true);
        let focus = Focus::Mask(mask);
        assert!(focus.contains(SubsetIdx(2)));
        assert!(!focus.contains(SubsetIdx(0)));
        assert_eq!(focus.iter(4).collect::<Vec<_>>(), vec![SubsetIdx(2)]);
    }
}
