//! Submodule providing [`ConsistencyLevel`], the four explicit consistency
//! levels a [`super::SetCoverInvariant`] can be maintained at.

/// The consistency level at which a [`super::SetCoverInvariant`] is being
/// maintained. Levels are monotone: a higher level includes every guarantee
/// of every lower level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConsistencyLevel {
    /// Only `is_selected` is meaningful.
    Inconsistent = 1,
    /// `cost` and `coverage[]` are up to date.
    CostAndCoverage = 2,
    /// Additionally, `num_uncovered` and `num_free_elements[]` are up to
    /// date.
    FreeAndUncovered = 3,
    /// Additionally, `num_non_overcovered[]`, `is_redundant[]`, and the
    /// newly-(non-)removable lists are up to date.
    Redundancy = 4,
}

impl ConsistencyLevel {
    /// All four levels, lowest to highest.
    pub const ALL: [Self; 4] =
        [Self::Inconsistent, Self::CostAndCoverage, Self::FreeAndUncovered, Self::Redundancy];
}
