//! Submodule providing the packed [`Decision`] trace entry.

use crate::base_types::SubsetIdx;

/// One flip of a subset's selection state, packed into a signed 64-bit
/// integer: `select(j)` packs to `j` (non-negative), `deselect(j)` packs to
/// the bitwise complement `!j` (negative). Bitwise complement is its own
/// inverse, so `subset_idx()` recovers `j` in both polarities without a
/// branch-heavy unpacking scheme, and `j == 0` is representable with either
/// polarity (`0` selects, `!0i64 == -1` deselects).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decision(i64);

impl Decision {
    /// Packs a `select(j)` decision.
    #[must_use]
    pub const fn select(subset: SubsetIdx) -> Self {
        Self(subset.0 as i64)
    }

    /// Packs a `deselect(j)` decision.
    #[must_use]
    pub const fn deselect(subset: SubsetIdx) -> Self {
        Self(!(subset.0 as i64))
    }

    /// Returns `true` if this decision selects its subset, `false` if it
    /// deselects it.
    #[must_use]
    pub const fn is_select(self) -> bool {
        self.0 >= 0
    }

    /// Returns the subset this decision applies to, regardless of polarity.
    #[must_use]
    pub const fn subset(self) -> SubsetIdx {
        let raw = if self.0 >= 0 { self.0 } else { !self.0 };
        SubsetIdx(raw as u32)
    }

    /// Returns the raw packed representation.
    #[must_use]
    pub const fn raw(self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_is_non_negative_and_deselect_is_negative() {
        let s = Decision::select(SubsetIdx(5));
        let d = Decision::deselect(SubsetIdx(5));
        assert!(s.is_select());
        assert!(!d.is_select());
        assert_eq!(s.subset(), SubsetIdx(5));
        assert_eq!(d.subset(), SubsetIdx(5));
    }

    #[test]
    fn subset_zero_is_representable_in_both_polarities() {
        let s = Decision::select(SubsetIdx(0));
        let d = Decision::deselect(SubsetIdx(0));
        assert_ne!(s.raw(), d.raw());
        assert_eq!(s.subset(), SubsetIdx(0));
        assert_eq!(d.subset(), SubsetIdx(0));
    }
}
