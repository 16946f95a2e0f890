//! Submodule providing the [`ElementIdx`] strong index type.

use core::fmt;

/// Identifier of one element of the universe `E`. Backed by a 32-bit index;
/// indices are assigned in creation order and are never recycled.
///
/// `ElementIdx` and [`super::SubsetIdx`](crate::base_types::SubsetIdx) are
/// disjoint types: a value of one can never be substituted for the other,
/// even though both wrap a `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementIdx(pub u32);

impl ElementIdx {
    /// Returns the index as a `usize`, suitable for indexing into a `Vec`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ElementIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ElementIdx {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<ElementIdx> for u32 {
    fn from(value: ElementIdx) -> Self {
        value.0
    }
}

impl TryFrom<usize> for ElementIdx {
    type Error = core::num::TryFromIntError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Ok(Self(u32::try_from(value)?))
    }
}

impl From<ElementIdx> for usize {
    fn from(value: ElementIdx) -> Self {
        value.index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_usize() {
        let idx = ElementIdx::try_from(7_usize).unwrap();
        assert_eq!(usize::from(idx), 7);
    }
}
