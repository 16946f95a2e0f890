//! Submodule providing the [`SubsetIdx`] strong index type.

use core::fmt;

/// Identifier of one subset `S_j` of the universe. Backed by a 32-bit index;
/// indices are assigned in creation order and are never recycled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubsetIdx(pub u32);

impl SubsetIdx {
    /// Returns the index as a `usize`, suitable for indexing into a `Vec`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SubsetIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SubsetIdx {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<SubsetIdx> for u32 {
    fn from(value: SubsetIdx) -> Self {
        value.0
    }
}

impl TryFrom<usize> for SubsetIdx {
    type Error = core::num::TryFromIntError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Ok(Self(u32::try_from(value)?))
    }
}

impl From<SubsetIdx> for usize {
    fn from(value: SubsetIdx) -> Self {
        value.index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_usize() {
        let idx = SubsetIdx::try_from(42_usize).unwrap();
        assert_eq!(usize::from(idx), 42);
    }

    #[test]
    fn orders_like_the_wrapped_integer() {
        assert!(SubsetIdx(1) < SubsetIdx(2));
    }
}
