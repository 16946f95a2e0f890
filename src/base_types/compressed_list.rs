//! Submodule providing the generic delta-varint [`CompressedList`] used by
//! both compressed columns (lists of [`super::ElementIdx`]) and compressed
//! rows (lists of [`super::SubsetIdx`]).

use core::marker::PhantomData;

use crate::base_types::varint;
use crate::base_types::{ElementIdx, SubsetIdx};

/// A value that can be stored in a [`CompressedList`]. Implemented for both
/// strong index types; the list itself is agnostic to which one it holds.
pub trait CompressedListEntry: Copy {
    /// Widens the value to a `u64` for delta arithmetic.
    fn to_u64(self) -> u64;
    /// Narrows a decoded `u64` back to the concrete index type.
    fn from_u64(value: u64) -> Self;
}

impl CompressedListEntry for ElementIdx {
    fn to_u64(self) -> u64 {
        u64::from(self.0)
    }

    fn from_u64(value: u64) -> Self {
        Self(value as u32)
    }
}

impl CompressedListEntry for SubsetIdx {
    fn to_u64(self) -> u64 {
        u64::from(self.0)
    }

    fn from_u64(value: u64) -> Self {
        Self(value as u32)
    }
}

/// A byte-stream delta-varint encoding of a strictly-ascending, duplicate-free
/// index list. Built once from a sorted slice; iterated but never mutated in
/// place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompressedList<V> {
    bytes: Vec<u8>,
    len: usize,
    #[cfg_attr(feature = "serde", serde(skip))]
    _entry: PhantomData<V>,
}

impl<V: CompressedListEntry> CompressedList<V> {
    /// Builds a compressed list from a strictly-ascending, duplicate-free
    /// slice. Panics (a programming-error guard, not a recoverable failure)
    /// if the slice is not strictly ascending.
    #[must_use]
    pub fn from_sorted(values: &[V]) -> Self {
        let mut bytes = Vec::new();
        // Conceptually, the entry before the first one is `-1`, so the first
        // delta equals the first value itself.
        let mut previous: i128 = -1;
        for &value in values {
            let current = i128::from(value.to_u64());
            assert!(current > previous, "CompressedList::from_sorted requires a strictly-ascending input");
            let delta = (current - previous - 1) as u64;
            varint::encode_value(delta, &mut bytes);
            previous = current;
        }
        Self { bytes, len: values.len(), _entry: PhantomData }
    }

    /// Number of entries stored in the list.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list stores no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of the encoded byte stream.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        self.bytes.len()
    }

    /// Iterates over the decoded, strictly-ascending entries.
    pub fn iter(&self) -> CompressedListIter<'_, V> {
        CompressedListIter { bytes: &self.bytes, offset: 0, previous: -1, remaining: self.len, _entry: PhantomData }
    }

    /// Decodes the full list into a `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<V> {
        self.iter().collect()
    }
}

/// Iterator decoding a [`CompressedList`] entry by entry.
pub struct CompressedListIter<'a, V> {
    bytes: &'a [u8],
    offset: usize,
    previous: i128,
    remaining: usize,
    _entry: PhantomData<V>,
}

impl<'a, V: CompressedListEntry> Iterator for CompressedListIter<'a, V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        if self.remaining == 0 {
            return None;
        }
        let (delta, consumed) = varint::decode_value(self.bytes, self.offset);
        self.offset += consumed;
        self.remaining -= 1;
        let current = self.previous + 1 + i128::from(delta);
        self.previous = current;
        Some(V::from_u64(current as u64))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V: CompressedListEntry> ExactSizeIterator for CompressedListIter<'_, V> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_an_ascending_list() {
        let values: Vec<ElementIdx> = [0u32, 1, 2, 10, 11, 1000, 1_000_000]
            .into_iter()
            .map(ElementIdx)
            .collect();
        let compressed = CompressedList::from_sorted(&values);
        assert_eq!(compressed.len(), values.len());
        assert_eq!(compressed.to_vec(), values);
    }

    #[test]
    fn empty_list_round_trips() {
        let compressed: CompressedList<ElementIdx> = CompressedList::from_sorted(&[]);
        assert!(compressed.is_empty());
        assert_eq!(compressed.to_vec(), Vec::new());
    }

    #[test]
    #[should_panic(expected = "strictly-ascending")]
    fn rejects_non_ascending_input() {
        let values = [ElementIdx(2), ElementIdx(1)];
        let _ = CompressedList::from_sorted(&values);
    }

    #[test]
    fn round_trips_many_pseudo_random_ascending_lists() {
        use rand::{Rng, SeedableRng, rngs::SmallRng};
        let mut rng = SmallRng::seed_from_u64(0xC0FFEE);
        for _ in 0..64 {
            let mut values: Vec<u32> = (0..rng.gen_range(0..64)).map(|_| rng.gen_range(0..1_000_000)).collect();
            values.sort_unstable();
            values.dedup();
            let values: Vec<ElementIdx> = values.into_iter().map(ElementIdx).collect();
            let compressed = CompressedList::from_sorted(&values);
            assert_eq!(compressed.to_vec(), values);
        }
    }
}
