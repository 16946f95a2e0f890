//! Submodule providing the leaf types of the crate: strong index types for
//! subsets and elements, the packed [`Decision`] trace entry, and the
//! delta-varint [`CompressedList`] encoding shared by compressed columns and
//! rows.

pub mod compressed_list;
pub mod decision;
pub mod element_idx;
pub mod subset_idx;
pub mod varint;

pub use compressed_list::CompressedList;
pub use decision::Decision;
pub use element_idx::ElementIdx;
pub use subset_idx::SubsetIdx;

/// The cost of selecting a subset. A finite, non-negative 64-bit float.
pub type Cost = f64;
