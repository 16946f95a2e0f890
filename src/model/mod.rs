//! Submodule providing the [`Model`] (the set-cover instance), its sparse
//! column/row storage, derived statistics, feasibility reporting, and the
//! canonical proto representation.

pub mod column;
pub mod feasibility;
pub mod intersecting;
#[allow(clippy::module_inception)]
pub mod model;
pub mod proto;
pub mod row;
pub mod stats;

pub use column::SparseColumn;
pub use feasibility::FeasibilityReport;
pub use intersecting::IntersectingSubsetsRange;
pub use model::Model;
pub use proto::{ModelProto, SolutionProto, SubsetProto};
pub use row::SparseRow;
pub use stats::{Stats, compute_stats};

/// LSD radix sort of 32-bit indices, four byte-wide passes. `spec.md` §9
/// notes this is not essential for correctness and `values.sort_unstable()`
/// is an equally valid fallback with a documented perf note; this crate
/// keeps the radix sort because column sizes in practice skew small and the
/// four fixed passes avoid comparison overhead on the hot
/// `sort_elements_in_subsets` path.
pub(crate) fn radix_sort_u32(values: &mut [u32]) {
    if values.len() < 2 {
        return;
    }
    let mut buffer = vec![0u32; values.len()];
    let mut counts = [0usize; 256];
    for shift in [0u32, 8, 16, 24] {
        counts.fill(0);
        for &value in values.iter() {
            counts[((value >> shift) & 0xff) as usize] += 1;
        }
        let mut total = 0;
        for count in &mut counts {
            let c = *count;
            *count = total;
            total += c;
        }
        for &value in values.iter() {
            let bucket = ((value >> shift) & 0xff) as usize;
            buffer[counts[bucket]] = value;
            counts[bucket] += 1;
        }
        values.copy_from_slice(&buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radix_sort_matches_a_comparison_sort() {
        let mut values: Vec<u32> = vec![930_214_123, 0, 7, 4_294_967_295, 16_777_216, 255, 256, 65535, 65536];
        let mut expected = values.clone();
        expected.sort_unstable();
        radix_sort_u32(&mut values);
        assert_eq!(values, expected);
    }
}
