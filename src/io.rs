//! Submodule providing [`ModelReader`] and [`SolutionWriter`], the narrow
//! trait seams for the file-format collaborators named in `spec.md` §6.2-6.5
//! (ORLIB/RAIL/FIMI text formats, solution text format).
//!
//! These formats are out of scope for this crate ("file-format
//! readers/writers... treated as external collaborators, interfaces only");
//! no concrete parser or writer ships here, matching the teacher's
//! convention of defining a trait at a seam (e.g.
//! `src/traits/algorithms/weighted_assignment.rs`) and leaving concrete
//! backends to downstream crates.

use std::io::{Read, Write};

use crate::model::{Model, SolutionProto};

/// Parses a [`Model`] out of some external, whitespace/line-oriented text
/// format (ORLIB, RAIL, FIMI, ...). Implementations are responsible for
/// remapping any on-disk 1-based indices to this crate's 0-based
/// [`crate::base_types::SubsetIdx`]/[`crate::base_types::ElementIdx`].
pub trait ModelReader {
    /// The reader's own error type.
    type Error: std::error::Error;

    /// Reads a complete model from `input`.
    fn read(&mut self, input: &mut dyn Read) -> Result<Model, Self::Error>;
}

/// Serializes a [`SolutionProto`] into the solution text format of
/// `spec.md` §6.5, or any other external solution representation.
pub trait SolutionWriter {
    /// The writer's own error type.
    type Error: std::error::Error;

    /// Writes `solution` to `output`.
    fn write(&mut self, solution: &SolutionProto, output: &mut dyn Write) -> Result<(), Self::Error>;
}
