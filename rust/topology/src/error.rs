// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for mesh analysis.
//!
//! Analysis is total over well-formed buffers. Every error here is a caller
//! contract violation, reported before any construction begins.

use crate::options::Representation;

/// Result type alias for mesh analysis.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during mesh analysis.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The position buffer length is not a multiple of 3.
    #[error("position buffer length {0} is not a multiple of 3")]
    PositionBufferLength(usize),

    /// The index buffer length is not a multiple of 3.
    #[error("index buffer length {0} is not a multiple of 3")]
    IndexBufferLength(usize),

    /// Un-indexed input whose vertex count does not form whole triangles.
    #[error("un-indexed buffer holds {0} vertices, not a multiple of 3")]
    IncompleteTriangle(usize),

    /// An index points past the end of the position buffer.
    #[error("index {index} at slot {slot} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        slot: usize,
        index: u32,
        vertex_count: usize,
    },

    /// Requested rounding precision is too fine to quantize safely.
    #[error("precision of {0} decimal places exceeds the supported maximum")]
    InvalidPrecision(u32),

    /// A query needs a representation that was not built.
    #[error("{0} representation was not built for this mesh")]
    MissingRepresentation(Representation),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}
