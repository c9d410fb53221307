// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Buffer validation and face construction.
//!
//! The index stream (or, for un-indexed input, every raw vertex in order) is
//! passed through the [`VertexMerger`] and grouped into triangles. Buffers are
//! checked up front so construction never reads out of bounds.

use crate::error::{Error, Result};
use crate::keys::{FaceId, VertexId};
use crate::merge::VertexMerger;
use crate::mesh::{Face, Vertex};

/// Output of face construction: the indexed (shared-vertex) mesh.
#[derive(Debug, Clone)]
pub struct FaceBuild {
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
    /// Number of corner lookups that resolved to an already known vertex.
    pub merged: usize,
}

/// Checks buffer shapes and index ranges.
pub fn validate_buffers(positions: &[f32], indices: Option<&[u32]>) -> Result<()> {
    if positions.len() % 3 != 0 {
        return Err(Error::PositionBufferLength(positions.len()));
    }
    let vertex_count = positions.len() / 3;

    match indices {
        Some(indices) => {
            if indices.len() % 3 != 0 {
                return Err(Error::IndexBufferLength(indices.len()));
            }
            if let Some((slot, &index)) = indices
                .iter()
                .enumerate()
                .find(|&(_, &i)| i as usize >= vertex_count)
            {
                return Err(Error::IndexOutOfRange {
                    slot,
                    index,
                    vertex_count,
                });
            }
        }
        None => {
            if vertex_count % 3 != 0 {
                return Err(Error::IncompleteTriangle(vertex_count));
            }
        }
    }

    Ok(())
}

/// Builds deduplicated vertices and one face per input triangle.
///
/// Vertex ids are allocated in order of first appearance in the corner
/// stream, so positions no triangle references do not become vertices.
/// Degenerate triangles are kept as they are.
pub fn build_faces(
    positions: &[f32],
    indices: Option<&[u32]>,
    precision: u32,
) -> Result<FaceBuild> {
    validate_buffers(positions, indices)?;

    let raw_count = positions.len() / 3;
    let mut merger = VertexMerger::with_capacity(precision, raw_count);

    let corners: Vec<VertexId> = match indices {
        Some(indices) => {
            // Each raw vertex is merged once; repeated indices reuse the result.
            let mut remap: Vec<Option<VertexId>> = vec![None; raw_count];
            indices
                .iter()
                .map(|&i| {
                    let i = i as usize;
                    *remap[i].get_or_insert_with(|| merger.merge_at(positions, i))
                })
                .collect()
        }
        None => (0..raw_count)
            .map(|i| merger.merge_at(positions, i))
            .collect(),
    };

    let faces = corners
        .chunks_exact(3)
        .enumerate()
        .map(|(i, tri)| Face {
            id: FaceId::new(i),
            vertices: [tri[0], tri[1], tri[2]],
            incident_edge: None,
            incident_half_edge: None,
        })
        .collect();

    let merged = merger.merged_count();
    Ok(FaceBuild {
        vertices: merger.into_vertices(),
        faces,
        merged,
    })
}
