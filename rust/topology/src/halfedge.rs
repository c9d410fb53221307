// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Half-edge (DCEL) construction.
//!
//! Each face `(v1, v2, v3)` contributes three half-edges with local indices
//! 0, 1, 2 running `v1 → v2`, `v2 → v3`, `v3 → v1`, so the half-edge id is
//! always `face * 3 + local`. Twins are linked in a second pass through a
//! directed `(origin, target)` lookup.
//!
//! ## Non-manifold input
//!
//! If the same directed pair occurs on more than one face, the later
//! half-edge replaces the earlier one in the lookup. The earlier half-edge
//! can then no longer be found as a twin. This is not repaired.

use rustc_hash::FxHashMap;

use crate::keys::{HalfEdgeId, VertexId};
use crate::mesh::{Face, HalfEdge, Vertex};

/// Half-edges plus the directed lookup the winged-edge pass reuses.
#[derive(Debug, Clone)]
pub struct HalfEdgeBuild {
    pub half_edges: Vec<HalfEdge>,
    /// `(origin, target)` → last half-edge with that direction.
    pub directed: FxHashMap<(VertexId, VertexId), HalfEdgeId>,
    /// One outgoing half-edge per vertex, indexed by vertex id.
    pub vertex_incidence: Vec<Option<HalfEdgeId>>,
    /// One bounding half-edge per face, indexed by face id.
    pub face_incidence: Vec<Option<HalfEdgeId>>,
    /// Number of half-edges whose direction was already taken by another face.
    pub duplicate_directed: usize,
}

impl HalfEdgeBuild {
    /// Returns the half-edge running `origin → target`, if any.
    #[inline]
    pub fn find(&self, origin: VertexId, target: VertexId) -> Option<HalfEdgeId> {
        self.directed.get(&(origin, target)).copied()
    }

    /// Writes the incidence back-references onto vertices and faces.
    pub fn apply_incidence(&self, vertices: &mut [Vertex], faces: &mut [Face]) {
        for (vertex, incident) in vertices.iter_mut().zip(&self.vertex_incidence) {
            if incident.is_some() {
                vertex.incident_half_edge = *incident;
            }
        }
        for (face, incident) in faces.iter_mut().zip(&self.face_incidence) {
            if incident.is_some() {
                face.incident_half_edge = *incident;
            }
        }
    }
}

/// Builds three half-edges per face and links twins.
pub fn build_half_edges(faces: &[Face], vertex_count: usize) -> HalfEdgeBuild {
    let mut half_edges = Vec::with_capacity(faces.len() * 3);
    let mut directed: FxHashMap<(VertexId, VertexId), HalfEdgeId> = FxHashMap::default();
    directed.reserve(faces.len() * 3);
    let mut vertex_incidence = vec![None; vertex_count];
    let mut face_incidence = vec![None; faces.len()];
    let mut duplicate_directed = 0;

    // First pass: create the face cycles
    for face in faces {
        for local in 0..3 {
            let id = HalfEdgeId::of_face(face.id, local);
            let (origin, target) = face.directed_edge(local);

            half_edges.push(HalfEdge {
                id,
                origin,
                target,
                face: face.id,
                next: HalfEdgeId::of_face(face.id, (local + 1) % 3),
                prev: HalfEdgeId::of_face(face.id, (local + 2) % 3),
                twin: None,
            });

            if directed.insert((origin, target), id).is_some() {
                duplicate_directed += 1;
            }
            vertex_incidence[origin.index()] = Some(id);
            face_incidence[face.id.index()] = Some(id);
        }
    }

    // Second pass: link twins through the reversed direction
    for he in &mut half_edges {
        he.twin = directed.get(&(he.target, he.origin)).copied();
    }

    HalfEdgeBuild {
        half_edges,
        directed,
        vertex_incidence,
        face_incidence,
        duplicate_directed,
    }
}
