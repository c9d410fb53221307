// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Winged-edge consolidation.
//!
//! Every undirected edge gets one record, merged from its one or two
//! half-edges. The record is stored with `start < end`, independent of which
//! half-edge created it.
//!
//! ## Sidedness
//!
//! A face is the *left* face of an edge when its winding runs `start → end`
//! and the *right* face when it runs `end → start`. The wings are read off
//! the matching half-edge: its `next` is the successor and its `prev` the
//! predecessor around that face.

use rustc_hash::FxHashMap;

use crate::halfedge::HalfEdgeBuild;
use crate::keys::{VertexId, WingedEdgeId};
use crate::mesh::{Face, Vertex, WingedEdge};

/// Winged edges plus the per-half-edge mapping used to resolve wings.
#[derive(Debug, Clone)]
pub struct WingedEdgeBuild {
    pub winged_edges: Vec<WingedEdge>,
    /// Undirected edge of each half-edge, indexed by half-edge id.
    pub edge_of_half_edge: Vec<WingedEdgeId>,
    /// One incident edge per vertex, indexed by vertex id.
    pub vertex_incidence: Vec<Option<WingedEdgeId>>,
    /// One bounding edge per face, indexed by face id.
    pub face_incidence: Vec<Option<WingedEdgeId>>,
}

impl WingedEdgeBuild {
    /// Writes the incidence back-references onto vertices and faces.
    pub fn apply_incidence(&self, vertices: &mut [Vertex], faces: &mut [Face]) {
        for (vertex, incident) in vertices.iter_mut().zip(&self.vertex_incidence) {
            if incident.is_some() {
                vertex.incident_edge = *incident;
            }
        }
        for (face, incident) in faces.iter_mut().zip(&self.face_incidence) {
            if incident.is_some() {
                face.incident_edge = *incident;
            }
        }
    }
}

/// Canonical undirected key: smaller vertex id first.
#[inline]
pub fn undirected_key(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Merges half-edges into one winged edge per undirected edge.
pub fn consolidate(
    half_edges: &HalfEdgeBuild,
    vertex_count: usize,
    face_count: usize,
) -> WingedEdgeBuild {
    let mut winged_edges: Vec<WingedEdge> = Vec::new();
    let mut lookup: FxHashMap<(VertexId, VertexId), WingedEdgeId> = FxHashMap::default();
    let mut edge_of_half_edge = Vec::with_capacity(half_edges.half_edges.len());

    // Pass 1: allocate records and assign sides
    for he in &half_edges.half_edges {
        let key = undirected_key(he.origin, he.target);
        let id = *lookup.entry(key).or_insert_with(|| {
            let id = WingedEdgeId::new(winged_edges.len());
            winged_edges.push(WingedEdge {
                id,
                start: key.0,
                end: key.1,
                face_left: None,
                face_right: None,
                pred_left: None,
                succ_left: None,
                pred_right: None,
                succ_right: None,
                creation_step: he.face,
            });
            id
        });
        edge_of_half_edge.push(id);

        let edge = &mut winged_edges[id.index()];
        if he.origin == edge.start {
            edge.face_left = Some(he.face);
        } else {
            edge.face_right = Some(he.face);
        }
    }

    // Pass 2: wings from the half-edge on each side
    for edge in &mut winged_edges {
        if let Some(left) = half_edges.find(edge.start, edge.end) {
            let he = &half_edges.half_edges[left.index()];
            edge.succ_left = Some(edge_of_half_edge[he.next.index()]);
            edge.pred_left = Some(edge_of_half_edge[he.prev.index()]);
        }
        if let Some(right) = half_edges.find(edge.end, edge.start) {
            let he = &half_edges.half_edges[right.index()];
            edge.succ_right = Some(edge_of_half_edge[he.next.index()]);
            edge.pred_right = Some(edge_of_half_edge[he.prev.index()]);
        }
        edge.creation_step = edge
            .faces()
            .min()
            .unwrap_or(edge.creation_step);
    }

    // Incidence: endpoints and adjoining faces, last writer wins
    let mut vertex_incidence = vec![None; vertex_count];
    let mut face_incidence: Vec<Option<WingedEdgeId>> = vec![None; face_count];
    for edge in &winged_edges {
        vertex_incidence[edge.start.index()] = Some(edge.id);
        vertex_incidence[edge.end.index()] = Some(edge.id);
        for face in edge.faces() {
            face_incidence[face.index()] = Some(edge.id);
        }
    }

    WingedEdgeBuild {
        winged_edges,
        edge_of_half_edge,
        vertex_incidence,
        face_incidence,
    }
}
