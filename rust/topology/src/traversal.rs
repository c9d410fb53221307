// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Navigation over the half-edge and winged-edge structures.
//!
//! Every query walks the links the structures store (`next`, `prev`, `twin`,
//! wings) rather than scanning, which is what the two representations exist
//! to demonstrate. Queries return `None` when an id is out of range or the
//! representation they walk was not built.

use smallvec::SmallVec;

use crate::keys::*;
use crate::mesh::ProcessedMesh;

// =============================================================================
// Half-edge walks
// =============================================================================

impl ProcessedMesh {
    /// Returns the three half-edges of a face, following `next` from the
    /// face's incident half-edge.
    pub fn face_half_edges(&self, face: FaceId) -> Option<SmallVec<[HalfEdgeId; 3]>> {
        let start = self
            .face(face)?
            .incident_half_edge
            .unwrap_or_else(|| HalfEdgeId::of_face(face, 0));

        let mut result = SmallVec::new();
        let mut current = start;
        for _ in 0..3 {
            result.push(current);
            current = self.half_edge(current)?.next;
            if current == start {
                break;
            }
        }
        Some(result)
    }

    /// Returns the half-edges leaving a vertex.
    ///
    /// Rotates around the vertex through `twin(prev(h))`, and when that runs
    /// into the boundary, through `next(twin(h))` in the other direction.
    pub fn vertex_outgoing_half_edges(&self, vertex: VertexId) -> Option<SmallVec<[HalfEdgeId; 8]>> {
        let half_edges = self.half_edges()?;
        let start = self.vertex(vertex)?.incident_half_edge?;
        let limit = half_edges.len();

        let mut result: SmallVec<[HalfEdgeId; 8]> = SmallVec::new();
        result.push(start);

        // One direction: h → twin(prev(h))
        let mut current = start;
        let mut closed = false;
        for _ in 0..limit {
            let prev = half_edges.get(current.index())?.prev;
            match half_edges.get(prev.index())?.twin {
                Some(next) if next == start => {
                    closed = true;
                    break;
                }
                Some(next) if !result.contains(&next) => {
                    result.push(next);
                    current = next;
                }
                _ => break,
            }
        }

        // Other direction when the fan is open: h → next(twin(h))
        if !closed {
            let mut current = start;
            for _ in 0..limit {
                let Some(twin) = half_edges.get(current.index())?.twin else {
                    break;
                };
                let next = half_edges.get(twin.index())?.next;
                if result.contains(&next) {
                    break;
                }
                result.push(next);
                current = next;
            }
        }

        Some(result)
    }

    /// Returns the faces around a vertex.
    ///
    /// Uses the half-edge fan when half-edges were built and scans the face
    /// list otherwise.
    pub fn vertex_faces(&self, vertex: VertexId) -> Option<SmallVec<[FaceId; 8]>> {
        self.vertex(vertex)?;
        if self.half_edges().is_some() {
            if let Some(outgoing) = self.vertex_outgoing_half_edges(vertex) {
                return Some(outgoing.iter().map(|h| h.face()).collect());
            }
        }
        Some(
            self.faces
                .iter()
                .filter(|f| f.vertices.contains(&vertex))
                .map(|f| f.id)
                .collect(),
        )
    }

    /// Returns the faces across each edge of a face, found through twins.
    pub fn face_neighbors_by_twins(&self, face: FaceId) -> Option<SmallVec<[FaceId; 3]>> {
        let mut neighbors = SmallVec::new();
        for he in self.face_half_edges(face)? {
            if let Some(twin) = self.half_edge(he)?.twin {
                neighbors.push(self.half_edge(twin)?.face);
            }
        }
        Some(neighbors)
    }
}

// =============================================================================
// Winged-edge walks
// =============================================================================

impl ProcessedMesh {
    /// Returns the edges bounding a face, following the successor wing on the
    /// face's side from the face's incident edge.
    pub fn face_winged_edges(&self, face: FaceId) -> Option<SmallVec<[WingedEdgeId; 3]>> {
        let start = self.face(face)?.incident_edge?;

        let mut result = SmallVec::new();
        let mut current = start;
        for _ in 0..3 {
            result.push(current);
            let edge = self.winged_edge(current)?;
            let succ = if edge.face_left == Some(face) {
                edge.succ_left
            } else if edge.face_right == Some(face) {
                edge.succ_right
            } else {
                None
            };
            match succ {
                Some(next) if next != start => current = next,
                _ => break,
            }
        }
        Some(result)
    }

    /// Returns the faces across each edge of a face, found through the
    /// winged-edge left/right faces.
    pub fn face_neighbors_by_edges(&self, face: FaceId) -> Option<SmallVec<[FaceId; 3]>> {
        let mut neighbors = SmallVec::new();
        for id in self.face_winged_edges(face)? {
            let edge = self.winged_edge(id)?;
            let other = if edge.face_left == Some(face) {
                edge.face_right
            } else {
                edge.face_left
            };
            if let Some(other) = other {
                neighbors.push(other);
            }
        }
        Some(neighbors)
    }

    /// Returns the undirected edge a half-edge belongs to.
    ///
    /// Needs both the half-edge and the winged-edge lists.
    pub fn half_edge_winged_edge(&self, half_edge: HalfEdgeId) -> Option<WingedEdgeId> {
        self.half_edge_edges
            .as_ref()?
            .get(half_edge.index())
            .copied()
    }

    /// Returns the edges that border a single face.
    pub fn boundary_edges(&self) -> Option<Vec<WingedEdgeId>> {
        Some(
            self.winged_edges()?
                .iter()
                .filter(|e| e.is_boundary())
                .map(|e| e.id)
                .collect(),
        )
    }

    /// Returns `true` if the vertex is an endpoint of a boundary edge.
    pub fn is_boundary_vertex(&self, vertex: VertexId) -> Option<bool> {
        self.vertex(vertex)?;
        Some(
            self.winged_edges()?
                .iter()
                .any(|e| e.is_boundary() && (e.start == vertex || e.end == vertex)),
        )
    }
}

// =============================================================================
// Selection expansion
// =============================================================================

impl ProcessedMesh {
    /// Returns the elements to highlight together with a hovered element.
    ///
    /// Only representations that were built contribute. An unknown key yields
    /// an empty list.
    pub fn related(&self, key: ElementKey) -> Vec<ElementKey> {
        if !self.contains(key) {
            return Vec::new();
        }

        let mut related = Vec::new();
        match key {
            ElementKey::Vertex(v) => {
                if let Some(faces) = self.vertex_faces(v) {
                    related.extend(faces.into_iter().map(ElementKey::Face));
                }
                if let Some(outgoing) = self.vertex_outgoing_half_edges(v) {
                    related.extend(outgoing.into_iter().map(ElementKey::HalfEdge));
                }
                if let Some(edges) = self.winged_edges() {
                    related.extend(
                        edges
                            .iter()
                            .filter(|e| e.start == v || e.end == v)
                            .map(|e| ElementKey::WingedEdge(e.id)),
                    );
                }
            }
            ElementKey::Face(f) | ElementKey::SoupTriangle(f) => {
                if let Some(face) = self.face(f) {
                    related.extend(face.vertices.iter().copied().map(ElementKey::Vertex));
                }
                if matches!(key, ElementKey::SoupTriangle(_)) {
                    related.push(ElementKey::Face(f));
                } else if self.soup_triangle(f).is_some() {
                    related.push(ElementKey::SoupTriangle(f));
                }
                if self.half_edges().is_some() {
                    if let Some(hes) = self.face_half_edges(f) {
                        related.extend(hes.into_iter().map(ElementKey::HalfEdge));
                    }
                }
                if let Some(edges) = self.face_winged_edges(f) {
                    related.extend(edges.into_iter().map(ElementKey::WingedEdge));
                }
            }
            ElementKey::HalfEdge(h) => {
                if let Some(he) = self.half_edge(h) {
                    related.push(ElementKey::Vertex(he.origin));
                    related.push(ElementKey::Vertex(he.target));
                    related.push(ElementKey::Face(he.face));
                    related.push(ElementKey::HalfEdge(he.next));
                    related.push(ElementKey::HalfEdge(he.prev));
                    if let Some(twin) = he.twin {
                        related.push(ElementKey::HalfEdge(twin));
                    }
                }
                if let Some(edge) = self.half_edge_winged_edge(h) {
                    related.push(ElementKey::WingedEdge(edge));
                }
            }
            ElementKey::WingedEdge(e) => {
                if let Some(edge) = self.winged_edge(e) {
                    related.push(ElementKey::Vertex(edge.start));
                    related.push(ElementKey::Vertex(edge.end));
                    related.extend(edge.faces().map(ElementKey::Face));
                    related.extend(edge.wings().map(ElementKey::WingedEdge));
                }
            }
        }
        related
    }
}

#[cfg(test)]
mod tests {
    use crate::analyze::analyze;
    use crate::keys::*;
    use crate::mesh::ProcessedMesh;
    use crate::options::{AnalyzeOptions, Representation};
    use crate::winged::undirected_key;

    /// Fan of four triangles around vertex 0 at the centre of a square.
    fn fan() -> ProcessedMesh {
        let positions = [
            0.0, 0.0, 0.0, // centre
            1.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, //
            -1.0, 0.0, 0.0, //
            0.0, -1.0, 0.0,
        ];
        let indices = [0, 1, 2, 0, 2, 3, 0, 3, 4, 0, 4, 1];
        analyze(&positions, Some(&indices), &AnalyzeOptions::default()).unwrap()
    }

    /// Two triangles sharing edge {1, 2}.
    fn pair() -> ProcessedMesh {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0];
        analyze(&positions, Some(&[0, 1, 2, 1, 3, 2]), &AnalyzeOptions::default()).unwrap()
    }

    fn sorted<T: Ord + Copy>(items: impl IntoIterator<Item = T>) -> Vec<T> {
        let mut v: Vec<T> = items.into_iter().collect();
        v.sort();
        v
    }

    #[test]
    fn face_half_edges_cycle() {
        let mesh = pair();
        let hes = mesh.face_half_edges(FaceId(1)).unwrap();
        assert_eq!(sorted(hes), vec![HalfEdgeId(3), HalfEdgeId(4), HalfEdgeId(5)]);
    }

    #[test]
    fn interior_vertex_fan_is_closed() {
        let mesh = fan();
        let outgoing = mesh.vertex_outgoing_half_edges(VertexId(0)).unwrap();
        assert_eq!(outgoing.len(), 4);
        for h in &outgoing {
            assert_eq!(mesh.half_edge(*h).unwrap().origin, VertexId(0));
        }
        let faces = sorted(mesh.vertex_faces(VertexId(0)).unwrap());
        assert_eq!(faces, vec![FaceId(0), FaceId(1), FaceId(2), FaceId(3)]);
    }

    #[test]
    fn boundary_vertex_fan_is_walked_both_ways() {
        let mesh = pair();
        // Vertex 1 lies on faces 0 and 1 and on the boundary.
        let outgoing = mesh.vertex_outgoing_half_edges(VertexId(1)).unwrap();
        assert_eq!(sorted(outgoing), vec![HalfEdgeId(1), HalfEdgeId(3)]);
        assert_eq!(
            sorted(mesh.vertex_faces(VertexId(1)).unwrap()),
            vec![FaceId(0), FaceId(1)]
        );
    }

    #[test]
    fn vertex_faces_falls_back_to_face_scan() {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0];
        let opts = AnalyzeOptions::for_representation(Representation::Indexed);
        let mesh = analyze(&positions, Some(&[0, 1, 2, 1, 3, 2]), &opts).unwrap();
        assert_eq!(
            sorted(mesh.vertex_faces(VertexId(2)).unwrap()),
            vec![FaceId(0), FaceId(1)]
        );
        assert!(mesh.vertex_outgoing_half_edges(VertexId(2)).is_none());
    }

    #[test]
    fn face_winged_edges_follow_successors() {
        let mesh = pair();
        let edges = mesh.face_winged_edges(FaceId(0)).unwrap();
        assert_eq!(edges.len(), 3);
        for id in &edges {
            let e = mesh.winged_edge(*id).unwrap();
            assert!(e.face_left == Some(FaceId(0)) || e.face_right == Some(FaceId(0)));
        }
    }

    #[test]
    fn neighbors_agree_between_twins_and_edges() {
        let mesh = fan();
        for face in mesh.faces() {
            let by_twins = sorted(mesh.face_neighbors_by_twins(face.id).unwrap());
            let by_edges = sorted(mesh.face_neighbors_by_edges(face.id).unwrap());
            assert_eq!(by_twins, by_edges);
            assert_eq!(by_twins.len(), 2);
        }
    }

    #[test]
    fn half_edge_maps_to_winged_edge() {
        let mesh = pair();
        let a = mesh.half_edge_winged_edge(HalfEdgeId(1)).unwrap();
        let b = mesh.half_edge_winged_edge(HalfEdgeId(5)).unwrap();
        assert_eq!(a, b);
        let edge = mesh.winged_edge(a).unwrap();
        assert_eq!((edge.start, edge.end), (VertexId(1), VertexId(2)));
    }

    #[test]
    fn half_edge_maps_to_winged_edge_on_degenerate_faces() {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 2.0, 2.0, 0.0];
        let mesh = analyze(
            &positions,
            Some(&[0, 1, 2, 3, 3, 1]),
            &AnalyzeOptions::default(),
        )
        .unwrap();

        for h in mesh.half_edges().unwrap() {
            let edge = mesh
                .winged_edge(mesh.half_edge_winged_edge(h.id).unwrap())
                .unwrap();
            assert_eq!((edge.start, edge.end), undirected_key(h.origin, h.target));
        }
        assert_eq!(mesh.half_edge_winged_edge(HalfEdgeId(6)), None);
    }

    #[test]
    fn half_edge_mapping_needs_both_lists() {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        for rep in [Representation::HalfEdge, Representation::WingedEdge] {
            let opts = AnalyzeOptions::for_representation(rep);
            let mesh = analyze(&positions, Some(&[0, 1, 2]), &opts).unwrap();
            assert_eq!(mesh.half_edge_winged_edge(HalfEdgeId(0)), None);
        }
    }

    #[test]
    fn boundary_queries() {
        let mesh = fan();
        assert_eq!(mesh.boundary_edges().unwrap().len(), 4);
        assert_eq!(mesh.is_boundary_vertex(VertexId(0)), Some(false));
        assert_eq!(mesh.is_boundary_vertex(VertexId(3)), Some(true));
    }

    #[test]
    fn related_for_winged_edge_lists_endpoints_faces_and_wings() {
        let mesh = pair();
        let shared = mesh
            .winged_edges()
            .unwrap()
            .iter()
            .find(|e| !e.is_boundary())
            .unwrap()
            .id;
        let related = mesh.related(ElementKey::WingedEdge(shared));
        assert!(related.contains(&ElementKey::Vertex(VertexId(1))));
        assert!(related.contains(&ElementKey::Vertex(VertexId(2))));
        assert!(related.contains(&ElementKey::Face(FaceId(0))));
        assert!(related.contains(&ElementKey::Face(FaceId(1))));
        let wings = related
            .iter()
            .filter(|k| matches!(k, ElementKey::WingedEdge(_)))
            .count();
        assert_eq!(wings, 4);
    }

    #[test]
    fn related_for_half_edge_includes_twin_and_edge() {
        let mesh = pair();
        let related = mesh.related(ElementKey::HalfEdge(HalfEdgeId(1)));
        assert!(related.contains(&ElementKey::HalfEdge(HalfEdgeId(5))));
        assert!(related.contains(&ElementKey::Face(FaceId(0))));
        assert!(related
            .iter()
            .any(|k| matches!(k, ElementKey::WingedEdge(_))));
    }

    #[test]
    fn related_links_soup_and_face() {
        let mesh = pair();
        assert!(mesh
            .related(ElementKey::Face(FaceId(1)))
            .contains(&ElementKey::SoupTriangle(FaceId(1))));
        assert!(mesh
            .related(ElementKey::SoupTriangle(FaceId(1)))
            .contains(&ElementKey::Face(FaceId(1))));
    }

    #[test]
    fn related_for_unknown_key_is_empty() {
        let mesh = pair();
        assert!(mesh.related(ElementKey::Vertex(VertexId(99))).is_empty());
    }
}
