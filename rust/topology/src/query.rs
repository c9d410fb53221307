// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh diagnostics: summary statistics and invariant checks.
//!
//! Analysis never fails on quality problems such as coordinate aliasing,
//! non-manifold edges or inconsistent winding. These queries make them
//! visible instead.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::keys::*;
use crate::mesh::ProcessedMesh;
use crate::winged::undirected_key;

/// Summary counts for a processed mesh, derived from the face list alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshStats {
    pub vertex_count: usize,
    pub face_count: usize,
    /// Distinct unordered vertex pairs used as a triangle edge.
    pub edge_count: usize,
    /// Always `3 * face_count`.
    pub half_edge_count: usize,
    /// Edges lacking a face on one side.
    pub boundary_edge_count: usize,
    /// Edges used by more than two faces.
    pub non_manifold_edge_count: usize,
    pub degenerate_face_count: usize,
    /// Groups of faces connected through shared vertices.
    pub components: usize,
    /// `V - E + F`.
    pub euler_characteristic: i64,
}

impl MeshStats {
    /// Returns `true` for a non-empty mesh without boundary edges.
    pub fn is_closed(&self) -> bool {
        self.face_count > 0 && self.boundary_edge_count == 0
    }
}

/// A broken structural invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Violation {
    /// A face references a vertex that does not exist.
    FaceVertexOutOfRange { face: FaceId, vertex: VertexId },
    /// Two vertices share one quantized position.
    DuplicateVertex { first: VertexId, second: VertexId },
    /// An element is stored at a slot that does not match its id.
    MisplacedElement { key: ElementKey },
    /// `next`/`prev` leave the face or do not close after three steps.
    BrokenFaceCycle { half_edge: HalfEdgeId },
    /// The twin does not point back, or does not run the opposite way.
    AsymmetricTwin { half_edge: HalfEdgeId },
    /// `start` is not the smaller vertex id.
    NonCanonicalEdge { edge: WingedEdgeId },
    /// The left face does not wind `start → end`.
    LeftFaceMismatch { edge: WingedEdgeId },
    /// The right face does not wind `end → start`.
    RightFaceMismatch { edge: WingedEdgeId },
    /// The number of winged edges differs from the distinct edge count.
    EdgeCountMismatch { expected: usize, actual: usize },
    /// A soup triangle does not copy its face's corner positions.
    SoupMismatch { face: FaceId },
}

/// Per undirected edge: faces winding `start → end` and `end → start`.
#[derive(Default)]
struct EdgeUse {
    forward: usize,
    backward: usize,
}

impl ProcessedMesh {
    fn edge_uses(&self) -> FxHashMap<(VertexId, VertexId), EdgeUse> {
        let mut uses: FxHashMap<(VertexId, VertexId), EdgeUse> = FxHashMap::default();
        for face in &self.faces {
            for local in 0..3 {
                let (a, b) = face.directed_edge(local);
                let entry = uses.entry(undirected_key(a, b)).or_default();
                if a <= b {
                    entry.forward += 1;
                } else {
                    entry.backward += 1;
                }
            }
        }
        uses
    }

    /// Computes summary statistics.
    pub fn stats(&self) -> MeshStats {
        let uses = self.edge_uses();
        let boundary_edge_count = uses
            .values()
            .filter(|u| u.forward == 0 || u.backward == 0)
            .count();
        let non_manifold_edge_count = uses
            .values()
            .filter(|u| u.forward + u.backward > 2)
            .count();

        MeshStats {
            vertex_count: self.vertices.len(),
            face_count: self.faces.len(),
            edge_count: uses.len(),
            half_edge_count: self.faces.len() * 3,
            boundary_edge_count,
            non_manifold_edge_count,
            degenerate_face_count: self.faces.iter().filter(|f| f.is_degenerate()).count(),
            components: self.components(),
            euler_characteristic: self.vertices.len() as i64 - uses.len() as i64
                + self.faces.len() as i64,
        }
    }

    /// Counts groups of faces connected through shared vertices.
    fn components(&self) -> usize {
        let mut parent: Vec<usize> = (0..self.vertices.len()).collect();

        fn find(parent: &mut [usize], mut x: usize) -> usize {
            while parent[x] != x {
                parent[x] = parent[parent[x]];
                x = parent[x];
            }
            x
        }

        let mut used = vec![false; self.vertices.len()];
        for face in &self.faces {
            let ids = face.vertices.map(|v| v.index());
            if ids.iter().any(|&i| i >= parent.len()) {
                continue;
            }
            for &i in &ids {
                used[i] = true;
            }
            let root = find(&mut parent, ids[0]);
            for &i in &ids[1..] {
                let other = find(&mut parent, i);
                parent[other] = root;
            }
        }

        (0..parent.len())
            .filter(|&i| used[i] && find(&mut parent, i) == i)
            .count()
    }

    /// Checks every structural invariant and returns the ones that fail.
    ///
    /// A mesh produced by [`analyze`](crate::analyze) from manifold,
    /// consistently wound input yields an empty list. Non-manifold input
    /// shows up as twin and face-side violations.
    pub fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        self.check_vertices(&mut violations);
        self.check_faces(&mut violations);
        self.check_soup(&mut violations);
        self.check_half_edges(&mut violations);
        self.check_winged_edges(&mut violations);
        violations
    }

    fn check_vertices(&self, out: &mut Vec<Violation>) {
        let mut seen: FxHashMap<[u64; 3], VertexId> = FxHashMap::default();
        for (i, v) in self.vertices.iter().enumerate() {
            if v.id.index() != i {
                out.push(Violation::MisplacedElement {
                    key: ElementKey::Vertex(v.id),
                });
            }
            let key = v.position().map(|c| if c == 0.0 { 0 } else { c.to_bits() });
            if let Some(&first) = seen.get(&key) {
                out.push(Violation::DuplicateVertex {
                    first,
                    second: v.id,
                });
            } else {
                seen.insert(key, v.id);
            }
        }
    }

    fn check_faces(&self, out: &mut Vec<Violation>) {
        for (i, face) in self.faces.iter().enumerate() {
            if face.id.index() != i {
                out.push(Violation::MisplacedElement {
                    key: ElementKey::Face(face.id),
                });
            }
            for &vertex in &face.vertices {
                if self.vertex(vertex).is_none() {
                    out.push(Violation::FaceVertexOutOfRange {
                        face: face.id,
                        vertex,
                    });
                }
            }
        }
    }

    fn check_soup(&self, out: &mut Vec<Violation>) {
        let Some(soup) = self.soup() else { return };
        for (i, tri) in soup.iter().enumerate() {
            let expected = self
                .faces
                .get(i)
                .and_then(|f| {
                    let [a, b, c] = f.vertices;
                    Some([
                        self.vertex(a)?.position(),
                        self.vertex(b)?.position(),
                        self.vertex(c)?.position(),
                    ])
                });
            if tri.id.index() != i || expected != Some(tri.positions) {
                out.push(Violation::SoupMismatch { face: tri.id });
            }
        }
    }

    fn check_half_edges(&self, out: &mut Vec<Violation>) {
        let Some(half_edges) = self.half_edges() else {
            return;
        };
        let get = |id: HalfEdgeId| half_edges.get(id.index());

        for (i, he) in half_edges.iter().enumerate() {
            if he.id.index() != i || he.face != he.id.face() {
                out.push(Violation::MisplacedElement {
                    key: ElementKey::HalfEdge(he.id),
                });
            }

            let cycle_ok = (|| {
                let next = get(he.next)?;
                let prev = get(he.prev)?;
                let third = get(next.next)?;
                Some(
                    next.face == he.face
                        && prev.face == he.face
                        && third.next == he.id
                        && next.prev == he.id
                        && next.origin == he.target,
                )
            })()
            .unwrap_or(false);
            if !cycle_ok {
                out.push(Violation::BrokenFaceCycle { half_edge: he.id });
            }

            if let Some(twin) = he.twin {
                let symmetric = get(twin).is_some_and(|t| {
                    t.twin == Some(he.id) && t.origin == he.target && t.target == he.origin
                });
                if !symmetric {
                    out.push(Violation::AsymmetricTwin { half_edge: he.id });
                }
            }
        }
    }

    fn check_winged_edges(&self, out: &mut Vec<Violation>) {
        let Some(edges) = self.winged_edges() else {
            return;
        };

        let expected = self.edge_uses().len();
        if edges.len() != expected {
            out.push(Violation::EdgeCountMismatch {
                expected,
                actual: edges.len(),
            });
        }

        for (i, edge) in edges.iter().enumerate() {
            if edge.id.index() != i {
                out.push(Violation::MisplacedElement {
                    key: ElementKey::WingedEdge(edge.id),
                });
            }
            if edge.start > edge.end {
                out.push(Violation::NonCanonicalEdge { edge: edge.id });
            }
            if let Some(left) = edge.face_left {
                let ok = self
                    .face(left)
                    .is_some_and(|f| f.has_directed_edge(edge.start, edge.end));
                if !ok {
                    out.push(Violation::LeftFaceMismatch { edge: edge.id });
                }
            }
            if let Some(right) = edge.face_right {
                let ok = self
                    .face(right)
                    .is_some_and(|f| f.has_directed_edge(edge.end, edge.start));
                if !ok {
                    out.push(Violation::RightFaceMismatch { edge: edge.id });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::analyze;
    use crate::options::AnalyzeOptions;

    fn tetrahedron() -> ProcessedMesh {
        let positions = [
            0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0,
        ];
        // Outward-facing, consistently wound.
        let indices = [0, 2, 1, 0, 1, 3, 1, 2, 3, 0, 3, 2];
        analyze(&positions, Some(&indices), &AnalyzeOptions::default()).unwrap()
    }

    #[test]
    fn tetrahedron_is_closed_sphere() {
        let stats = tetrahedron().stats();
        assert_eq!(stats.vertex_count, 4);
        assert_eq!(stats.edge_count, 6);
        assert_eq!(stats.face_count, 4);
        assert_eq!(stats.half_edge_count, 12);
        assert_eq!(stats.boundary_edge_count, 0);
        assert_eq!(stats.euler_characteristic, 2);
        assert_eq!(stats.components, 1);
        assert!(stats.is_closed());
    }

    #[test]
    fn tetrahedron_is_valid() {
        assert_eq!(tetrahedron().validate(), Vec::new());
    }

    #[test]
    fn single_triangle_is_open_disk() {
        let mesh = analyze(
            &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            Some(&[0, 1, 2]),
            &AnalyzeOptions::default(),
        )
        .unwrap();
        let stats = mesh.stats();
        assert_eq!(stats.boundary_edge_count, 3);
        assert_eq!(stats.euler_characteristic, 1);
        assert!(!stats.is_closed());
        assert!(mesh.validate().is_empty());
    }

    #[test]
    fn separate_triangles_are_separate_components() {
        let positions = [
            0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, //
            5.0, 0.0, 0.0, 6.0, 0.0, 0.0, 5.0, 1.0, 0.0,
        ];
        let mesh = analyze(&positions, None, &AnalyzeOptions::default()).unwrap();
        assert_eq!(mesh.stats().components, 2);
    }

    #[test]
    fn non_manifold_fan_is_reported() {
        let positions = [
            0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 1.0,
        ];
        let mesh = analyze(
            &positions,
            Some(&[0, 1, 2, 0, 1, 3, 1, 0, 4]),
            &AnalyzeOptions::default(),
        )
        .unwrap();
        assert_eq!(mesh.stats().non_manifold_edge_count, 1);
        let violations = mesh.validate();
        assert!(violations
            .iter()
            .any(|v| matches!(v, Violation::AsymmetricTwin { .. })));
    }

    #[test]
    fn inconsistent_winding_leaves_one_side_empty() {
        // Both triangles run 1 → 2, so the shared edge has no right face.
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0];
        let mesh = analyze(
            &positions,
            Some(&[0, 1, 2, 3, 1, 2]),
            &AnalyzeOptions::default(),
        )
        .unwrap();
        let stats = mesh.stats();
        assert_eq!(stats.edge_count, 5);
        assert_eq!(stats.boundary_edge_count, 5);
        assert!(mesh.validate().is_empty());
    }

    #[test]
    fn tampered_twin_is_detected() {
        let mut mesh = tetrahedron();
        if let Some(hes) = mesh.half_edges.as_mut() {
            hes[0].twin = Some(HalfEdgeId(7));
        }
        assert!(mesh
            .validate()
            .contains(&Violation::AsymmetricTwin { half_edge: HalfEdgeId(0) }));
    }

    #[test]
    fn tampered_left_face_is_detected() {
        let mut mesh = tetrahedron();
        if let Some(edges) = mesh.winged_edges.as_mut() {
            let edge = &mut edges[0];
            edge.face_left = edge.face_right;
        }
        assert!(mesh
            .validate()
            .contains(&Violation::LeftFaceMismatch { edge: WingedEdgeId(0) }));
    }
}
