// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena records for the four mesh representations.
//!
//! [`ProcessedMesh`] owns every element in plain `Vec`s. Links between
//! elements (half-edge `next`/`prev`/`twin`, winged-edge wings, incidence
//! back-references) are typed ids, never pointers, so the structures have no
//! ownership cycles and compare and serialize by value.
//!
//! ## Incidence back-references
//!
//! `incident_edge` and `incident_half_edge` on vertices and faces name *one*
//! incident element, not a canonical one. When several candidates exist the
//! last one written during construction wins. Any of them is a valid entry
//! point for traversal.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::keys::*;
use crate::options::{AnalyzeOptions, Representation};

/// A deduplicated vertex. Coordinates are already quantized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vertex {
    pub id: VertexId,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub incident_edge: Option<WingedEdgeId>,
    pub incident_half_edge: Option<HalfEdgeId>,
}

impl Vertex {
    /// Returns the coordinates as `[x, y, z]`.
    #[inline]
    pub fn position(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// A triangle of the shared-vertex (indexed) mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Face {
    pub id: FaceId,
    /// Corner vertices in winding order.
    pub vertices: [VertexId; 3],
    pub incident_edge: Option<WingedEdgeId>,
    pub incident_half_edge: Option<HalfEdgeId>,
}

impl Face {
    /// Returns `true` if two corners reference the same vertex.
    pub fn is_degenerate(&self) -> bool {
        let [a, b, c] = self.vertices;
        a == b || b == c || c == a
    }

    /// Returns the directed edge `(origin, target)` with the given local index.
    #[inline]
    pub fn directed_edge(&self, local: usize) -> (VertexId, VertexId) {
        (self.vertices[local % 3], self.vertices[(local + 1) % 3])
    }

    /// Returns `true` if `(a, b)` occurs consecutively in the winding.
    pub fn has_directed_edge(&self, a: VertexId, b: VertexId) -> bool {
        (0..3).any(|local| self.directed_edge(local) == (a, b))
    }
}

/// A triangle with its own copies of the corner positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoupTriangle {
    /// Same as the id of the originating face.
    pub id: FaceId,
    pub positions: [[f64; 3]; 3],
}

/// A directed edge bound to exactly one face.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HalfEdge {
    pub id: HalfEdgeId,
    pub origin: VertexId,
    pub target: VertexId,
    pub face: FaceId,
    pub next: HalfEdgeId,
    pub prev: HalfEdgeId,
    /// Oppositely directed half-edge on the adjoining face; `None` on the boundary.
    pub twin: Option<HalfEdgeId>,
}

impl HalfEdge {
    /// Returns `true` if no face lies on the other side.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.twin.is_none()
    }
}

/// An undirected edge with both adjoining faces and their neighboring edges.
///
/// `start < end` always. The face whose winding runs `start → end` is the
/// left face; the face whose winding runs `end → start` is the right face.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WingedEdge {
    pub id: WingedEdgeId,
    pub start: VertexId,
    pub end: VertexId,
    pub face_left: Option<FaceId>,
    pub face_right: Option<FaceId>,
    pub pred_left: Option<WingedEdgeId>,
    pub succ_left: Option<WingedEdgeId>,
    pub pred_right: Option<WingedEdgeId>,
    pub succ_right: Option<WingedEdgeId>,
    /// Lowest id among the adjoining faces: the step of a face-by-face
    /// playback at which this edge first appears.
    pub creation_step: FaceId,
}

impl WingedEdge {
    /// Returns `true` if the edge borders a single face.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.face_left.is_none() || self.face_right.is_none()
    }

    /// Returns the adjoining faces, left first.
    pub fn faces(&self) -> impl Iterator<Item = FaceId> {
        self.face_left.into_iter().chain(self.face_right)
    }

    /// Returns the four wing edges that are set.
    pub fn wings(&self) -> impl Iterator<Item = WingedEdgeId> {
        [self.pred_left, self.succ_left, self.pred_right, self.succ_right]
            .into_iter()
            .flatten()
    }
}

/// Raw input buffers, as produced by a shape generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMesh {
    /// Flat `x, y, z` positions.
    pub positions: Vec<f32>,
    /// Triangle indices into `positions` (in units of 3 floats).
    pub indices: Option<Vec<u32>>,
}

impl RawMesh {
    /// Creates an indexed mesh.
    pub fn indexed(positions: Vec<f32>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            indices: Some(indices),
        }
    }

    /// Creates an un-indexed mesh where every 3 positions form a triangle.
    pub fn unindexed(positions: Vec<f32>) -> Self {
        Self {
            positions,
            indices: None,
        }
    }

    /// Runs the analysis pipeline on these buffers.
    pub fn analyze(&self, options: &AnalyzeOptions) -> Result<ProcessedMesh> {
        crate::analyze(&self.positions, self.indices.as_deref(), options)
    }
}

/// The analysis output: every representation of one mesh.
///
/// Component lists are filled during [`analyze`](crate::analyze) and
/// read-only afterward.
///
/// # Example
///
/// ```
/// use meshviews_topology::{analyze, AnalyzeOptions};
///
/// let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
/// let mesh = analyze(&positions, Some(&[0, 1, 2]), &AnalyzeOptions::default()).unwrap();
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// assert_eq!(mesh.winged_edges().unwrap().len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedMesh {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) faces: Vec<Face>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) soup: Option<Vec<SoupTriangle>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) half_edges: Option<Vec<HalfEdge>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) winged_edges: Option<Vec<WingedEdge>>,
    /// Undirected edge of each half-edge, indexed by half-edge id. Present
    /// only when both edge lists are.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) half_edge_edges: Option<Vec<WingedEdgeId>>,
}

impl ProcessedMesh {
    // --- Vertices and faces ---

    /// Returns all vertices, indexed by [`VertexId`].
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Returns the vertex with the given id, or `None` if out of range.
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.index())
    }

    /// Returns the number of deduplicated vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns all faces, indexed by [`FaceId`].
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Returns the face with the given id, or `None` if out of range.
    pub fn face(&self, id: FaceId) -> Option<&Face> {
        self.faces.get(id.index())
    }

    /// Returns the number of faces.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    // --- Optional representations ---

    /// Returns the triangle soup, if it was built.
    pub fn soup(&self) -> Option<&[SoupTriangle]> {
        self.soup.as_deref()
    }

    /// Returns the soup triangle of a face, if the soup was built.
    pub fn soup_triangle(&self, id: FaceId) -> Option<&SoupTriangle> {
        self.soup()?.get(id.index())
    }

    /// Returns the half-edges, if they were kept.
    pub fn half_edges(&self) -> Option<&[HalfEdge]> {
        self.half_edges.as_deref()
    }

    /// Returns the half-edge with the given id.
    pub fn half_edge(&self, id: HalfEdgeId) -> Option<&HalfEdge> {
        self.half_edges()?.get(id.index())
    }

    /// Returns the winged edges, if they were built.
    pub fn winged_edges(&self) -> Option<&[WingedEdge]> {
        self.winged_edges.as_deref()
    }

    /// Returns the winged edge with the given id.
    pub fn winged_edge(&self, id: WingedEdgeId) -> Option<&WingedEdge> {
        self.winged_edges()?.get(id.index())
    }

    /// Like [`soup`](Self::soup), but reports a missing representation as an error.
    pub fn try_soup(&self) -> Result<&[SoupTriangle]> {
        self.soup()
            .ok_or(Error::MissingRepresentation(Representation::Soup))
    }

    /// Like [`half_edges`](Self::half_edges), but reports a missing representation as an error.
    pub fn try_half_edges(&self) -> Result<&[HalfEdge]> {
        self.half_edges()
            .ok_or(Error::MissingRepresentation(Representation::HalfEdge))
    }

    /// Like [`winged_edges`](Self::winged_edges), but reports a missing representation as an error.
    pub fn try_winged_edges(&self) -> Result<&[WingedEdge]> {
        self.winged_edges()
            .ok_or(Error::MissingRepresentation(Representation::WingedEdge))
    }

    /// Returns `true` if the given representation is available.
    pub fn has_representation(&self, representation: Representation) -> bool {
        match representation {
            Representation::Soup => self.soup.is_some(),
            Representation::Indexed => true,
            Representation::WingedEdge => self.winged_edges.is_some(),
            Representation::HalfEdge => self.half_edges.is_some(),
        }
    }

    /// Returns the number of primary records a representation holds:
    /// triangles for the soup and indexed forms, edge records otherwise.
    pub fn record_count(&self, representation: Representation) -> Result<usize> {
        match representation {
            Representation::Soup => self.try_soup().map(<[_]>::len),
            Representation::Indexed => Ok(self.faces.len()),
            Representation::WingedEdge => self.try_winged_edges().map(<[_]>::len),
            Representation::HalfEdge => self.try_half_edges().map(<[_]>::len),
        }
    }

    // --- Selection tokens ---

    /// Returns `true` if the key references an existing element.
    pub fn contains(&self, key: ElementKey) -> bool {
        match key {
            ElementKey::Vertex(id) => self.vertex(id).is_some(),
            ElementKey::Face(id) => self.face(id).is_some(),
            ElementKey::SoupTriangle(id) => self.soup_triangle(id).is_some(),
            ElementKey::HalfEdge(id) => self.half_edge(id).is_some(),
            ElementKey::WingedEdge(id) => self.winged_edge(id).is_some(),
        }
    }
}
