// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed identifiers for mesh elements.
//!
//! Every element gets a dense, zero-based id assigned in construction order.
//! The id doubles as the element's index into its owning `Vec` in
//! [`ProcessedMesh`](crate::ProcessedMesh), so no id-to-slot lookup is needed.
//! Ids serialize as bare integers.

use serde::{Deserialize, Serialize};

macro_rules! dense_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Creates an id from a collection index.
            #[inline]
            pub fn new(index: usize) -> Self {
                Self(index as u32)
            }

            /// Returns the index of this element in its owning collection.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

dense_id! {
    /// Id of a deduplicated vertex.
    VertexId
}

dense_id! {
    /// Id of a triangular face. Soup triangles share the id of their face.
    FaceId
}

dense_id! {
    /// Id of a directed half-edge, always `face * 3 + local`.
    HalfEdgeId
}

dense_id! {
    /// Id of an undirected winged-edge record.
    WingedEdgeId
}

impl HalfEdgeId {
    /// Returns the half-edge with the given local index (0, 1 or 2) of a face.
    #[inline]
    pub fn of_face(face: FaceId, local: usize) -> Self {
        Self::new(face.index() * 3 + local)
    }

    /// Returns the face this half-edge bounds.
    #[inline]
    pub fn face(self) -> FaceId {
        FaceId::new(self.index() / 3)
    }

    /// Returns the local index (0, 1 or 2) within the owning face.
    #[inline]
    pub fn local(self) -> usize {
        self.index() % 3
    }
}

/// A key that can reference any element of a processed mesh.
///
/// This is the hover/selection token exchanged with the viewer and the
/// inspector: hovering a row or a primitive produces one, and
/// [`ProcessedMesh::related`](crate::ProcessedMesh::related) expands it into
/// the set of elements to highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "camelCase")]
pub enum ElementKey {
    Vertex(VertexId),
    Face(FaceId),
    SoupTriangle(FaceId),
    HalfEdge(HalfEdgeId),
    WingedEdge(WingedEdgeId),
}

impl ElementKey {
    /// Returns the element type of this key.
    pub fn element_type(&self) -> ElementType {
        match self {
            ElementKey::Vertex(_) => ElementType::Vertex,
            ElementKey::Face(_) => ElementType::Face,
            ElementKey::SoupTriangle(_) => ElementType::SoupTriangle,
            ElementKey::HalfEdge(_) => ElementType::HalfEdge,
            ElementKey::WingedEdge(_) => ElementType::WingedEdge,
        }
    }
}

/// Discriminant for element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementType {
    Vertex = 0,
    Face = 1,
    SoupTriangle = 2,
    HalfEdge = 3,
    WingedEdge = 4,
}

impl ElementType {
    /// Returns the type name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Vertex => "Vertex",
            ElementType::Face => "Face",
            ElementType::SoupTriangle => "SoupTriangle",
            ElementType::HalfEdge => "HalfEdge",
            ElementType::WingedEdge => "WingedEdge",
        }
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<VertexId> for ElementKey {
    fn from(k: VertexId) -> Self {
        ElementKey::Vertex(k)
    }
}

impl From<FaceId> for ElementKey {
    fn from(k: FaceId) -> Self {
        ElementKey::Face(k)
    }
}

impl From<HalfEdgeId> for ElementKey {
    fn from(k: HalfEdgeId) -> Self {
        ElementKey::HalfEdge(k)
    }
}

impl From<WingedEdgeId> for ElementKey {
    fn from(k: WingedEdgeId) -> Self {
        ElementKey::WingedEdge(k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_type_names() {
        assert_eq!(ElementType::Vertex.as_str(), "Vertex");
        assert_eq!(ElementType::Face.as_str(), "Face");
        assert_eq!(ElementType::SoupTriangle.as_str(), "SoupTriangle");
        assert_eq!(ElementType::HalfEdge.as_str(), "HalfEdge");
        assert_eq!(ElementType::WingedEdge.as_str(), "WingedEdge");
    }

    #[test]
    fn half_edge_id_decomposes_into_face_and_local() {
        let he = HalfEdgeId::of_face(FaceId(4), 2);
        assert_eq!(he, HalfEdgeId(14));
        assert_eq!(he.face(), FaceId(4));
        assert_eq!(he.local(), 2);
    }

    #[test]
    fn key_discriminates_soup_from_face() {
        let face: ElementKey = FaceId(1).into();
        assert_eq!(face.element_type(), ElementType::Face);
        assert_eq!(
            ElementKey::SoupTriangle(FaceId(1)).element_type(),
            ElementType::SoupTriangle
        );
        assert_ne!(face, ElementKey::SoupTriangle(FaceId(1)));
    }

    #[test]
    fn ids_serialize_as_integers() {
        let json = serde_json::to_string(&VertexId(7)).unwrap();
        assert_eq!(json, "7");
        let key = serde_json::to_string(&ElementKey::WingedEdge(WingedEdgeId(3))).unwrap();
        assert_eq!(key, r#"{"type":"wingedEdge","id":3}"#);
    }
}
