// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # MeshViews Topology
//!
//! Converts a raw triangle mesh into the four representations used to teach
//! mesh data structures:
//!
//! - **triangle soup**: every triangle owns copies of its corner positions;
//! - **indexed mesh**: deduplicated vertices shared between faces;
//! - **winged-edge**: one record per undirected edge with its left/right
//!   faces and the neighboring edges around each of them;
//! - **half-edge (DCEL)**: one directed record per face corner, linked to
//!   its face cycle and to its twin across the edge.
//!
//! All four views live in one [`ProcessedMesh`] arena whose ids are dense
//! indices, and are mutually consistent by construction.
//!
//! ```
//! use meshviews_topology::{analyze, AnalyzeOptions, FaceId};
//!
//! // Two triangles sharing the edge between vertices 1 and 2.
//! let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0];
//! let indices = [0, 1, 2, 1, 3, 2];
//! let mesh = analyze(&positions, Some(&indices), &AnalyzeOptions::default()).unwrap();
//!
//! let shared = mesh.winged_edges().unwrap().iter().find(|e| !e.is_boundary()).unwrap();
//! assert_eq!(shared.face_left, Some(FaceId(0)));
//! assert_eq!(shared.face_right, Some(FaceId(1)));
//! ```

pub mod analyze;
pub mod error;
pub mod faces;
pub mod geometry;
pub mod halfedge;
pub mod keys;
pub mod merge;
pub mod mesh;
pub mod options;
pub mod query;
pub mod serialization;
pub mod soup;
pub mod traversal;
pub mod winged;

pub use analyze::analyze;
pub use error::{Error, Result};
pub use keys::{ElementKey, ElementType, FaceId, HalfEdgeId, VertexId, WingedEdgeId};
pub use mesh::{Face, HalfEdge, ProcessedMesh, RawMesh, SoupTriangle, Vertex, WingedEdge};
pub use options::{AnalyzeOptions, Representation};
pub use query::{MeshStats, Violation};
