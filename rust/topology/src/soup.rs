// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Triangle soup emission: every triangle carries its own corner positions.

use crate::mesh::{Face, SoupTriangle, Vertex};

/// Copies the corner positions of every face into an independent triangle.
pub fn emit_soup(vertices: &[Vertex], faces: &[Face]) -> Vec<SoupTriangle> {
    faces
        .iter()
        .map(|face| SoupTriangle {
            id: face.id,
            positions: face.vertices.map(|v| vertices[v.index()].position()),
        })
        .collect()
}
