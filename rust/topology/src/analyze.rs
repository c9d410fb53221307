// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The analysis pipeline.
//!
//! ```text
//! raw buffers → vertex merge → faces → { soup, half-edges → winged edges }
//! ```
//!
//! The soup and the half-edge/winged-edge chain only read the finished
//! vertex and face lists, so they can run on separate rayon tasks. Neither
//! writes to vertices or faces directly: each returns its incidence
//! back-references, and they are written in one merge pass at the end.

use tracing::{debug, info_span, warn};

use crate::error::Result;
use crate::faces::{build_faces, FaceBuild};
use crate::halfedge::{build_half_edges, HalfEdgeBuild};
use crate::mesh::{Face, ProcessedMesh, SoupTriangle, Vertex};
use crate::options::AnalyzeOptions;
use crate::soup::emit_soup;
use crate::winged::{consolidate, WingedEdgeBuild};

type Topology = (HalfEdgeBuild, Option<WingedEdgeBuild>);

/// Converts raw triangle buffers into every requested representation.
///
/// `positions` holds flat `x, y, z` triples. `indices`, when present, groups
/// them into triangles; when absent, every three consecutive positions form
/// a triangle. Malformed buffers are rejected before construction begins.
///
/// The result is deterministic: the same input and options always produce
/// the same ids in the same order.
pub fn analyze(
    positions: &[f32],
    indices: Option<&[u32]>,
    options: &AnalyzeOptions,
) -> Result<ProcessedMesh> {
    options.validate()?;

    let span = info_span!(
        "analyze",
        positions = positions.len() / 3,
        indexed = indices.is_some(),
        parallel = options.parallel
    );
    let _guard = span.enter();

    let FaceBuild {
        mut vertices,
        mut faces,
        merged,
    } = build_faces(positions, indices, options.precision)?;
    debug!(
        vertices = vertices.len(),
        faces = faces.len(),
        merged,
        "built indexed mesh"
    );

    let degenerate = faces.iter().filter(|f| f.is_degenerate()).count();
    if degenerate > 0 {
        warn!(degenerate, "mesh contains degenerate triangles");
    }

    let (soup, topology) = if options.parallel {
        rayon::join(
            || derive_soup(&vertices, &faces, options),
            || derive_topology(&vertices, &faces, options),
        )
    } else {
        (
            derive_soup(&vertices, &faces, options),
            derive_topology(&vertices, &faces, options),
        )
    };

    // Incidence merge pass
    let (half_edges, winged_edges, half_edge_edges) = match topology {
        Some((half_edges, winged)) => {
            // Half-edge back-references only point into a list that is kept.
            if options.half_edges {
                half_edges.apply_incidence(&mut vertices, &mut faces);
            }
            let (winged_edges, edge_of_half_edge) = match winged {
                Some(w) => {
                    w.apply_incidence(&mut vertices, &mut faces);
                    (Some(w.winged_edges), Some(w.edge_of_half_edge))
                }
                None => (None, None),
            };
            let kept = options.half_edges.then_some(half_edges.half_edges);
            let half_edge_edges = edge_of_half_edge.filter(|_| kept.is_some());
            (kept, winged_edges, half_edge_edges)
        }
        None => (None, None, None),
    };

    Ok(ProcessedMesh {
        vertices,
        faces,
        soup,
        half_edges,
        winged_edges,
        half_edge_edges,
    })
}

fn derive_soup(
    vertices: &[Vertex],
    faces: &[Face],
    options: &AnalyzeOptions,
) -> Option<Vec<SoupTriangle>> {
    if !options.soup {
        return None;
    }
    let soup = emit_soup(vertices, faces);
    debug!(triangles = soup.len(), "emitted triangle soup");
    Some(soup)
}

fn derive_topology(
    vertices: &[Vertex],
    faces: &[Face],
    options: &AnalyzeOptions,
) -> Option<Topology> {
    if !options.needs_half_edges() {
        return None;
    }

    let half_edges = build_half_edges(faces, vertices.len());
    let boundary = half_edges
        .half_edges
        .iter()
        .filter(|h| h.is_boundary())
        .count();
    debug!(
        half_edges = half_edges.half_edges.len(),
        boundary,
        "built half-edges"
    );
    if half_edges.duplicate_directed > 0 {
        warn!(
            duplicates = half_edges.duplicate_directed,
            "directed edge shared by several faces, twins kept for the last one only"
        );
    }

    let winged = options.winged_edges.then(|| {
        let winged = consolidate(&half_edges, vertices.len(), faces.len());
        debug!(
            winged_edges = winged.winged_edges.len(),
            "consolidated winged edges"
        );
        winged
    });

    Some((half_edges, winged))
}
