// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Positional helpers for placing labels and resolving hover picks.

use nalgebra::Point3;

use crate::keys::*;
use crate::mesh::{ProcessedMesh, SoupTriangle, Vertex};

impl Vertex {
    /// Returns the position as a nalgebra point.
    #[inline]
    pub fn point(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }
}

impl SoupTriangle {
    /// Returns the three corners as nalgebra points.
    pub fn corners(&self) -> [Point3<f64>; 3] {
        self.positions.map(|[x, y, z]| Point3::new(x, y, z))
    }
}

impl ProcessedMesh {
    /// Returns the position of a vertex.
    pub fn vertex_point(&self, id: VertexId) -> Option<Point3<f64>> {
        self.vertex(id).map(Vertex::point)
    }

    /// Returns the centroid of a face's three corners.
    pub fn face_centroid(&self, id: FaceId) -> Option<Point3<f64>> {
        let [a, b, c] = self.face(id)?.vertices;
        let (a, b, c) = (
            self.vertex_point(a)?,
            self.vertex_point(b)?,
            self.vertex_point(c)?,
        );
        Some(Point3::from((a.coords + b.coords + c.coords) / 3.0))
    }

    /// Returns the midpoint of a winged edge.
    pub fn edge_midpoint(&self, id: WingedEdgeId) -> Option<Point3<f64>> {
        let edge = self.winged_edge(id)?;
        let a = self.vertex_point(edge.start)?;
        let b = self.vertex_point(edge.end)?;
        Some(nalgebra::center(&a, &b))
    }

    /// Returns the axis-aligned bounds `(min, max)` of all vertices.
    pub fn bounds(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = self.vertices.first()?.point();
        Some(self.vertices.iter().skip(1).fold((first, first), |(min, max), v| {
            let p = v.point();
            (min.inf(&p), max.sup(&p))
        }))
    }

    /// Returns the vertex closest to `point`.
    pub fn nearest_vertex(&self, point: &Point3<f64>) -> Option<VertexId> {
        self.vertices
            .iter()
            .map(|v| (v.id, nalgebra::distance_squared(&v.point(), point)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// Returns the face whose centroid is closest to `point`.
    pub fn nearest_face(&self, point: &Point3<f64>) -> Option<FaceId> {
        self.faces
            .iter()
            .filter_map(|f| {
                let c = self.face_centroid(f.id)?;
                Some((f.id, nalgebra::distance_squared(&c, point)))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// Returns the winged edge whose midpoint is closest to `point`.
    pub fn nearest_edge(&self, point: &Point3<f64>) -> Option<WingedEdgeId> {
        self.winged_edges()?
            .iter()
            .filter_map(|e| {
                let m = self.edge_midpoint(e.id)?;
                Some((e.id, nalgebra::distance_squared(&m, point)))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }
}
