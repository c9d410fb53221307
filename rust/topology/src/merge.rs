// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vertex merging by quantized position.
//!
//! Positions are rounded to a fixed number of decimal places and the tuple of
//! rounded coordinates is used as the dedup key. Inputs whose true positions
//! differ by less than the rounding step collapse into one vertex, which
//! absorbs floating-point jitter from procedural generators.

use rustc_hash::FxHashMap;

use crate::keys::VertexId;
use crate::mesh::Vertex;

/// Bit patterns of the rounded, scaled coordinates.
type QuantizedKey = (u64, u64, u64);

/// Deduplicates positions into a compact vertex list.
///
/// Lives for exactly one analysis call.
#[derive(Debug)]
pub struct VertexMerger {
    scale: f64,
    lookup: FxHashMap<QuantizedKey, VertexId>,
    vertices: Vec<Vertex>,
    merged: usize,
}

impl VertexMerger {
    /// Creates a merger that keeps `precision` decimal places.
    pub fn new(precision: u32) -> Self {
        Self {
            scale: 10f64.powi(precision as i32),
            lookup: FxHashMap::default(),
            vertices: Vec::new(),
            merged: 0,
        }
    }

    /// Creates a merger with room for `capacity` distinct vertices.
    pub fn with_capacity(precision: u32, capacity: usize) -> Self {
        let mut merger = Self::new(precision);
        merger.lookup.reserve(capacity);
        merger.vertices.reserve(capacity);
        merger
    }

    /// Returns the vertex id for raw vertex `index` of a flat position buffer.
    ///
    /// The caller guarantees `index * 3 + 2 < positions.len()`.
    pub fn merge_at(&mut self, positions: &[f32], index: usize) -> VertexId {
        let base = index * 3;
        self.merge(
            positions[base] as f64,
            positions[base + 1] as f64,
            positions[base + 2] as f64,
        )
    }

    /// Returns the vertex id for a position, allocating one on first sight.
    pub fn merge(&mut self, x: f64, y: f64, z: f64) -> VertexId {
        let (qx, qy, qz) = (self.scaled(x), self.scaled(y), self.scaled(z));
        let key = (key_bits(qx), key_bits(qy), key_bits(qz));

        if let Some(&id) = self.lookup.get(&key) {
            self.merged += 1;
            return id;
        }

        let id = VertexId::new(self.vertices.len());
        self.vertices.push(Vertex {
            id,
            x: qx / self.scale,
            y: qy / self.scale,
            z: qz / self.scale,
            incident_edge: None,
            incident_half_edge: None,
        });
        self.lookup.insert(key, id);
        id
    }

    /// Number of distinct vertices so far.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if no vertex has been allocated.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of lookups that resolved to an existing vertex.
    pub fn merged_count(&self) -> usize {
        self.merged
    }

    /// Consumes the merger, returning vertices in id order.
    pub fn into_vertices(self) -> Vec<Vertex> {
        self.vertices
    }

    #[inline]
    fn scaled(&self, v: f64) -> f64 {
        (v * self.scale).round()
    }
}

/// Hash key for a rounded coordinate. `-0.0` and `0.0` are the same position.
#[inline]
fn key_bits(v: f64) -> u64 {
    if v == 0.0 {
        0.0f64.to_bits()
    } else {
        v.to_bits()
    }
}

/// Rounds a coordinate to `precision` decimal places, the way the merger does.
pub fn quantize(v: f64, precision: u32) -> f64 {
    let scale = 10f64.powi(precision as i32);
    (v * scale).round() / scale
}
