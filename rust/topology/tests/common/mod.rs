// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Test meshes. Angular fixtures repeat their seam vertices the way
//! procedural generators do, so deduplication has work to do.

#![allow(dead_code)]

use std::f64::consts::PI;

use meshviews_topology::RawMesh;

/// Unit cube as 12 independent triangles (36 raw corners, 8 distinct),
/// wound counter-clockwise seen from outside.
pub fn cube_soup() -> RawMesh {
    let quads: [[[f32; 3]; 4]; 6] = [
        [[0., 0., 0.], [0., 1., 0.], [1., 1., 0.], [1., 0., 0.]], // z = 0
        [[0., 0., 1.], [1., 0., 1.], [1., 1., 1.], [0., 1., 1.]], // z = 1
        [[0., 0., 0.], [1., 0., 0.], [1., 0., 1.], [0., 0., 1.]], // y = 0
        [[0., 1., 0.], [0., 1., 1.], [1., 1., 1.], [1., 1., 0.]], // y = 1
        [[0., 0., 0.], [0., 0., 1.], [0., 1., 1.], [0., 1., 0.]], // x = 0
        [[1., 0., 0.], [1., 1., 0.], [1., 1., 1.], [1., 0., 1.]], // x = 1
    ];

    let mut positions = Vec::with_capacity(36 * 3);
    for [a, b, c, d] in quads {
        for corner in [a, b, c, a, c, d] {
            positions.extend_from_slice(&corner);
        }
    }
    RawMesh::unindexed(positions)
}

/// Flat `n × n` grid of unit quads with every corner displaced by less than
/// half the rounding step.
pub fn jittered_grid(n: usize) -> RawMesh {
    let mut positions = Vec::new();
    let mut indices = Vec::new();

    // Every cell gets its own four corners; neighbors reuse nothing by index.
    for i in 0..n {
        for j in 0..n {
            let base = (positions.len() / 3) as u32;
            for (corner, (di, dj)) in [(0, 0), (1, 0), (0, 1), (1, 1)].into_iter().enumerate() {
                let k = (i * n + j) * 4 + corner;
                let jitter = ((k * 7) % 5) as f32 * 0.001 - 0.002;
                positions.extend_from_slice(&[
                    (i + di) as f32 * 0.25 + jitter,
                    (j + dj) as f32 * 0.25 - jitter,
                    jitter,
                ]);
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 1, base + 3]);
        }
    }
    RawMesh::indexed(positions, indices)
}

/// Indexed latitude/longitude grid with `(slices + 1) × (stacks + 1)` raw
/// vertices: the seam column and both pole rows are duplicates.
fn parametric(
    slices: usize,
    stacks: usize,
    point: impl Fn(f64, f64) -> [f64; 3],
    skip_first_row: bool,
    skip_last_row: bool,
) -> RawMesh {
    let mut positions = Vec::new();
    for i in 0..=stacks {
        for j in 0..=slices {
            let u = i as f64 / stacks as f64;
            let v = j as f64 / slices as f64;
            positions.extend(point(u, v).map(|c| c as f32));
        }
    }

    let row = slices + 1;
    let mut indices = Vec::new();
    for i in 0..stacks {
        for j in 0..slices {
            let a = (i * row + j) as u32;
            let b = a + row as u32;
            let c = a + 1;
            let d = b + 1;
            if !(skip_first_row && i == 0) {
                indices.extend_from_slice(&[a, b, c]);
            }
            if !(skip_last_row && i == stacks - 1) {
                indices.extend_from_slice(&[c, b, d]);
            }
        }
    }
    RawMesh::indexed(positions, indices)
}

/// UV sphere of radius 1. Pole caps use one triangle per slice.
pub fn uv_sphere(slices: usize, stacks: usize) -> RawMesh {
    parametric(
        slices,
        stacks,
        |u, v| {
            let theta = u * PI;
            let phi = v * 2.0 * PI;
            [theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin()]
        },
        true,
        true,
    )
}

/// Torus with major radius 2 and minor radius 0.5.
pub fn torus(slices: usize, stacks: usize) -> RawMesh {
    parametric(
        slices,
        stacks,
        |u, v| {
            let tube = u * 2.0 * PI;
            let around = v * 2.0 * PI;
            let ring = 2.0 + 0.5 * tube.cos();
            [ring * around.cos(), 0.5 * tube.sin(), ring * around.sin()]
        },
        false,
        false,
    )
}
