// Copyright 2025 the Scout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat display geometry sampled from primitives, used for drawing and picking.

use glam::DVec3;
use scout_spline::{BezierMesh, CellKind};

use crate::types::Geometry;

/// Sampled world-space geometry of one primitive.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Display {
    pub(crate) vertices: Vec<DVec3>,
    pub(crate) triangles: Vec<[usize; 3]>,
    pub(crate) segments: Vec<[usize; 2]>,
    /// Vertices drawn as points (point clouds only).
    pub(crate) points: Vec<usize>,
}

impl Display {
    /// Sample `geometry` with `segments_per_cell` segments per curved direction.
    pub(crate) fn sample(geometry: &Geometry, segments_per_cell: usize) -> Self {
        match geometry {
            Geometry::Bezier(mesh) => Self::sample_mesh(mesh, segments_per_cell.max(1)),
            Geometry::Points(points) => Self {
                vertices: points.clone(),
                points: (0..points.len()).collect(),
                ..Self::default()
            },
        }
    }

    fn sample_mesh(mesh: &BezierMesh, segments: usize) -> Self {
        let mut out = Self::default();
        let steps = |degree: usize| if degree <= 1 { 1 } else { segments };
        for (index, cell) in mesh.cells.iter().enumerate() {
            let base = out.vertices.len();
            match cell.kind {
                CellKind::Curve { degree } => {
                    let n = steps(degree);
                    for k in 0..=n {
                        out.vertices
                            .push(DVec3::from_array(mesh.evaluate(index, &[param(k, n)])));
                    }
                    out.segments
                        .extend((0..n).map(|k| [base + k, base + k + 1]));
                }
                CellKind::Quadrilateral { degrees: [p, q] } => {
                    let (nu, nv) = (steps(p), steps(q));
                    for j in 0..=nv {
                        for i in 0..=nu {
                            let uv = [param(i, nu), param(j, nv)];
                            out.vertices
                                .push(DVec3::from_array(mesh.evaluate(index, &uv)));
                        }
                    }
                    let at = |i: usize, j: usize| base + i + (nu + 1) * j;
                    for j in 0..nv {
                        for i in 0..nu {
                            out.triangles
                                .push([at(i, j), at(i + 1, j), at(i + 1, j + 1)]);
                            out.triangles
                                .push([at(i, j), at(i + 1, j + 1), at(i, j + 1)]);
                        }
                    }
                }
            }
        }
        out
    }
}

#[allow(
    clippy::cast_precision_loss,
    reason = "sample counts are tiny compared to f64 precision."
)]
fn param(k: usize, n: usize) -> f64 {
    k as f64 / n as f64
}
