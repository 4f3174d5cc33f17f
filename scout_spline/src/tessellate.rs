// Copyright 2025 the Scout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversion of spline objects into [`BezierMesh`]es.

use crate::bezier::{BezierCell, BezierMesh, CellKind, curve_ordering, quadrilateral_ordering};
use crate::object::SplineObject;

/// Tessellate a curve or surface into higher-order Bézier cells.
///
/// The object is first lifted to a 3D embedding in place (a no-op if it
/// already is 3D). Extraction then works on a copy, so the knots and control
/// points of `object` are otherwise left untouched.
///
/// Returns `None` for objects that are neither curves nor surfaces; such
/// objects are not modified at all.
pub fn tessellate(object: &mut SplineObject) -> Option<BezierMesh> {
    let pardim = object.pardim();
    if !(1..=2).contains(&pardim) {
        log::debug!("not tessellating object with {pardim} parametric directions");
        return None;
    }
    object.set_dimension(3);

    let mut bezier = object.clone();
    bezier.bezier_extract();

    let orders = bezier.orders().to_vec();
    let shape = bezier.shape().to_vec();
    let points = bezier.cartesian_points3();
    let weights: Vec<f64> = if bezier.rational() {
        let width = bezier.width();
        bezier
            .controlpoints()
            .chunks_exact(width)
            .map(|p| p[width - 1])
            .collect()
    } else {
        vec![1.0; points.len()]
    };

    // Curves are treated as surfaces of one element and order one in the
    // second direction.
    let (order0, order1) = (orders[0], orders.get(1).copied().unwrap_or(1));
    let (elements0, elements1) = (shape[0] / order0, shape.get(1).map_or(1, |n| n / order1));
    let kind = if pardim == 1 {
        CellKind::Curve {
            degree: order0 - 1,
        }
    } else {
        CellKind::Quadrilateral {
            degrees: [order0 - 1, order1 - 1],
        }
    };
    let ordering = match kind {
        CellKind::Curve { degree } => curve_ordering(degree),
        CellKind::Quadrilateral { degrees } => quadrilateral_ordering(degrees),
    };

    let mut mesh = BezierMesh {
        points: Vec::with_capacity(points.len()),
        weights: Vec::with_capacity(points.len()),
        rational: bezier.rational(),
        cells: Vec::with_capacity(elements0 * elements1),
    };
    for e1 in 0..elements1 {
        for e0 in 0..elements0 {
            let offset = mesh.points.len();
            for l1 in 0..order1 {
                for l0 in 0..order0 {
                    let index = (e0 * order0 + l0) + shape[0] * (e1 * order1 + l1);
                    mesh.points.push(points[index]);
                    mesh.weights.push(weights[index]);
                }
            }
            mesh.cells.push(BezierCell {
                kind,
                offset,
                connectivity: ordering.iter().map(|&k| offset + k).collect(),
            });
        }
    }
    log::trace!(
        "tessellated {:?} into {} cells, {} points",
        kind,
        mesh.cells.len(),
        mesh.points.len()
    );
    Some(mesh)
}
