// Copyright 2025 the Scout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Higher-order Bézier render cells.
//!
//! ## Point ordering
//!
//! Cells reference their control points in the VTK higher-order ordering, so a
//! mesh can be handed to a VTK-style renderer without reshuffling:
//!
//! - Curves list the two endpoints first, then the interior points.
//! - Quadrilaterals list the four corners counter-clockwise from the
//!   parametric origin, then the edge points of the bottom, right, top and left
//!   edges (each in increasing parameter), then the interior points with the
//!   first direction varying fastest.
//!
//! Each cell's block of points is stored in [`BezierMesh::points`] on its own,
//! first direction fastest. Neighbouring cells therefore duplicate the points
//! on their shared boundary.

/// The type and degrees of a [`BezierCell`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// A Bézier curve segment.
    Curve {
        /// Polynomial degree.
        degree: usize,
    },
    /// A tensor-product Bézier quadrilateral.
    Quadrilateral {
        /// Polynomial degree in each parametric direction.
        degrees: [usize; 2],
    },
}

impl CellKind {
    /// Number of control points in one cell of this kind.
    pub fn point_count(self) -> usize {
        match self {
            Self::Curve { degree } => degree + 1,
            Self::Quadrilateral { degrees: [p, q] } => (p + 1) * (q + 1),
        }
    }

    /// Number of parametric directions (1 or 2).
    pub fn pardim(self) -> usize {
        match self {
            Self::Curve { .. } => 1,
            Self::Quadrilateral { .. } => 2,
        }
    }
}

/// One Bézier element.
#[derive(Clone, Debug, PartialEq)]
pub struct BezierCell {
    /// Cell type and degrees.
    pub kind: CellKind,
    /// Index of the first point of this cell's block in [`BezierMesh::points`].
    pub offset: usize,
    /// Mesh point indices in VTK higher-order order.
    pub connectivity: Vec<usize>,
}

/// The renderable Bézier decomposition of one curve or surface.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BezierMesh {
    /// Cartesian control points, one block per cell.
    pub points: Vec<[f64; 3]>,
    /// Rational weight of each point; all `1.0` for polynomial input.
    pub weights: Vec<f64>,
    /// Whether the weights are significant.
    pub rational: bool,
    /// The cells, first parametric direction varying fastest.
    pub cells: Vec<BezierCell>,
}

impl BezierMesh {
    /// Evaluate `cell` at local parameters in `[0, 1]` (one per direction).
    ///
    /// Uses rational de Casteljau on the cell's block, so the result matches
    /// the spline the mesh was extracted from.
    pub fn evaluate(&self, cell: usize, params: &[f64]) -> [f64; 3] {
        let cell = &self.cells[cell];
        let homogeneous = |k: usize| {
            let [x, y, z] = self.points[cell.offset + k];
            let w = self.weights[cell.offset + k];
            [w * x, w * y, w * z, w]
        };
        let h = match cell.kind {
            CellKind::Curve { degree } => {
                let row: Vec<[f64; 4]> = (0..=degree).map(homogeneous).collect();
                de_casteljau(row, params[0])
            }
            CellKind::Quadrilateral { degrees: [p, q] } => {
                let column: Vec<[f64; 4]> = (0..=q)
                    .map(|j| {
                        let row = (0..=p).map(|i| homogeneous(i + (p + 1) * j)).collect();
                        de_casteljau(row, params[0])
                    })
                    .collect();
                de_casteljau(column, params[1])
            }
        };
        [h[0] / h[3], h[1] / h[3], h[2] / h[3]]
    }

    /// Axis-aligned bounds of the control points, or `None` for an empty mesh.
    ///
    /// Bézier geometry lies inside the hull of its control points, so these
    /// bounds contain the whole mesh.
    pub fn bounds(&self) -> Option<([f64; 3], [f64; 3])> {
        let (first, rest) = self.points.split_first()?;
        Some(rest.iter().fold((*first, *first), |(lo, hi), p| {
            (
                [lo[0].min(p[0]), lo[1].min(p[1]), lo[2].min(p[2])],
                [hi[0].max(p[0]), hi[1].max(p[1]), hi[2].max(p[2])],
            )
        }))
    }
}

fn de_casteljau(mut points: Vec<[f64; 4]>, t: f64) -> [f64; 4] {
    let n = points.len();
    for level in 1..n {
        for i in 0..n - level {
            let next = points[i + 1];
            for (a, b) in points[i].iter_mut().zip(next) {
                *a = (1.0 - t) * *a + t * b;
            }
        }
    }
    points[0]
}

/// Block-local point order of a VTK Bézier curve of `degree`.
pub fn curve_ordering(degree: usize) -> Vec<usize> {
    let mut out = Vec::with_capacity(degree + 1);
    out.push(0);
    out.push(degree);
    out.extend(1..degree);
    out
}

/// Block-local point order of a VTK Bézier quadrilateral of degrees `[p, q]`.
///
/// Block indices are `i + (p + 1) * j` for the point at grid position `(i, j)`.
pub fn quadrilateral_ordering([p, q]: [usize; 2]) -> Vec<usize> {
    let at = |i: usize, j: usize| i + (p + 1) * j;
    let mut out = Vec::with_capacity((p + 1) * (q + 1));
    out.extend([at(0, 0), at(p, 0), at(p, q), at(0, q)]);
    out.extend((1..p).map(|i| at(i, 0)));
    out.extend((1..q).map(|j| at(p, j)));
    out.extend((1..p).map(|i| at(i, q)));
    out.extend((1..q).map(|j| at(0, j)));
    for j in 1..q {
        out.extend((1..p).map(|i| at(i, j)));
    }
    out
}
