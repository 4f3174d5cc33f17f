// Copyright 2025 the Scout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scout Spline: rational B-spline patches and their exact Bézier tessellation.
//!
//! This crate holds the geometric core of Scout. It models tensor-product
//! B-spline objects of any parametric dimension and turns curves and surfaces
//! into higher-order Bézier cells a renderer can draw without approximation.
//!
//! ## Overview
//!
//! - [`SplineObject`]: validated orders, knot vectors and projective control
//!   points, with evaluation, knot insertion and Bézier extraction.
//! - [`tessellate`]: lifts an object to 3D and decomposes it into a
//!   [`BezierMesh`] of [`BezierCell`]s, one per polynomial element.
//! - [`curve_ordering`] / [`quadrilateral_ordering`]: the VTK higher-order
//!   point orderings used by cell connectivity.
//!
//! Tessellation is lossless: knot insertion is exact, so every cell evaluated
//! at local parameters reproduces the source spline at the matching global
//! parameters. Objects with three or more parametric directions (volumes) are
//! not tessellated; [`tessellate`] returns `None` for them.
//!
//! Malformed input is rejected once, by [`SplineObject::new`], with a
//! [`SplineError`]. Every later operation is infallible.
//!
//! ## Example
//!
//! ```
//! use scout_spline::{CellKind, SplineObject, tessellate};
//!
//! // A bilinear patch over the unit square, embedded in the plane.
//! let mut patch = SplineObject::new(
//!     vec![2, 2],
//!     vec![vec![0.0, 0.0, 1.0, 1.0], vec![0.0, 0.0, 1.0, 1.0]],
//!     2,
//!     false,
//!     vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0],
//! )
//! .unwrap();
//!
//! let mesh = tessellate(&mut patch).unwrap();
//! assert_eq!(patch.dimension(), 3);
//! assert_eq!(mesh.cells.len(), 1);
//! assert_eq!(mesh.cells[0].kind, CellKind::Quadrilateral { degrees: [1, 1] });
//! // Corners first, counter-clockwise.
//! assert_eq!(mesh.cells[0].connectivity, vec![0, 1, 3, 2]);
//! ```

mod basis;
mod bezier;
mod error;
mod knots;
mod object;
mod tessellate;

pub use bezier::{BezierCell, BezierMesh, CellKind, curve_ordering, quadrilateral_ordering};
pub use error::SplineError;
pub use object::SplineObject;
pub use tessellate::tessellate;
