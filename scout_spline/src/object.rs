// Copyright 2025 the Scout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The spline object: a tensor-product, possibly rational B-spline.

use crate::basis::{basis_funs, find_span};
use crate::error::SplineError;

/// A tensor-product B-spline curve, surface or volume.
///
/// ## Layout
///
/// Control points are stored in one flat array with the first parametric
/// direction varying fastest. Each point holds [`dimension`](Self::dimension)
/// coordinates, followed by a weight when the object is
/// [`rational`](Self::rational). Rational points are stored in projective form:
/// the coordinates are premultiplied by the weight, so the Cartesian point is
/// recovered by dividing by the last component.
///
/// ## Validity
///
/// [`SplineObject::new`] checks the whole layout and the knot vectors. After
/// construction every operation is infallible.
#[derive(Clone, Debug, PartialEq)]
pub struct SplineObject {
    orders: Vec<usize>,
    knots: Vec<Vec<f64>>,
    shape: Vec<usize>,
    dimension: usize,
    rational: bool,
    controlpoints: Vec<f64>,
}

impl SplineObject {
    /// Build a spline object, validating its shape.
    ///
    /// `orders[d]` is the order (degree + 1) in direction `d` and
    /// `knots[d]` its knot vector. The number of control points in direction
    /// `d` is `knots[d].len() - orders[d]`.
    pub fn new(
        orders: Vec<usize>,
        knots: Vec<Vec<f64>>,
        dimension: usize,
        rational: bool,
        controlpoints: Vec<f64>,
    ) -> Result<Self, SplineError> {
        if orders.is_empty() {
            return Err(SplineError::NoDirections);
        }
        if orders.len() != knots.len() {
            return Err(SplineError::DirectionMismatch {
                orders: orders.len(),
                knots: knots.len(),
            });
        }
        if dimension == 0 {
            return Err(SplineError::ZeroDimension);
        }

        let mut shape = Vec::with_capacity(orders.len());
        for (direction, (&order, kts)) in orders.iter().zip(&knots).enumerate() {
            if order < 2 {
                return Err(SplineError::InvalidOrder { direction, order });
            }
            if kts.len() < 2 * order {
                return Err(SplineError::TooFewKnots {
                    direction,
                    knots: kts.len(),
                    order,
                });
            }
            if kts.iter().any(|k| !k.is_finite()) || kts.windows(2).any(|w| w[0] > w[1]) {
                return Err(SplineError::DecreasingKnots { direction });
            }
            if let Some(w) = kts.windows(order + 1).find(|w| w[0] == w[order]) {
                return Err(SplineError::ExcessiveMultiplicity {
                    direction,
                    knot: w[0],
                    order,
                });
            }
            let count = kts.len() - order;
            if kts[order - 1] >= kts[count] {
                return Err(SplineError::EmptyDomain { direction });
            }
            shape.push(count);
        }

        let width = dimension + usize::from(rational);
        let expected = shape.iter().product::<usize>() * width;
        if controlpoints.len() != expected {
            return Err(SplineError::ControlPointCount {
                expected,
                actual: controlpoints.len(),
            });
        }
        for (index, point) in controlpoints.chunks_exact(width).enumerate() {
            if point.iter().any(|c| !c.is_finite()) {
                return Err(SplineError::NonFiniteControlPoint { index });
            }
            if rational {
                let weight = point[width - 1];
                if weight <= 0.0 {
                    return Err(SplineError::NonPositiveWeight { index, weight });
                }
            }
        }

        Ok(Self {
            orders,
            knots,
            shape,
            dimension,
            rational,
            controlpoints,
        })
    }

    /// Number of parametric directions (1 = curve, 2 = surface, 3 = volume).
    pub fn pardim(&self) -> usize {
        self.orders.len()
    }

    /// Spatial embedding dimension.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Whether control points carry a projective weight.
    pub fn rational(&self) -> bool {
        self.rational
    }

    /// Order (degree + 1) in each direction.
    pub fn orders(&self) -> &[usize] {
        &self.orders
    }

    /// Order in one direction.
    pub fn order(&self, direction: usize) -> usize {
        self.orders[direction]
    }

    /// Knot vector of one direction.
    pub fn knots(&self, direction: usize) -> &[f64] {
        &self.knots[direction]
    }

    /// Number of control points in each direction.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Total number of control points.
    pub fn len(&self) -> usize {
        self.shape.iter().product()
    }

    /// Always false: a valid object has at least `order` points per direction.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Components per stored control point (`dimension + rational`).
    pub fn width(&self) -> usize {
        self.dimension + usize::from(self.rational)
    }

    /// The flat control-point array, see the [layout](Self#layout).
    pub fn controlpoints(&self) -> &[f64] {
        &self.controlpoints
    }

    /// Parametric domain `(start, end)` of one direction.
    pub fn domain(&self, direction: usize) -> (f64, f64) {
        let order = self.orders[direction];
        let knots = &self.knots[direction];
        (knots[order - 1], knots[self.shape[direction]])
    }

    /// Change the spatial dimension in place.
    ///
    /// New coordinates are zero; dropped coordinates are discarded. The weight
    /// stays last. Calling this with the current dimension does nothing.
    pub fn set_dimension(&mut self, dimension: usize) {
        if dimension == self.dimension || dimension == 0 {
            return;
        }
        let old_width = self.width();
        let keep = self.dimension.min(dimension);
        let new_width = dimension + usize::from(self.rational);
        let mut out = Vec::with_capacity(self.len() * new_width);
        for point in self.controlpoints.chunks_exact(old_width) {
            out.extend_from_slice(&point[..keep]);
            out.extend(core::iter::repeat_n(0.0, dimension - keep));
            if self.rational {
                out.push(point[old_width - 1]);
            }
        }
        log::trace!("spline dimension {} -> {}", self.dimension, dimension);
        self.controlpoints = out;
        self.dimension = dimension;
    }

    /// Cartesian control points in storage order, first three coordinates.
    ///
    /// Rational points are divided by their weight. Objects embedded in fewer
    /// than three dimensions are padded with zeros.
    pub fn cartesian_points3(&self) -> Vec<[f64; 3]> {
        let width = self.width();
        let keep = self.dimension.min(3);
        self.controlpoints
            .chunks_exact(width)
            .map(|point| {
                let w = if self.rational { point[width - 1] } else { 1.0 };
                let mut out = [0.0; 3];
                for (o, &c) in out.iter_mut().zip(&point[..keep]) {
                    *o = c / w;
                }
                out
            })
            .collect()
    }

    /// Evaluate the object at one parameter per direction.
    ///
    /// Parameters outside the domain are clamped onto it. The result is the
    /// Cartesian point (length [`dimension`](Self::dimension)).
    pub fn evaluate(&self, params: &[f64]) -> Vec<f64> {
        assert_eq!(
            params.len(),
            self.pardim(),
            "one parameter per direction is required"
        );
        let width = self.width();

        // Per direction: first contributing control point and its basis values.
        let mut locals = Vec::with_capacity(self.pardim());
        for (d, &u) in params.iter().enumerate() {
            let (start, end) = self.domain(d);
            let u = u.clamp(start, end);
            let degree = self.orders[d] - 1;
            let span = find_span(self.shape[d], degree, u, &self.knots[d]);
            locals.push((span - degree, basis_funs(span, u, degree, &self.knots[d])));
        }

        let mut acc = vec![0.0; width];
        let mut local = vec![0_usize; self.pardim()];
        'outer: loop {
            let mut weight = 1.0;
            let mut index = 0;
            let mut stride = 1;
            for (d, &l) in local.iter().enumerate() {
                let (first, basis) = &locals[d];
                weight *= basis[l];
                index += (first + l) * stride;
                stride *= self.shape[d];
            }
            let point = &self.controlpoints[index * width..(index + 1) * width];
            for (a, &c) in acc.iter_mut().zip(point) {
                *a += weight * c;
            }

            // Advance the local multi-index, direction 0 fastest.
            for (d, l) in local.iter_mut().enumerate() {
                *l += 1;
                if *l < self.orders[d] {
                    continue 'outer;
                }
                *l = 0;
            }
            break;
        }

        if self.rational {
            let w = acc[width - 1];
            acc.truncate(self.dimension);
            for a in &mut acc {
                *a /= w;
            }
        }
        acc
    }

    /// Cartesian points at the `2^pardim` corners of the domain.
    ///
    /// Corners are enumerated with direction 0 varying fastest.
    pub fn corners(&self) -> Vec<Vec<f64>> {
        let pardim = self.pardim();
        (0..1_usize << pardim)
            .map(|bits| {
                let params: Vec<f64> = (0..pardim)
                    .map(|d| {
                        let (start, end) = self.domain(d);
                        if bits & (1 << d) == 0 { start } else { end }
                    })
                    .collect();
                self.evaluate(&params)
            })
            .collect()
    }

    pub(crate) fn knots_mut(&mut self, direction: usize) -> &mut Vec<f64> {
        &mut self.knots[direction]
    }

    /// Rebuild the control points along `direction` fiber by fiber.
    ///
    /// `f` receives one fiber of `shape[direction]` points and must fill a
    /// fiber of `new_count` points; both are flat with [`width`](Self::width)
    /// components per point.
    pub(crate) fn remap_direction(
        &mut self,
        direction: usize,
        new_count: usize,
        mut f: impl FnMut(&[f64], &mut [f64]),
    ) {
        let width = self.width();
        let count = self.shape[direction];
        let inner: usize = self.shape[..direction].iter().product();
        let outer: usize = self.shape[direction + 1..].iter().product();

        let mut out = vec![0.0; inner * new_count * outer * width];
        let mut src = vec![0.0; count * width];
        let mut dst = vec![0.0; new_count * width];
        for o in 0..outer {
            for i in 0..inner {
                for j in 0..count {
                    let p = (i + inner * (j + count * o)) * width;
                    src[j * width..(j + 1) * width]
                        .copy_from_slice(&self.controlpoints[p..p + width]);
                }
                f(&src, &mut dst);
                for j in 0..new_count {
                    let p = (i + inner * (j + new_count * o)) * width;
                    out[p..p + width].copy_from_slice(&dst[j * width..(j + 1) * width]);
                }
            }
        }
        self.controlpoints = out;
        self.shape[direction] = new_count;
    }
}
