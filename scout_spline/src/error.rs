// Copyright 2025 the Scout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction errors for spline objects.

use thiserror::Error;

/// A spline object could not be built from the supplied data.
///
/// These are contract violations on the producer side: once a
/// [`SplineObject`](crate::SplineObject) exists, every operation on it
/// (evaluation, knot insertion, tessellation) is infallible.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SplineError {
    /// No parametric direction was given.
    #[error("a spline object needs at least one parametric direction")]
    NoDirections,
    /// The number of orders and knot vectors differ.
    #[error("got {orders} orders but {knots} knot vectors")]
    DirectionMismatch {
        /// Number of orders supplied.
        orders: usize,
        /// Number of knot vectors supplied.
        knots: usize,
    },
    /// The spatial dimension is zero.
    #[error("the spatial dimension must be at least 1")]
    ZeroDimension,
    /// An order below 2 (degree 0) was given.
    #[error("order {order} in direction {direction} is below the minimum of 2")]
    InvalidOrder {
        /// Offending parametric direction.
        direction: usize,
        /// The order that was supplied.
        order: usize,
    },
    /// A knot vector is too short to support a single polynomial piece.
    #[error("direction {direction} has {knots} knots, order {order} needs at least {}", 2 * order)]
    TooFewKnots {
        /// Offending parametric direction.
        direction: usize,
        /// Number of knots supplied.
        knots: usize,
        /// Order in that direction.
        order: usize,
    },
    /// A knot vector decreases somewhere, or holds a non-finite value.
    #[error("knot vector in direction {direction} is not finite and non-decreasing")]
    DecreasingKnots {
        /// Offending parametric direction.
        direction: usize,
    },
    /// A knot value repeats more often than the order allows.
    #[error("knot {knot} in direction {direction} repeats more than {order} times")]
    ExcessiveMultiplicity {
        /// Offending parametric direction.
        direction: usize,
        /// The repeated knot value.
        knot: f64,
        /// Order in that direction.
        order: usize,
    },
    /// The parametric domain of a direction has zero length.
    #[error("parametric domain in direction {direction} is empty")]
    EmptyDomain {
        /// Offending parametric direction.
        direction: usize,
    },
    /// The control-point array does not match the declared shape.
    #[error("expected {expected} control point components, got {actual}")]
    ControlPointCount {
        /// Component count implied by knots, orders, dimension and rationality.
        expected: usize,
        /// Component count supplied.
        actual: usize,
    },
    /// A control point carries a non-finite coordinate.
    #[error("control point {index} has a non-finite component")]
    NonFiniteControlPoint {
        /// Index of the control point in storage order.
        index: usize,
    },
    /// A rational weight is zero, negative or non-finite.
    #[error("control point {index} has a non-positive rational weight {weight}")]
    NonPositiveWeight {
        /// Index of the control point in storage order.
        index: usize,
        /// The offending weight.
        weight: f64,
    },
}
