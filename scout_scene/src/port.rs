// Copyright 2025 the Scout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering port: what Scout needs from a renderer.

use kurbo::Point;
use thiserror::Error;

use crate::types::{Color, PickHit, PickStrategy, Primitive, PrimitiveId};

/// Failure reported by a [`RenderBackend`].
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SceneError {
    /// The handle does not refer to a live primitive.
    #[error("primitive {0} is not alive")]
    StalePrimitive(PrimitiveId),
    /// A primitive without any drawable geometry was submitted.
    #[error("primitive geometry is empty")]
    EmptyGeometry,
    /// A failure inside a foreign renderer.
    #[error("render backend failure: {0}")]
    Backend(String),
}

/// A renderer that can draw, recolor, remove and pick primitives.
///
/// Screen positions are pixels with the origin at the top-left corner of the
/// viewport and `y` growing downwards.
///
/// Implementations issue a fresh [`PrimitiveId`] for every submission and
/// never hand out an id that compares equal to one issued earlier for a
/// different primitive.
pub trait RenderBackend {
    /// Add a primitive and return its handle.
    ///
    /// If the primitive is named, a live primitive with the same name is
    /// removed first.
    fn submit(&mut self, primitive: Primitive) -> Result<PrimitiveId, SceneError>;

    /// Remove a primitive. Returns `false` if it was already gone.
    fn remove(&mut self, id: PrimitiveId) -> Result<bool, SceneError>;

    /// Remove the live primitive named `name`, if any.
    fn remove_named(&mut self, name: &str) -> Result<bool, SceneError>;

    /// Current color of a primitive.
    fn color(&self, id: PrimitiveId) -> Result<Color, SceneError>;

    /// Change the color of a primitive.
    fn set_color(&mut self, id: PrimitiveId, color: Color) -> Result<(), SceneError>;

    /// Run one pick strategy at a screen position.
    ///
    /// Only visible, pickable primitives may be returned.
    fn pick(&self, strategy: &PickStrategy, at: Point) -> Result<Option<PickHit>, SceneError>;

    /// Fit the camera to everything in the scene.
    fn reset_camera(&mut self) {}
}
