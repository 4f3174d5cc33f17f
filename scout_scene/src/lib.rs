// Copyright 2025 the Scout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scout Scene: the rendering port of Scout and a headless reference renderer.
//!
//! ## Overview
//!
//! Scout never talks to a graphics API directly. Everything it needs from a
//! renderer is captured by the [`RenderBackend`] trait:
//!
//! - submit a [`Primitive`] and receive an opaque, generational [`PrimitiveId`];
//! - read and change a primitive's [`Color`];
//! - remove primitives, by handle or by name;
//! - run a [`PickStrategy`] at a screen position and receive a [`PickHit`].
//!
//! [`Scene`] implements the port without a window. It samples primitive
//! geometry, projects it through a [`Camera`] and answers picks in screen
//! space, which makes it suitable for tests, demos and benchmarks.
//!
//! Screen positions are [`kurbo::Point`]s in pixels, origin at the top-left,
//! `y` growing downwards. World space uses [`glam::DVec3`].
//!
//! ## Example
//!
//! ```
//! use glam::DVec3;
//! use scout_scene::{Geometry, PickStrategy, Primitive, RenderBackend, Scene};
//!
//! let mut scene = Scene::default();
//! let id = scene
//!     .submit(Primitive::new(Geometry::Points(vec![DVec3::ZERO, DVec3::X])))
//!     .unwrap();
//! scene.reset_camera();
//!
//! // Click right on the second point.
//! let (at, _) = scene.camera().project(DVec3::X).unwrap();
//! let hit = scene
//!     .pick(&PickStrategy::Point { tolerance: 0.025 }, at)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(hit.primitive, id);
//! assert_eq!(hit.point, Some(1));
//! ```

mod camera;
mod config;
mod display;
mod port;
mod scene;
mod types;

pub use camera::{Camera, Projection};
pub use config::SceneConfig;
pub use port::{RenderBackend, SceneError};
pub use scene::Scene;
pub use types::{
    Color, Geometry, PickHit, PickStrategy, Primitive, PrimitiveFlags, PrimitiveId, Style,
};
