// Copyright 2025 the Scout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scout Plotter: draw spline models and track what the user picks.
//!
//! ## Overview
//!
//! The [`Plotter`] sits between a spline model and a [`RenderBackend`]:
//!
//! - [`Plotter::tessellate_and_register`] turns each curve or surface into
//!   Bézier cells, submits them as one primitive and records the
//!   primitive-to-node mapping in an [`ActorRegistry`](registry::ActorRegistry).
//! - [`Plotter::handle_pointer_down`] runs the ordered pick strategies of a
//!   [`PickResolver`](resolver::PickResolver), feeds the result to the
//!   [`Selection`](selection::Selection) state machine and applies the
//!   returned highlight and decoration changes.
//! - [`Plotter::handle_pointer_event`] adds click-versus-drag detection on
//!   top, for shells that share the primary button with camera navigation.
//!
//! Selection rules in short: a plain click selects one node and shows a
//! face's control points; a click with the append modifier adds faces
//! without decorating them; clicking empty space without the modifier clears
//! everything and restores the original colors.
//!
//! Everything is single-threaded and synchronous. A primitive is registered
//! before [`Plotter::tessellate_and_register`] returns, so the very next
//! pointer event can pick it.
//!
//! ## Example
//!
//! ```
//! use glam::DVec3;
//! use scout_plotter::{Plotter, SelectionState, SplineModel};
//! use scout_scene::Scene;
//! use scout_spline::SplineObject;
//!
//! let mut model = SplineModel::new();
//! let face = model.add(
//!     SplineObject::new(
//!         vec![2, 2],
//!         vec![vec![0.0, 0.0, 1.0, 1.0], vec![0.0, 0.0, 1.0, 1.0]],
//!         2,
//!         false,
//!         vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0],
//!     )
//!     .unwrap(),
//! );
//!
//! let mut plotter = Plotter::new(Scene::default());
//! plotter.sync_model(&mut model).unwrap();
//!
//! // Click the middle of the patch.
//! let (at, _) = plotter
//!     .backend()
//!     .camera()
//!     .project(DVec3::new(0.5, 0.5, 0.0))
//!     .unwrap();
//! plotter.handle_pointer_down(at, false).unwrap();
//! assert_eq!(plotter.current_selection(), vec![face]);
//! assert_eq!(plotter.selection().state(), SelectionState::Single);
//! ```

mod config;
mod error;
mod input;
pub mod model;
mod plotter;
pub mod registry;
pub mod resolver;
pub mod selection;

#[cfg(test)]
mod testing;

pub use config::PlotterConfig;
pub use error::{PlotError, RegistryError};
pub use input::{ClickGesture, PickRequest, PointerEvent};
pub use model::{ModelEvent, NodeKey, SplineModel};
pub use plotter::{PickOutcome, Plotter, decoration_name};
pub use resolver::{PickResolver, ResolvedPick};
pub use selection::{Selected, Selection, SelectionChange, SelectionState};

#[doc(no_inline)]
pub use scout_scene::RenderBackend;
