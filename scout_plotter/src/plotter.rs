// Copyright 2025 the Scout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The plotter façade: tessellate nodes, draw them and track what is picked.

use core::fmt::Debug;
use core::hash::Hash;

use glam::DVec3;
use kurbo::Point;
use scout_scene::{
    Geometry, Primitive, PrimitiveFlags, PrimitiveId, RenderBackend, Style,
};
use scout_spline::{SplineObject, tessellate};

use crate::config::PlotterConfig;
use crate::error::{PlotError, RegistryError};
use crate::input::{ClickGesture, PointerEvent};
use crate::model::{ModelEvent, NodeKey, SplineModel};
use crate::registry::{ActorEntry, ActorRegistry};
use crate::resolver::{PickResolver, ResolvedPick};
use crate::selection::{Selection, SelectionChange};

/// Name of the decoration showing the control points of `primitive`.
pub fn decoration_name(primitive: PrimitiveId) -> String {
    format!("controlpoints-{primitive}")
}

/// What a pointer press did.
#[derive(Clone, Debug, PartialEq)]
pub struct PickOutcome<K> {
    /// The registered hit, if any.
    pub pick: Option<ResolvedPick<K>>,
    /// Selection changes that were applied to the backend, in order.
    pub changes: Vec<SelectionChange<K>>,
}

impl<K> PickOutcome<K> {
    /// True if the press changed the selection.
    pub fn selection_changed(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Draws spline nodes on a [`RenderBackend`] and tracks the picked ones.
///
/// ## Usage
///
/// - Call [`Plotter::tessellate_and_register`] for every node added to the
///   model (or let [`Plotter::sync_model`] do it for a [`SplineModel`]).
/// - Forward primary-button input to [`Plotter::handle_pointer_event`], or
///   call [`Plotter::handle_pointer_down`] directly when the shell already
///   tells clicks from drags.
/// - Read [`Plotter::current_selection`] whenever the shell needs the picked
///   nodes.
/// - Call [`Plotter::teardown`] before dropping the backend's contents.
pub struct Plotter<K, B> {
    backend: B,
    registry: ActorRegistry<K>,
    resolver: PickResolver,
    selection: Selection<K>,
    gesture: ClickGesture,
    config: PlotterConfig,
}

impl<K, B> core::fmt::Debug for Plotter<K, B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Plotter")
            .field("resolver", &self.resolver)
            .field("gesture", &self.gesture)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<K, B> Plotter<K, B>
where
    K: Copy + Eq + Hash + Debug,
    B: RenderBackend,
{
    /// A plotter with the default configuration.
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, PlotterConfig::default())
    }

    /// A plotter with an explicit configuration.
    pub fn with_config(backend: B, config: PlotterConfig) -> Self {
        Self {
            backend,
            registry: ActorRegistry::new(),
            resolver: PickResolver::with_point_tolerance(config.point_pick_tolerance),
            selection: Selection::new(),
            gesture: ClickGesture::new(config.drag_threshold),
            config,
        }
    }

    /// The configuration.
    pub fn config(&self) -> &PlotterConfig {
        &self.config
    }

    /// The backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the backend, e.g. to move the camera.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// The primitive/node registry.
    pub fn registry(&self) -> &ActorRegistry<K> {
        &self.registry
    }

    /// The pick strategies, for reordering or extending them.
    pub fn resolver_mut(&mut self) -> &mut PickResolver {
        &mut self.resolver
    }

    /// The selection state machine.
    pub fn selection(&self) -> &Selection<K> {
        &self.selection
    }

    /// Selected nodes, in selection order.
    pub fn current_selection(&self) -> Vec<K> {
        self.selection.current_selection()
    }

    /// Tessellate `object`, draw it and remember that it shows `node`.
    ///
    /// The object is lifted to three dimensions in place. Volumes are not
    /// drawn and yield `Ok(None)`. A node that is already drawn is rejected
    /// before anything is submitted.
    pub fn tessellate_and_register(
        &mut self,
        node: K,
        object: &mut SplineObject,
    ) -> Result<Option<PrimitiveId>, PlotError> {
        if let Some(existing) = self.registry.primitive_of(&node) {
            return Err(RegistryError::DuplicateNode(existing).into());
        }
        let Some(mesh) = tessellate(object) else {
            log::debug!(
                "plotter: {node:?} has {} parametric directions, not drawn",
                object.pardim()
            );
            return Ok(None);
        };

        let pardim = object.pardim();
        let style = if pardim == 1 {
            Style {
                color: self.config.edge_color,
                line_width: self.config.edge_line_width,
                show_edges: true,
                edge_color: self.config.edge_color,
                ..Style::default()
            }
        } else {
            Style {
                color: self.config.face_color,
                ..Style::default()
            }
        };
        let cells = mesh.cells.len();
        let primitive = self
            .backend
            .submit(Primitive::new(Geometry::Bezier(mesh)).with_style(style))?;

        let entry = ActorEntry {
            node,
            pardim,
            control_points: object.cartesian_points3(),
        };
        if let Err(err) = self.registry.register(primitive, entry) {
            self.backend.remove(primitive)?;
            return Err(err.into());
        }
        if self.config.reset_camera_on_add {
            self.backend.reset_camera();
        }
        log::debug!("plotter: {node:?} drawn as {primitive} with {cells} cells");
        Ok(Some(primitive))
    }

    /// Pick at `at` and update the selection.
    ///
    /// `append` is the multi-select modifier.
    pub fn handle_pointer_down(
        &mut self,
        at: Point,
        append: bool,
    ) -> Result<PickOutcome<K>, PlotError> {
        let pick = self.resolver.resolve(at, &self.backend, &self.registry)?;
        let target = match pick {
            Some(p) => Some((p, self.backend.color(p.primitive)?)),
            None => None,
        };
        let changes = self.selection.update(target, append);
        self.apply(&changes)?;
        Ok(PickOutcome { pick, changes })
    }

    /// Feed raw primary-button input; picks on clicks and ignores drags.
    pub fn handle_pointer_event(
        &mut self,
        event: PointerEvent,
    ) -> Result<Option<PickOutcome<K>>, PlotError> {
        match self.gesture.on_event(event) {
            Some(request) => self
                .handle_pointer_down(request.at, request.append)
                .map(Some),
            None => Ok(None),
        }
    }

    /// Clear the selection, then remove every registered primitive.
    pub fn teardown(&mut self) -> Result<(), PlotError> {
        let changes = self.selection.clear();
        self.apply(&changes)?;
        let primitives = self.registry.unregister_all();
        log::debug!("plotter: removing {} primitives", primitives.len());
        for primitive in primitives {
            self.backend.remove(primitive)?;
        }
        Ok(())
    }

    fn apply(&mut self, changes: &[SelectionChange<K>]) -> Result<(), PlotError> {
        for change in changes {
            match *change {
                SelectionChange::Unhighlight { primitive, restore } => {
                    self.backend.set_color(primitive, restore)?;
                }
                SelectionChange::RemoveDecoration { primitive } => {
                    self.backend.remove_named(&decoration_name(primitive))?;
                }
                SelectionChange::Highlight { primitive } => {
                    self.backend
                        .set_color(primitive, self.config.highlight_color)?;
                }
                SelectionChange::Decorate { primitive, node } => {
                    self.decorate(primitive, node)?;
                }
            }
        }
        Ok(())
    }

    fn decorate(&mut self, primitive: PrimitiveId, node: K) -> Result<(), PlotError> {
        let Some(entry) = self.registry.lookup(primitive) else {
            log::debug!("plotter: no registry entry to decorate {node:?}");
            return Ok(());
        };
        if entry.control_points.is_empty() {
            return Ok(());
        }
        let points = entry
            .control_points
            .iter()
            .map(|&p| DVec3::from_array(p))
            .collect();
        let style = Style {
            point_size: self.config.control_point_size,
            points_as_spheres: true,
            ..Style::default()
        };
        self.backend.submit(
            Primitive::new(Geometry::Points(points))
                .with_style(style)
                .with_flags(PrimitiveFlags::VISIBLE)
                .with_name(decoration_name(primitive)),
        )?;
        Ok(())
    }
}

impl<B: RenderBackend> Plotter<NodeKey, B> {
    /// Draw every node added to `model` since the last sync, oldest first.
    ///
    /// Returns the primitives created. On failure the failing node and the
    /// ones after it stay queued in the model.
    pub fn sync_model(&mut self, model: &mut SplineModel) -> Result<Vec<PrimitiveId>, PlotError> {
        let mut drawn = Vec::new();
        let mut events = model.drain_events().into_iter();
        while let Some(event) = events.next() {
            let ModelEvent::NodeAdded(key) = event;
            let Some(object) = model.node_mut(key) else {
                continue;
            };
            match self.tessellate_and_register(key, object) {
                Ok(Some(primitive)) => drawn.push(primitive),
                Ok(None) => {}
                Err(err) => {
                    model.requeue(core::iter::once(event).chain(events));
                    return Err(err);
                }
            }
        }
        Ok(drawn)
    }
}
