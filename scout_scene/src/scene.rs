// Copyright 2025 the Scout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless scene: generational primitive storage and screen-space picking.

use std::collections::HashMap;

use glam::DVec3;
use kurbo::{Line, ParamCurveNearest, Point};

use crate::camera::{Camera, Projector};
use crate::config::SceneConfig;
use crate::display::Display;
use crate::port::{RenderBackend, SceneError};
use crate::types::{Color, PickHit, PickStrategy, Primitive, PrimitiveFlags, PrimitiveId};

/// Curves are pickable within at least this many pixels.
const MIN_LINE_PICK_RADIUS: f64 = 2.0;

#[derive(Clone, Debug)]
struct Entry {
    generation: u32,
    primitive: Primitive,
    display: Display,
    /// Submission order, for "most recent wins" tie breaks.
    serial: u64,
}

/// A renderer without a window.
///
/// `Scene` keeps submitted primitives, samples their display geometry and
/// answers picks by projecting that geometry through its [`Camera`]. It is the
/// reference [`RenderBackend`] used by tests, demos and benches; a GPU renderer
/// implements the same trait.
///
/// ## Picking
///
/// - [`PickStrategy::Point`] finds the nearest projected point of a visible,
///   pickable primitive within `tolerance` times the viewport diagonal. Equal
///   distances prefer the nearer depth.
/// - [`PickStrategy::Primitive`] finds the nearest-depth visible, pickable
///   primitive whose projected surface covers the position, whose projected
///   curve passes within half its line width, or whose projected points lie
///   within half their size. Equal depths prefer the primitive submitted last.
pub struct Scene {
    slots: Vec<Option<Entry>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
    names: HashMap<String, PrimitiveId>,
    camera: Camera,
    config: SceneConfig,
    serial: u64,
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scene")
            .field("slots_total", &self.slots.len())
            .field("slots_alive", &self.len())
            .field("free_list", &self.free_list.len())
            .field("camera", &self.camera)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

impl Scene {
    /// Create an empty scene.
    pub fn new(config: SceneConfig) -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            names: HashMap::new(),
            camera: Camera::new(config.viewport),
            config,
            serial: 0,
        }
    }

    /// Scene settings.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// The camera used for projection and picking.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable access to the camera.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Number of live primitives.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// True if no primitive is live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `id` refers to a live primitive.
    pub fn is_alive(&self, id: PrimitiveId) -> bool {
        self.entry(id).is_some()
    }

    /// The primitive behind a live handle.
    pub fn get(&self, id: PrimitiveId) -> Option<&Primitive> {
        self.entry(id).map(|e| &e.primitive)
    }

    /// Handle of the live primitive named `name`.
    pub fn primitive_by_name(&self, name: &str) -> Option<PrimitiveId> {
        self.names.get(name).copied()
    }

    /// Replace the flags of a primitive.
    pub fn set_flags(&mut self, id: PrimitiveId, flags: PrimitiveFlags) -> Result<(), SceneError> {
        let entry = self.entry_mut(id).ok_or(SceneError::StalePrimitive(id))?;
        entry.primitive.flags = flags;
        Ok(())
    }

    /// World-space bounds of all visible primitives.
    pub fn bounds(&self) -> Option<(DVec3, DVec3)> {
        self.slots
            .iter()
            .flatten()
            .filter(|e| e.primitive.flags.contains(PrimitiveFlags::VISIBLE))
            .filter_map(|e| e.primitive.geometry.bounds())
            .reduce(|(alo, ahi), (blo, bhi)| (alo.min(blo), ahi.max(bhi)))
    }

    /// Iterate live primitives in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (PrimitiveId, &Primitive)> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            let entry = slot.as_ref()?;
            Some((id_for(idx, entry.generation), &entry.primitive))
        })
    }

    fn entry(&self, id: PrimitiveId) -> Option<&Entry> {
        self.slots
            .get(id.idx())?
            .as_ref()
            .filter(|e| e.generation == id.generation())
    }

    fn entry_mut(&mut self, id: PrimitiveId) -> Option<&mut Entry> {
        self.slots
            .get_mut(id.idx())?
            .as_mut()
            .filter(|e| e.generation == id.generation())
    }

    fn pickable(&self) -> impl Iterator<Item = (PrimitiveId, &Entry)> + '_ {
        let wanted = PrimitiveFlags::VISIBLE | PrimitiveFlags::PICKABLE;
        self.slots.iter().enumerate().filter_map(move |(idx, slot)| {
            let entry = slot.as_ref()?;
            entry
                .primitive
                .flags
                .contains(wanted)
                .then(|| (id_for(idx, entry.generation), entry))
        })
    }

    fn pick_point(&self, tolerance: f64, at: Point) -> Option<PickHit> {
        let projector = Projector::new(&self.camera);
        let radius = tolerance * self.camera.viewport_diagonal();
        let mut best: Option<(f64, f64, u64, PickHit)> = None;
        for (id, entry) in self.pickable() {
            let geometry = &entry.primitive.geometry;
            for index in 0..geometry.len() {
                let Some(world) = geometry.point(index) else {
                    continue;
                };
                let Some((screen, depth)) = projector.project(world) else {
                    continue;
                };
                let distance = screen.distance(at);
                if distance > radius {
                    continue;
                }
                let better = best.as_ref().is_none_or(|&(d, z, s, _)| {
                    (distance, depth) < (d, z) || (distance == d && depth == z && entry.serial > s)
                });
                if better {
                    let hit = PickHit {
                        primitive: id,
                        point: Some(index),
                        depth,
                    };
                    best = Some((distance, depth, entry.serial, hit));
                }
            }
        }
        best.map(|(.., hit)| hit)
    }

    fn pick_primitive(&self, at: Point) -> Option<PickHit> {
        let projector = Projector::new(&self.camera);
        let mut best: Option<(f64, u64, PrimitiveId)> = None;
        for (id, entry) in self.pickable() {
            let Some(depth) = footprint_depth(&projector, entry, at) else {
                continue;
            };
            let better = best
                .as_ref()
                .is_none_or(|&(z, s, _)| depth < z || (depth == z && entry.serial > s));
            if better {
                best = Some((depth, entry.serial, id));
            }
        }
        best.map(|(depth, _, primitive)| PickHit {
            primitive,
            point: None,
            depth,
        })
    }
}

/// Nearest depth at which the projected display geometry of `entry` covers `at`.
fn footprint_depth(projector: &Projector, entry: &Entry, at: Point) -> Option<f64> {
    let display = &entry.display;
    let style = &entry.primitive.style;
    let projected: Vec<Option<(Point, f64)>> = display
        .vertices
        .iter()
        .map(|&v| projector.project(v))
        .collect();
    let mut nearest: Option<f64> = None;
    let mut consider = |depth: f64| {
        nearest = Some(nearest.map_or(depth, |n: f64| n.min(depth)));
    };

    for tri in &display.triangles {
        let (Some(a), Some(b), Some(c)) = (projected[tri[0]], projected[tri[1]], projected[tri[2]])
        else {
            continue;
        };
        if let Some(depth) = triangle_depth(a, b, c, at) {
            consider(depth);
        }
    }

    let line_radius = (style.line_width * 0.5).max(MIN_LINE_PICK_RADIUS);
    for seg in &display.segments {
        let (Some((p0, z0)), Some((p1, z1))) = (projected[seg[0]], projected[seg[1]]) else {
            continue;
        };
        let nearest_on = Line::new(p0, p1).nearest(at, 1e-9);
        if nearest_on.distance_sq <= line_radius * line_radius {
            consider(z0 + (z1 - z0) * nearest_on.t);
        }
    }

    let point_radius = style.point_size * 0.5;
    for &index in &display.points {
        let Some((p, z)) = projected[index] else {
            continue;
        };
        if p.distance(at) <= point_radius {
            consider(z);
        }
    }
    nearest
}

/// Interpolated depth if `at` lies inside the projected triangle `a b c`.
fn triangle_depth(
    (a, za): (Point, f64),
    (b, zb): (Point, f64),
    (c, zc): (Point, f64),
    at: Point,
) -> Option<f64> {
    let area = (b - a).cross(c - a);
    if area.abs() <= f64::EPSILON {
        return None;
    }
    let wa = (b - at).cross(c - at) / area;
    let wb = (c - at).cross(a - at) / area;
    let wc = 1.0 - wa - wb;
    let inside = -1e-9;
    (wa >= inside && wb >= inside && wc >= inside).then(|| wa * za + wb * zb + wc * zc)
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "PrimitiveId slots are 32-bit."
)]
fn id_for(idx: usize, generation: u32) -> PrimitiveId {
    PrimitiveId::new(idx as u32, generation)
}

impl RenderBackend for Scene {
    fn submit(&mut self, primitive: Primitive) -> Result<PrimitiveId, SceneError> {
        if primitive.geometry.is_empty() {
            return Err(SceneError::EmptyGeometry);
        }
        if let Some(name) = &primitive.name
            && let Some(old) = self.names.get(name).copied()
        {
            log::trace!("replacing primitive {old} named {name}");
            self.remove(old)?;
        }
        let display = Display::sample(&primitive.geometry, self.config.segments_per_cell);
        self.serial += 1;
        let name = primitive.name.clone();

        let idx = if let Some(idx) = self.free_list.pop() {
            self.generations[idx] = self.generations[idx].saturating_add(1);
            idx
        } else {
            self.slots.push(None);
            self.generations.push(1);
            self.slots.len() - 1
        };
        let generation = self.generations[idx];
        self.slots[idx] = Some(Entry {
            generation,
            primitive,
            display,
            serial: self.serial,
        });
        let id = id_for(idx, generation);
        if let Some(name) = name {
            self.names.insert(name, id);
        }
        log::trace!("submitted primitive {id}");
        Ok(id)
    }

    fn remove(&mut self, id: PrimitiveId) -> Result<bool, SceneError> {
        if !self.is_alive(id) {
            return Ok(false);
        }
        if let Some(entry) = self.slots[id.idx()].take() {
            if let Some(name) = &entry.primitive.name {
                self.names.remove(name);
            }
        }
        self.free_list.push(id.idx());
        Ok(true)
    }

    fn remove_named(&mut self, name: &str) -> Result<bool, SceneError> {
        match self.names.get(name).copied() {
            Some(id) => self.remove(id),
            None => Ok(false),
        }
    }

    fn color(&self, id: PrimitiveId) -> Result<Color, SceneError> {
        self.entry(id)
            .map(|e| e.primitive.style.color)
            .ok_or(SceneError::StalePrimitive(id))
    }

    fn set_color(&mut self, id: PrimitiveId, color: Color) -> Result<(), SceneError> {
        let entry = self.entry_mut(id).ok_or(SceneError::StalePrimitive(id))?;
        entry.primitive.style.color = color;
        Ok(())
    }

    fn pick(&self, strategy: &PickStrategy, at: Point) -> Result<Option<PickHit>, SceneError> {
        let hit = match *strategy {
            PickStrategy::Point { tolerance } => self.pick_point(tolerance, at),
            PickStrategy::Primitive => self.pick_primitive(at),
        };
        log::trace!("pick {strategy:?} at {at:?}: {hit:?}");
        Ok(hit)
    }

    fn reset_camera(&mut self) {
        let bounds = self.bounds();
        self.camera.reset(bounds);
    }
}
