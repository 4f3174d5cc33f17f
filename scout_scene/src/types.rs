// Copyright 2025 the Scout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the rendering port: handles, flags, styles and primitives.

use core::fmt;

use glam::DVec3;
use scout_spline::BezierMesh;

/// Handle of a primitive submitted to a [`RenderBackend`](crate::RenderBackend).
///
/// This is a small, copyable handle issued at submission. It consists of a slot
/// index and a generation counter.
///
/// ## Semantics
///
/// - A fresh slot starts at generation `1`.
/// - On removal the slot is freed; every `PrimitiveId` pointing at it becomes stale.
/// - On reuse the generation is incremented, producing a new, distinct id.
///
/// Stale ids therefore never alias a newer primitive. The handle says nothing
/// about the geometry behind it: two primitives with identical geometry still
/// have distinct ids.
///
/// The [`Display`](fmt::Display) form is `{slot}v{generation}`, e.g. `3v1`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct PrimitiveId(u32, u32);

impl PrimitiveId {
    /// Build an id from a slot index and a generation.
    ///
    /// Backends other than [`Scene`](crate::Scene) use this to issue their own
    /// handles.
    pub const fn new(slot: u32, generation: u32) -> Self {
        Self(slot, generation)
    }

    /// Slot index.
    pub const fn slot(self) -> u32 {
        self.0
    }

    /// Generation of the slot at issue time.
    pub const fn generation(self) -> u32 {
        self.1
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PrimitiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.0, self.1)
    }
}

bitflags::bitflags! {
    /// Primitive flags controlling visibility and picking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PrimitiveFlags: u8 {
        /// Primitive is drawn.
        const VISIBLE  = 0b0000_0001;
        /// Primitive participates in picking.
        const PICKABLE = 0b0000_0010;
    }
}

impl Default for PrimitiveFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// Linear RGB color with components in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    /// Color from components in `[0, 1]`.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Color from 8-bit components.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// How a primitive is drawn.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Style {
    /// Surface, line or point color. This is the color swapped on highlight.
    pub color: Color,
    /// Width of curves and drawn edges, in pixels.
    pub line_width: f64,
    /// Diameter of points, in pixels.
    pub point_size: f64,
    /// Draw cell edges over surfaces.
    pub show_edges: bool,
    /// Color of drawn edges.
    pub edge_color: Color,
    /// Render points as shaded spheres instead of flat squares.
    pub points_as_spheres: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            line_width: 1.0,
            point_size: 5.0,
            show_edges: false,
            edge_color: Color::BLACK,
            points_as_spheres: false,
        }
    }
}

/// Geometry carried by a [`Primitive`].
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// Higher-order Bézier cells of one curve or surface.
    Bezier(BezierMesh),
    /// A plain point cloud, used for decorations.
    Points(Vec<DVec3>),
}

impl Geometry {
    /// Number of addressable points (the targets of point picking).
    pub fn len(&self) -> usize {
        match self {
            Self::Bezier(mesh) => mesh.points.len(),
            Self::Points(points) => points.len(),
        }
    }

    /// True if there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Bezier(mesh) => mesh.points.is_empty() || mesh.cells.is_empty(),
            Self::Points(points) => points.is_empty(),
        }
    }

    /// Point `index` in world space.
    pub fn point(&self, index: usize) -> Option<DVec3> {
        match self {
            Self::Bezier(mesh) => mesh.points.get(index).map(|&p| DVec3::from_array(p)),
            Self::Points(points) => points.get(index).copied(),
        }
    }

    /// Axis-aligned bounds of the addressable points.
    pub fn bounds(&self) -> Option<(DVec3, DVec3)> {
        match self {
            Self::Bezier(mesh) => mesh
                .bounds()
                .map(|(lo, hi)| (DVec3::from_array(lo), DVec3::from_array(hi))),
            Self::Points(points) => {
                let (first, rest) = points.split_first()?;
                Some(
                    rest.iter()
                        .fold((*first, *first), |(lo, hi), &p| (lo.min(p), hi.max(p))),
                )
            }
        }
    }
}

/// A renderable item submitted to a backend.
#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    /// What to draw.
    pub geometry: Geometry,
    /// How to draw it.
    pub style: Style,
    /// Visibility and picking flags.
    pub flags: PrimitiveFlags,
    /// Optional unique name. Submitting a named primitive replaces any live
    /// primitive with the same name.
    pub name: Option<String>,
}

impl Primitive {
    /// A visible, pickable, unnamed primitive with the default style.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            style: Style::default(),
            flags: PrimitiveFlags::default(),
            name: None,
        }
    }

    /// Replace the style.
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Replace the flags.
    #[must_use]
    pub fn with_flags(mut self, flags: PrimitiveFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Give the primitive a name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// One way of turning a screen position into a picked primitive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PickStrategy {
    /// Pick the primitive owning the nearest point within a screen radius.
    Point {
        /// Search radius as a fraction of the viewport diagonal.
        tolerance: f64,
    },
    /// Pick the nearest primitive whose rendered footprint covers the position.
    Primitive,
}

/// Result of a successful pick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PickHit {
    /// The picked primitive.
    pub primitive: PrimitiveId,
    /// Index of the picked point, for [`PickStrategy::Point`].
    pub point: Option<usize>,
    /// Normalized depth of the hit, `0` at the near plane and `1` at the far plane.
    pub depth: f64,
}
