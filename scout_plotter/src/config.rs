// Copyright 2025 the Scout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual and interaction settings of the [`Plotter`](crate::Plotter).

use scout_scene::Color;

/// Settings of a [`Plotter`](crate::Plotter).
///
/// The defaults draw faces white with thick black edges and highlight picks
/// in a warm orange.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlotterConfig {
    /// Color of surfaces.
    pub face_color: Color,
    /// Color of curves.
    pub edge_color: Color,
    /// Color swapped in for selected primitives.
    pub highlight_color: Color,
    /// Width of curves, in pixels.
    pub edge_line_width: f64,
    /// Diameter of control point decorations, in pixels.
    pub control_point_size: f64,
    /// Radius of the default point pick, as a fraction of the viewport diagonal.
    pub point_pick_tolerance: f64,
    /// Fit the camera after every new primitive.
    pub reset_camera_on_add: bool,
    /// Pointer travel, in pixels, that turns a press into a drag.
    pub drag_threshold: f64,
}

impl Default for PlotterConfig {
    fn default() -> Self {
        Self {
            face_color: Color::WHITE,
            edge_color: Color::BLACK,
            highlight_color: Color::from_rgb8(255, 196, 87),
            edge_line_width: 5.0,
            control_point_size: 10.0,
            point_pick_tolerance: 0.025,
            reset_camera_on_add: true,
            drag_threshold: 0.0,
        }
    }
}
