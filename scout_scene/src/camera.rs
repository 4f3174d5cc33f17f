// Copyright 2025 the Scout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A look-at camera that maps world points to screen pixels.

use glam::{DMat4, DVec3, DVec4};
use kurbo::{Point, Size};

/// Projection used by a [`Camera`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Projection {
    /// Perspective projection.
    Perspective {
        /// Vertical field of view, in radians.
        fov_y: f64,
    },
    /// Parallel projection.
    Orthographic {
        /// Height of the visible region in world units.
        height: f64,
    },
}

/// A right-handed look-at camera.
///
/// Normalized depth runs from `0` at the near plane to `1` at the far plane.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    eye: DVec3,
    target: DVec3,
    up: DVec3,
    projection: Projection,
    near: f64,
    far: f64,
    viewport: Size,
}

impl Camera {
    /// A perspective camera on the `+z` axis looking at the origin.
    pub fn new(viewport: Size) -> Self {
        Self {
            eye: DVec3::new(0.0, 0.0, 5.0),
            target: DVec3::ZERO,
            up: DVec3::Y,
            projection: Projection::Perspective {
                fov_y: 30_f64.to_radians(),
            },
            near: 0.1,
            far: 100.0,
            viewport,
        }
    }

    /// Viewport size in pixels.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Resize the viewport.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Length of the viewport diagonal in pixels.
    pub fn viewport_diagonal(&self) -> f64 {
        self.viewport.width.hypot(self.viewport.height)
    }

    /// Eye position.
    pub fn eye(&self) -> DVec3 {
        self.eye
    }

    /// Point the camera looks at.
    pub fn target(&self) -> DVec3 {
        self.target
    }

    /// Current projection.
    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Switch the projection.
    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
    }

    /// Place the camera explicitly.
    pub fn look_at(&mut self, eye: DVec3, target: DVec3, up: DVec3) {
        self.eye = eye;
        self.target = target;
        self.up = up;
    }

    /// Look down the `-z` axis at the `xy` plane, `y` up, keeping the distance.
    pub fn view_xy(&mut self) {
        let distance = self.eye.distance(self.target).max(f64::EPSILON);
        self.eye = self.target + DVec3::Z * distance;
        self.up = DVec3::Y;
    }

    /// Fit the view to the box `bounds` while keeping the view direction.
    ///
    /// An empty scene (`None`) leaves the camera unchanged.
    pub fn reset(&mut self, bounds: Option<(DVec3, DVec3)>) {
        let Some((lo, hi)) = bounds else {
            return;
        };
        let center = (lo + hi) * 0.5;
        let radius = ((hi - lo).length() * 0.5).max(1e-9);
        let direction = (self.eye - self.target).normalize_or(DVec3::Z);

        let aspect = self.aspect();
        let distance = match &mut self.projection {
            Projection::Perspective { fov_y } => {
                let half_y = *fov_y * 0.5;
                let half_x = (half_y.tan() * aspect).atan();
                radius / half_y.min(half_x).sin()
            }
            Projection::Orthographic { height } => {
                *height = 2.0 * radius / aspect.min(1.0);
                radius * 3.0
            }
        };
        self.target = center;
        self.eye = center + direction * distance;
        self.near = (distance - radius).max(distance * 1e-3) * 0.5;
        self.far = distance + radius * 2.0;
        log::trace!("camera reset: eye {:?} target {:?}", self.eye, self.target);
    }

    fn aspect(&self) -> f64 {
        if self.viewport.height > 0.0 {
            self.viewport.width / self.viewport.height
        } else {
            1.0
        }
    }

    /// World-to-view transform.
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// View-to-clip transform with depth in `[0, 1]`.
    pub fn projection_matrix(&self) -> DMat4 {
        let aspect = self.aspect();
        match self.projection {
            Projection::Perspective { fov_y } => {
                DMat4::perspective_rh(fov_y, aspect, self.near, self.far)
            }
            Projection::Orthographic { height } => {
                let half_h = height * 0.5;
                let half_w = half_h * aspect;
                DMat4::orthographic_rh(-half_w, half_w, -half_h, half_h, self.near, self.far)
            }
        }
    }

    /// Combined world-to-clip transform.
    pub fn view_projection(&self) -> DMat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world point to screen pixels and normalized depth.
    ///
    /// Points behind the eye or outside the depth range are not projected.
    pub fn project(&self, p: DVec3) -> Option<(Point, f64)> {
        Projector::new(self).project(p)
    }
}

/// A camera with its combined transform cached, for projecting many points.
#[derive(Clone, Debug)]
pub(crate) struct Projector {
    matrix: DMat4,
    viewport: Size,
}

impl Projector {
    pub(crate) fn new(camera: &Camera) -> Self {
        Self {
            matrix: camera.view_projection(),
            viewport: camera.viewport,
        }
    }

    pub(crate) fn project(&self, p: DVec3) -> Option<(Point, f64)> {
        let clip: DVec4 = self.matrix * p.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if !(0.0..=1.0).contains(&ndc.z) {
            return None;
        }
        let x = (ndc.x + 1.0) * 0.5 * self.viewport.width;
        let y = (1.0 - ndc.y) * 0.5 * self.viewport.height;
        Some((Point::new(x, y), ndc.z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn unit_box() -> Option<(DVec3, DVec3)> {
        Some((DVec3::ZERO, DVec3::ONE))
    }

    #[test]
    fn target_projects_to_viewport_center() {
        let mut cam = Camera::new(Size::new(800.0, 600.0));
        cam.reset(unit_box());
        let (p, depth) = cam.project(DVec3::splat(0.5)).unwrap();
        assert_abs_diff_eq!(p.x, 400.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, 300.0, epsilon = 1e-9);
        assert!(depth > 0.0 && depth < 1.0, "target lies between the planes");
    }

    #[test]
    fn screen_y_grows_downwards() {
        let mut cam = Camera::new(Size::new(800.0, 600.0));
        cam.view_xy();
        cam.reset(unit_box());
        let (top, _) = cam.project(DVec3::new(0.5, 1.0, 0.5)).unwrap();
        let (bottom, _) = cam.project(DVec3::new(0.5, 0.0, 0.5)).unwrap();
        assert!(top.y < bottom.y, "world +y is up on screen");
        let (right, _) = cam.project(DVec3::new(1.0, 0.5, 0.5)).unwrap();
        assert!(right.x > 400.0, "world +x is right on screen");
    }

    #[test]
    fn reset_keeps_everything_on_screen() {
        for projection in [
            Projection::Perspective { fov_y: 0.5 },
            Projection::Orthographic { height: 1.0 },
        ] {
            let mut cam = Camera::new(Size::new(300.0, 900.0));
            cam.set_projection(projection);
            cam.look_at(DVec3::new(3.0, -4.0, 2.0), DVec3::ZERO, DVec3::Z);
            cam.reset(Some((DVec3::splat(-2.0), DVec3::splat(6.0))));
            for corner in 0..8_u8 {
                let pick = |bit: u8| if corner & bit == 0 { -2.0 } else { 6.0 };
                let p = DVec3::new(pick(1), pick(2), pick(4));
                let (s, _) = cam.project(p).unwrap();
                assert!(
                    (0.0..=300.0).contains(&s.x) && (0.0..=900.0).contains(&s.y),
                    "{p:?} projects off screen to {s:?}"
                );
            }
        }
    }

    #[test]
    fn nearer_points_have_smaller_depth() {
        let mut cam = Camera::new(Size::new(100.0, 100.0));
        cam.reset(unit_box());
        let (_, near) = cam.project(DVec3::new(0.5, 0.5, 1.0)).unwrap();
        let (_, far) = cam.project(DVec3::new(0.5, 0.5, 0.0)).unwrap();
        assert!(near < far, "the default camera looks down -z");
    }

    #[test]
    fn points_behind_the_eye_are_rejected() {
        let mut cam = Camera::new(Size::new(100.0, 100.0));
        cam.reset(unit_box());
        let behind = cam.eye() + (cam.eye() - cam.target());
        assert!(cam.project(behind).is_none());
    }
}
