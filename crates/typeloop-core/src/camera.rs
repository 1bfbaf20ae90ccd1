// Orbit camera shared with the web frontend.
// No platform APIs here; the renderer turns this into matrices each frame.

use crate::constants::{ORBIT_MIN_RADIUS, ORBIT_PITCH_LIMIT};
use glam::{Mat4, Vec3};
use std::f32::consts::TAU;

/// Right-handed perspective camera orbiting `target`.
///
/// `radius` is the z-camera distance; `yaw`/`pitch` come from dragging. With
/// both angles at zero the eye sits at `(0, 0, radius)` looking toward -z.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub radius: f32,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(z: f32, fovy_radians: f32, znear: f32, zfar: f32) -> Self {
        let mut cam = Self {
            eye: Vec3::ZERO,
            target: Vec3::ZERO,
            up: Vec3::Y,
            yaw: 0.0,
            pitch: 0.0,
            radius: ORBIT_MIN_RADIUS,
            aspect: 1.0,
            fovy_radians,
            znear,
            zfar,
        };
        cam.set_z(z);
        cam
    }

    /// Orbit distance from the z-camera parameter; keeps the current angles.
    pub fn set_z(&mut self, z: f32) {
        self.radius = if z.is_finite() {
            z.max(ORBIT_MIN_RADIUS)
        } else {
            ORBIT_MIN_RADIUS
        };
        self.update_eye();
    }

    /// Rotate by a pointer drag of `(dx, dy)` CSS pixels on a viewport
    /// `height` pixels tall. A drag across the full height is one full turn.
    pub fn orbit_by_pixels(&mut self, dx: f32, dy: f32, height: f32) {
        if !(height.is_finite() && height > 0.0 && dx.is_finite() && dy.is_finite()) {
            return;
        }
        self.yaw -= TAU * dx / height;
        self.pitch = (self.pitch + TAU * dy / height).clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
        self.update_eye();
    }

    fn update_eye(&mut self) {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.eye = self.target + Vec3::new(cp * sy, sp, cp * cy) * self.radius;
    }

    /// Viewport resize; zero-sized viewports keep the previous aspect.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_depth_falls_back_to_the_minimum_radius() {
        let mut cam = Camera::new(3.0, 1.0, 0.1, 100.0);
        cam.set_z(f32::NAN);
        assert_eq!(cam.radius, ORBIT_MIN_RADIUS);
        assert!(cam.eye.is_finite());
    }
}
