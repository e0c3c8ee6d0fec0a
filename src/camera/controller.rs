//! Orbital camera controller for the simulation and twin views.
//!
//! Drag deltas accumulate between frames and are applied to the orbital
//! pose in [`OrbitController::update`], which must run exactly once per
//! frame per controller — visible or not — so drag state stays
//! consistent.

use glam::{Quat, Vec2, Vec3};

use crate::camera::core::Camera;
use crate::options::CameraOptions;

/// Orbital camera controller managing rotation, pan, and zoom around a
/// focus point.
#[derive(Debug)]
pub struct OrbitController {
    orientation: Quat,
    distance: f32,
    focus_point: Vec3,

    /// The camera positioned by this controller.
    pub camera: Camera,

    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,

    pending_rotate: Vec2,
    pending_pan: Vec2,
    pending_zoom: f32,
}

impl OrbitController {
    /// Create a controller at the default viewing distance, looking at
    /// the origin.
    #[must_use]
    pub fn new(aspect: f32, options: &CameraOptions) -> Self {
        let focus_point = Vec3::ZERO;
        let distance = 30.0;

        let camera = Camera {
            eye: focus_point + Vec3::new(0.0, 0.0, distance),
            target: focus_point,
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        };

        Self {
            orientation: Quat::IDENTITY,
            distance,
            focus_point,
            camera,
            rotate_speed: options.rotate_speed,
            pan_speed: options.pan_speed,
            zoom_speed: options.zoom_speed,
            pending_rotate: Vec2::ZERO,
            pending_pan: Vec2::ZERO,
            pending_zoom: 0.0,
        }
    }

    /// Accumulate a rotation drag delta (pixels) for the next update.
    pub fn rotate(&mut self, delta: Vec2) {
        self.pending_rotate += delta;
    }

    /// Accumulate a pan drag delta (pixels) for the next update.
    pub fn pan(&mut self, delta: Vec2) {
        self.pending_pan += delta;
    }

    /// Accumulate a zoom delta (positive = zoom in) for the next update.
    pub fn zoom(&mut self, delta: f32) {
        self.pending_zoom += delta;
    }

    /// Apply accumulated drag deltas to the orbital pose.
    ///
    /// Call once per frame, regardless of whether this camera's view is
    /// currently visible.
    pub fn update(&mut self) {
        let rotate = std::mem::replace(&mut self.pending_rotate, Vec2::ZERO);
        let pan = std::mem::replace(&mut self.pending_pan, Vec2::ZERO);
        let zoom = std::mem::replace(&mut self.pending_zoom, 0.0);

        if rotate != Vec2::ZERO {
            // Horizontal rotation around the camera's up vector.
            let up = self.orientation * Vec3::Y;
            let horizontal = Quat::from_axis_angle(
                up,
                -rotate.x * 0.01 * self.rotate_speed,
            );
            self.orientation = horizontal * self.orientation;

            // Vertical rotation around the (post-horizontal) right vector.
            let right = self.orientation * Vec3::X;
            let vertical = Quat::from_axis_angle(
                right,
                -rotate.y * 0.01 * self.rotate_speed,
            );
            self.orientation = vertical * self.orientation;
        }

        if pan != Vec2::ZERO {
            let right = self.orientation * Vec3::X;
            let up = self.orientation * Vec3::Y;
            self.focus_point += right * (-pan.x * 0.1 * self.pan_speed)
                + up * (pan.y * 0.1 * self.pan_speed);
        }

        if zoom != 0.0 {
            self.distance *= 1.0 - zoom * self.zoom_speed;
            self.distance = self.distance.clamp(0.5, 500.0);
        }

        self.update_camera_pos();
    }

    /// Update the viewport aspect ratio.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.camera.aspect = aspect;
    }

    /// Adjust the orbit to fit the given positions, centering on their
    /// centroid and setting distance so all points are visible.
    pub fn fit_to_positions(&mut self, positions: &[Vec3]) {
        if positions.is_empty() {
            return;
        }

        let centroid: Vec3 =
            positions.iter().copied().sum::<Vec3>() / positions.len() as f32;
        let radius = positions
            .iter()
            .map(|p| (*p - centroid).length())
            .fold(0.0f32, f32::max);

        self.focus_point = centroid;

        let fovy_rad = self.camera.fovy.to_radians();
        let fit_distance = radius.max(1e-3) / (fovy_rad / 2.0).tan();
        self.distance = fit_distance * 1.5;

        self.update_camera_pos();
    }

    fn update_camera_pos(&mut self) {
        let dir = self.orientation * Vec3::Z;
        self.camera.eye = self.focus_point + (dir * self.distance);
        self.camera.target = self.focus_point;
        self.camera.up = self.orientation * Vec3::Y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> OrbitController {
        OrbitController::new(1.6, &CameraOptions::default())
    }

    #[test]
    fn deltas_apply_only_on_update() {
        let mut c = controller();
        let eye_before = c.camera.eye;

        c.rotate(Vec2::new(40.0, 0.0));
        assert_eq!(c.camera.eye, eye_before);

        c.update();
        assert!((c.camera.eye - eye_before).length() > 1e-3);
    }

    #[test]
    fn update_without_input_is_stable() {
        let mut c = controller();
        c.update();
        let eye = c.camera.eye;
        c.update();
        assert!((c.camera.eye - eye).length() < 1e-6);
    }

    #[test]
    fn zoom_keeps_distance_clamped() {
        let mut c = controller();
        for _ in 0..200 {
            c.zoom(10.0);
            c.update();
        }
        let dist = (c.camera.eye - c.camera.target).length();
        assert!(dist >= 0.5 - 1e-4);
    }

    #[test]
    fn fit_centers_on_centroid() {
        let mut c = controller();
        let positions = [
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(14.0, 0.0, 0.0),
            Vec3::new(12.0, 2.0, 0.0),
        ];
        c.fit_to_positions(&positions);
        let expected = Vec3::new(12.0, 2.0 / 3.0, 0.0);
        assert!((c.camera.target - expected).length() < 1e-4);
    }
}
