//! First-person controller for the robot inspection camera.
//!
//! Translation comes from held movement keys integrated once per frame;
//! look direction comes from raw pointer deltas while pointer lock is
//! engaged. The two are independent: releasing the lock freezes
//! translation but the controller picks up look deltas again the moment
//! lock re-engages.

use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, Vec3};

use crate::camera::core::Camera;
use crate::input::InputState;
use crate::options::CameraOptions;

/// Pitch stops just short of the poles so the level movement basis
/// stays well-defined.
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.02;

/// First-person (walk-style) camera controller.
#[derive(Debug)]
pub struct FirstPersonController {
    /// The camera positioned by this controller.
    pub camera: Camera,
    yaw: f32,
    pitch: f32,
    look_sensitivity: f32,
}

impl FirstPersonController {
    /// Create a controller at the default inspection position, looking
    /// down the negative Z axis.
    #[must_use]
    pub fn new(aspect: f32, options: &CameraOptions) -> Self {
        let eye = Vec3::new(0.0, 2.0, 12.0);
        let mut controller = Self {
            camera: Camera {
                eye,
                target: eye - Vec3::Z,
                up: Vec3::Y,
                aspect,
                fovy: options.fovy,
                znear: options.znear,
                zfar: options.zfar,
            },
            yaw: 0.0,
            pitch: 0.0,
            look_sensitivity: options.look_sensitivity,
        };
        controller.refresh_target();
        controller
    }

    /// Apply a raw pointer-motion delta as yaw/pitch.
    ///
    /// The caller gates this on pointer lock; the controller itself
    /// applies whatever it is handed.
    pub fn look(&mut self, delta: Vec2) {
        self.yaw -= delta.x * self.look_sensitivity;
        self.pitch = (self.pitch - delta.y * self.look_sensitivity)
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.refresh_target();
    }

    /// Integrate key-driven translation for this frame.
    ///
    /// `delta_scale` is distance per unit of movement (speed × frame
    /// time). No motion occurs while pointer lock is disengaged.
    pub fn update(&mut self, input: &InputState, delta_scale: f32) {
        if !input.locked {
            return;
        }

        let direction = input.movement_vector();
        if direction == Vec3::ZERO {
            return;
        }

        self.move_right(direction.x * delta_scale);
        self.move_up(direction.y * delta_scale);
        self.move_forward(direction.z * delta_scale);
    }

    /// Translate along the level right axis.
    pub fn move_right(&mut self, amount: f32) {
        let (_, right) = self.level_basis();
        self.camera.eye += right * amount;
        self.refresh_target();
    }

    /// Translate along the level forward axis.
    pub fn move_forward(&mut self, amount: f32) {
        let (forward, _) = self.level_basis();
        self.camera.eye += forward * amount;
        self.refresh_target();
    }

    /// Translate along world up.
    pub fn move_up(&mut self, amount: f32) {
        self.camera.eye += Vec3::Y * amount;
        self.refresh_target();
    }

    /// Update the viewport aspect ratio.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.camera.aspect = aspect;
    }

    /// Place the camera at `eye`, keeping the current look direction.
    pub fn set_position(&mut self, eye: Vec3) {
        self.camera.eye = eye;
        self.refresh_target();
    }

    /// Current yaw in radians.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Current pitch in radians.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Look direction derived from yaw and pitch.
    fn look_dir(&self) -> Vec3 {
        Vec3::new(
            -self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
    }

    /// Ground-plane movement basis: forward and right with the vertical
    /// component removed, so walking stays level regardless of pitch.
    fn level_basis(&self) -> (Vec3, Vec3) {
        let forward = Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos());
        let right = Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin());
        (forward, right)
    }

    fn refresh_target(&mut self) {
        self.camera.target = self.camera.eye + self.look_dir();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locked_input() -> InputState {
        InputState {
            locked: true,
            ..InputState::default()
        }
    }

    fn controller() -> FirstPersonController {
        FirstPersonController::new(1.6, &CameraOptions::default())
    }

    #[test]
    fn frozen_without_lock() {
        let mut c = controller();
        let mut input = locked_input();
        input.locked = false;
        input.forward = true;

        let eye = c.camera.eye;
        for _ in 0..10 {
            c.update(&input, 0.5);
        }
        assert_eq!(c.camera.eye, eye);
    }

    #[test]
    fn forward_displacement_integrates() {
        let mut c = controller();
        let mut input = locked_input();
        input.forward = true;

        let start = c.camera.eye;
        let forward = c.camera.forward();
        let frames = 60;
        let delta_scale = 0.25;
        for _ in 0..frames {
            c.update(&input, delta_scale);
        }

        let displacement = (c.camera.eye - start).dot(forward);
        let expected = frames as f32 * delta_scale;
        assert!((displacement - expected).abs() < 1e-3);
    }

    #[test]
    fn diagonal_speed_matches_single_axis() {
        let mut straight = controller();
        let mut diagonal = controller();

        let mut fwd = locked_input();
        fwd.forward = true;
        let mut diag = locked_input();
        diag.forward = true;
        diag.right = true;

        straight.update(&fwd, 1.0);
        diagonal.update(&diag, 1.0);

        let d_straight =
            (straight.camera.eye - Vec3::new(0.0, 2.0, 12.0)).length();
        let d_diagonal =
            (diagonal.camera.eye - Vec3::new(0.0, 2.0, 12.0)).length();
        assert!((d_straight - d_diagonal).abs() < 1e-5);
    }

    #[test]
    fn pitch_clamps_at_poles() {
        let mut c = controller();
        c.look(Vec2::new(0.0, -100_000.0));
        assert!(c.pitch() <= PITCH_LIMIT + 1e-6);
        c.look(Vec2::new(0.0, 100_000.0));
        assert!(c.pitch() >= -PITCH_LIMIT - 1e-6);
    }

    #[test]
    fn vertical_motion_uses_world_up() {
        let mut c = controller();
        // Pitch down so local forward is no longer level.
        c.look(Vec2::new(0.0, 400.0));

        let mut input = locked_input();
        input.up = true;

        let start = c.camera.eye;
        c.update(&input, 1.0);
        let delta = c.camera.eye - start;
        assert!((delta - Vec3::Y).length() < 1e-5);
    }
}
