//! The camera rig: one per-frame update contract over both controller
//! kinds.
//!
//! The engine drives every rig identically each frame; orbit rigs apply
//! their accumulated drag and ignore the movement state, the
//! first-person rig integrates key-driven motion while pointer lock is
//! engaged.

use glam::Vec2;

use crate::camera::controller::OrbitController;
use crate::camera::core::Camera;
use crate::camera::first_person::FirstPersonController;
use crate::input::InputState;

/// A camera plus the control scheme that repositions it.
#[derive(Debug)]
pub enum CameraRig {
    /// Drag-orbit around a focus point (simulation and twin views).
    Orbit(OrbitController),
    /// Pointer-locked first-person walk (the robot camera).
    FirstPerson(FirstPersonController),
}

impl CameraRig {
    /// Advance the rig by one frame.
    ///
    /// Must be called exactly once per rig per frame, regardless of
    /// whether the rig's view is currently visible.
    pub fn update(&mut self, input: &InputState, delta_scale: f32) {
        match self {
            Self::Orbit(c) => c.update(),
            Self::FirstPerson(c) => c.update(input, delta_scale),
        }
    }

    /// The rig's camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        match self {
            Self::Orbit(c) => &c.camera,
            Self::FirstPerson(c) => &c.camera,
        }
    }

    /// Update the camera's viewport aspect ratio.
    pub fn set_aspect(&mut self, aspect: f32) {
        match self {
            Self::Orbit(c) => c.set_aspect(aspect),
            Self::FirstPerson(c) => c.set_aspect(aspect),
        }
    }

    /// Accumulate an orbit rotation drag; no-op for first-person rigs.
    pub fn rotate(&mut self, delta: Vec2) {
        if let Self::Orbit(c) = self {
            c.rotate(delta);
        }
    }

    /// Accumulate an orbit pan drag; no-op for first-person rigs.
    pub fn pan(&mut self, delta: Vec2) {
        if let Self::Orbit(c) = self {
            c.pan(delta);
        }
    }

    /// Accumulate an orbit zoom delta; no-op for first-person rigs.
    pub fn zoom(&mut self, delta: f32) {
        if let Self::Orbit(c) = self {
            c.zoom(delta);
        }
    }

    /// The orbit controller, if this rig is orbital.
    pub fn as_orbit_mut(&mut self) -> Option<&mut OrbitController> {
        match self {
            Self::Orbit(c) => Some(c),
            Self::FirstPerson(_) => None,
        }
    }

    /// The first-person controller, if this rig is first-person.
    pub fn as_first_person_mut(
        &mut self,
    ) -> Option<&mut FirstPersonController> {
        match self {
            Self::Orbit(_) => None,
            Self::FirstPerson(c) => Some(c),
        }
    }
}
