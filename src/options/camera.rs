use serde::{Deserialize, Serialize};

/// Camera projection and control parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Orbit rotation sensitivity multiplier.
    pub rotate_speed: f32,
    /// Orbit pan sensitivity multiplier.
    pub pan_speed: f32,
    /// Orbit zoom sensitivity multiplier.
    pub zoom_speed: f32,
    /// Robot-camera movement speed in world units per second.
    pub move_speed: f32,
    /// Robot-camera look sensitivity (radians per device unit).
    pub look_sensitivity: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 50.0,
            znear: 0.1,
            zfar: 1000.0,
            rotate_speed: 0.5,
            pan_speed: 0.5,
            zoom_speed: 0.1,
            move_speed: 8.0,
            look_sensitivity: 0.002,
        }
    }
}
