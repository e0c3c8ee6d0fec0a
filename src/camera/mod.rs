//! Camera system for the dual-view inspection scenes.
//!
//! Provides the shared perspective camera, an orbital controller for the
//! simulation and twin views, a pointer-locked first-person controller
//! for the robot camera, and analytic view-frustum corner extraction.

/// Orbital camera controller managing rotation, pan, and zoom.
pub mod controller;
/// Core perspective camera struct and matrix helpers.
pub mod core;
/// Pointer-locked first-person controller for the robot camera.
pub mod first_person;
/// Analytic view-frustum corner extraction and edge rays.
pub mod frustum;
/// The per-frame update contract shared by both controller kinds.
pub mod rig;

pub use controller::OrbitController;
pub use core::Camera;
pub use first_person::FirstPersonController;
pub use frustum::FrustumCorners;
pub use rig::CameraRig;
