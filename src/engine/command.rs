//! The engine's complete interactive vocabulary.
//!
//! Every user-facing operation — whether triggered by a key press, mouse
//! gesture, or programmatic call — is represented as an
//! `EngineCommand`.  Consumers construct commands and pass them to
//! [`InspectionEngine::execute`](super::InspectionEngine::execute).

use glam::Vec2;

/// A discrete or parameterized operation the engine can perform.
///
/// This is the single, centralized description of what the engine can do
/// interactively.  The engine never cares *how* a command was triggered —
/// keyboard, mouse, or API all look identical:
///
/// ```ignore
/// engine.execute(EngineCommand::Capture);
/// engine.execute(EngineCommand::Zoom { delta: 1.0 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineCommand {
    // ── Orbit views ─────────────────────────────────────────────────
    /// Rotate the orbit camera under the cursor by `delta` pixels of
    /// mouse movement.
    RotateView {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Pan the orbit camera under the cursor by `delta` pixels of mouse
    /// movement.
    PanView {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Zoom the orbit camera under the cursor (positive = zoom in).
    Zoom {
        /// Scroll amount.
        delta: f32,
    },

    /// Re-frame both orbit cameras on the target model.
    RecenterCamera,

    // ── Robot camera ────────────────────────────────────────────────
    /// Apply a raw pointer-motion delta as robot-camera yaw/pitch.
    Look {
        /// Relative pointer motion in device units.
        delta: Vec2,
    },

    /// Engage pointer lock (no-op when already engaged).
    EngageLock,

    /// Release pointer lock.
    ReleaseLock,

    // ── Calibration ─────────────────────────────────────────────────
    /// Cast the four frustum-edge rays and record surface UVs.
    Capture,
}
