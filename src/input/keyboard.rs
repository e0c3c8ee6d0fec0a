use serde::{Deserialize, Serialize};

/// Engine-level discrete actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// capture = "KeyC"
/// engage_lock = "KeyL"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Engage pointer lock for the robot camera (no-op if already locked).
    EngageLock,
    /// Release pointer lock.
    ReleaseLock,
    /// Capture a frustum-corner calibration sample.
    Capture,
    /// Re-frame the orbit cameras on the target model.
    RecenterCamera,
}
