//! Held movement keys and the pointer-lock flag.

use glam::Vec3;

/// Currently-held movement keys plus pointer-lock engagement.
///
/// Each flag is set by the matching key-down and cleared only by the
/// corresponding key-up; repeated key-down events while held are
/// harmless. The state is read once per animation frame by the
/// first-person rig.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct InputState {
    /// `KeyW` held.
    pub forward: bool,
    /// `KeyS` held.
    pub backward: bool,
    /// `KeyA` held.
    pub left: bool,
    /// `KeyD` held.
    pub right: bool,
    /// `Space` held.
    pub up: bool,
    /// `ShiftLeft` held.
    pub down: bool,
    /// Whether pointer lock is currently engaged.
    pub locked: bool,
}

impl InputState {
    /// Set or clear the movement flag for a physical key code.
    ///
    /// Key strings use the `winit::keyboard::KeyCode` debug format
    /// (`"KeyW"`, `"Space"`, ...). Unrecognized codes are no-ops.
    pub fn apply_key(&mut self, code: &str, pressed: bool) {
        match code {
            "KeyW" => self.forward = pressed,
            "KeyS" => self.backward = pressed,
            "KeyA" => self.left = pressed,
            "KeyD" => self.right = pressed,
            "Space" => self.up = pressed,
            "ShiftLeft" => self.down = pressed,
            _ => {}
        }
    }

    /// Whether `code` is one of the six movement keys.
    #[must_use]
    pub fn is_movement_key(code: &str) -> bool {
        matches!(
            code,
            "KeyW" | "KeyS" | "KeyA" | "KeyD" | "Space" | "ShiftLeft"
        )
    }

    /// The movement direction derived from the held keys.
    ///
    /// Components are (right − left, up − down, forward − back),
    /// normalized when non-zero so diagonal movement never exceeds
    /// single-axis speed. Magnitude is always ≤ 1.
    #[must_use]
    pub fn movement_vector(&self) -> Vec3 {
        let axis =
            |pos: bool, neg: bool| f32::from(i8::from(pos) - i8::from(neg));
        let v = Vec3::new(
            axis(self.right, self.left),
            axis(self.up, self.down),
            axis(self.forward, self.backward),
        );
        v.normalize_or_zero()
    }
}
