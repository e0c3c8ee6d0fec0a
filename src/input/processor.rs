//! Converts raw platform events into engine commands.
//!
//! The `InputProcessor` owns all transient input state (held movement
//! keys, pointer-lock flag, cursor tracking, mouse button and modifier
//! state) and the key-binding map.  It is the only thing that sits
//! between raw window events and the engine's
//! [`execute`](crate::InspectionEngine::execute) method.

use glam::Vec2;

use super::event::{InputEvent, MouseButton};
use super::keyboard::KeyAction;
use super::state::InputState;
use crate::engine::command::EngineCommand;
use crate::options::KeybindingOptions;

impl KeyAction {
    /// Convert to the corresponding parameterless [`EngineCommand`].
    fn to_command(self) -> EngineCommand {
        match self {
            Self::EngageLock => EngineCommand::EngageLock,
            Self::ReleaseLock => EngineCommand::ReleaseLock,
            Self::Capture => EngineCommand::Capture,
            Self::RecenterCamera => EngineCommand::RecenterCamera,
        }
    }
}

/// Converts raw window events into [`EngineCommand`]s.
///
/// # Usage
///
/// ```ignore
/// // In the event loop:
/// if let Some(cmd) = processor.handle_event(event) {
///     engine.execute(cmd);
/// }
/// if let Some(cmd) = processor.handle_key("KeyC", true) {
///     engine.execute(cmd);
/// }
/// ```
#[derive(Debug)]
pub struct InputProcessor {
    /// Held movement keys plus pointer-lock flag.
    state: InputState,
    /// Current cursor position in physical pixels.
    cursor_pos: Vec2,
    /// Previous cursor position, for drag deltas.
    last_cursor: Option<Vec2>,
    /// Whether the primary mouse button is currently held.
    mouse_pressed: bool,
    /// Whether the shift modifier is currently held.
    shift_pressed: bool,
    /// Key string → action mapping.
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: InputState::default(),
            cursor_pos: Vec2::ZERO,
            last_cursor: None,
            mouse_pressed: false,
            shift_pressed: false,
            key_bindings: KeybindingOptions::default(),
        }
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeybindingOptions) -> Self {
        Self {
            key_bindings,
            ..Self::new()
        }
    }

    /// The held-key movement state, read once per frame by the engine.
    #[must_use]
    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Whether pointer lock is currently engaged.
    #[must_use]
    pub fn locked(&self) -> bool {
        self.state.locked
    }

    /// Engage or release pointer lock. Idempotent.
    pub fn set_locked(&mut self, locked: bool) {
        self.state.locked = locked;
    }

    /// Current cursor position in physical pixels.
    #[must_use]
    pub fn cursor_pos(&self) -> Vec2 {
        self.cursor_pos
    }

    /// Process a key press or release.
    ///
    /// Movement keys mutate the held-key state and never produce a
    /// command; any other key produces its bound command on press.
    /// Unbound keys are silent no-ops.
    pub fn handle_key(
        &mut self,
        code: &str,
        pressed: bool,
    ) -> Option<EngineCommand> {
        if InputState::is_movement_key(code) {
            self.state.apply_key(code, pressed);
            return None;
        }
        if !pressed {
            return None;
        }
        self.key_bindings.lookup(code).map(KeyAction::to_command)
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<EngineCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => self.handle_cursor_moved(x, y),
            InputEvent::MouseMotion { dx, dy } => {
                // Raw motion drives robot-camera look only while locked.
                self.state.locked.then_some(EngineCommand::Look {
                    delta: Vec2::new(dx, dy),
                })
            }
            InputEvent::MouseButton { button, pressed } => {
                if button == MouseButton::Left {
                    self.mouse_pressed = pressed;
                }
                None
            }
            InputEvent::Scroll { delta } => {
                // Scroll zooms the orbit view under the cursor; the
                // locked robot camera has no zoom.
                (!self.state.locked).then_some(EngineCommand::Zoom { delta })
            }
            InputEvent::ModifiersChanged { shift } => {
                self.shift_pressed = shift;
                None
            }
        }
    }

    /// Cursor moved — compute delta, possibly produce an orbit-drag
    /// command.
    fn handle_cursor_moved(&mut self, x: f32, y: f32) -> Option<EngineCommand> {
        let current = Vec2::new(x, y);
        let delta = self.last_cursor.map_or(Vec2::ZERO, |last| current - last);
        self.last_cursor = Some(current);
        self.cursor_pos = current;

        if self.state.locked || !self.mouse_pressed || delta == Vec2::ZERO {
            return None;
        }
        if self.shift_pressed {
            return Some(EngineCommand::PanView { delta });
        }
        Some(EngineCommand::RotateView { delta })
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}
