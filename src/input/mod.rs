//! Input handling: event types, held-key movement state, and the input
//! processor that converts raw window events into engine commands.

/// Platform-agnostic input events.
pub mod event;
/// Discrete key-bindable actions.
pub mod keyboard;
/// Converts raw events into engine commands.
pub mod processor;
/// Held movement keys and the pointer-lock flag.
pub mod state;

pub use event::{InputEvent, MouseButton};
pub use keyboard::KeyAction;
pub use processor::InputProcessor;
pub use state::InputState;
