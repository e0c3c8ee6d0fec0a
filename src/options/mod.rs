//! Centralized runtime options with TOML preset support.
//!
//! All tweakable settings (camera projection and speeds, viewport
//! layout, keybindings) are consolidated here. Options serialize
//! to/from TOML for presets.

mod camera;
mod keybindings;
mod layout;

use std::path::Path;

pub use camera::CameraOptions;
pub use keybindings::KeybindingOptions;
pub use layout::LayoutOptions;
use serde::{Deserialize, Serialize};

use crate::error::TwinspectError;

/// Top-level options container. All sub-structs use `#[serde(default)]`
/// so partial TOML files (e.g. only overriding `[camera]`) work
/// correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Camera projection and control parameters.
    pub camera: CameraOptions,
    /// Viewport layout parameters.
    pub layout: LayoutOptions,
    /// Keyboard binding options.
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, TwinspectError> {
        let content =
            std::fs::read_to_string(path).map_err(TwinspectError::Io)?;
        let mut options: Self = toml::from_str(&content)
            .map_err(|e| TwinspectError::OptionsParse(e.to_string()))?;
        options.keybindings.rebuild_reverse_map();
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), TwinspectError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TwinspectError::OptionsParse(e.to_string()))?;
        std::fs::write(path, content).map_err(TwinspectError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;

    #[test]
    fn partial_toml_fills_from_defaults() {
        let parsed: Options =
            toml::from_str("[camera]\nfovy = 35.0\n").unwrap_or_default();
        assert_eq!(parsed.camera.fovy, 35.0);
        assert_eq!(parsed.camera.znear, CameraOptions::default().znear);
        assert_eq!(parsed.layout, LayoutOptions::default());
    }

    #[test]
    fn roundtrip_preserves_bindings() {
        let text =
            toml::to_string_pretty(&Options::default()).unwrap_or_default();
        let mut parsed: Options = toml::from_str(&text).unwrap_or_default();
        parsed.keybindings.rebuild_reverse_map();
        assert_eq!(
            parsed.keybindings.lookup("KeyC"),
            Some(KeyAction::Capture)
        );
    }
}
