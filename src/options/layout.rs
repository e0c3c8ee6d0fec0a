use serde::{Deserialize, Serialize};

/// Viewport layout parameters for the split view and robot inset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutOptions {
    /// Robot inset size as a fraction of the simulation viewport width.
    pub inset_fraction: f32,
    /// Gap between the inset and the viewport edges, in pixels.
    pub inset_margin: u32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            inset_fraction: 0.3,
            inset_margin: 16,
        }
    }
}
