//! Crate-level error types.

use std::fmt;

/// Errors produced by the twinspect crate.
#[derive(Debug)]
pub enum TwinspectError {
    /// Failed to load or validate a target model.
    ModelLoad(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn the background loader thread.
    ThreadSpawn(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for TwinspectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModelLoad(msg) => {
                write!(f, "model load error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for TwinspectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TwinspectError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
