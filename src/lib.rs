// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Dual-view digital twin inspection engine with robot-camera calibration.
//!
//! Twinspect keeps a simulated scene and its digital twin in lockstep,
//! overlays a first-person "robot camera" inset for close inspection, and
//! calibrates that camera against the simulated model by casting rays
//! through its view-frustum corners and recording the UV coordinates
//! where they strike the model's surface.
//!
//! # Key entry points
//!
//! - [`engine::InspectionEngine`] - per-frame update/render orchestration
//! - [`calibration`] - frustum-edge ray capture producing UV coordinates
//! - [`compositor::RenderBackend`] - the seam to an actual renderer
//! - [`options::Options`] - runtime configuration (camera, layout,
//!   keybindings)
//!
//! # Architecture
//!
//! The crate draws nothing itself. Each frame the engine updates its
//! three camera rigs (two orbital, one first-person), partitions the
//! render surface into viewports, and issues one pass per (scene,
//! camera, viewport) triple through the [`compositor::RenderBackend`]
//! trait. Model geometry arrives asynchronously from a background
//! loader thread and is installed on the main thread when ready; a
//! calibration capture requested before that point fails fast with
//! [`calibration::CalibrationError::TargetNotReady`].

pub mod calibration;
pub mod camera;
pub mod compositor;
pub mod engine;
mod error;
pub mod input;
pub mod options;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::{EngineCommand, InspectionEngine};
pub use error::TwinspectError;
pub use input::{InputEvent, MouseButton};
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
