//! Demo binary: runs the inspection viewer against a trace-logging
//! render backend and a placeholder panel model.
//!
//! Real deployments supply a GPU-backed [`RenderBackend`] and a model
//! producer wired to their asset pipeline; this binary exists to
//! exercise the full event loop — camera rigs, viewport layout,
//! pointer-lock capture, and calibration — end to end.
//!
//! Controls: drag to orbit either main view, scroll to zoom, `KeyL` to
//! lock the pointer to the robot camera (WASD/Space/Shift to fly,
//! `Escape` to release), `KeyC` to capture a calibration sample,
//! `KeyQ` to recenter.

use twinspect::camera::{Camera, FrustumCorners};
use twinspect::compositor::{RenderBackend, Viewport};
use twinspect::scene::{SceneId, TargetModel};
use twinspect::{TwinspectError, Viewer};

/// Backend that logs each pass instead of drawing it.
struct TraceBackend {
    viewport: Viewport,
}

impl RenderBackend for TraceBackend {
    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn set_scissor(&mut self, _scissor: Viewport) {}

    fn set_scissor_test(&mut self, _enabled: bool) {}

    fn draw(
        &mut self,
        scene: SceneId,
        camera: &Camera,
        frustum_helper: Option<&FrustumCorners>,
    ) {
        log::trace!(
            "pass {:?} viewport {:?} eye {:?} helper {}",
            scene,
            self.viewport,
            camera.eye,
            frustum_helper.is_some()
        );
    }
}

fn main() {
    env_logger::init();

    let result: Result<(), TwinspectError> = Viewer::builder()
        .with_title("Twinspect")
        .with_backend(|_window| {
            Ok(TraceBackend {
                viewport: Viewport {
                    x: 0,
                    y: 0,
                    width: 0,
                    height: 0,
                },
            })
        })
        // Placeholder fuselage panel; swap in a real model producer.
        .with_model_source(|| Ok(TargetModel::panel(8.0, 4.0)))
        .build()
        .run();

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}
