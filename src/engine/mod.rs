//! The inspection engine: per-frame orchestration of rigs, compositing,
//! and calibration.
//!
//! One `InspectionEngine` owns the three camera rigs, the input
//! processor, the viewport layout, and the (possibly still loading)
//! target model. A host drives it with `handle_input`/`handle_key` for
//! events, then `update` and `render` once per animation tick.

/// The engine's interactive vocabulary.
pub mod command;

pub use command::EngineCommand;
use glam::Vec2;

use crate::calibration::{self, CalibrationError, CalibrationResult};
use crate::camera::controller::OrbitController;
use crate::camera::first_person::FirstPersonController;
use crate::camera::frustum::FrustumCorners;
use crate::camera::rig::CameraRig;
use crate::compositor::{
    render_frame, RenderBackend, RenderPass, ViewId, ViewLayout,
};
use crate::error::TwinspectError;
use crate::input::{InputEvent, InputProcessor};
use crate::options::Options;
use crate::scene::loader::{spawn_load, PendingLoad};
use crate::scene::{SceneId, TargetModel};
use crate::util::frame_timing::FrameTiming;

/// Orchestrates cameras, input, compositing, and calibration for the
/// dual-view inspection display.
pub struct InspectionEngine {
    options: Options,
    input: InputProcessor,

    /// Orbit rig for the simulation view.
    sim_rig: CameraRig,
    /// Orbit rig for the digital twin view.
    twin_rig: CameraRig,
    /// First-person rig for the robot camera.
    robot_rig: CameraRig,

    layout: ViewLayout,
    target: Option<TargetModel>,
    pending_load: Option<PendingLoad>,
    last_calibration: Option<CalibrationResult>,

    frame_timing: FrameTiming,
    /// Seconds since the FPS figure was last logged.
    fps_log_accum: f32,
}

impl InspectionEngine {
    /// Create an engine for a `width` × `height` render surface.
    #[must_use]
    pub fn new(width: u32, height: u32, options: Options) -> Self {
        let layout = ViewLayout::compute(width, height, &options.layout);
        let camera_opts = &options.camera;

        let sim_rig = CameraRig::Orbit(OrbitController::new(
            layout.simulation.aspect(),
            camera_opts,
        ));
        let twin_rig = CameraRig::Orbit(OrbitController::new(
            layout.twin.aspect(),
            camera_opts,
        ));
        let robot_rig = CameraRig::FirstPerson(FirstPersonController::new(
            layout.robot_inset.aspect(),
            camera_opts,
        ));

        let input =
            InputProcessor::with_key_bindings(options.keybindings.clone());

        Self {
            options,
            input,
            sim_rig,
            twin_rig,
            robot_rig,
            layout,
            target: None,
            pending_load: None,
            last_calibration: None,
            frame_timing: FrameTiming::new(),
            fps_log_accum: 0.0,
        }
    }

    // ── Model loading ───────────────────────────────────────────────

    /// Start loading the target model on a background thread.
    ///
    /// Fire-and-forget: completion is picked up by [`update`](Self::update)
    /// on the main thread. A capture requested before then fails with
    /// [`CalibrationError::TargetNotReady`].
    pub fn load_model<F>(&mut self, producer: F) -> Result<(), TwinspectError>
    where
        F: FnOnce() -> Result<TargetModel, TwinspectError> + Send + 'static,
    {
        log::info!("starting background model load");
        self.pending_load = Some(spawn_load(producer)?);
        Ok(())
    }

    /// Install a target model directly, re-framing both orbit views.
    pub fn set_target(&mut self, model: TargetModel) {
        if let Some(orbit) = self.sim_rig.as_orbit_mut() {
            orbit.fit_to_positions(model.positions());
        }
        if let Some(orbit) = self.twin_rig.as_orbit_mut() {
            orbit.fit_to_positions(model.positions());
        }
        self.target = Some(model);
    }

    /// Whether the calibration target has finished loading.
    #[must_use]
    pub fn target_ready(&self) -> bool {
        self.target.is_some()
    }

    // ── Input ───────────────────────────────────────────────────────

    /// Process a platform-agnostic input event.
    pub fn handle_input(&mut self, event: InputEvent) {
        if let Some(cmd) = self.input.handle_event(event) {
            self.execute(cmd);
        }
    }

    /// Process a key press or release (`winit` key-code debug format).
    pub fn handle_key(&mut self, code: &str, pressed: bool) {
        if let Some(cmd) = self.input.handle_key(code, pressed) {
            self.execute(cmd);
        }
    }

    /// Perform a command.
    ///
    /// The engine never cares how a command was triggered — keyboard,
    /// mouse, or API all look identical.
    pub fn execute(&mut self, cmd: EngineCommand) {
        match cmd {
            EngineCommand::RotateView { delta } => {
                if let Some(rig) = self.orbit_rig_under_cursor() {
                    rig.rotate(delta);
                }
            }
            EngineCommand::PanView { delta } => {
                if let Some(rig) = self.orbit_rig_under_cursor() {
                    rig.pan(delta);
                }
            }
            EngineCommand::Zoom { delta } => {
                if let Some(rig) = self.orbit_rig_under_cursor() {
                    rig.zoom(delta);
                }
            }
            EngineCommand::RecenterCamera => self.recenter(),
            EngineCommand::Look { delta } => {
                if let Some(fp) = self.robot_rig.as_first_person_mut() {
                    fp.look(delta);
                }
            }
            EngineCommand::EngageLock => self.engage_lock(),
            EngineCommand::ReleaseLock => self.release_lock(),
            EngineCommand::Capture => {
                let _ = self.capture_calibration();
            }
        }
    }

    /// Engage pointer lock for the robot camera. No-op when already
    /// engaged.
    pub fn engage_lock(&mut self) {
        if self.input.locked() {
            return;
        }
        self.input.set_locked(true);
        log::debug!("pointer lock engaged");
    }

    /// Release pointer lock.
    pub fn release_lock(&mut self) {
        if !self.input.locked() {
            return;
        }
        self.input.set_locked(false);
        log::debug!("pointer lock released");
    }

    /// Whether pointer lock is currently engaged.
    #[must_use]
    pub fn locked(&self) -> bool {
        self.input.locked()
    }

    /// The orbit rig owning the view under the cursor, if any.
    ///
    /// Drags over the robot inset are deliberately inert — the robot
    /// camera is steered by pointer lock, not by orbit gestures.
    fn orbit_rig_under_cursor(&mut self) -> Option<&mut CameraRig> {
        let pos = self.input.cursor_pos();
        match self.layout.view_at(pos.x, pos.y)? {
            ViewId::Simulation => Some(&mut self.sim_rig),
            ViewId::Twin => Some(&mut self.twin_rig),
            ViewId::RobotInset => None,
        }
    }

    fn recenter(&mut self) {
        let Some(target) = &self.target else {
            return;
        };
        if let Some(orbit) = self.sim_rig.as_orbit_mut() {
            orbit.fit_to_positions(target.positions());
        }
        if let Some(orbit) = self.twin_rig.as_orbit_mut() {
            orbit.fit_to_positions(target.positions());
        }
    }

    // ── Frame loop ──────────────────────────────────────────────────

    /// Advance simulation state by `dt` seconds.
    ///
    /// Polls the pending model load, then updates every rig exactly
    /// once: orbit rigs apply accumulated drag, the robot rig
    /// integrates held-key movement while pointer lock is engaged.
    pub fn update(&mut self, dt: f32) {
        self.poll_pending_load();

        let delta_scale = dt * self.options.camera.move_speed;
        let input = *self.input.state();
        self.sim_rig.update(&input, delta_scale);
        self.twin_rig.update(&input, delta_scale);
        self.robot_rig.update(&input, delta_scale);
    }

    /// Render one composed frame through the backend.
    ///
    /// Issues the simulation view, the twin view, then the robot inset
    /// (last, so it layers over the simulation half). The robot-camera
    /// frustum helper is shown in the simulation view and hidden from
    /// the robot camera's own pass.
    pub fn render(&mut self, backend: &mut dyn RenderBackend) {
        let helper = FrustumCorners::from_camera(self.robot_rig.camera());

        let passes = [
            RenderPass {
                scene: SceneId::Simulation,
                camera: self.sim_rig.camera(),
                viewport: self.layout.simulation,
                scissor: self.layout.simulation,
                frustum_helper: Some(&helper),
            },
            RenderPass {
                scene: SceneId::DigitalTwin,
                camera: self.twin_rig.camera(),
                viewport: self.layout.twin,
                scissor: self.layout.twin,
                frustum_helper: None,
            },
            RenderPass {
                scene: SceneId::Simulation,
                camera: self.robot_rig.camera(),
                viewport: self.layout.robot_inset,
                scissor: self.layout.robot_inset,
                frustum_helper: None,
            },
        ];
        render_frame(backend, &passes);

        let dt = self.frame_timing.tick();
        self.fps_log_accum += dt;
        if self.fps_log_accum >= 1.0 {
            self.fps_log_accum = 0.0;
            log::debug!("render loop at {:.1} fps", self.frame_timing.fps());
        }
    }

    /// Recompute viewports and camera aspects for a new surface size.
    ///
    /// The host should render again immediately after this returns so
    /// the display never shows stale framing.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.layout = ViewLayout::compute(width, height, &self.options.layout);
        self.sim_rig.set_aspect(self.layout.simulation.aspect());
        self.twin_rig.set_aspect(self.layout.twin.aspect());
        self.robot_rig.set_aspect(self.layout.robot_inset.aspect());
    }

    fn poll_pending_load(&mut self) {
        let Some(pending) = &mut self.pending_load else {
            return;
        };
        let Some(result) = pending.poll() else {
            return;
        };
        self.pending_load = None;
        match result {
            Ok(model) => {
                log::info!(
                    "target model ready ({} triangles)",
                    model.triangle_count()
                );
                self.set_target(model);
            }
            Err(e) => log::error!("model load failed: {e}"),
        }
    }

    // ── Calibration ─────────────────────────────────────────────────

    /// Cast the four frustum-edge rays from the robot camera and record
    /// surface UVs.
    ///
    /// Fails fast with [`CalibrationError::TargetNotReady`] before the
    /// model has loaded. A [`CalibrationResult::Incomplete`] outcome is
    /// `Ok` — the operator repositions and retries.
    pub fn capture_calibration(
        &mut self,
    ) -> Result<CalibrationResult, CalibrationError> {
        let corners = FrustumCorners::from_camera(self.robot_rig.camera());
        let result = calibration::capture(&corners, self.target.as_ref());

        match &result {
            Ok(CalibrationResult::Complete(uvs)) => {
                log::info!("calibration complete: {uvs:?}");
            }
            Ok(CalibrationResult::Incomplete { hits }) => {
                log::info!(
                    "calibration incomplete: {hits}/4 frustum edges hit \
                     the target"
                );
            }
            Err(e) => log::warn!("calibration unavailable: {e}"),
        }

        if let Ok(r) = &result {
            self.last_calibration = Some(*r);
        }
        result
    }

    /// The most recent capture outcome, if any capture has been
    /// attempted against a loaded target.
    #[must_use]
    pub fn last_calibration(&self) -> Option<CalibrationResult> {
        self.last_calibration
    }

    // ── Accessors ───────────────────────────────────────────────────

    /// Current viewport layout.
    #[must_use]
    pub fn layout(&self) -> &ViewLayout {
        &self.layout
    }

    /// Engine options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Smoothed frames-per-second estimate.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }

    /// Cursor position in surface pixels, as last reported.
    #[must_use]
    pub fn cursor_pos(&self) -> Vec2 {
        self.input.cursor_pos()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::camera::core::Camera;
    use crate::compositor::Viewport;
    use crate::input::MouseButton;

    fn engine() -> InspectionEngine {
        InspectionEngine::new(1600, 900, Options::default())
    }

    /// Backend that records the call sequence for order assertions.
    #[derive(Default)]
    struct RecordingBackend {
        calls: Vec<&'static str>,
        viewports: Vec<Viewport>,
        scissors: Vec<Viewport>,
        helpers: Vec<bool>,
        scenes: Vec<SceneId>,
    }

    impl RenderBackend for RecordingBackend {
        fn set_viewport(&mut self, viewport: Viewport) {
            self.calls.push("viewport");
            self.viewports.push(viewport);
        }
        fn set_scissor(&mut self, scissor: Viewport) {
            self.calls.push("scissor");
            self.scissors.push(scissor);
        }
        fn set_scissor_test(&mut self, enabled: bool) {
            self.calls.push(if enabled {
                "scissor_test_on"
            } else {
                "scissor_test_off"
            });
        }
        fn draw(
            &mut self,
            scene: SceneId,
            _camera: &Camera,
            frustum_helper: Option<&FrustumCorners>,
        ) {
            self.calls.push("draw");
            self.scenes.push(scene);
            self.helpers.push(frustum_helper.is_some());
        }
    }

    #[test]
    fn lock_engage_is_idempotent() {
        let mut e = engine();
        e.engage_lock();
        assert!(e.locked());
        e.engage_lock();
        assert!(e.locked());
        e.release_lock();
        assert!(!e.locked());
    }

    #[test]
    fn resize_updates_every_aspect() {
        let mut e = engine();
        e.resize(1000, 500);

        let layout = *e.layout();
        assert_eq!(layout.simulation.width, 500);
        assert!(
            (e.sim_rig.camera().aspect - layout.simulation.aspect()).abs()
                < 1e-6
        );
        assert!(
            (e.twin_rig.camera().aspect - layout.twin.aspect()).abs() < 1e-6
        );
        assert!(
            (e.robot_rig.camera().aspect - layout.robot_inset.aspect()).abs()
                < 1e-6
        );
    }

    #[test]
    fn capture_before_load_fails_fast() {
        let mut e = engine();
        assert_eq!(
            e.capture_calibration(),
            Err(CalibrationError::TargetNotReady)
        );
        assert!(e.last_calibration().is_none());
    }

    #[test]
    fn capture_against_installed_target_completes() {
        let mut e = engine();
        // Robot camera starts at (0, 2, 12) looking down -Z; a large
        // panel at the origin fills its frustum.
        e.set_target(TargetModel::panel(60.0, 60.0));

        let result = e.capture_calibration();
        assert!(matches!(result, Ok(CalibrationResult::Complete(_))));
        assert_eq!(e.last_calibration(), result.ok());
    }

    #[test]
    fn capture_twice_without_moving_matches() {
        let mut e = engine();
        e.set_target(TargetModel::panel(60.0, 60.0));
        let first = e.capture_calibration();
        let second = e.capture_calibration();
        assert_eq!(first, second);
    }

    #[test]
    fn render_pass_order_and_scissors() {
        let mut e = engine();
        let mut backend = RecordingBackend::default();
        e.render(&mut backend);

        // Three passes, each viewport → scissor → scissor test → draw.
        assert_eq!(backend.calls.len(), 12);
        let expected = ["viewport", "scissor", "scissor_test_on", "draw"];
        for chunk in backend.calls.chunks(4) {
            assert_eq!(chunk, expected.as_slice());
        }

        assert_eq!(
            backend.scenes,
            [SceneId::Simulation, SceneId::DigitalTwin, SceneId::Simulation]
        );
        // Helper visible only in the main simulation view.
        assert_eq!(backend.helpers, [true, false, false]);
        // Scissor always brackets its own viewport.
        assert_eq!(backend.viewports, backend.scissors);
        // Inset is drawn last.
        assert_eq!(backend.viewports[2], e.layout().robot_inset);
    }

    #[test]
    fn held_forward_key_moves_robot_only_while_locked() {
        let mut e = engine();
        let robot_eye = |e: &InspectionEngine| e.robot_rig.camera().eye;

        e.handle_key("KeyW", true);
        let start = robot_eye(&e);
        e.update(0.1);
        assert_eq!(robot_eye(&e), start, "unlocked robot must stay frozen");

        e.handle_key("KeyL", true);
        assert!(e.locked());
        e.update(0.1);
        let moved = robot_eye(&e) - start;
        let expected = 0.1 * e.options().camera.move_speed;
        assert!((moved.length() - expected).abs() < 1e-4);
        assert!(moved.z < 0.0, "default pose walks down -Z");
    }

    #[test]
    fn drag_routes_to_view_under_cursor() {
        let mut e = engine();
        let twin_eye_before = e.twin_rig.camera().eye;
        let sim_eye_before = e.sim_rig.camera().eye;

        // Cursor over the twin half, press, drag.
        e.handle_input(InputEvent::CursorMoved { x: 1200.0, y: 450.0 });
        e.handle_input(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });
        e.handle_input(InputEvent::CursorMoved { x: 1260.0, y: 450.0 });
        e.update(0.016);

        assert!(
            (e.twin_rig.camera().eye - twin_eye_before).length() > 1e-3,
            "twin orbit should respond"
        );
        assert!(
            (e.sim_rig.camera().eye - sim_eye_before).length() < 1e-6,
            "simulation orbit should not"
        );
    }

    #[test]
    fn escape_releases_lock() {
        let mut e = engine();
        e.handle_key("KeyL", true);
        assert!(e.locked());
        e.handle_key("Escape", true);
        assert!(!e.locked());
    }

    #[test]
    fn background_load_installs_target() {
        let mut e = engine();
        let load = e.load_model(|| Ok(TargetModel::panel(10.0, 10.0)));
        assert!(load.is_ok());

        let deadline =
            std::time::Instant::now() + std::time::Duration::from_secs(5);
        while !e.target_ready() && std::time::Instant::now() < deadline {
            e.update(0.016);
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        assert!(e.target_ready());

        // Orbit views were re-framed onto the model at the origin.
        assert!(
            (e.sim_rig.camera().target - Vec3::ZERO).length() < 1e-4
        );
    }
}
