//! Standalone inspection window backed by winit.
//!
//! The viewer owns the event loop and drives the engine: one
//! `RedrawRequested` per display refresh runs a single update/render
//! iteration, then requests the next redraw. Rendering goes through a
//! caller-supplied [`RenderBackend`].
//!
//! ```no_run
//! # use twinspect::viewer::Viewer;
//! # use twinspect::scene::TargetModel;
//! # struct NullBackend;
//! # impl twinspect::compositor::RenderBackend for NullBackend {
//! #     fn set_viewport(&mut self, _: twinspect::compositor::Viewport) {}
//! #     fn set_scissor(&mut self, _: twinspect::compositor::Viewport) {}
//! #     fn set_scissor_test(&mut self, _: bool) {}
//! #     fn draw(
//! #         &mut self,
//! #         _: twinspect::scene::SceneId,
//! #         _: &twinspect::camera::Camera,
//! #         _: Option<&twinspect::camera::FrustumCorners>,
//! #     ) {}
//! # }
//! Viewer::builder()
//!     .with_title("Inspection")
//!     .with_backend(|_window| Ok(NullBackend))
//!     .with_model_source(|| Ok(TargetModel::panel(8.0, 4.0)))
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::{
    DeviceEvent, DeviceId, ElementState, MouseScrollDelta, WindowEvent,
};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{CursorGrabMode, Window, WindowId};

use crate::compositor::RenderBackend;
use crate::engine::InspectionEngine;
use crate::error::TwinspectError;
use crate::input::{InputEvent, MouseButton};
use crate::options::Options;
use crate::scene::TargetModel;

type BackendFactory<B> =
    Box<dyn FnOnce(&Arc<Window>) -> Result<B, TwinspectError>>;
type ModelSource =
    Box<dyn FnOnce() -> Result<TargetModel, TwinspectError> + Send + 'static>;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder<B: RenderBackend> {
    title: String,
    options: Option<Options>,
    backend_factory: Option<BackendFactory<B>>,
    model_source: Option<ModelSource>,
}

impl<B: RenderBackend> ViewerBuilder<B> {
    /// Create a builder with sensible defaults (title "Twinspect",
    /// default options, no model).
    fn new() -> Self {
        Self {
            title: "Twinspect".into(),
            options: None,
            backend_factory: None,
            model_source: None,
        }
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Supply the render backend, constructed once the window exists.
    #[must_use]
    pub fn with_backend<F>(mut self, factory: F) -> Self
    where
        F: FnOnce(&Arc<Window>) -> Result<B, TwinspectError> + 'static,
    {
        self.backend_factory = Some(Box::new(factory));
        self
    }

    /// Supply the target model producer, run on a background thread
    /// once the engine starts.
    #[must_use]
    pub fn with_model_source<F>(mut self, producer: F) -> Self
    where
        F: FnOnce() -> Result<TargetModel, TwinspectError> + Send + 'static,
    {
        self.model_source = Some(Box::new(producer));
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer<B> {
        Viewer {
            title: self.title,
            options: self.options,
            backend_factory: self.backend_factory,
            model_source: self.model_source,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window running the dual-view inspection display.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer<B: RenderBackend> {
    title: String,
    options: Option<Options>,
    backend_factory: Option<BackendFactory<B>>,
    model_source: Option<ModelSource>,
}

impl<B: RenderBackend> Viewer<B> {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder<B> {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window
    /// is closed.
    pub fn run(self) -> Result<(), TwinspectError> {
        let backend_factory = self.backend_factory.ok_or_else(|| {
            TwinspectError::Viewer("no render backend configured".into())
        })?;

        let event_loop = EventLoop::new()
            .map_err(|e| TwinspectError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            backend: None,
            backend_factory: Some(backend_factory),
            model_source: self.model_source,
            options: self.options,
            title: self.title,
            last_frame_time: Instant::now(),
            lock_applied: false,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| TwinspectError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp<B: RenderBackend> {
    window: Option<Arc<Window>>,
    engine: Option<InspectionEngine>,
    backend: Option<B>,
    backend_factory: Option<BackendFactory<B>>,
    model_source: Option<ModelSource>,
    options: Option<Options>,
    title: String,
    last_frame_time: Instant,
    /// Whether the OS cursor grab currently mirrors the engine's
    /// pointer-lock state.
    lock_applied: bool,
}

/// Clamp the render surface to the window's inner dimensions.
fn surface_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl<B: RenderBackend> ViewerApp<B> {
    /// Grab or release the OS cursor to match the engine's pointer-lock
    /// state.
    fn sync_pointer_lock(&mut self) {
        let (Some(window), Some(engine)) = (&self.window, &self.engine) else {
            return;
        };
        let locked = engine.locked();
        if locked == self.lock_applied {
            return;
        }

        if locked {
            let grabbed = window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
            if let Err(e) = grabbed {
                log::warn!("cursor grab unavailable: {e}");
            }
            window.set_cursor_visible(false);
        } else {
            if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
                log::warn!("cursor release failed: {e}");
            }
            window.set_cursor_visible(true);
        }
        self.lock_applied = locked;
    }
}

impl<B: RenderBackend> ApplicationHandler for ViewerApp<B> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            #[allow(clippy::cast_possible_truncation)]
            let logical_w = (mon_size.width as f64 / scale * 0.75) as u32;
            #[allow(clippy::cast_possible_truncation)]
            let logical_h = (mon_size.height as f64 / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let Some(factory) = self.backend_factory.take() else {
            // run() guarantees a factory; a second resume lands in the
            // is_some guard above.
            return;
        };
        let backend = match factory(&window) {
            Ok(b) => b,
            Err(e) => {
                log::error!("Failed to initialize render backend: {e}");
                event_loop.exit();
                return;
            }
        };

        let (vp_w, vp_h) = surface_size(window.inner_size());
        let mut engine = InspectionEngine::new(
            vp_w,
            vp_h,
            self.options.take().unwrap_or_default(),
        );

        if let Some(source) = self.model_source.take() {
            if let Err(e) = engine.load_model(source) {
                log::error!("Failed to start model load: {e}");
            }
        }

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
        self.backend = Some(backend);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        // Guard: window, engine, and backend must all be initialised.
        if self.window.is_none() || self.engine.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(event_size) => {
                let (vp_w, vp_h) = surface_size(event_size);
                if let (Some(engine), Some(backend)) =
                    (&mut self.engine, &mut self.backend)
                {
                    engine.resize(vp_w, vp_h);
                    // Re-render immediately so the display never shows
                    // stale framing while a resize drag is in flight.
                    engine.render(backend);
                }
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = now.duration_since(self.last_frame_time).as_secs_f32();
                self.last_frame_time = now;

                if let (Some(engine), Some(backend)) =
                    (&mut self.engine, &mut self.backend)
                {
                    engine.update(dt);
                    engine.render(backend);
                }
                self.sync_pointer_lock();

                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::MouseInput { button, state, .. } => {
                let pressed = state == ElementState::Pressed;
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::MouseButton {
                        button: MouseButton::from(button),
                        pressed,
                    });
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(engine) = &mut self.engine {
                    #[allow(clippy::cast_possible_truncation)]
                    engine.handle_input(InputEvent::CursorMoved {
                        x: position.x as f32,
                        y: position.y as f32,
                    });
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                let scroll_delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::Scroll {
                        delta: scroll_delta,
                    });
                }
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::ModifiersChanged {
                        shift: modifiers.state().shift_key(),
                    });
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                use winit::keyboard::PhysicalKey;
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let pressed = event.state == ElementState::Pressed;

                let key_str = format!("{code:?}");
                if let Some(engine) = &mut self.engine {
                    engine.handle_key(&key_str, pressed);
                }
                // Lock bindings may have fired.
                self.sync_pointer_lock();
            }

            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        // Raw motion is the look channel while pointer lock is engaged;
        // the engine ignores it otherwise.
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            if let Some(engine) = &mut self.engine {
                #[allow(clippy::cast_possible_truncation)]
                engine.handle_input(InputEvent::MouseMotion {
                    dx: dx as f32,
                    dy: dy as f32,
                });
            }
        }
    }
}
