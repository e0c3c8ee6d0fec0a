//! Viewport partitioning and per-frame render pass composition.
//!
//! The render surface is split into a simulation view (left half), a
//! digital twin view (right half), and a small robot-camera inset
//! tucked into the simulation half. Each frame the engine emits one
//! [`RenderPass`] per (scene, camera, viewport) triple, in a fixed
//! order, and [`render_frame`] issues them through the external
//! [`RenderBackend`].

use crate::camera::core::Camera;
use crate::camera::frustum::FrustumCorners;
use crate::options::LayoutOptions;
use crate::scene::SceneId;

/// A pixel rectangle on the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Left edge in pixels.
    pub x: u32,
    /// Bottom edge in pixels.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Aspect ratio (width / height), saturating to 1 for degenerate
    /// rectangles.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }

    /// Whether the point (in surface pixels) falls inside this
    /// rectangle.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x as f32
            && y >= self.y as f32
            && x < (self.x + self.width) as f32
            && y < (self.y + self.height) as f32
    }

    /// Whether two rectangles share any pixels.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// Which of the composed views a point falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewId {
    /// The simulation view (left half).
    Simulation,
    /// The digital twin view (right half).
    Twin,
    /// The robot-camera inset.
    RobotInset,
}

/// The computed viewport rectangles for one surface size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewLayout {
    /// Simulation view: left half of the surface.
    pub simulation: Viewport,
    /// Digital twin view: right half of the surface.
    pub twin: Viewport,
    /// Robot-camera inset inside the simulation half.
    pub robot_inset: Viewport,
}

impl ViewLayout {
    /// Partition a `width` × `height` surface.
    ///
    /// The two main views tile the surface exactly (odd pixels go to
    /// the twin); the inset sits in the bottom-right corner of the
    /// simulation half, clamped so it never leaves that half.
    #[must_use]
    pub fn compute(width: u32, height: u32, options: &LayoutOptions) -> Self {
        let half = width / 2;
        let simulation = Viewport {
            x: 0,
            y: 0,
            width: half,
            height,
        };
        let twin = Viewport {
            x: half,
            y: 0,
            width: width - half,
            height,
        };

        let inset_w =
            ((half as f32 * options.inset_fraction) as u32).min(half);
        let inset_h = if half == 0 {
            0
        } else {
            ((inset_w as f32 * height as f32 / half as f32) as u32).min(height)
        };
        let margin = options.inset_margin;
        let robot_inset = Viewport {
            x: half.saturating_sub(inset_w + margin),
            y: margin.min(height.saturating_sub(inset_h)),
            width: inset_w,
            height: inset_h,
        };

        Self {
            simulation,
            twin,
            robot_inset,
        }
    }

    /// The view under the given surface point, inset first (it sits on
    /// top of the simulation view).
    #[must_use]
    pub fn view_at(&self, x: f32, y: f32) -> Option<ViewId> {
        if self.robot_inset.contains(x, y) {
            return Some(ViewId::RobotInset);
        }
        if self.simulation.contains(x, y) {
            return Some(ViewId::Simulation);
        }
        if self.twin.contains(x, y) {
            return Some(ViewId::Twin);
        }
        None
    }
}

/// One render pass: a scene drawn through a camera into a viewport.
#[derive(Debug)]
pub struct RenderPass<'a> {
    /// Scene to draw.
    pub scene: SceneId,
    /// Camera to draw through.
    pub camera: &'a Camera,
    /// Destination rectangle.
    pub viewport: Viewport,
    /// Clip rectangle (identical to `viewport` for every composed
    /// view).
    pub scissor: Viewport,
    /// Robot-camera frustum helper to overlay, or `None` to hide it.
    ///
    /// Hidden for the robot camera's own pass so the helper does not
    /// draw into its own view.
    pub frustum_helper: Option<&'a FrustumCorners>,
}

/// The external renderer collaborator.
///
/// Implementations draw a scene through a camera into the
/// currently-set viewport, clipped by the scissor rectangle while the
/// scissor test is enabled.
pub trait RenderBackend {
    /// Set the destination viewport for subsequent draws.
    fn set_viewport(&mut self, viewport: Viewport);
    /// Set the scissor rectangle for subsequent draws.
    fn set_scissor(&mut self, scissor: Viewport);
    /// Enable or disable the scissor test.
    fn set_scissor_test(&mut self, enabled: bool);
    /// Draw `scene` through `camera`, optionally overlaying the robot
    /// frustum helper.
    fn draw(
        &mut self,
        scene: SceneId,
        camera: &Camera,
        frustum_helper: Option<&FrustumCorners>,
    );
}

/// Issue every pass in declared order: viewport, scissor, scissor test
/// on, draw.
///
/// Each composed viewport is a disjoint pixel region (the inset is
/// drawn last, over the simulation view), so order affects layering
/// only.
pub fn render_frame(backend: &mut dyn RenderBackend, passes: &[RenderPass]) {
    for pass in passes {
        backend.set_viewport(pass.viewport);
        backend.set_scissor(pass.scissor);
        backend.set_scissor_test(true);
        backend.draw(pass.scene, pass.camera, pass.frustum_helper);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_tile_the_surface_exactly() {
        for (w, h) in [(1920u32, 1080u32), (1281, 721), (2, 2)] {
            let layout = ViewLayout::compute(w, h, &LayoutOptions::default());
            assert_eq!(layout.simulation.width + layout.twin.width, w);
            assert_eq!(layout.simulation.height, h);
            assert_eq!(layout.twin.height, h);
            assert!(!layout.simulation.overlaps(&layout.twin));
        }
    }

    #[test]
    fn inset_stays_inside_simulation_half() {
        let layout =
            ViewLayout::compute(1920, 1080, &LayoutOptions::default());
        let sim = layout.simulation;
        let inset = layout.robot_inset;
        assert!(inset.x >= sim.x);
        assert!(inset.x + inset.width <= sim.x + sim.width);
        assert!(inset.y + inset.height <= sim.y + sim.height);
        assert!(!inset.overlaps(&layout.twin));
    }

    #[test]
    fn inset_preserves_main_view_aspect() {
        let layout =
            ViewLayout::compute(1920, 1080, &LayoutOptions::default());
        let a = layout.robot_inset.aspect();
        let b = layout.simulation.aspect();
        assert!((a - b).abs() < 0.02);
    }

    #[test]
    fn hit_test_prefers_the_inset() {
        let layout =
            ViewLayout::compute(1000, 800, &LayoutOptions::default());
        let inset = layout.robot_inset;
        let cx = inset.x as f32 + inset.width as f32 / 2.0;
        let cy = inset.y as f32 + inset.height as f32 / 2.0;
        assert_eq!(layout.view_at(cx, cy), Some(ViewId::RobotInset));
        assert_eq!(layout.view_at(10.0, 790.0), Some(ViewId::Simulation));
        assert_eq!(layout.view_at(900.0, 400.0), Some(ViewId::Twin));
        assert_eq!(layout.view_at(2000.0, 400.0), None);
    }

    #[test]
    fn degenerate_surfaces_do_not_panic() {
        let layout = ViewLayout::compute(0, 0, &LayoutOptions::default());
        assert_eq!(layout.simulation.width, 0);
        assert_eq!(layout.robot_inset.width, 0);
        assert!((layout.simulation.aspect() - 1.0).abs() < 1e-6);
    }
}
