//! Scenes and the calibration target model.
//!
//! The crate renders through an external backend, so a "scene" here is
//! just the identifier a backend needs to pick what to draw. The target
//! model is the one piece of geometry this crate inspects directly: an
//! indexed triangle mesh with per-vertex UVs that calibration rays are
//! cast against.

/// One-shot background model loading.
pub mod loader;

use glam::{Vec2, Vec3};

use crate::calibration::raycast::{ray_triangle, Ray, RaycastTarget, SurfaceHit};
use crate::error::TwinspectError;

/// Identifies which scene a render pass draws.
///
/// The simulation and its digital twin hold the same model; they differ
/// in what the backend layers on top (live pose vs. mirrored state).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    /// The simulated scene the robot camera inspects.
    Simulation,
    /// The digital twin mirroring the simulation.
    DigitalTwin,
}

/// Indexed triangle mesh with per-vertex UVs — the calibration target.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetModel {
    positions: Vec<Vec3>,
    uvs: Vec<Vec2>,
    indices: Vec<u32>,
}

impl TargetModel {
    /// Build a model from raw vertex/index buffers.
    ///
    /// Fails if the UV count does not match the position count, the
    /// index count is not a multiple of three, or an index is out of
    /// range.
    pub fn from_buffers(
        positions: Vec<Vec3>,
        uvs: Vec<Vec2>,
        indices: Vec<u32>,
    ) -> Result<Self, TwinspectError> {
        if uvs.len() != positions.len() {
            return Err(TwinspectError::ModelLoad(format!(
                "{} positions but {} uvs",
                positions.len(),
                uvs.len()
            )));
        }
        if indices.len() % 3 != 0 {
            return Err(TwinspectError::ModelLoad(format!(
                "index count {} is not a multiple of 3",
                indices.len()
            )));
        }
        let vertex_count = positions.len() as u32;
        if let Some(bad) = indices.iter().find(|&&i| i >= vertex_count) {
            return Err(TwinspectError::ModelLoad(format!(
                "index {bad} out of range for {vertex_count} vertices"
            )));
        }
        Ok(Self {
            positions,
            uvs,
            indices,
        })
    }

    /// An axis-aligned rectangle in the XY plane, centered at the
    /// origin, with UVs spanning `[0, 1]` across it.
    ///
    /// Stands in for real model geometry in tests and the demo binary.
    #[must_use]
    pub fn panel(width: f32, height: f32) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        Self {
            positions: vec![
                Vec3::new(-hw, -hh, 0.0),
                Vec3::new(hw, -hh, 0.0),
                Vec3::new(hw, hh, 0.0),
                Vec3::new(-hw, hh, 0.0),
            ],
            uvs: vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    /// Shift every vertex by `offset`. UVs are untouched.
    pub fn translate(&mut self, offset: Vec3) {
        for p in &mut self.positions {
            *p += offset;
        }
    }

    /// Vertex positions, for camera fitting.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn triangle(&self, i: usize) -> (Vec3, Vec3, Vec3) {
        let ia = self.indices[3 * i] as usize;
        let ib = self.indices[3 * i + 1] as usize;
        let ic = self.indices[3 * i + 2] as usize;
        (self.positions[ia], self.positions[ib], self.positions[ic])
    }

    fn triangle_uvs(&self, i: usize) -> (Vec2, Vec2, Vec2) {
        let ia = self.indices[3 * i] as usize;
        let ib = self.indices[3 * i + 1] as usize;
        let ic = self.indices[3 * i + 2] as usize;
        (self.uvs[ia], self.uvs[ib], self.uvs[ic])
    }
}

impl RaycastTarget for TargetModel {
    fn raycast(&self, ray: &Ray) -> Vec<SurfaceHit> {
        let mut hits = Vec::new();
        for i in 0..self.triangle_count() {
            let (a, b, c) = self.triangle(i);
            if let Some((t, u, v)) = ray_triangle(ray, a, b, c) {
                let (uv_a, uv_b, uv_c) = self.triangle_uvs(i);
                let uv = uv_a * (1.0 - u - v) + uv_b * u + uv_c * v;
                hits.push(SurfaceHit {
                    distance: t,
                    point: ray.at(t),
                    uv,
                    triangle: i,
                });
            }
        }
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}
