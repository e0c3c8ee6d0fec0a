//! View-frustum corner extraction.
//!
//! Derives the 8 world-space corner points of a perspective camera's
//! frustum analytically from its projection parameters and pose. The
//! corners feed the calibration capture (edge rays) and backends that
//! draw a frustum helper for the robot camera.

use glam::Vec3;

use crate::calibration::raycast::Ray;
use crate::camera::core::Camera;

/// The 8 corner points of a camera frustum in world space.
///
/// Corners are indexed 0..4 counter-clockwise as seen from the camera,
/// starting at the bottom-left: `[bl, br, tr, tl]`. `near[i]` and
/// `far[i]` bound the same frustum edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumCorners {
    /// Near-plane corners.
    pub near: [Vec3; 4],
    /// Far-plane corners.
    pub far: [Vec3; 4],
}

impl FrustumCorners {
    /// Compute the frustum corners from the camera's current pose and
    /// projection.
    ///
    /// Recomputed on every call — the camera may have moved since the
    /// last sample, so corners are never cached.
    #[must_use]
    pub fn from_camera(camera: &Camera) -> Self {
        let forward = camera.forward();
        let right = camera.right();
        // Re-orthogonalize up against the actual look direction.
        let up = right.cross(forward).normalize();

        let tan_half_fovy = (camera.fovy.to_radians() / 2.0).tan();

        let plane = |dist: f32| -> [Vec3; 4] {
            let half_h = tan_half_fovy * dist;
            let half_w = half_h * camera.aspect;
            let center = camera.eye + forward * dist;
            [
                center - right * half_w - up * half_h,
                center + right * half_w - up * half_h,
                center + right * half_w + up * half_h,
                center - right * half_w + up * half_h,
            ]
        };

        Self {
            near: plane(camera.znear),
            far: plane(camera.zfar),
        }
    }

    /// The ray along frustum edge `i`: origin at the near corner,
    /// direction toward the matching far corner.
    #[must_use]
    pub fn edge_ray(&self, i: usize) -> Ray {
        Ray::new(self.near[i], self.far[i] - self.near[i])
    }

    /// All four edge rays in corner order.
    #[must_use]
    pub fn edge_rays(&self) -> [Ray; 4] {
        [
            self.edge_ray(0),
            self.edge_ray(1),
            self.edge_ray(2),
            self.edge_ray(3),
        ]
    }

    /// The 12 line segments of the frustum wireframe (near rectangle,
    /// far rectangle, four connecting edges), for helper rendering.
    #[must_use]
    pub fn line_segments(&self) -> [[Vec3; 2]; 12] {
        let n = &self.near;
        let f = &self.far;
        [
            [n[0], n[1]],
            [n[1], n[2]],
            [n[2], n[3]],
            [n[3], n[0]],
            [f[0], f[1]],
            [f[1], f[2]],
            [f[2], f[3]],
            [f[3], f[0]],
            [n[0], f[0]],
            [n[1], f[1]],
            [n[2], f[2]],
            [n[3], f[3]],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_camera() -> Camera {
        Camera {
            eye: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 2.0,
            fovy: 60.0,
            znear: 1.0,
            zfar: 100.0,
        }
    }

    #[test]
    fn corners_lie_on_their_planes() {
        let camera = test_camera();
        let corners = FrustumCorners::from_camera(&camera);
        let forward = camera.forward();

        for p in &corners.near {
            let depth = (*p - camera.eye).dot(forward);
            assert!((depth - camera.znear).abs() < 1e-4);
        }
        for p in &corners.far {
            let depth = (*p - camera.eye).dot(forward);
            assert!((depth - camera.zfar).abs() < 1e-3);
        }
    }

    #[test]
    fn near_rectangle_matches_projection() {
        let camera = test_camera();
        let corners = FrustumCorners::from_camera(&camera);

        let half_h = (camera.fovy.to_radians() / 2.0).tan() * camera.znear;
        let half_w = half_h * camera.aspect;

        let width = (corners.near[1] - corners.near[0]).length();
        let height = (corners.near[3] - corners.near[0]).length();
        assert!((width - 2.0 * half_w).abs() < 1e-4);
        assert!((height - 2.0 * half_h).abs() < 1e-4);
    }

    #[test]
    fn edge_rays_diverge_from_optical_axis() {
        let camera = test_camera();
        let corners = FrustumCorners::from_camera(&camera);
        let forward = camera.forward();

        for ray in corners.edge_rays() {
            // Every edge ray points broadly forward but none along the
            // exact axis.
            let along = ray.direction.dot(forward);
            assert!(along > 0.0);
            assert!(along < 1.0 - 1e-6);
        }
    }

    #[test]
    fn corners_track_camera_movement() {
        let mut camera = test_camera();
        let before = FrustumCorners::from_camera(&camera);
        camera.eye += Vec3::new(5.0, 0.0, 0.0);
        camera.target += Vec3::new(5.0, 0.0, 0.0);
        let after = FrustumCorners::from_camera(&camera);

        for i in 0..4 {
            let shift = after.near[i] - before.near[i];
            assert!((shift - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-4);
        }
    }
}
