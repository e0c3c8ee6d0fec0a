//! Ray / surface intersection primitives.
//!
//! The calibration capture needs ordered intersections carrying the
//! surface parameterization (UV) at the hit point. Targets implement
//! [`RaycastTarget`]; the triangle test is Möller–Trumbore with
//! barycentric UV interpolation.

use glam::{Vec2, Vec3};

/// Rays shorter than this are degenerate and produce no hits.
const DIRECTION_EPSILON: f32 = 1e-8;

/// Determinant threshold below which a ray is parallel to a triangle.
const PARALLEL_EPSILON: f32 = 1e-7;

/// A world-space ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing `direction`.
    ///
    /// A zero-length direction yields a ray that can never hit
    /// anything (direction stays zero).
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// The point at parameter `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// A single ray/surface intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Distance from the ray origin to the hit point.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
    /// Surface parameterization (UV) at the hit point.
    pub uv: Vec2,
    /// Index of the triangle that was hit.
    pub triangle: usize,
}

/// A surface rays can be cast against.
///
/// Implementations return intersections ordered by distance, each
/// carrying the surface UV at the hit point.
pub trait RaycastTarget {
    /// All intersections of `ray` with this surface, nearest first.
    fn raycast(&self, ray: &Ray) -> Vec<SurfaceHit>;
}

/// Möller–Trumbore ray/triangle intersection.
///
/// Returns `(t, u, v)` where `t` is the ray parameter and `(u, v)` are
/// barycentric weights of `b` and `c`. Back faces count as hits — the
/// robot camera may inspect the model from either side.
#[must_use]
pub fn ray_triangle(
    ray: &Ray,
    a: Vec3,
    b: Vec3,
    c: Vec3,
) -> Option<(f32, f32, f32)> {
    if ray.direction.length_squared() < DIRECTION_EPSILON {
        return None;
    }

    let edge_ab = b - a;
    let edge_ac = c - a;

    let p = ray.direction.cross(edge_ac);
    let det = edge_ab.dot(p);
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let to_origin = ray.origin - a;

    let u = to_origin.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = to_origin.cross(edge_ab);
    let v = ray.direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge_ac.dot(q) * inv_det;
    if t <= 0.0 {
        return None;
    }

    Some((t, u, v))
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Vec3 = Vec3::new(-1.0, -1.0, 0.0);
    const B: Vec3 = Vec3::new(1.0, -1.0, 0.0);
    const C: Vec3 = Vec3::new(0.0, 1.0, 0.0);

    #[test]
    fn hits_triangle_interior() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z);
        let hit = ray_triangle(&ray, A, B, C);
        assert!(hit.is_some());
        if let Some((t, u, v)) = hit {
            assert!((t - 5.0).abs() < 1e-5);
            assert!(u >= 0.0 && v >= 0.0 && u + v <= 1.0);
        }
    }

    #[test]
    fn misses_outside_triangle() {
        let ray = Ray::new(Vec3::new(5.0, 5.0, 5.0), -Vec3::Z);
        assert!(ray_triangle(&ray, A, B, C).is_none());
    }

    #[test]
    fn rejects_hits_behind_origin() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), -Vec3::Z);
        assert!(ray_triangle(&ray, A, B, C).is_none());
    }

    #[test]
    fn back_faces_are_hit() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        assert!(ray_triangle(&ray, A, B, C).is_some());
    }

    #[test]
    fn parallel_ray_misses() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::X);
        assert!(ray_triangle(&ray, A, B, C).is_none());
    }

    #[test]
    fn degenerate_direction_never_hits() {
        let ray = Ray::new(Vec3::ZERO, Vec3::ZERO);
        assert!(ray_triangle(&ray, A, B, C).is_none());
    }
}
