use glam::{Mat4, Vec3};

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Build the view matrix (world to eye space).
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Build the projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Unit look direction (from eye toward target).
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize()
    }

    /// Unit right direction (forward crossed with up).
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basis_is_orthonormal() {
        let camera = Camera {
            eye: Vec3::new(3.0, 2.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.5,
            fovy: 50.0,
            znear: 0.1,
            zfar: 1000.0,
        };

        let forward = camera.forward();
        let right = camera.right();
        assert!((forward.length() - 1.0).abs() < 1e-6);
        assert!((right.length() - 1.0).abs() < 1e-6);
        assert!(forward.dot(right).abs() < 1e-6);
    }

    #[test]
    fn view_matrix_moves_eye_to_origin() {
        let camera = Camera {
            eye: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
        };

        let eye_in_view = camera.view_matrix().transform_point3(camera.eye);
        assert!(eye_in_view.length() < 1e-5);
    }
}
