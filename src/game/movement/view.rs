// Camera basis used to turn 2D input into a 3D move direction

use crate::core::math::project_on_plane;
use glam::{Quat, Vec2, Vec3};

/// Below this squared length a projected forward counts as vertical
const VERTICAL_VIEW_EPSILON: f32 = 0.01;

/// Forward and right axes of the camera looking at the character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBasis {
    pub forward: Vec3,
    pub right: Vec3,
}

impl Default for ViewBasis {
    /// Camera looking down -Z
    fn default() -> Self {
        Self {
            forward: Vec3::NEG_Z,
            right: Vec3::X,
        }
    }
}

impl ViewBasis {
    pub fn new(forward: Vec3, right: Vec3) -> Self {
        Self { forward, right }
    }

    /// Camera basis from the camera's rotation
    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            forward: rotation * Vec3::NEG_Z,
            right: rotation * Vec3::X,
        }
    }

    /// Camera pitched around X, then yawed around Y (both in degrees)
    pub fn from_pitch_yaw(pitch_deg: f32, yaw_deg: f32) -> Self {
        let rotation = Quat::from_rotation_y(yaw_deg.to_radians())
            * Quat::from_rotation_x(pitch_deg.to_radians());
        Self::from_rotation(rotation)
    }

    /// Flatten onto the plane perpendicular to `up`
    pub fn on_plane(&self, up: Vec3) -> Self {
        Self {
            forward: project_on_plane(self.forward, up).normalize_or_zero(),
            right: project_on_plane(self.right, up).normalize_or_zero(),
        }
    }

    /// Flatten onto the world XZ plane
    ///
    /// A camera looking almost straight down has no usable forward, so the
    /// axes are rebuilt from `yaw_deg` instead.
    pub fn on_ground(&self, yaw_deg: f32) -> Self {
        let forward = Vec3::new(self.forward.x, 0.0, self.forward.z);
        if forward.length_squared() < VERTICAL_VIEW_EPSILON {
            let (sin, cos) = yaw_deg.to_radians().sin_cos();
            return Self {
                forward: Vec3::new(-sin, 0.0, -cos),
                right: Vec3::new(cos, 0.0, -sin),
            };
        }
        Self {
            forward: forward.normalize_or_zero(),
            right: Vec3::new(self.right.x, 0.0, self.right.z).normalize_or_zero(),
        }
    }

    /// World move direction for an input vector (x = right, y = backward)
    pub fn move_direction(&self, input: Vec2) -> Vec3 {
        (self.right * input.x - self.forward * input.y).normalize_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_basis_directions() {
        let view = ViewBasis::default();
        assert_eq!(view.move_direction(Vec2::new(0.0, -1.0)), Vec3::NEG_Z);
        assert_eq!(view.move_direction(Vec2::new(1.0, 0.0)), Vec3::X);
        assert_eq!(view.move_direction(Vec2::ZERO), Vec3::ZERO);
    }

    #[test]
    fn test_pitched_view_projects_to_ground() {
        let view = ViewBasis::from_pitch_yaw(-50.0, 0.0).on_ground(0.0);
        assert!(view.forward.abs_diff_eq(Vec3::NEG_Z, 1e-5));
        assert!(view.right.abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn test_vertical_view_falls_back_to_yaw() {
        let view = ViewBasis::from_pitch_yaw(-90.0, 90.0).on_ground(90.0);
        assert!(view.forward.abs_diff_eq(Vec3::NEG_X, 1e-5));
        assert!(view.right.abs_diff_eq(Vec3::NEG_Z, 1e-5));
    }

    #[test]
    fn test_yaw_rotates_basis() {
        let view = ViewBasis::from_pitch_yaw(-45.0, 90.0).on_ground(90.0);
        assert!(view.forward.abs_diff_eq(Vec3::NEG_X, 1e-5));
    }

    #[test]
    fn test_plane_projection_with_tilted_up() {
        let view = ViewBasis::default().on_plane(Vec3::Z);
        // Forward is parallel to up and vanishes
        assert_eq!(view.forward, Vec3::ZERO);
        assert_eq!(view.right, Vec3::X);
    }
}
