// Move-and-slide seam between the movement controller and a physics engine

use glam::Vec3;

/// Outcome of one move-and-slide call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideResult {
    /// Velocity after collision response
    pub velocity: Vec3,
    /// Whether the body ended the move standing on a floor
    pub grounded: bool,
}

/// Something that can integrate a character velocity against the world
pub trait KinematicBackend {
    /// Identifies one character body
    type Handle: Copy;

    /// Move `body` by `velocity * delta`, sliding along whatever it hits
    ///
    /// `up` is the character's up direction (opposite of its gravity).
    /// Returns `None` if the handle does not name a live body.
    fn move_and_slide(
        &mut self,
        body: Self::Handle,
        velocity: Vec3,
        up: Vec3,
        delta: f32,
    ) -> Option<SlideResult>;

    /// Current position of the body's feet
    fn position(&self, body: Self::Handle) -> Option<Vec3>;

    /// Commit every move made this tick
    ///
    /// Call once per physics tick after all characters have moved.
    fn end_tick(&mut self) {}
}

/// Distance within which a body resting on the floor stays attached to it
const SNAP_DISTANCE: f32 = 0.01;

/// Analytic infinite floor plane
///
/// No walls and no slopes. Used by tests and the headless harness where a
/// full physics pipeline is unnecessary.
#[derive(Debug, Clone)]
pub struct FlatFloor {
    /// Unit normal of the floor
    normal: Vec3,
    /// Signed height of the floor along its normal
    height: f32,
    bodies: Vec<Vec3>,
}

impl FlatFloor {
    /// Horizontal floor at `height` on the Y axis
    pub fn new(height: f32) -> Self {
        Self::with_normal(Vec3::Y, height)
    }

    /// Floor plane with an arbitrary normal (falls back to +Y if degenerate)
    pub fn with_normal(normal: Vec3, height: f32) -> Self {
        Self {
            normal: normal.try_normalize().unwrap_or(Vec3::Y),
            height,
            bodies: Vec::new(),
        }
    }

    /// Register a body with its feet at `position`
    pub fn add_body(&mut self, position: Vec3) -> usize {
        self.bodies.push(position);
        self.bodies.len() - 1
    }

    /// Teleport a body
    pub fn set_position(&mut self, body: usize, position: Vec3) -> bool {
        match self.bodies.get_mut(body) {
            Some(slot) => {
                *slot = position;
                true
            }
            None => false,
        }
    }

    /// Signed distance of a point above the floor
    pub fn height_above(&self, point: Vec3) -> f32 {
        point.dot(self.normal) - self.height
    }
}

impl Default for FlatFloor {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl KinematicBackend for FlatFloor {
    type Handle = usize;

    fn move_and_slide(
        &mut self,
        body: usize,
        velocity: Vec3,
        _up: Vec3,
        delta: f32,
    ) -> Option<SlideResult> {
        let normal = self.normal;
        let height = self.height;
        let position = self.bodies.get_mut(body)?;

        *position += velocity * delta;

        let above = position.dot(normal) - height;
        let into_floor = velocity.dot(normal) <= 0.0;
        let grounded = above <= 0.0 || (above <= SNAP_DISTANCE && into_floor);

        let mut velocity = velocity;
        if grounded {
            *position -= normal * above;
            let normal_speed = velocity.dot(normal);
            if normal_speed < 0.0 {
                velocity -= normal * normal_speed;
            }
        }

        Some(SlideResult { velocity, grounded })
    }

    fn position(&self, body: usize) -> Option<Vec3> {
        self.bodies.get(body).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_falling_body_lands() {
        let mut floor = FlatFloor::new(0.0);
        let body = floor.add_body(Vec3::new(0.0, 0.05, 0.0));

        let result = floor
            .move_and_slide(body, Vec3::new(2.0, -10.0, 0.0), Vec3::Y, 0.1)
            .unwrap();
        assert!(result.grounded);
        assert_eq!(result.velocity, Vec3::new(2.0, 0.0, 0.0));

        let position = floor.position(body).unwrap();
        assert_relative_eq!(position.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(position.x, 0.2, epsilon = 1e-6);
    }

    #[test]
    fn test_airborne_body_keeps_velocity() {
        let mut floor = FlatFloor::new(0.0);
        let body = floor.add_body(Vec3::new(0.0, 5.0, 0.0));
        let result = floor
            .move_and_slide(body, Vec3::new(0.0, -1.0, 0.0), Vec3::Y, 0.1)
            .unwrap();
        assert!(!result.grounded);
        assert_eq!(result.velocity, Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_jumping_off_floor_is_not_grounded() {
        let mut floor = FlatFloor::new(0.0);
        let body = floor.add_body(Vec3::ZERO);
        let result = floor
            .move_and_slide(body, Vec3::new(0.0, 8.0, 0.0), Vec3::Y, 1.0 / 60.0)
            .unwrap();
        assert!(!result.grounded);
        assert_eq!(result.velocity.y, 8.0);
    }

    #[test]
    fn test_resting_body_stays_grounded() {
        let mut floor = FlatFloor::new(1.0);
        let body = floor.add_body(Vec3::new(0.0, 1.0, 0.0));
        let result = floor.move_and_slide(body, Vec3::X, Vec3::Y, 0.1).unwrap();
        assert!(result.grounded);
    }

    #[test]
    fn test_unknown_body() {
        let mut floor = FlatFloor::default();
        assert!(floor.move_and_slide(3, Vec3::ZERO, Vec3::Y, 0.1).is_none());
        assert!(floor.position(3).is_none());
        assert!(!floor.set_position(3, Vec3::ZERO));
    }
}
