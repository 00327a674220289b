use rapier3d::prelude::*;

/// Builder for the two body kinds a character scene needs
pub struct BodyBuilder {
    body_type: RigidBodyType,
    translation: Vector<Real>,
    can_sleep: bool,
    locked_axes: LockedAxes,
}

impl BodyBuilder {
    /// Create a kinematic position-based body (moved by the character controller)
    pub fn new_kinematic_position_based() -> Self {
        Self {
            body_type: RigidBodyType::KinematicPositionBased,
            translation: Vector::zeros(),
            can_sleep: false,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Create a fixed (static) body (completely immovable)
    pub fn new_fixed() -> Self {
        Self {
            body_type: RigidBodyType::Fixed,
            translation: Vector::zeros(),
            can_sleep: false,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Set the initial position of the body
    pub fn position(mut self, x: Real, y: Real, z: Real) -> Self {
        self.translation = vector![x, y, z];
        self
    }

    /// Set whether the body can sleep when inactive
    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Lock rotation (characters turn through their facing, not the body)
    pub fn lock_rotation(mut self) -> Self {
        self.locked_axes = LockedAxes::ROTATION_LOCKED;
        self
    }

    /// Build the rigid body
    pub fn build(self) -> RigidBody {
        RigidBodyBuilder::new(self.body_type)
            .translation(self.translation)
            .can_sleep(self.can_sleep)
            .locked_axes(self.locked_axes)
            .build()
    }
}

/// Common body/collider configurations
pub mod presets {
    use super::*;

    /// Character body: kinematic, rotation locked, never sleeps
    pub fn character_body(x: Real, y: Real, z: Real) -> RigidBody {
        BodyBuilder::new_kinematic_position_based()
            .position(x, y, z)
            .lock_rotation()
            .can_sleep(false)
            .build()
    }

    /// Character collider: upright capsule whose bottom sits at the body origin
    pub fn character_collider(radius: Real, height: Real) -> Collider {
        let radius = radius.max(0.01);
        let half_height = ((height / 2.0) - radius).max(0.0); // Subtract radius to get capsule half-height

        ColliderBuilder::capsule_y(half_height, radius)
            .translation(vector![0.0, half_height + radius, 0.0])
            .friction(0.0)
            .restitution(0.0)
            .build()
    }

    /// Ground body (fixed/static)
    pub fn ground_body(x: Real, y: Real, z: Real) -> RigidBody {
        BodyBuilder::new_fixed().position(x, y, z).build()
    }

    /// Ground slab whose top face sits at the body origin
    pub fn ground_collider(half_width: Real, half_depth: Real) -> Collider {
        const THICKNESS: Real = 0.5;
        ColliderBuilder::cuboid(half_width, THICKNESS, half_depth)
            .translation(vector![0.0, -THICKNESS, 0.0])
            .friction(0.3)
            .build()
    }
}
