use glam::Vec3;
use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::prelude::*;
use std::collections::{HashMap, HashSet};

use super::backend::{KinematicBackend, SlideResult};
use super::body::presets;

/// Handle to identify rigid bodies
pub type RigidBodyHandle = rapier3d::prelude::RigidBodyHandle;

/// Handle to identify colliders
pub type ColliderHandle = rapier3d::prelude::ColliderHandle;

pub(crate) fn to_vector(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

pub(crate) fn to_vec3(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

/// Tuning for the kinematic character controller
///
/// Lengths are in meters, angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KccSettings {
    /// Gap preserved between the character and its surroundings
    pub offset: f32,
    /// Maximum climbable slope angle
    pub max_slope_climb_deg: f32,
    /// Minimum slope angle before automatic sliding starts
    pub min_slope_slide_deg: f32,
    /// Autostep maximum height (0 disables autostep)
    pub autostep_max_height: f32,
    /// Autostep minimum width
    pub autostep_min_width: f32,
    /// Snap-to-ground distance (0 disables snapping)
    pub snap_to_ground: f32,
}

impl Default for KccSettings {
    fn default() -> Self {
        Self {
            offset: 0.01,
            max_slope_climb_deg: 45.0,
            min_slope_slide_deg: 30.0,
            autostep_max_height: 0.3,
            autostep_min_width: 0.2,
            snap_to_ground: 0.2,
        }
    }
}

impl KccSettings {
    fn controller(&self, up: Vec3) -> KinematicCharacterController {
        let up = up.try_normalize().unwrap_or(Vec3::Y);
        let autostep = (self.autostep_max_height > 0.0).then(|| CharacterAutostep {
            max_height: CharacterLength::Absolute(self.autostep_max_height),
            min_width: CharacterLength::Absolute(self.autostep_min_width),
            include_dynamic_bodies: false,
        });
        let snap_to_ground =
            (self.snap_to_ground > 0.0).then(|| CharacterLength::Absolute(self.snap_to_ground));

        KinematicCharacterController {
            up: rapier3d::na::Unit::new_normalize(to_vector(up)),
            offset: CharacterLength::Absolute(self.offset.max(0.001)),
            slide: true,
            autostep,
            max_slope_climb_angle: self.max_slope_climb_deg.to_radians(),
            min_slope_slide_angle: self.min_slope_slide_deg.to_radians(),
            snap_to_ground,
            ..Default::default()
        }
    }
}

/// Physics world holding static level geometry and kinematic characters
///
/// Characters integrate their own gravity, so the pipeline runs without one.
/// Moves are queued as kinematic targets and committed by a single pipeline
/// step in `end_tick`.
pub struct PhysicsWorld {
    /// Integration parameters for the physics simulation
    integration_parameters: IntegrationParameters,

    /// Physics pipeline handles collision detection and solving
    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,

    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver for fast-moving objects
    ccd_solver: CCDSolver,

    /// Query pipeline used by the character controller
    query_pipeline: QueryPipeline,

    /// Rigid body set
    rigid_body_set: RigidBodySet,

    /// Collider set
    collider_set: ColliderSet,

    /// Character body -> its shape collider
    characters: HashMap<RigidBodyHandle, ColliderHandle>,

    /// Controller tuning shared by every character
    kcc: KccSettings,

    /// Geometry changed since the query pipeline was last refreshed
    queries_stale: bool,

    /// Characters moved since the last step
    pending: HashSet<RigidBodyHandle>,
}

impl PhysicsWorld {
    /// Create a new physics world with default settings
    pub fn new() -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        // Fixed timestep of 1/60 seconds (60 FPS)
        integration_parameters.dt = 1.0 / 60.0;

        Self {
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            characters: HashMap::new(),
            kcc: KccSettings::default(),
            queries_stale: true,
            pending: HashSet::new(),
        }
    }

    /// Step the physics simulation forward by one timestep
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &Vector::zeros(),
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
        self.queries_stale = false;
        self.pending.clear();
    }

    /// Characters moved since the last step
    pub fn pending_moves(&self) -> usize {
        self.pending.len()
    }

    /// Add a fixed ground slab whose top face is at `top`
    pub fn add_ground(&mut self, top: Vec3, half_width: Real, half_depth: Real) -> RigidBodyHandle {
        let handle = self
            .rigid_body_set
            .insert(presets::ground_body(top.x, top.y, top.z));
        self.collider_set.insert_with_parent(
            presets::ground_collider(half_width, half_depth),
            handle,
            &mut self.rigid_body_set,
        );
        self.queries_stale = true;
        handle
    }

    /// Add a capsule character with its feet at `feet`
    pub fn add_character(&mut self, feet: Vec3, radius: Real, height: Real) -> RigidBodyHandle {
        let handle = self
            .rigid_body_set
            .insert(presets::character_body(feet.x, feet.y, feet.z));
        let collider = self.collider_set.insert_with_parent(
            presets::character_collider(radius, height),
            handle,
            &mut self.rigid_body_set,
        );
        self.characters.insert(handle, collider);
        self.queries_stale = true;
        handle
    }

    /// Number of registered character bodies
    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    /// Replace the character controller tuning
    pub fn set_kcc_settings(&mut self, kcc: KccSettings) {
        self.kcc = kcc;
    }

    pub fn kcc_settings(&self) -> KccSettings {
        self.kcc
    }

    /// Cast a ray and return the first hit distance
    pub fn raycast(&self, origin: Vec3, dir: Vec3, max_toi: Real) -> Option<(ColliderHandle, Real)> {
        let ray = Ray::new(point![origin.x, origin.y, origin.z], to_vector(dir));
        self.query_pipeline.cast_ray(
            &self.rigid_body_set,
            &self.collider_set,
            &ray,
            max_toi,
            true,
            QueryFilter::default(),
        )
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl KinematicBackend for PhysicsWorld {
    type Handle = RigidBodyHandle;

    fn move_and_slide(
        &mut self,
        body: RigidBodyHandle,
        velocity: Vec3,
        up: Vec3,
        delta: f32,
    ) -> Option<SlideResult> {
        // A second move of the same body needs the first one committed
        if self.queries_stale || self.pending.contains(&body) {
            self.step();
        }

        let collider_handle = *self.characters.get(&body)?;
        let collider = self.collider_set.get(collider_handle)?;
        let start = *collider.position();
        let controller = self.kcc.controller(up);

        let movement = controller.move_shape(
            delta,
            &self.rigid_body_set,
            &self.collider_set,
            &self.query_pipeline,
            collider.shape(),
            &start,
            to_vector(velocity * delta),
            QueryFilter::default().exclude_rigid_body(body),
            |_| {},
        );

        let rigid_body = self.rigid_body_set.get_mut(body)?;
        let next = *rigid_body.translation() + movement.translation;
        rigid_body.set_next_kinematic_translation(next);
        self.pending.insert(body);

        let up = up.try_normalize().unwrap_or(Vec3::Y);
        let moved = to_vec3(&movement.translation);
        let vertical_speed = velocity.dot(up);

        // Horizontal speed follows what the slide actually allowed
        let mut resolved = if delta > 0.0 {
            let planar = moved - up * moved.dot(up);
            planar / delta + up * vertical_speed
        } else {
            velocity
        };

        if movement.grounded && vertical_speed < 0.0 {
            resolved -= up * vertical_speed;
        }
        // Head bump: the controller refused part of the upward move
        if vertical_speed > 0.0 && moved.dot(up) < vertical_speed * delta * 0.5 {
            resolved -= up * vertical_speed;
        }

        Some(SlideResult {
            velocity: resolved,
            grounded: movement.grounded,
        })
    }

    /// Position including a move queued this tick
    fn position(&self, body: RigidBodyHandle) -> Option<Vec3> {
        self.rigid_body_set
            .get(body)
            .map(|rigid_body| to_vec3(&rigid_body.next_position().translation.vector))
    }

    fn end_tick(&mut self) {
        if self.queries_stale || !self.pending.is_empty() {
            self.step();
        }
    }
}
