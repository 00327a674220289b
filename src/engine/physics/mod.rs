// Physics adapter using rapier3d

mod backend;
pub mod body;
mod world;

pub use backend::{FlatFloor, KinematicBackend, SlideResult};
pub use world::{ColliderHandle, KccSettings, PhysicsWorld, RigidBodyHandle};
