// Character movement
//
// A `MovementController` turns one `InputSnapshot` per physics tick into a
// velocity, a facing and a list of events. It never touches the physics
// engine; the character adapter hands the velocity to a `KinematicBackend`.
//
// - `settings`: tunables with clamping setters, per-mode defaults
// - `gravity`: environment/custom gravity resolution and fall clamp
// - `view`: camera basis used to map 2D input onto the movement plane
// - `acceleration`, `jump`, `charge`: the per-tick phase state machines
// - `controller`: ties the phases together in tick order

pub mod acceleration;
pub mod charge;
pub mod controller;
pub mod gravity;
pub mod jump;
pub mod settings;
pub mod view;

// Re-export commonly used types
pub use charge::AttackSlot;
pub use controller::{MovementController, MovementEvent, TickOutput};
pub use gravity::{EnvironmentGravity, Gravity};
pub use jump::JumpPhase;
pub use settings::{
    GravitySettings, MovementMode, MovementSettings, PlatformerSettings, TopDownSettings,
};
pub use view::ViewBasis;
