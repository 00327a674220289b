// Input handling
//
// The engine's input system stays outside this crate. Engine code feeds
// action presses and releases (by configurable name) into an `ActionState`,
// which produces one `InputSnapshot` per physics tick for the controller.
//
// ## Architecture
//
// - `action`: The actions a character controller understands
// - `config`: Mapping between actions and engine action names
// - `state`: Pressed / just-pressed / just-released bookkeeping
// - `snapshot`: The per-tick sample handed to the movement controller

pub mod action;
pub mod config;
pub mod snapshot;
pub mod state;

// Re-export commonly used types
pub use action::Action;
pub use config::ActionNames;
pub use snapshot::{ButtonState, InputSnapshot};
pub use state::ActionState;
