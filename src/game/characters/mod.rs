// Character system
//
// This module glues the movement controller, the ability graph and the
// animation driver to a body in a physics backend:
// - Character adapter running one physics tick at a time
// - Locomotion animation driver

pub mod animation;
pub mod character;

// Re-export commonly used types
pub use animation::{AnimationStates, AnimationTarget, LocomotionAnimator};
pub use character::Character;
