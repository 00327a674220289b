// Locomotion animation driver
//
// Maps movement ticks onto an external animation state machine: airborne
// characters travel to the air state, idle ones to the idle state with the
// move blend reset, moving ones to the move state with the blend set to the
// input magnitude.

use crate::game::movement::MovementEvent;
use glam::Vec2;
use log::warn;
use serde::{Deserialize, Serialize};

/// The engine's animation state machine, as seen by the driver
pub trait AnimationTarget {
    /// Request a transition to `state`
    fn travel(&mut self, state: &str);

    /// Set a numeric animation parameter
    fn set_parameter(&mut self, path: &str, value: f32);
}

/// State names and parameter paths of a character's animation tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationStates {
    pub idle: String,
    pub moving: String,
    /// Air state; top-down characters usually have none
    pub jump_air: Option<String>,
    /// Parameter receiving the input magnitude while moving
    pub blend_move_param: String,
}

impl Default for AnimationStates {
    fn default() -> Self {
        Self {
            idle: "idle".to_string(),
            moving: "move".to_string(),
            jump_air: None,
            blend_move_param: "parameters/move/blend_position".to_string(),
        }
    }
}

/// Drives an `AnimationTarget` from movement events
pub struct LocomotionAnimator {
    states: AnimationStates,
    target: Option<Box<dyn AnimationTarget>>,
    current: Option<String>,
    warned_missing_target: bool,
}

impl LocomotionAnimator {
    pub fn new(states: AnimationStates) -> Self {
        Self {
            states,
            target: None,
            current: None,
            warned_missing_target: false,
        }
    }

    pub fn with_target(mut self, target: Box<dyn AnimationTarget>) -> Self {
        self.target = Some(target);
        self
    }

    pub fn set_target(&mut self, target: Option<Box<dyn AnimationTarget>>) {
        self.target = target;
        self.warned_missing_target = false;
    }

    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    pub fn states(&self) -> &AnimationStates {
        &self.states
    }

    /// State requested by the last update
    pub fn current_state(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// React to a controller event; only `MovementChanged` matters here
    pub fn handle(&mut self, event: &MovementEvent) {
        if let MovementEvent::MovementChanged {
            input_direction,
            grounded,
            ..
        } = event
        {
            self.update(*input_direction, *grounded);
        }
    }

    /// Pick the locomotion state for one tick
    pub fn update(&mut self, input_direction: Vec2, grounded: bool) {
        let Some(target) = self.target.as_mut() else {
            if !self.warned_missing_target {
                warn!("No animation target assigned; locomotion animation is disabled");
                self.warned_missing_target = true;
            }
            return;
        };

        // An empty air state name counts as unset
        let air_state = self.states.jump_air.as_deref().filter(|name| !name.is_empty());

        let state = if let (false, Some(air)) = (grounded, air_state) {
            air.to_string()
        } else if input_direction.abs_diff_eq(Vec2::ZERO, 1e-5) {
            target.set_parameter(&self.states.blend_move_param, 0.0);
            self.states.idle.clone()
        } else {
            target.set_parameter(&self.states.blend_move_param, input_direction.length());
            self.states.moving.clone()
        };

        target.travel(&state);
        self.current = Some(state);
    }
}

impl Default for LocomotionAnimator {
    fn default() -> Self {
        Self::new(AnimationStates::default())
    }
}
