// Action state tracking between engine input events and controller ticks

use super::action::Action;
use super::config::ActionNames;
use super::snapshot::{ButtonState, InputSnapshot};
use glam::Vec2;
use log::debug;
use std::collections::HashSet;

/// Pressed/just-pressed/just-released bookkeeping for one character
#[derive(Debug, Default)]
pub struct ActionState {
    /// Actions that are currently pressed
    pressed: HashSet<Action>,

    /// Actions that went down since the last `end_tick`
    just_pressed: HashSet<Action>,

    /// Actions that went up since the last `end_tick`
    just_released: HashSet<Action>,
}

impl ActionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was just pressed this tick
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this tick
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Register an action press
    pub fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release
    pub fn release(&mut self, action: Action) {
        if self.pressed.remove(&action) {
            self.just_released.insert(action);
        }
    }

    /// Register a press by engine action name; unknown names are ignored
    pub fn press_named(&mut self, names: &ActionNames, name: &str) -> Option<Action> {
        let action = names.action_for(name);
        match action {
            Some(action) => self.press(action),
            None => debug!("Ignoring press of unbound action name '{}'", name),
        }
        action
    }

    /// Register a release by engine action name; unknown names are ignored
    pub fn release_named(&mut self, names: &ActionNames, name: &str) -> Option<Action> {
        let action = names.action_for(name);
        if let Some(action) = action {
            self.release(action);
        }
        action
    }

    /// Clear the per-tick edges
    /// Call this once per tick after the controller has consumed the snapshot
    pub fn end_tick(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Button state of a single action
    pub fn button(&self, action: Action) -> ButtonState {
        ButtonState {
            pressed: self.is_pressed(action),
            just_pressed: self.just_pressed(action),
            just_released: self.just_released(action),
        }
    }

    /// Movement vector from the four directional actions
    ///
    /// x grows to the right, y grows backward; diagonals are normalized.
    pub fn direction(&self) -> Vec2 {
        let strength = |action| if self.is_pressed(action) { 1.0 } else { 0.0 };

        let raw = Vec2::new(
            strength(Action::MoveRight) - strength(Action::MoveLeft),
            strength(Action::MoveBackward) - strength(Action::MoveForward),
        );
        raw.clamp_length_max(1.0)
    }

    /// Sample everything the movement controller reads this tick
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            direction: self.direction(),
            jump: self.button(Action::Jump),
            attack1: self.button(Action::Attack1),
            attack2: self.button(Action::Attack2),
            dodge: self.button(Action::Dodge),
        }
    }
}
