// Variable-height jump

use super::settings::PlatformerSettings;
use crate::engine::input::ButtonState;

/// Where a jump stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpPhase {
    /// On the floor, no jump in progress
    Grounded,
    /// Rising with the button held, hold force still available
    AscendingHeld,
    /// In the air without hold force
    Airborne,
}

/// Hold timer and held flag of the current jump
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JumpState {
    held: bool,
    hold_elapsed: f32,
}

impl JumpState {
    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn hold_elapsed(&self) -> f32 {
        self.hold_elapsed
    }

    pub fn phase(&self, grounded: bool) -> JumpPhase {
        if self.held {
            JumpPhase::AscendingHeld
        } else if grounded {
            JumpPhase::Grounded
        } else {
            JumpPhase::Airborne
        }
    }

    /// Apply this tick's jump input to the speed along the up axis
    ///
    /// Pressing on the floor launches at `jump_force`. Holding in the air
    /// adds `jump_hold_force` until the hold time runs out. Releasing while
    /// still rising multiplies the speed by `jump_release_cut_factor`.
    pub fn update(
        &mut self,
        vertical_speed: f32,
        grounded: bool,
        jump: ButtonState,
        settings: &PlatformerSettings,
        delta: f32,
    ) -> f32 {
        let mut vertical_speed = vertical_speed;

        if grounded && jump.just_pressed {
            vertical_speed = settings.jump_force();
            self.hold_elapsed = 0.0;
            self.held = true;
        }

        if self.held {
            if grounded && !jump.just_pressed {
                // Landed
                self.held = false;
            } else if jump.just_released {
                if vertical_speed > 0.0 {
                    vertical_speed *= settings.jump_release_cut_factor();
                }
                self.held = false;
            } else if jump.pressed && self.hold_elapsed < settings.max_jump_hold_time() && !grounded
            {
                vertical_speed += settings.jump_hold_force() * delta;
                self.hold_elapsed += delta;
            } else if self.hold_elapsed >= settings.max_jump_hold_time() {
                self.held = false;
            }
        }

        vertical_speed
    }
}
