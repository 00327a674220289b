// Charged attack timer

use crate::core::math::clamp;
use crate::engine::input::ButtonState;

/// Which attack button a charge belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackSlot {
    Primary,
    Secondary,
}

/// Charge state of one attack button
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AttackCharge {
    charging: bool,
    elapsed: f32,
}

impl AttackCharge {
    pub fn is_charging(&self) -> bool {
        self.charging
    }

    /// Current charge in [0, 1]; 0 when not charging
    pub fn level(&self, charge_time: f32) -> f32 {
        if self.charging {
            clamp(self.elapsed / charge_time, 0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Advance the charge, returns the charge level on the release tick
    pub fn update(&mut self, button: ButtonState, charge_time: f32, delta: f32) -> Option<f32> {
        if button.just_pressed {
            self.charging = true;
            self.elapsed = 0.0;
        }

        if !self.charging {
            return None;
        }

        if button.pressed {
            self.elapsed += delta;
            None
        } else {
            let level = self.level(charge_time);
            self.charging = false;
            self.elapsed = 0.0;
            Some(level)
        }
    }
}
