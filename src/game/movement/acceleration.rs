// Eased horizontal acceleration and deceleration

use super::settings::MovementSettings;
use crate::core::math::{clamp, ease_in, ease_out};
use glam::Vec3;

/// Phase timers for horizontal speed changes
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HorizontalEasing {
    is_accelerating: bool,
    acceleration_elapsed: f32,
    deceleration_elapsed: f32,
    velocity_at_phase_start: Vec3,
    target_at_phase_start: Vec3,
}

impl HorizontalEasing {
    pub fn is_accelerating(&self) -> bool {
        self.is_accelerating
    }

    /// Next horizontal velocity
    ///
    /// With input the velocity eases from the phase-start velocity toward
    /// `target`; a fresh press or a direction reversal restarts the phase.
    /// Without input it eases from the phase-start velocity to zero.
    pub fn update(
        &mut self,
        horizontal: Vec3,
        target: Vec3,
        has_input: bool,
        settings: &MovementSettings,
        delta: f32,
    ) -> Vec3 {
        if has_input {
            let reversed = target.dot(self.target_at_phase_start) < 0.0;
            if !self.is_accelerating || reversed {
                self.is_accelerating = true;
                self.acceleration_elapsed = 0.0;
                self.velocity_at_phase_start = horizontal;
                self.target_at_phase_start = target;
            }
            self.acceleration_elapsed += delta;

            let t = clamp(self.acceleration_elapsed / settings.acceleration_time(), 0.0, 1.0);
            let eased = ease_in(t, settings.acceleration_curve_intensity());
            self.velocity_at_phase_start.lerp(target, eased)
        } else {
            if self.is_accelerating {
                self.is_accelerating = false;
                self.deceleration_elapsed = 0.0;
                self.velocity_at_phase_start = horizontal;
            }
            self.deceleration_elapsed += delta;

            let t = clamp(self.deceleration_elapsed / settings.deceleration_time(), 0.0, 1.0);
            let eased = ease_out(t, settings.deceleration_curve_intensity());
            self.velocity_at_phase_start.lerp(Vec3::ZERO, eased)
        }
    }
}
