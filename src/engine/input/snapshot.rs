// Per-tick input sample handed to the movement controller

use glam::Vec2;

/// Edge and level state of one button for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// Button is down this tick
    pub pressed: bool,
    /// Button went down this tick
    pub just_pressed: bool,
    /// Button went up this tick
    pub just_released: bool,
}

impl ButtonState {
    /// Button untouched
    pub const RELEASED: Self = Self {
        pressed: false,
        just_pressed: false,
        just_released: false,
    };

    /// First tick of a press
    pub const fn pressed_now() -> Self {
        Self {
            pressed: true,
            just_pressed: true,
            just_released: false,
        }
    }

    /// Held since an earlier tick
    pub const fn held() -> Self {
        Self {
            pressed: true,
            just_pressed: false,
            just_released: false,
        }
    }

    /// Tick on which the button was let go
    pub const fn released_now() -> Self {
        Self {
            pressed: false,
            just_pressed: false,
            just_released: true,
        }
    }
}

/// Everything the controller reads from the input system in one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Movement direction, x = right, y = backward, length at most 1
    pub direction: Vec2,
    pub jump: ButtonState,
    pub attack1: ButtonState,
    pub attack2: ButtonState,
    pub dodge: ButtonState,
}

impl InputSnapshot {
    /// No input at all
    pub fn idle() -> Self {
        Self::default()
    }

    /// Only a movement direction (clamped to unit length)
    pub fn moving(direction: Vec2) -> Self {
        Self {
            direction: direction.clamp_length_max(1.0),
            ..Self::default()
        }
    }

    pub fn with_jump(mut self, jump: ButtonState) -> Self {
        self.jump = jump;
        self
    }

    pub fn with_attack1(mut self, attack: ButtonState) -> Self {
        self.attack1 = attack;
        self
    }

    pub fn with_attack2(mut self, attack: ButtonState) -> Self {
        self.attack2 = attack;
        self
    }

    pub fn with_dodge(mut self, dodge: ButtonState) -> Self {
        self.dodge = dodge;
        self
    }

    /// Check if the direction counts as movement input
    pub fn has_direction(&self) -> bool {
        self.direction.length_squared() > crate::core::math::DIRECTION_EPSILON
    }
}
