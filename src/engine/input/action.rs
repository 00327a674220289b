// Game action definitions

use serde::{Deserialize, Serialize};

/// Represents all in-game actions a character controller can read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    MoveForward,
    MoveBackward,
    Jump,

    // Combat
    Attack1,
    Attack2,
    Dodge,

    // Meta actions
    Interact,
    Pause,
    Menu,
}

impl Action {
    /// Every action, in declaration order
    pub const ALL: [Action; 11] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::MoveForward,
        Action::MoveBackward,
        Action::Jump,
        Action::Attack1,
        Action::Attack2,
        Action::Dodge,
        Action::Interact,
        Action::Pause,
        Action::Menu,
    ];

    /// Engine-side action name used when nothing else is configured
    pub fn default_name(self) -> &'static str {
        match self {
            Self::MoveLeft => "move_left",
            Self::MoveRight => "move_right",
            Self::MoveForward => "move_forward",
            Self::MoveBackward => "move_backward",
            Self::Jump => "move_jump",
            Self::Attack1 => "attack_1",
            Self::Attack2 => "attack_2",
            Self::Dodge => "dodge",
            Self::Interact => "interact",
            Self::Pause => "pause",
            Self::Menu => "menu",
        }
    }

    /// Check if this is one of the four directional actions
    pub fn is_directional(self) -> bool {
        matches!(
            self,
            Self::MoveLeft | Self::MoveRight | Self::MoveForward | Self::MoveBackward
        )
    }
}
