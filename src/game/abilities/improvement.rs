// One upgrade tier of an ability

use crate::core::math::clamp;
use crate::engine::assets::IconHandle;

/// Lowest improvement level
pub const MIN_LEVEL: i32 = 1;
/// Highest improvement level, also the number of slots per ability
pub const MAX_LEVEL: i32 = 10;

/// Parameters of a single improvement tier
#[derive(Debug, Clone, PartialEq)]
pub struct AbilityImprovement {
    level: i32,
    description: String,
    cost: f32,
    icon: Option<IconHandle>,
}

impl AbilityImprovement {
    /// Improvement for `level` (clamped to 1..=10) with no description or cost
    pub fn new(level: i32) -> Self {
        Self {
            level: clamp(level, MIN_LEVEL, MAX_LEVEL),
            description: String::new(),
            cost: 0.0,
            icon: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_cost(mut self, cost: f32) -> Self {
        self.set_cost(cost);
        self
    }

    pub fn with_icon(mut self, icon: IconHandle) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    /// Set the level, clamped to 1..=10
    pub fn set_level(&mut self, level: i32) {
        self.level = clamp(level, MIN_LEVEL, MAX_LEVEL);
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn cost(&self) -> f32 {
        self.cost
    }

    /// Set the cost; negative or NaN costs become 0
    pub fn set_cost(&mut self, cost: f32) {
        self.cost = cost.max(0.0);
    }

    pub fn icon(&self) -> Option<IconHandle> {
        self.icon
    }

    pub fn set_icon(&mut self, icon: Option<IconHandle>) {
        self.icon = icon;
    }
}

impl Default for AbilityImprovement {
    fn default() -> Self {
        Self::new(MIN_LEVEL)
    }
}
