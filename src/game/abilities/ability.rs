// Unlockable ability with a fixed ladder of improvements

use super::improvement::{AbilityImprovement, MAX_LEVEL};
use crate::core::math::clamp;
use crate::engine::assets::IconHandle;

/// Number of improvement slots every ability carries
pub const IMPROVEMENT_SLOTS: usize = MAX_LEVEL as usize;

fn default_slots() -> [AbilityImprovement; IMPROVEMENT_SLOTS] {
    std::array::from_fn(|slot| AbilityImprovement::new(slot as i32 + 1))
}

/// Stable identifier of an ability inside an `AbilityTree`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AbilityId(pub(crate) u32);

impl AbilityId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// An unlockable capability
///
/// Slot `i` of the improvement ladder corresponds to level `i + 1`.
/// Level 0 means no improvement is active.
#[derive(Debug, Clone, PartialEq)]
pub struct Ability {
    name: String,
    description: String,
    icon: Option<IconHandle>,
    enabled: bool,
    cost: f32,
    improvements: [AbilityImprovement; IMPROVEMENT_SLOTS],
    current_level: i32,
}

impl Ability {
    /// Locked ability with default improvements
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            icon: None,
            enabled: false,
            cost: 0.0,
            improvements: default_slots(),
            current_level: 0,
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

    pub fn with_improvements(mut self, improvements: Vec<AbilityImprovement>) -> Self {
        self.set_improvements(improvements);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn icon(&self) -> Option<IconHandle> {
        self.icon
    }

    pub fn set_icon(&mut self, icon: Option<IconHandle>) {
        self.icon = icon;
    }

    /// Unlocked abilities are enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Direct write access for editors and save games
    ///
    /// Gameplay unlocks go through `AbilityTree::try_unlock`.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn cost(&self) -> f32 {
        self.cost
    }

    /// Set the unlock cost; negative values become 0
    pub fn set_cost(&mut self, cost: f32) {
        self.cost = cost.max(0.0);
    }

    pub fn improvements(&self) -> &[AbilityImprovement; IMPROVEMENT_SLOTS] {
        &self.improvements
    }

    /// Replace the improvement ladder
    ///
    /// Missing slots are filled with a default improvement for that level,
    /// extra entries are dropped.
    pub fn set_improvements(&mut self, improvements: Vec<AbilityImprovement>) {
        let mut slots = default_slots();
        for (slot, improvement) in slots.iter_mut().zip(improvements) {
            *slot = improvement;
        }
        self.improvements = slots;
    }

    /// Improvement at `level` (1..=10)
    pub fn improvement(&self, level: i32) -> Option<&AbilityImprovement> {
        let slot = usize::try_from(level).ok()?.checked_sub(1)?;
        self.improvements.get(slot)
    }

    pub fn improvement_mut(&mut self, level: i32) -> Option<&mut AbilityImprovement> {
        let slot = usize::try_from(level).ok()?.checked_sub(1)?;
        self.improvements.get_mut(slot)
    }

    pub fn current_level(&self) -> i32 {
        self.current_level
    }

    /// Set the current level, clamped to 0..=10
    pub fn set_current_level(&mut self, level: i32) {
        self.current_level = clamp(level, 0, MAX_LEVEL);
    }

    /// The improvement for the current level, `None` at level 0
    pub fn active_improvement(&self) -> Option<&AbilityImprovement> {
        self.improvement(self.current_level)
    }
}
