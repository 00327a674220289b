// Behavior containers: the gameplay code bound to an unlocked ability
//
// A character owns a `BehaviorHost` holding its direct child containers.
// Activating a container runs its activation hook and starts processing it
// every tick; deactivating runs the hook and stops processing. Containers are
// never removed by the ability graph.

use super::ability::AbilityId;

/// Hooks implemented by ability gameplay code
pub trait AbilityBehavior {
    /// Called when the owning container becomes active
    fn on_activated(&mut self);

    /// Called when the owning container is deactivated
    fn on_deactivated(&mut self);

    /// Called every tick while the container is active
    fn process(&mut self, _delta: f32) {}
}

/// Stable identifier of a container inside a `BehaviorHost`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(pub(crate) u32);

/// Whether a container is being processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainerState {
    /// Not processed
    #[default]
    Dormant,
    /// Processed every tick
    Active,
}

/// A behavior bound to one ability
pub struct AbilityContainer {
    ability: Option<AbilityId>,
    behavior: Box<dyn AbilityBehavior>,
    state: ContainerState,
}

impl AbilityContainer {
    /// Dormant container running `behavior` for `ability`
    pub fn new(ability: Option<AbilityId>, behavior: Box<dyn AbilityBehavior>) -> Self {
        Self {
            ability,
            behavior,
            state: ContainerState::Dormant,
        }
    }

    pub fn ability(&self) -> Option<AbilityId> {
        self.ability
    }

    pub fn set_ability(&mut self, ability: Option<AbilityId>) {
        self.ability = ability;
    }

    pub fn state(&self) -> ContainerState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == ContainerState::Active
    }

    /// Start processing, then run the activation hook
    pub fn on_activated(&mut self) {
        self.state = ContainerState::Active;
        self.behavior.on_activated();
    }

    /// Run the deactivation hook, then stop processing
    pub fn on_deactivated(&mut self) {
        self.behavior.on_deactivated();
        self.state = ContainerState::Dormant;
    }

    /// Forward a tick to the behavior if active
    pub fn process(&mut self, delta: f32) {
        if self.is_active() {
            self.behavior.process(delta);
        }
    }
}

impl std::fmt::Debug for AbilityContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbilityContainer")
            .field("ability", &self.ability)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// A character's direct child containers, in insertion order
#[derive(Debug, Default)]
pub struct BehaviorHost {
    containers: Vec<AbilityContainer>,
}

impl BehaviorHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a container and return its id
    pub fn add(&mut self, container: AbilityContainer) -> ContainerId {
        self.containers.push(container);
        ContainerId((self.containers.len() - 1) as u32)
    }

    pub fn get(&self, id: ContainerId) -> Option<&AbilityContainer> {
        self.containers.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: ContainerId) -> Option<&mut AbilityContainer> {
        self.containers.get_mut(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// First container bound to `ability`
    pub fn find_for(&self, ability: AbilityId) -> Option<ContainerId> {
        self.containers
            .iter()
            .position(|container| container.ability == Some(ability))
            .map(|index| ContainerId(index as u32))
    }

    /// Ids of the containers currently processed
    pub fn active(&self) -> impl Iterator<Item = ContainerId> + '_ {
        self.containers
            .iter()
            .enumerate()
            .filter(|(_, container)| container.is_active())
            .map(|(index, _)| ContainerId(index as u32))
    }

    /// Tick every active container; dormant ones are skipped
    pub fn process(&mut self, delta: f32) {
        for container in &mut self.containers {
            container.process(delta);
        }
    }
}
