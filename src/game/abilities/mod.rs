// Ability system
//
// Abilities are unlocked by walking a dependency graph:
// - `improvement` / `ability`: the unlockable data and its upgrade ladder
// - `node`: an ability gated by prerequisite nodes
// - `tree`: the registry and the unlock/activate/deactivate protocol
// - `container`: gameplay behaviors bound to abilities on a character
// - `data`: JSON authoring format

pub mod ability;
pub mod container;
pub mod data;
mod error;
pub mod improvement;
pub mod node;
pub mod tree;

// Re-export commonly used types
pub use ability::{Ability, AbilityId, IMPROVEMENT_SLOTS};
pub use container::{AbilityBehavior, AbilityContainer, BehaviorHost, ContainerId, ContainerState};
pub use data::{ability_tree_from_json, load_ability_tree, AbilityTreeDef, LoadedAbilityTree};
pub use error::AbilityGraphError;
pub use improvement::AbilityImprovement;
pub use node::{AbilityNode, NodeId};
pub use tree::AbilityTree;
