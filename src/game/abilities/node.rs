// Graph node: an ability plus the nodes that must be unlocked first

use super::ability::AbilityId;

/// Stable identifier of a node inside an `AbilityTree`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// One vertex of the ability dependency graph
///
/// Prerequisite entries may be `None` (an authoring hole) or point at a node
/// that does not exist. Both count as unsatisfied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbilityNode {
    ability: Option<AbilityId>,
    prerequisites: Vec<Option<NodeId>>,
}

impl AbilityNode {
    pub fn new(ability: Option<AbilityId>) -> Self {
        Self {
            ability,
            prerequisites: Vec::new(),
        }
    }

    /// Node wrapping `ability` with the given prerequisite nodes
    pub fn with_prerequisites(ability: AbilityId, prerequisites: &[NodeId]) -> Self {
        Self {
            ability: Some(ability),
            prerequisites: prerequisites.iter().copied().map(Some).collect(),
        }
    }

    pub fn ability(&self) -> Option<AbilityId> {
        self.ability
    }

    pub fn set_ability(&mut self, ability: Option<AbilityId>) {
        self.ability = ability;
    }

    pub fn prerequisites(&self) -> &[Option<NodeId>] {
        &self.prerequisites
    }

    pub fn set_prerequisites(&mut self, prerequisites: Vec<Option<NodeId>>) {
        self.prerequisites = prerequisites;
    }

    pub fn add_prerequisite(&mut self, prerequisite: Option<NodeId>) {
        self.prerequisites.push(prerequisite);
    }

    /// Nodes without prerequisites are roots
    pub fn is_root(&self) -> bool {
        self.prerequisites.is_empty()
    }

    /// Whether every prerequisite is satisfied
    ///
    /// `is_unlocked` answers whether the ability behind a prerequisite node is
    /// enabled; it must return `false` for nodes or abilities that don't exist.
    pub fn can_unlock<F>(&self, is_unlocked: F) -> bool
    where
        F: Fn(NodeId) -> bool,
    {
        self.prerequisites
            .iter()
            .all(|prerequisite| prerequisite.is_some_and(&is_unlocked))
    }
}
