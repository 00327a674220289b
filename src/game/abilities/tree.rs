// Ability dependency graph: registry plus unlock/activation protocol

use super::ability::{Ability, AbilityId};
use super::container::{BehaviorHost, ContainerId};
use super::error::AbilityGraphError;
use super::node::{AbilityNode, NodeId};
use log::{debug, info, warn};

/// Flat registry of abilities and the nodes that gate them
///
/// Several nodes may wrap the same ability. The graph shape lives entirely in
/// each node's prerequisite list, so diamonds are allowed.
#[derive(Debug, Clone, Default)]
pub struct AbilityTree {
    abilities: Vec<Ability>,
    nodes: Vec<AbilityNode>,
}

impl AbilityTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an ability and return its id
    pub fn add_ability(&mut self, ability: Ability) -> AbilityId {
        self.abilities.push(ability);
        AbilityId((self.abilities.len() - 1) as u32)
    }

    /// Register a node and return its id
    pub fn add_node(&mut self, node: AbilityNode) -> NodeId {
        self.nodes.push(node);
        NodeId((self.nodes.len() - 1) as u32)
    }

    pub fn ability(&self, id: AbilityId) -> Option<&Ability> {
        self.abilities.get(id.index())
    }

    pub fn ability_mut(&mut self, id: AbilityId) -> Option<&mut Ability> {
        self.abilities.get_mut(id.index())
    }

    /// Look up an ability by display name
    pub fn find_ability(&self, name: &str) -> Option<AbilityId> {
        self.abilities
            .iter()
            .position(|ability| ability.name() == name)
            .map(|index| AbilityId(index as u32))
    }

    pub fn node(&self, id: NodeId) -> Option<&AbilityNode> {
        self.nodes.get(id.index())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut AbilityNode> {
        self.nodes.get_mut(id.index())
    }

    /// All nodes in registry order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &AbilityNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index as u32), node))
    }

    /// All abilities in registry order
    pub fn abilities(&self) -> impl Iterator<Item = (AbilityId, &Ability)> {
        self.abilities
            .iter()
            .enumerate()
            .map(|(index, ability)| (AbilityId(index as u32), ability))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn ability_count(&self) -> usize {
        self.abilities.len()
    }

    /// Ability wrapped by `node`, if both exist
    pub fn node_ability(&self, node: NodeId) -> Option<&Ability> {
        self.node(node)?.ability().and_then(|id| self.ability(id))
    }

    /// Whether the ability behind `node` is enabled; absent anything is `false`
    pub fn is_unlocked(&self, node: NodeId) -> bool {
        self.node_ability(node).is_some_and(Ability::is_enabled)
    }

    /// Whether every prerequisite of `node` is unlocked
    ///
    /// Roots are always ready. An absent node is never ready.
    pub fn can_unlock(&self, node: NodeId) -> bool {
        self.node(node)
            .is_some_and(|node| node.can_unlock(|prerequisite| self.is_unlocked(prerequisite)))
    }

    /// Unlock the ability behind `node`
    ///
    /// Returns `false` without touching anything if the node or its ability is
    /// absent, the ability is already enabled, or a prerequisite is locked.
    pub fn try_unlock(&mut self, node: NodeId) -> bool {
        let Some(ability_id) = self.node(node).map(AbilityNode::ability) else {
            debug!("Unlock rejected: node {:?} does not exist", node);
            return false;
        };
        let Some(ability_id) = ability_id else {
            debug!("Unlock rejected: node {:?} has no ability", node);
            return false;
        };
        let Some(ability) = self.ability(ability_id) else {
            debug!("Unlock rejected: ability {:?} does not exist", ability_id);
            return false;
        };
        if ability.is_enabled() {
            debug!("Unlock rejected: '{}' is already unlocked", ability.name());
            return false;
        }
        if !self.can_unlock(node) {
            debug!("Unlock rejected: '{}' has locked prerequisites", ability.name());
            return false;
        }

        match self.ability_mut(ability_id) {
            Some(ability) => {
                ability.set_enabled(true);
                info!("Unlocked ability '{}'", ability.name());
                true
            }
            None => false,
        }
    }

    /// Unlock `node`, then activate the host container bound to its ability
    ///
    /// Returns the activated container. A successful unlock with no matching
    /// container is a passive ability and yields `None`; the unlock persists.
    pub fn try_activate(&mut self, node: NodeId, host: &mut BehaviorHost) -> Option<ContainerId> {
        if !self.try_unlock(node) {
            return None;
        }

        let ability_id = self.node(node)?.ability()?;
        let Some(container_id) = host.find_for(ability_id) else {
            warn!(
                "Ability '{}' has no behavior container; treating it as passive",
                self.ability(ability_id).map(Ability::name).unwrap_or_default()
            );
            return None;
        };

        let container = host.get_mut(container_id)?;
        container.on_activated();
        info!("Activated container {:?} for ability {:?}", container_id, ability_id);
        Some(container_id)
    }

    /// Run the deactivation hook of `container`; absent input is a no-op
    pub fn deactivate(&self, host: &mut BehaviorHost, container: Option<ContainerId>) {
        let Some(container_id) = container else {
            return;
        };
        match host.get_mut(container_id) {
            Some(container) => {
                container.on_deactivated();
                info!("Deactivated container {:?}", container_id);
            }
            None => debug!("Deactivate ignored: container {:?} does not exist", container_id),
        }
    }

    /// Nodes without prerequisites, in registry order
    pub fn root_nodes(&self) -> Vec<NodeId> {
        self.nodes()
            .filter(|(_, node)| node.is_root())
            .map(|(id, _)| id)
            .collect()
    }

    /// Prerequisite entries that are absent or point at missing nodes
    ///
    /// Each entry is `(node, index into its prerequisite list)`.
    pub fn dangling_prerequisites(&self) -> Vec<(NodeId, usize)> {
        let mut dangling = Vec::new();
        for (id, node) in self.nodes() {
            for (index, prerequisite) in node.prerequisites().iter().enumerate() {
                let resolves = prerequisite.is_some_and(|target| self.node(target).is_some());
                if !resolves {
                    dangling.push((id, index));
                }
            }
        }
        dangling
    }

    /// Check the graph for prerequisite cycles
    ///
    /// Dangling prerequisites are not errors (they fail closed at unlock time)
    /// but are logged as warnings.
    pub fn validate(&self) -> Result<(), AbilityGraphError> {
        for (node, index) in self.dangling_prerequisites() {
            warn!("Node {:?} prerequisite #{} does not resolve", node, index);
        }

        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }

        let mut marks = vec![Mark::Unvisited; self.nodes.len()];

        for start in 0..self.nodes.len() {
            if marks[start] != Mark::Unvisited {
                continue;
            }

            // (node index, next prerequisite to look at)
            let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
            marks[start] = Mark::InProgress;

            while let Some(frame) = stack.last_mut() {
                let (current, cursor) = *frame;
                let prerequisites = self.nodes[current].prerequisites();

                if cursor >= prerequisites.len() {
                    marks[current] = Mark::Done;
                    stack.pop();
                    continue;
                }
                frame.1 += 1;

                let Some(next) = prerequisites[cursor]
                    .map(|id| id.index())
                    .filter(|index| *index < self.nodes.len())
                else {
                    continue;
                };

                match marks[next] {
                    Mark::Unvisited => {
                        marks[next] = Mark::InProgress;
                        stack.push((next, 0));
                    }
                    Mark::InProgress => {
                        let from = stack
                            .iter()
                            .position(|(index, _)| *index == next)
                            .unwrap_or(0);
                        let nodes = stack[from..]
                            .iter()
                            .map(|(index, _)| NodeId(*index as u32))
                            .collect();
                        return Err(AbilityGraphError::Cycle { nodes });
                    }
                    Mark::Done => {}
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::abilities::container::tests::recorder;
    use crate::game::abilities::container::AbilityContainer;

    /// Diamond: D needs B and C, both need A
    fn diamond() -> (AbilityTree, [NodeId; 4]) {
        let mut tree = AbilityTree::new();
        let a = tree.add_ability(Ability::new("A"));
        let b = tree.add_ability(Ability::new("B"));
        let c = tree.add_ability(Ability::new("C"));
        let d = tree.add_ability(Ability::new("D"));

        let na = tree.add_node(AbilityNode::new(Some(a)));
        let nb = tree.add_node(AbilityNode::with_prerequisites(b, &[na]));
        let nc = tree.add_node(AbilityNode::with_prerequisites(c, &[na]));
        let nd = tree.add_node(AbilityNode::with_prerequisites(d, &[nb, nc]));
        (tree, [na, nb, nc, nd])
    }

    #[test]
    fn test_root_can_unlock() {
        let (tree, [na, ..]) = diamond();
        assert!(tree.can_unlock(na));
        assert_eq!(tree.root_nodes(), vec![na]);
    }

    #[test]
    fn test_missing_node_cannot_unlock() {
        let (mut tree, _) = diamond();
        assert!(!tree.can_unlock(NodeId(99)));
        assert!(!tree.try_unlock(NodeId(99)));
    }

    #[test]
    fn test_diamond_unlock_order() {
        let (mut tree, [na, nb, nc, nd]) = diamond();

        assert!(!tree.try_unlock(nd));
        assert!(!tree.try_unlock(nb));
        assert!(tree.try_unlock(na));
        assert!(tree.try_unlock(nc));
        assert!(!tree.try_unlock(nd));
        assert!(tree.try_unlock(nb));
        assert!(tree.try_unlock(nd));
        assert!(tree.is_unlocked(nd));
    }

    #[test]
    fn test_unlock_is_not_repeatable() {
        let (mut tree, [na, ..]) = diamond();
        assert!(tree.try_unlock(na));
        let before = tree.node_ability(na).cloned();
        assert!(!tree.try_unlock(na));
        assert_eq!(tree.node_ability(na).cloned(), before);
    }

    #[test]
    fn test_prerequisite_without_ability_fails_closed() {
        let mut tree = AbilityTree::new();
        let b = tree.add_ability(Ability::new("B"));
        let empty = tree.add_node(AbilityNode::new(None));
        let nb = tree.add_node(AbilityNode::with_prerequisites(b, &[empty]));

        assert!(!tree.can_unlock(nb));
        assert!(!tree.try_unlock(empty));
    }

    #[test]
    fn test_prerequisite_with_missing_ability_fails_closed() {
        let mut tree = AbilityTree::new();
        let b = tree.add_ability(Ability::new("B"));
        let ghost = tree.add_node(AbilityNode::new(Some(AbilityId(42))));
        let nb = tree.add_node(AbilityNode::with_prerequisites(b, &[ghost]));
        assert!(!tree.can_unlock(nb));
        assert!(!tree.try_unlock(ghost));
    }

    #[test]
    fn test_dangling_prerequisite_fails_closed() {
        let mut tree = AbilityTree::new();
        let a = tree.add_ability(Ability::new("A"));
        let mut node = AbilityNode::new(Some(a));
        node.add_prerequisite(Some(NodeId(7)));
        node.add_prerequisite(None);
        let na = tree.add_node(node);

        assert!(!tree.can_unlock(na));
        assert_eq!(tree.dangling_prerequisites(), vec![(na, 0), (na, 1)]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_two_prerequisites_need_both_enabled() {
        let (mut tree, [na, nb, nc, nd]) = diamond();
        tree.try_unlock(na);
        tree.try_unlock(nb);
        assert!(!tree.can_unlock(nd));
        tree.try_unlock(nc);
        assert!(tree.can_unlock(nd));
    }

    #[test]
    fn test_shared_ability_between_nodes() {
        let mut tree = AbilityTree::new();
        let a = tree.add_ability(Ability::new("A"));
        let first = tree.add_node(AbilityNode::new(Some(a)));
        let second = tree.add_node(AbilityNode::new(Some(a)));

        assert!(tree.try_unlock(first));
        // Same ability, already enabled
        assert!(!tree.try_unlock(second));
        assert!(tree.is_unlocked(second));
    }

    #[test]
    fn test_try_activate_runs_matching_container() {
        let (mut tree, [na, ..]) = diamond();
        let a = tree.node(na).unwrap().ability().unwrap();
        let mut host = BehaviorHost::new();
        let (behavior, log) = recorder();
        let container = host.add(AbilityContainer::new(Some(a), behavior));

        assert_eq!(tree.try_activate(na, &mut host), Some(container));
        assert!(host.get(container).unwrap().is_active());
        assert_eq!(*log.borrow(), vec!["activated"]);

        tree.deactivate(&mut host, Some(container));
        assert!(!host.get(container).unwrap().is_active());
        // Deactivation never removes the container
        assert_eq!(host.len(), 1);
    }

    #[test]
    fn test_try_activate_passive_ability() {
        let (mut tree, [na, ..]) = diamond();
        let mut host = BehaviorHost::new();
        let (behavior, log) = recorder();
        host.add(AbilityContainer::new(Some(AbilityId(3)), behavior));

        assert_eq!(tree.try_activate(na, &mut host), None);
        assert!(tree.is_unlocked(na));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_try_activate_locked_node() {
        let (mut tree, [_, nb, ..]) = diamond();
        let b = tree.node(nb).unwrap().ability().unwrap();
        let mut host = BehaviorHost::new();
        let (behavior, log) = recorder();
        host.add(AbilityContainer::new(Some(b), behavior));

        assert_eq!(tree.try_activate(nb, &mut host), None);
        assert!(!tree.is_unlocked(nb));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_try_activate_already_unlocked() {
        let (mut tree, [na, ..]) = diamond();
        let a = tree.node(na).unwrap().ability().unwrap();
        let mut host = BehaviorHost::new();
        let (behavior, _) = recorder();
        host.add(AbilityContainer::new(Some(a), behavior));

        assert!(tree.try_activate(na, &mut host).is_some());
        assert_eq!(tree.try_activate(na, &mut host), None);
    }

    #[test]
    fn test_deactivate_absent_is_noop() {
        let tree = AbilityTree::new();
        let mut host = BehaviorHost::new();
        tree.deactivate(&mut host, None);
        tree.deactivate(&mut host, Some(ContainerId(3)));
        assert!(host.is_empty());
    }

    #[test]
    fn test_validate_diamond_is_acyclic() {
        let (tree, _) = diamond();
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_validate_self_loop() {
        let mut tree = AbilityTree::new();
        let a = tree.add_ability(Ability::new("A"));
        let na = tree.add_node(AbilityNode::new(Some(a)));
        tree.node_mut(na).unwrap().add_prerequisite(Some(na));

        assert_eq!(
            tree.validate(),
            Err(AbilityGraphError::Cycle { nodes: vec![na] })
        );
    }

    #[test]
    fn test_validate_three_cycle() {
        let mut tree = AbilityTree::new();
        let a = tree.add_ability(Ability::new("A"));
        let n0 = tree.add_node(AbilityNode::new(Some(a)));
        let n1 = tree.add_node(AbilityNode::with_prerequisites(a, &[n0]));
        let n2 = tree.add_node(AbilityNode::with_prerequisites(a, &[n1]));
        tree.node_mut(n0).unwrap().add_prerequisite(Some(n2));

        match tree.validate() {
            Err(AbilityGraphError::Cycle { nodes }) => {
                assert_eq!(nodes.len(), 3);
                for node in [n0, n1, n2] {
                    assert!(nodes.contains(&node));
                }
            }
            other => panic!("expected a cycle, got {other:?}"),
        }
    }

    #[test]
    fn test_find_ability_by_name() {
        let (tree, _) = diamond();
        assert_eq!(tree.find_ability("C"), Some(AbilityId(2)));
        assert_eq!(tree.find_ability("Z"), None);
    }
}
