// JSON authoring format for ability graphs

use super::ability::{Ability, AbilityId};
use super::improvement::AbilityImprovement;
use super::node::{AbilityNode, NodeId};
use super::tree::AbilityTree;
use crate::engine::assets::IconHandle;
use crate::game::config::ConfigError;
use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// One improvement tier as authored
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImprovementDef {
    /// Defaults to the slot's level
    pub level: Option<i32>,
    pub description: String,
    pub cost: f32,
    /// Asset path of the icon
    pub icon: Option<String>,
}

/// One ability as authored
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityDef {
    pub key: String,
    /// Display name, defaults to the key
    pub name: Option<String>,
    pub description: String,
    pub icon: Option<String>,
    pub cost: f32,
    pub enabled: bool,
    pub current_level: i32,
    pub improvements: Vec<ImprovementDef>,
}

/// One graph node as authored
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeDef {
    pub key: String,
    /// Key of the wrapped ability
    pub ability: Option<String>,
    /// Keys of prerequisite nodes
    pub prerequisites: Vec<String>,
}

/// Whole ability graph as authored
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityTreeDef {
    pub abilities: Vec<AbilityDef>,
    pub nodes: Vec<NodeDef>,
}

/// A built graph plus the authoring keys of its entries
#[derive(Debug, Clone, Default)]
pub struct LoadedAbilityTree {
    pub tree: AbilityTree,
    abilities: HashMap<String, AbilityId>,
    nodes: HashMap<String, NodeId>,
}

impl LoadedAbilityTree {
    pub fn ability_id(&self, key: &str) -> Option<AbilityId> {
        self.abilities.get(key).copied()
    }

    pub fn node_id(&self, key: &str) -> Option<NodeId> {
        self.nodes.get(key).copied()
    }

    /// Authoring key of a node
    pub fn node_key(&self, id: NodeId) -> Option<&str> {
        self.nodes
            .iter()
            .find(|(_, node)| **node == id)
            .map(|(key, _)| key.as_str())
    }
}

impl ImprovementDef {
    fn build(&self, slot: usize) -> AbilityImprovement {
        let mut improvement = AbilityImprovement::new(self.level.unwrap_or(slot as i32 + 1))
            .with_description(self.description.clone())
            .with_cost(self.cost);
        improvement.set_icon(self.icon.as_deref().map(IconHandle::from_path));
        improvement
    }
}

impl AbilityDef {
    fn build(&self) -> Ability {
        let mut ability = Ability::new(self.name.clone().unwrap_or_else(|| self.key.clone()))
            .with_description(self.description.clone())
            .with_cost(self.cost)
            .with_improvements(
                self.improvements
                    .iter()
                    .enumerate()
                    .map(|(slot, improvement)| improvement.build(slot))
                    .collect(),
            );
        ability.set_icon(self.icon.as_deref().map(IconHandle::from_path));
        ability.set_enabled(self.enabled);
        ability.set_current_level(self.current_level);
        ability
    }
}

impl AbilityTreeDef {
    /// Resolve keys into ids and build the graph
    ///
    /// Unknown prerequisite keys become absent entries and unknown ability
    /// keys leave the node without an ability; both are logged. Duplicate
    /// keys are rejected.
    pub fn build(&self) -> Result<LoadedAbilityTree, ConfigError> {
        let mut loaded = LoadedAbilityTree::default();

        for def in &self.abilities {
            let id = loaded.tree.add_ability(def.build());
            if loaded.abilities.insert(def.key.clone(), id).is_some() {
                return Err(ConfigError::DuplicateKey {
                    kind: "ability",
                    key: def.key.clone(),
                });
            }
        }

        // Assign node ids first so prerequisites may point forward
        for (index, def) in self.nodes.iter().enumerate() {
            if loaded.nodes.insert(def.key.clone(), NodeId(index as u32)).is_some() {
                return Err(ConfigError::DuplicateKey {
                    kind: "node",
                    key: def.key.clone(),
                });
            }
        }

        for def in &self.nodes {
            let ability = def.ability.as_deref().and_then(|key| {
                let id = loaded.ability_id(key);
                if id.is_none() {
                    warn!("Node '{}' references unknown ability '{}'", def.key, key);
                }
                id
            });

            let mut node = AbilityNode::new(ability);
            for key in &def.prerequisites {
                let prerequisite = loaded.node_id(key);
                if prerequisite.is_none() {
                    warn!("Node '{}' references unknown prerequisite '{}'", def.key, key);
                }
                node.add_prerequisite(prerequisite);
            }
            loaded.tree.add_node(node);
        }

        Ok(loaded)
    }
}

/// Parse, build and validate an ability graph from JSON text
pub fn ability_tree_from_json(json: &str) -> Result<LoadedAbilityTree, ConfigError> {
    let def: AbilityTreeDef = serde_json::from_str(json)?;
    let loaded = def.build()?;
    loaded.tree.validate()?;
    Ok(loaded)
}

/// Load an ability graph from a JSON file
pub fn load_ability_tree(path: impl AsRef<Path>) -> Result<LoadedAbilityTree> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("read ability tree: {}", path.display()))?;
    ability_tree_from_json(&text)
        .with_context(|| format!("build ability tree: {}", path.display()))
}
