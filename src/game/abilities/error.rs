use super::node::NodeId;
use thiserror::Error;

/// Structural problems found while validating an ability graph
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbilityGraphError {
    /// Prerequisite edges loop back on themselves; `nodes` lists the loop in edge order
    #[error("prerequisite cycle through nodes {nodes:?}")]
    Cycle { nodes: Vec<NodeId> },
}
