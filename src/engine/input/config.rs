// Action name configuration
//
// The engine's input system identifies actions by name. Each character can
// remap which engine name drives which controller action.

use super::action::Action;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from controller actions to engine action names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Action, String>", into = "BTreeMap<Action, String>")]
pub struct ActionNames {
    names: BTreeMap<Action, String>,
}

impl ActionNames {
    /// Create a configuration with no names bound
    pub fn empty() -> Self {
        Self {
            names: BTreeMap::new(),
        }
    }

    /// Get the engine name bound to an action
    pub fn name(&self, action: Action) -> Option<&str> {
        self.names.get(&action).map(String::as_str)
    }

    /// Bind an engine name to an action
    ///
    /// Any other action previously bound to the same name loses it, so a name
    /// always resolves to a single action. Blank names unbind the action.
    pub fn bind(&mut self, action: Action, name: impl Into<String>) {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            self.unbind(action);
            return;
        }

        self.names.retain(|other, bound| *other == action || bound.as_str() != name);
        self.names.insert(action, name.to_string());
    }

    /// Unbind an action, returning the name it had
    pub fn unbind(&mut self, action: Action) -> Option<String> {
        self.names.remove(&action)
    }

    /// Find the action an engine name is bound to
    pub fn action_for(&self, name: &str) -> Option<Action> {
        self.names
            .iter()
            .find(|(_, bound)| bound.as_str() == name)
            .map(|(action, _)| *action)
    }

    /// Check if an action has a name bound
    pub fn has_binding(&self, action: Action) -> bool {
        self.names.contains_key(&action)
    }

    /// Reset every action to its default name
    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }
}

impl Default for ActionNames {
    fn default() -> Self {
        let mut names = Self::empty();
        for action in Action::ALL {
            names.bind(action, action.default_name());
        }
        names
    }
}

// Partial maps from config files are layered over the defaults
impl From<BTreeMap<Action, String>> for ActionNames {
    fn from(overrides: BTreeMap<Action, String>) -> Self {
        let mut names = Self::default();
        for (action, name) in overrides {
            names.bind(action, name);
        }
        names
    }
}

impl From<ActionNames> for BTreeMap<Action, String> {
    fn from(names: ActionNames) -> Self {
        names.names
    }
}
