// Character configuration loaded from JSON

use crate::engine::input::ActionNames;
use crate::game::abilities::{AbilityGraphError, AbilityTreeDef, LoadedAbilityTree};
use crate::game::characters::{AnimationStates, LocomotionAnimator};
use crate::game::movement::{EnvironmentGravity, MovementController, MovementMode, MovementSettings};
use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Smallest capsule radius accepted for a character body
pub const MIN_BODY_RADIUS: f32 = 0.05;

/// Configuration-time failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Graph(#[from] AbilityGraphError),

    #[error("duplicate {kind} key '{key}'")]
    DuplicateKey { kind: &'static str, key: String },
}

/// Capsule shape and spawn point of a character body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    pub radius: f32,
    /// Total capsule height, feet to head
    pub height: f32,
    /// Feet position at spawn
    pub spawn: Vec3,
}

impl BodyConfig {
    pub fn sanitize(&mut self) {
        self.radius = self.radius.max(MIN_BODY_RADIUS);
        self.height = self.height.max(self.radius * 2.0);
    }
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            radius: 0.4,
            height: 1.8,
            spawn: Vec3::new(0.0, 1.0, 0.0),
        }
    }
}

/// Everything needed to spawn a playable character
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    pub name: String,
    pub movement_mode: MovementMode,
    /// Overrides the mode's default movement settings
    pub movement: Option<MovementSettings>,
    pub environment: EnvironmentGravity,
    pub actions: ActionNames,
    pub animation: AnimationStates,
    pub body: BodyConfig,
    pub abilities: Option<AbilityTreeDef>,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            name: "Hero".to_string(),
            movement_mode: MovementMode::default(),
            movement: None,
            environment: EnvironmentGravity::default(),
            actions: ActionNames::default(),
            animation: AnimationStates::default(),
            body: BodyConfig::default(),
            abilities: None,
        }
    }
}

impl CharacterConfig {
    /// Parse a config and clamp every value into range
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: CharacterConfig = serde_json::from_str(json)?;
        config.sanitize();
        Ok(config)
    }

    /// Deserialization skips the clamping setters; this re-applies them
    pub fn sanitize(&mut self) {
        self.movement_mode.sanitize();
        if let Some(movement) = &mut self.movement {
            movement.sanitize();
        }
        self.body.sanitize();
    }

    /// Configured movement settings, or the mode's defaults
    pub fn movement_settings(&self) -> MovementSettings {
        self.movement
            .unwrap_or_else(|| self.movement_mode.default_settings())
    }

    pub fn build_controller(&self) -> MovementController {
        MovementController::with_settings(
            self.movement_settings(),
            self.movement_mode,
            self.environment,
        )
    }

    /// Animator without a target; the host attaches one
    pub fn build_animator(&self) -> LocomotionAnimator {
        LocomotionAnimator::new(self.animation.clone())
    }

    /// Build and validate the configured ability graph, if any
    pub fn ability_tree(&self) -> Result<Option<LoadedAbilityTree>, ConfigError> {
        let Some(def) = &self.abilities else {
            return Ok(None);
        };
        let loaded = def.build()?;
        loaded.tree.validate()?;
        Ok(Some(loaded))
    }
}

/// Load a character config from a JSON file
pub fn load_character_config(path: impl AsRef<Path>) -> Result<CharacterConfig> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("read character config: {}", path.display()))?;
    CharacterConfig::from_json(&text)
        .with_context(|| format!("parse character config: {}", path.display()))
}
