// Tunable movement parameters
//
// Every setter clamps to its valid range. Deserialized values bypass the
// setters, so loaders call `sanitize` afterwards.

use crate::core::math::clamp;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Lower bound for acceleration/deceleration times
pub const MIN_PHASE_TIME: f32 = 0.01;
/// Lower bound for the attack charge time
pub const MIN_ATTACK_CHARGE_TIME: f32 = 0.1;
/// Top-down view pitch range in degrees
pub const VIEW_PITCH_RANGE: (f32, f32) = (-90.0, -15.0);

/// Gravity override for one character
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GravitySettings {
    use_custom: bool,
    direction: Vec3,
    magnitude: f32,
}

impl GravitySettings {
    /// Follow the environment gravity
    pub fn environment() -> Self {
        Self {
            use_custom: false,
            direction: Vec3::NEG_Y,
            magnitude: 0.0,
        }
    }

    /// Custom gravity along `direction` with the given magnitude
    pub fn custom(direction: Vec3, magnitude: f32) -> Self {
        let mut gravity = Self::environment();
        gravity.use_custom = true;
        gravity.set_direction(direction);
        gravity.set_magnitude(magnitude);
        gravity
    }

    pub fn use_custom(&self) -> bool {
        self.use_custom
    }

    pub fn set_use_custom(&mut self, use_custom: bool) {
        self.use_custom = use_custom;
    }

    /// Unit direction of the custom gravity
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Set the custom direction; it is normalized, zero vectors are ignored
    pub fn set_direction(&mut self, direction: Vec3) {
        if let Some(direction) = direction.try_normalize() {
            self.direction = direction;
        }
    }

    pub fn magnitude(&self) -> f32 {
        self.magnitude
    }

    pub fn set_magnitude(&mut self, magnitude: f32) {
        self.magnitude = magnitude.max(0.0);
    }

    pub fn sanitize(&mut self) {
        self.direction = self.direction.try_normalize().unwrap_or(Vec3::NEG_Y);
        self.set_magnitude(self.magnitude);
    }
}

impl Default for GravitySettings {
    fn default() -> Self {
        Self::environment()
    }
}

/// Parameters shared by every movement mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementSettings {
    moving_speed: f32,
    acceleration_time: f32,
    deceleration_time: f32,
    acceleration_curve_intensity: f32,
    deceleration_curve_intensity: f32,
    rotation_speed: f32,
    attack_charge_time: f32,
    gravity: GravitySettings,
}

impl MovementSettings {
    /// Defaults for a top-down character (no gravity unless configured)
    pub fn top_down() -> Self {
        Self {
            moving_speed: 8.0,
            acceleration_time: 0.3,
            deceleration_time: 0.2,
            acceleration_curve_intensity: 0.5,
            deceleration_curve_intensity: 0.5,
            rotation_speed: 15.0,
            attack_charge_time: 1.0,
            gravity: GravitySettings::environment(),
        }
    }

    /// Defaults for a platformer character (strong custom gravity)
    pub fn platformer() -> Self {
        Self {
            gravity: GravitySettings::custom(Vec3::NEG_Y, 30.0),
            ..Self::top_down()
        }
    }

    pub fn moving_speed(&self) -> f32 {
        self.moving_speed
    }

    pub fn set_moving_speed(&mut self, speed: f32) {
        self.moving_speed = speed.max(0.0);
    }

    pub fn acceleration_time(&self) -> f32 {
        self.acceleration_time
    }

    pub fn set_acceleration_time(&mut self, time: f32) {
        self.acceleration_time = time.max(MIN_PHASE_TIME);
    }

    pub fn deceleration_time(&self) -> f32 {
        self.deceleration_time
    }

    pub fn set_deceleration_time(&mut self, time: f32) {
        self.deceleration_time = time.max(MIN_PHASE_TIME);
    }

    pub fn acceleration_curve_intensity(&self) -> f32 {
        self.acceleration_curve_intensity
    }

    pub fn set_acceleration_curve_intensity(&mut self, intensity: f32) {
        self.acceleration_curve_intensity = clamp(intensity, 0.0, 1.0);
    }

    pub fn deceleration_curve_intensity(&self) -> f32 {
        self.deceleration_curve_intensity
    }

    pub fn set_deceleration_curve_intensity(&mut self, intensity: f32) {
        self.deceleration_curve_intensity = clamp(intensity, 0.0, 1.0);
    }

    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    pub fn set_rotation_speed(&mut self, speed: f32) {
        self.rotation_speed = speed.max(0.0);
    }

    pub fn attack_charge_time(&self) -> f32 {
        self.attack_charge_time
    }

    pub fn set_attack_charge_time(&mut self, time: f32) {
        self.attack_charge_time = time.max(MIN_ATTACK_CHARGE_TIME);
    }

    pub fn gravity(&self) -> &GravitySettings {
        &self.gravity
    }

    pub fn gravity_mut(&mut self) -> &mut GravitySettings {
        &mut self.gravity
    }

    /// Re-apply every setter clamp
    pub fn sanitize(&mut self) {
        self.set_moving_speed(self.moving_speed);
        self.set_acceleration_time(self.acceleration_time);
        self.set_deceleration_time(self.deceleration_time);
        self.set_acceleration_curve_intensity(self.acceleration_curve_intensity);
        self.set_deceleration_curve_intensity(self.deceleration_curve_intensity);
        self.set_rotation_speed(self.rotation_speed);
        self.set_attack_charge_time(self.attack_charge_time);
        self.gravity.sanitize();
    }
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self::top_down()
    }
}

/// Jump and fall parameters of the platformer mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformerSettings {
    jump_force: f32,
    max_jump_hold_time: f32,
    jump_hold_force: f32,
    jump_release_cut_factor: f32,
    max_fall_speed: f32,
}

impl PlatformerSettings {
    pub fn jump_force(&self) -> f32 {
        self.jump_force
    }

    pub fn set_jump_force(&mut self, force: f32) {
        self.jump_force = force.max(0.0);
    }

    pub fn max_jump_hold_time(&self) -> f32 {
        self.max_jump_hold_time
    }

    pub fn set_max_jump_hold_time(&mut self, time: f32) {
        self.max_jump_hold_time = time.max(0.0);
    }

    pub fn jump_hold_force(&self) -> f32 {
        self.jump_hold_force
    }

    pub fn set_jump_hold_force(&mut self, force: f32) {
        self.jump_hold_force = force.max(0.0);
    }

    pub fn jump_release_cut_factor(&self) -> f32 {
        self.jump_release_cut_factor
    }

    pub fn set_jump_release_cut_factor(&mut self, factor: f32) {
        self.jump_release_cut_factor = clamp(factor, 0.0, 1.0);
    }

    pub fn max_fall_speed(&self) -> f32 {
        self.max_fall_speed
    }

    pub fn set_max_fall_speed(&mut self, speed: f32) {
        self.max_fall_speed = speed.max(0.0);
    }

    pub fn sanitize(&mut self) {
        self.set_jump_force(self.jump_force);
        self.set_max_jump_hold_time(self.max_jump_hold_time);
        self.set_jump_hold_force(self.jump_hold_force);
        self.set_jump_release_cut_factor(self.jump_release_cut_factor);
        self.set_max_fall_speed(self.max_fall_speed);
    }
}

impl Default for PlatformerSettings {
    fn default() -> Self {
        Self {
            jump_force: 8.0,
            max_jump_hold_time: 0.5,
            jump_hold_force: 35.0,
            jump_release_cut_factor: 0.25,
            max_fall_speed: 120.0,
        }
    }
}

/// Default view of the top-down mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopDownSettings {
    view_pitch_deg: f32,
    view_yaw_deg: f32,
}

impl TopDownSettings {
    pub fn view_pitch_deg(&self) -> f32 {
        self.view_pitch_deg
    }

    /// Set the view pitch, clamped to -90..=-15 degrees
    pub fn set_view_pitch_deg(&mut self, pitch: f32) {
        self.view_pitch_deg = clamp(pitch, VIEW_PITCH_RANGE.0, VIEW_PITCH_RANGE.1);
    }

    pub fn view_yaw_deg(&self) -> f32 {
        self.view_yaw_deg
    }

    pub fn set_view_yaw_deg(&mut self, yaw: f32) {
        self.view_yaw_deg = yaw;
    }

    pub fn sanitize(&mut self) {
        self.set_view_pitch_deg(self.view_pitch_deg);
        if !self.view_yaw_deg.is_finite() {
            self.view_yaw_deg = 0.0;
        }
    }
}

impl Default for TopDownSettings {
    fn default() -> Self {
        Self {
            view_pitch_deg: -50.0,
            view_yaw_deg: 0.0,
        }
    }
}

/// Which movement rules a character follows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MovementMode {
    /// Movement on the world XZ plane, optional gravity, dodge
    TopDown(TopDownSettings),
    /// Movement relative to a configurable up axis with variable-height jumps
    Platformer(PlatformerSettings),
}

impl MovementMode {
    pub fn top_down() -> Self {
        Self::TopDown(TopDownSettings::default())
    }

    pub fn platformer() -> Self {
        Self::Platformer(PlatformerSettings::default())
    }

    /// Movement defaults matching this mode
    pub fn default_settings(&self) -> MovementSettings {
        match self {
            Self::TopDown(_) => MovementSettings::top_down(),
            Self::Platformer(_) => MovementSettings::platformer(),
        }
    }

    pub fn is_platformer(&self) -> bool {
        matches!(self, Self::Platformer(_))
    }

    pub fn sanitize(&mut self) {
        match self {
            Self::TopDown(settings) => settings.sanitize(),
            Self::Platformer(settings) => settings.sanitize(),
        }
    }
}

impl Default for MovementMode {
    fn default() -> Self {
        Self::top_down()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_defaults() {
        let top_down = MovementSettings::top_down();
        assert_eq!(top_down.moving_speed(), 8.0);
        assert_eq!(top_down.acceleration_time(), 0.3);
        assert_eq!(top_down.deceleration_time(), 0.2);
        assert_eq!(top_down.rotation_speed(), 15.0);
        assert_eq!(top_down.attack_charge_time(), 1.0);
        assert!(!top_down.gravity().use_custom());
        assert_eq!(top_down.gravity().magnitude(), 0.0);

        let platformer = MovementSettings::platformer();
        assert!(platformer.gravity().use_custom());
        assert_eq!(platformer.gravity().magnitude(), 30.0);
        assert_eq!(platformer.gravity().direction(), Vec3::NEG_Y);

        let jump = PlatformerSettings::default();
        assert_eq!(jump.jump_force(), 8.0);
        assert_eq!(jump.max_jump_hold_time(), 0.5);
        assert_eq!(jump.jump_hold_force(), 35.0);
        assert_eq!(jump.jump_release_cut_factor(), 0.25);
        assert_eq!(jump.max_fall_speed(), 120.0);
    }

    #[test]
    fn test_setters_clamp() {
        let mut settings = MovementSettings::default();
        settings.set_acceleration_time(0.0);
        settings.set_deceleration_time(-1.0);
        settings.set_attack_charge_time(0.0);
        settings.set_acceleration_curve_intensity(2.0);
        settings.set_deceleration_curve_intensity(-0.5);
        settings.set_moving_speed(-3.0);
        settings.set_rotation_speed(-1.0);

        assert_eq!(settings.acceleration_time(), MIN_PHASE_TIME);
        assert_eq!(settings.deceleration_time(), MIN_PHASE_TIME);
        assert_eq!(settings.attack_charge_time(), MIN_ATTACK_CHARGE_TIME);
        assert_eq!(settings.acceleration_curve_intensity(), 1.0);
        assert_eq!(settings.deceleration_curve_intensity(), 0.0);
        assert_eq!(settings.moving_speed(), 0.0);
        assert_eq!(settings.rotation_speed(), 0.0);

        let mut jump = PlatformerSettings::default();
        jump.set_jump_release_cut_factor(1.5);
        jump.set_max_fall_speed(-10.0);
        jump.set_max_jump_hold_time(-1.0);
        assert_eq!(jump.jump_release_cut_factor(), 1.0);
        assert_eq!(jump.max_fall_speed(), 0.0);
        assert_eq!(jump.max_jump_hold_time(), 0.0);
    }

    #[test]
    fn test_gravity_direction_normalized() {
        let mut gravity = GravitySettings::default();
        gravity.set_direction(Vec3::new(0.0, 0.0, -4.0));
        assert_eq!(gravity.direction(), Vec3::NEG_Z);

        gravity.set_direction(Vec3::ZERO);
        assert_eq!(gravity.direction(), Vec3::NEG_Z);

        gravity.set_magnitude(-2.0);
        assert_eq!(gravity.magnitude(), 0.0);
    }

    #[test]
    fn test_view_pitch_clamped() {
        let mut view = TopDownSettings::default();
        assert_eq!(view.view_pitch_deg(), -50.0);
        view.set_view_pitch_deg(10.0);
        assert_eq!(view.view_pitch_deg(), -15.0);
        view.set_view_pitch_deg(-120.0);
        assert_eq!(view.view_pitch_deg(), -90.0);
    }

    #[test]
    fn test_sanitize_after_deserialize() {
        let json = r#"{ "acceleration_time": 0.0, "acceleration_curve_intensity": 3.0,
                        "gravity": { "use_custom": true, "direction": [0.0, -2.0, 0.0], "magnitude": -1.0 } }"#;
        let mut settings: MovementSettings = serde_json::from_str(json).unwrap();
        // Unspecified fields keep their defaults
        assert_eq!(settings.moving_speed(), 8.0);

        settings.sanitize();
        assert_eq!(settings.acceleration_time(), MIN_PHASE_TIME);
        assert_eq!(settings.acceleration_curve_intensity(), 1.0);
        assert_eq!(settings.gravity().direction(), Vec3::NEG_Y);
        assert_eq!(settings.gravity().magnitude(), 0.0);
    }

    #[test]
    fn test_mode_tagged_json() {
        let mode: MovementMode =
            serde_json::from_str(r#"{ "mode": "platformer", "jump_force": 12.0 }"#).unwrap();
        match mode {
            MovementMode::Platformer(settings) => {
                assert_eq!(settings.jump_force(), 12.0);
                assert_eq!(settings.max_fall_speed(), 120.0);
            }
            other => panic!("expected platformer, got {other:?}"),
        }
        assert!(mode.is_platformer());
        assert_eq!(mode.default_settings(), MovementSettings::platformer());
    }
}
