// Per-tick character movement state machine

use super::acceleration::HorizontalEasing;
use super::charge::{AttackCharge, AttackSlot};
use super::gravity::{EnvironmentGravity, Gravity};
use super::jump::{JumpPhase, JumpState};
use super::settings::{MovementMode, MovementSettings};
use super::view::ViewBasis;
use crate::core::math::{facing_rotation, project_on_plane, DIRECTION_EPSILON};
use crate::engine::input::InputSnapshot;
use glam::{Quat, Vec2, Vec3};

/// Something the game layer should react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovementEvent {
    /// Emitted once per tick with the velocity handed to the physics backend
    MovementChanged {
        velocity: Vec3,
        input_direction: Vec2,
        grounded: bool,
    },
    /// An attack button was let go after charging
    AttackReleased { slot: AttackSlot, charge_level: f32 },
    /// The dodge button was pressed; the game decides what a dodge does
    DodgePerformed { direction: Vec2 },
}

/// Result of one controller tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutput {
    /// Velocity to integrate this tick
    pub velocity: Vec3,
    /// Facing after rotation slew
    pub facing: Quat,
    /// Events in emission order
    pub events: Vec<MovementEvent>,
}

/// Character movement controller
///
/// Owns all movement state. Each physics tick call `tick` with the input
/// sample and the grounded flag from the previous move-and-slide, hand the
/// returned velocity to the physics backend, then feed the resolved velocity
/// back through `sync_body`.
#[derive(Debug, Clone)]
pub struct MovementController {
    settings: MovementSettings,
    mode: MovementMode,
    environment: EnvironmentGravity,
    view: Option<ViewBasis>,

    velocity: Vec3,
    facing: Quat,
    grounded: bool,

    easing: HorizontalEasing,
    jump: JumpState,
    attack1: AttackCharge,
    attack2: AttackCharge,
}

impl MovementController {
    /// Controller using the mode's default settings
    pub fn new(mode: MovementMode, environment: EnvironmentGravity) -> Self {
        Self::with_settings(mode.default_settings(), mode, environment)
    }

    pub fn with_settings(
        settings: MovementSettings,
        mode: MovementMode,
        environment: EnvironmentGravity,
    ) -> Self {
        Self {
            settings,
            mode,
            environment,
            view: None,
            velocity: Vec3::ZERO,
            facing: Quat::IDENTITY,
            grounded: false,
            easing: HorizontalEasing::default(),
            jump: JumpState::default(),
            attack1: AttackCharge::default(),
            attack2: AttackCharge::default(),
        }
    }

    pub fn settings(&self) -> &MovementSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut MovementSettings {
        &mut self.settings
    }

    pub fn mode(&self) -> &MovementMode {
        &self.mode
    }

    pub fn mode_mut(&mut self) -> &mut MovementMode {
        &mut self.mode
    }

    pub fn environment(&self) -> &EnvironmentGravity {
        &self.environment
    }

    pub fn set_environment(&mut self, environment: EnvironmentGravity) {
        self.environment = environment;
    }

    /// Camera basis used to map input; `None` uses the mode's default view
    pub fn set_view(&mut self, view: Option<ViewBasis>) {
        self.view = view;
    }

    pub fn view(&self) -> Option<ViewBasis> {
        self.view
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn facing(&self) -> Quat {
        self.facing
    }

    pub fn set_facing(&mut self, facing: Quat) {
        self.facing = facing.normalize();
    }

    /// Grounded flag seen by the last tick
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn is_accelerating(&self) -> bool {
        self.easing.is_accelerating()
    }

    /// Current jump phase; top-down characters never leave `Grounded`/`Airborne`
    pub fn jump_phase(&self) -> JumpPhase {
        self.jump.phase(self.grounded)
    }

    pub fn is_charging(&self, slot: AttackSlot) -> bool {
        self.charge(slot).is_charging()
    }

    /// Charge of an attack in [0, 1]; 0 when not charging
    pub fn charge_level(&self, slot: AttackSlot) -> f32 {
        self.charge(slot).level(self.settings.attack_charge_time())
    }

    fn charge(&self, slot: AttackSlot) -> &AttackCharge {
        match slot {
            AttackSlot::Primary => &self.attack1,
            AttackSlot::Secondary => &self.attack2,
        }
    }

    /// Gravity currently acting on the character
    pub fn gravity(&self) -> Gravity {
        Gravity::resolve(self.settings.gravity(), &self.environment)
    }

    /// Up axis used to split vertical from horizontal motion
    pub fn up(&self) -> Vec3 {
        match self.mode {
            MovementMode::Platformer(_) => self.gravity().up(),
            MovementMode::TopDown(_) => Vec3::Y,
        }
    }

    /// Write back the velocity resolved by the physics backend
    pub fn sync_body(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// Zero the velocity and every phase timer
    pub fn reset(&mut self) {
        self.velocity = Vec3::ZERO;
        self.grounded = false;
        self.easing = HorizontalEasing::default();
        self.jump = JumpState::default();
        self.attack1 = AttackCharge::default();
        self.attack2 = AttackCharge::default();
    }

    fn move_basis(&self, up: Vec3) -> ViewBasis {
        match &self.mode {
            MovementMode::Platformer(_) => self.view.unwrap_or_default().on_plane(up),
            MovementMode::TopDown(view) => {
                let camera = self.view.unwrap_or_else(|| {
                    ViewBasis::from_pitch_yaw(view.view_pitch_deg(), view.view_yaw_deg())
                });
                camera.on_ground(view.view_yaw_deg())
            }
        }
    }

    fn apply_gravity(&mut self, delta: f32) {
        let gravity = self.gravity();
        match &self.mode {
            MovementMode::Platformer(platformer) => {
                let velocity = gravity.integrate(self.velocity, delta);
                self.velocity = gravity.clamp_fall(velocity, platformer.max_fall_speed());
            }
            MovementMode::TopDown(_) => {
                let custom = self.settings.gravity();
                if custom.use_custom() && custom.magnitude() > 0.0 {
                    self.velocity = gravity.integrate(self.velocity, delta);
                }
            }
        }
    }

    /// Advance one physics tick
    ///
    /// `grounded` is the floor contact reported by the previous move-and-slide.
    pub fn tick(&mut self, delta: f32, input: &InputSnapshot, grounded: bool) -> TickOutput {
        let delta = delta.max(0.0);
        self.grounded = grounded;
        let mut events = Vec::new();

        self.apply_gravity(delta);

        let up = self.up();
        let input_direction = input.direction;
        let move_direction = self.move_basis(up).move_direction(input_direction);

        let mut vertical_speed = self.velocity.dot(up);
        let horizontal = self.velocity - up * vertical_speed;
        let target = move_direction * self.settings.moving_speed();
        let has_input = input.has_direction();

        let horizontal =
            self.easing
                .update(horizontal, target, has_input, &self.settings, delta);

        if let MovementMode::Platformer(platformer) = &self.mode {
            vertical_speed = self
                .jump
                .update(vertical_speed, grounded, input.jump, platformer, delta);
        }

        let charge_time = self.settings.attack_charge_time();
        if let Some(charge_level) = self.attack1.update(input.attack1, charge_time, delta) {
            events.push(MovementEvent::AttackReleased {
                slot: AttackSlot::Primary,
                charge_level,
            });
        }
        if let Some(charge_level) = self.attack2.update(input.attack2, charge_time, delta) {
            events.push(MovementEvent::AttackReleased {
                slot: AttackSlot::Secondary,
                charge_level,
            });
        }

        if input.dodge.just_pressed {
            events.push(MovementEvent::DodgePerformed {
                direction: input_direction,
            });
        }

        self.velocity = horizontal + up * vertical_speed;
        events.push(MovementEvent::MovementChanged {
            velocity: self.velocity,
            input_direction,
            grounded,
        });

        if has_input && move_direction.length_squared() > DIRECTION_EPSILON {
            self.rotate_toward(project_on_plane(move_direction, up), up, delta);
        }

        TickOutput {
            velocity: self.velocity,
            facing: self.facing,
            events,
        }
    }

    fn rotate_toward(&mut self, direction: Vec3, up: Vec3, delta: f32) {
        let Some(target) = facing_rotation(direction, up) else {
            return;
        };
        let weight = (self.settings.rotation_speed() * delta).min(1.0);
        self.facing = self.facing.slerp(target, weight).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::ButtonState;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    fn platformer() -> MovementController {
        MovementController::new(MovementMode::platformer(), EnvironmentGravity::default())
    }

    fn top_down() -> MovementController {
        MovementController::new(MovementMode::top_down(), EnvironmentGravity::default())
    }

    fn movement_changed(output: &TickOutput) -> Option<(Vec3, Vec2, bool)> {
        output.events.iter().find_map(|event| match event {
            MovementEvent::MovementChanged {
                velocity,
                input_direction,
                grounded,
            } => Some((*velocity, *input_direction, *grounded)),
            _ => None,
        })
    }

    #[test]
    fn test_platformer_gravity_accumulates() {
        let mut controller = platformer();
        let output = controller.tick(0.1, &InputSnapshot::idle(), false);
        assert_relative_eq!(output.velocity.y, -3.0, epsilon = 1e-5);
        let output = controller.tick(0.1, &InputSnapshot::idle(), false);
        assert_relative_eq!(output.velocity.y, -6.0, epsilon = 1e-5);
    }

    #[test]
    fn test_fall_speed_clamped_exactly() {
        let mut controller = platformer();
        if let MovementMode::Platformer(settings) = controller.mode_mut() {
            settings.set_max_fall_speed(5.0);
        }
        let mut output = controller.tick(0.1, &InputSnapshot::idle(), false);
        for _ in 0..10 {
            output = controller.tick(0.1, &InputSnapshot::idle(), false);
        }
        assert_relative_eq!(output.velocity.y, -5.0, epsilon = 1e-5);
    }

    #[test]
    fn test_top_down_ignores_environment_gravity() {
        let mut controller = top_down();
        let output = controller.tick(0.1, &InputSnapshot::idle(), false);
        assert_eq!(output.velocity, Vec3::ZERO);

        controller
            .settings_mut()
            .gravity_mut()
            .set_use_custom(true);
        // Custom gravity with zero magnitude is still a no-op
        let output = controller.tick(0.1, &InputSnapshot::idle(), false);
        assert_eq!(output.velocity, Vec3::ZERO);

        controller.settings_mut().gravity_mut().set_magnitude(10.0);
        let output = controller.tick(0.1, &InputSnapshot::idle(), false);
        assert_relative_eq!(output.velocity.y, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_jump_then_release_cuts_speed() {
        let mut controller = platformer();
        let jump = InputSnapshot::idle().with_jump(ButtonState::pressed_now());
        let output = controller.tick(DT, &jump, true);
        // Gravity runs before the jump overrides the vertical speed
        assert_relative_eq!(output.velocity.y, 8.0, epsilon = 1e-5);
        assert_eq!(controller.jump_phase(), JumpPhase::AscendingHeld);

        let release = InputSnapshot::idle().with_jump(ButtonState::released_now());
        let output = controller.tick(DT, &release, false);
        let rising = 8.0 - 30.0 * DT;
        assert_relative_eq!(output.velocity.y, rising * 0.25, epsilon = 1e-4);
        assert_eq!(controller.jump_phase(), JumpPhase::Airborne);
    }

    #[test]
    fn test_release_after_apex_is_not_cut() {
        let mut controller = platformer();
        controller.tick(DT, &InputSnapshot::idle().with_jump(ButtonState::pressed_now()), true);
        controller.sync_body(Vec3::new(0.0, -1.0, 0.0));

        let release = InputSnapshot::idle().with_jump(ButtonState::released_now());
        let output = controller.tick(DT, &release, false);
        assert_relative_eq!(output.velocity.y, -1.0 - 30.0 * DT, epsilon = 1e-5);
    }

    #[test]
    fn test_holding_jump_adds_force() {
        let mut controller = platformer();
        controller.tick(DT, &InputSnapshot::idle().with_jump(ButtonState::pressed_now()), true);
        let held = InputSnapshot::idle().with_jump(ButtonState::held());
        let output = controller.tick(DT, &held, false);
        assert_relative_eq!(output.velocity.y, 8.0 - 30.0 * DT + 35.0 * DT, epsilon = 1e-4);
    }

    #[test]
    fn test_movement_changed_reports_tick() {
        let mut controller = top_down();
        let input = InputSnapshot::moving(Vec2::new(1.0, 0.0));
        let output = controller.tick(DT, &input, true);

        let (velocity, direction, grounded) = movement_changed(&output).unwrap();
        assert_eq!(velocity, output.velocity);
        assert_eq!(direction, Vec2::new(1.0, 0.0));
        assert!(grounded);
        // MovementChanged is always last
        assert!(matches!(
            output.events.last(),
            Some(MovementEvent::MovementChanged { .. })
        ));
    }

    #[test]
    fn test_top_down_reaches_moving_speed() {
        let mut controller = top_down();
        let forward = InputSnapshot::moving(Vec2::new(0.0, -1.0));
        let mut output = controller.tick(0.1, &forward, true);
        for _ in 0..5 {
            output = controller.tick(0.1, &forward, true);
        }
        // Default view looks down -Z
        assert!(output.velocity.abs_diff_eq(Vec3::new(0.0, 0.0, -8.0), 1e-4));
    }

    #[test]
    fn test_top_down_decelerates_to_rest() {
        let mut controller = top_down();
        let right = InputSnapshot::moving(Vec2::new(1.0, 0.0));
        for _ in 0..10 {
            controller.tick(0.1, &right, true);
        }
        let mut output = controller.tick(0.1, &InputSnapshot::idle(), true);
        assert!(output.velocity.x > 0.0 && output.velocity.x < 8.0);
        for _ in 0..3 {
            output = controller.tick(0.1, &InputSnapshot::idle(), true);
        }
        assert_eq!(output.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_attack_charge_events() {
        let mut controller = top_down();
        controller.settings_mut().set_attack_charge_time(1.0);

        let press = InputSnapshot::idle().with_attack1(ButtonState::pressed_now());
        controller.tick(0.25, &press, true);
        let hold = InputSnapshot::idle().with_attack1(ButtonState::held());
        for _ in 0..3 {
            controller.tick(0.25, &hold, true);
        }
        assert!(controller.is_charging(AttackSlot::Primary));
        assert_relative_eq!(controller.charge_level(AttackSlot::Primary), 1.0);
        assert_eq!(controller.charge_level(AttackSlot::Secondary), 0.0);

        let release = InputSnapshot::idle().with_attack1(ButtonState::released_now());
        let output = controller.tick(0.25, &release, true);
        assert_eq!(
            output.events[0],
            MovementEvent::AttackReleased {
                slot: AttackSlot::Primary,
                charge_level: 1.0
            }
        );
        assert!(!controller.is_charging(AttackSlot::Primary));
    }

    #[test]
    fn test_attacks_are_independent() {
        let mut controller = platformer();
        let both = InputSnapshot::idle()
            .with_attack1(ButtonState::pressed_now())
            .with_attack2(ButtonState::pressed_now());
        controller.tick(0.1, &both, true);

        let release_second = InputSnapshot::idle()
            .with_attack1(ButtonState::held())
            .with_attack2(ButtonState::released_now());
        let output = controller.tick(0.1, &release_second, true);

        let released: Vec<_> = output
            .events
            .iter()
            .filter_map(|event| match event {
                MovementEvent::AttackReleased { slot, .. } => Some(*slot),
                _ => None,
            })
            .collect();
        assert_eq!(released, vec![AttackSlot::Secondary]);
        assert!(controller.is_charging(AttackSlot::Primary));
    }

    #[test]
    fn test_dodge_carries_raw_direction() {
        let mut controller = top_down();
        let input = InputSnapshot::moving(Vec2::new(0.6, 0.8)).with_dodge(ButtonState::pressed_now());
        let output = controller.tick(DT, &input, true);
        assert!(output.events.contains(&MovementEvent::DodgePerformed {
            direction: Vec2::new(0.6, 0.8)
        }));

        let held = InputSnapshot::idle().with_dodge(ButtonState::held());
        let output = controller.tick(DT, &held, true);
        assert!(!output
            .events
            .iter()
            .any(|event| matches!(event, MovementEvent::DodgePerformed { .. })));
    }

    #[test]
    fn test_facing_turns_toward_movement() {
        let mut controller = top_down();
        controller.settings_mut().set_rotation_speed(1000.0);
        let right = InputSnapshot::moving(Vec2::new(1.0, 0.0));
        let output = controller.tick(DT, &right, true);

        // Weight is clamped to 1, so the facing snaps
        let forward = output.facing * Vec3::Z;
        assert!(forward.abs_diff_eq(Vec3::X, 1e-4));
    }

    #[test]
    fn test_facing_slerps_partially() {
        let mut controller = top_down();
        controller.settings_mut().set_rotation_speed(3.0);
        let right = InputSnapshot::moving(Vec2::new(1.0, 0.0));
        let output = controller.tick(0.1, &right, true);

        let target = facing_rotation(Vec3::X, Vec3::Y).unwrap();
        let expected = Quat::IDENTITY.slerp(target, 0.3);
        assert!(output.facing.abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn test_facing_unchanged_without_input() {
        let mut controller = top_down();
        let output = controller.tick(DT, &InputSnapshot::idle(), true);
        assert_eq!(output.facing, Quat::IDENTITY);
    }

    #[test]
    fn test_custom_up_axis() {
        let mut settings = MovementSettings::platformer();
        settings.gravity_mut().set_direction(Vec3::NEG_Z);
        let mut controller = MovementController::with_settings(
            settings,
            MovementMode::platformer(),
            EnvironmentGravity::default(),
        );
        assert_eq!(controller.up(), Vec3::Z);

        let jump = InputSnapshot::idle().with_jump(ButtonState::pressed_now());
        let output = controller.tick(DT, &jump, true);
        assert_relative_eq!(output.velocity.z, 8.0, epsilon = 1e-5);
        assert_relative_eq!(output.velocity.y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_injected_view_basis() {
        let mut controller = top_down();
        controller.set_view(Some(ViewBasis::new(Vec3::X, Vec3::Z)));
        let forward = InputSnapshot::moving(Vec2::new(0.0, -1.0));
        for _ in 0..10 {
            controller.tick(0.1, &forward, true);
        }
        assert!(controller.velocity().abs_diff_eq(Vec3::new(8.0, 0.0, 0.0), 1e-4));
    }

    #[test]
    fn test_reset_clears_state() {
        let mut controller = platformer();
        controller.tick(DT, &InputSnapshot::moving(Vec2::X).with_jump(ButtonState::pressed_now()), true);
        controller.tick(DT, &InputSnapshot::idle().with_attack2(ButtonState::pressed_now()), false);
        controller.reset();

        assert_eq!(controller.velocity(), Vec3::ZERO);
        assert!(!controller.is_accelerating());
        assert!(!controller.is_charging(AttackSlot::Secondary));
        assert_eq!(controller.jump_phase(), JumpPhase::Airborne);
    }

    #[test]
    fn test_sync_body_feeds_next_tick() {
        let mut controller = platformer();
        controller.tick(DT, &InputSnapshot::idle(), false);
        controller.sync_body(Vec3::ZERO);
        let output = controller.tick(0.1, &InputSnapshot::idle(), true);
        assert_relative_eq!(output.velocity.y, -3.0, epsilon = 1e-5);
    }
}
