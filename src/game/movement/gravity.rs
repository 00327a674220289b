// Gravity resolution and integration

use super::settings::GravitySettings;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// The world's default gravity, injected by the host engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentGravity {
    pub direction: Vec3,
    pub strength: f32,
}

impl Default for EnvironmentGravity {
    fn default() -> Self {
        Self {
            direction: Vec3::NEG_Y,
            strength: 9.8,
        }
    }
}

/// Gravity actually acting on one character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity {
    /// Unit direction (zero if the configured direction is degenerate)
    pub direction: Vec3,
    pub magnitude: f32,
}

impl Gravity {
    /// Pick the custom gravity if enabled, else the environment's
    pub fn resolve(settings: &GravitySettings, environment: &EnvironmentGravity) -> Self {
        if settings.use_custom() {
            Self {
                direction: settings.direction().normalize_or_zero(),
                magnitude: settings.magnitude(),
            }
        } else {
            Self {
                direction: environment.direction.normalize_or_zero(),
                magnitude: environment.strength,
            }
        }
    }

    /// Opposite of the gravity direction, +Y if undefined
    pub fn up(&self) -> Vec3 {
        let up = -self.direction;
        if up == Vec3::ZERO {
            Vec3::Y
        } else {
            up
        }
    }

    /// `velocity + direction * magnitude * delta`
    pub fn integrate(&self, velocity: Vec3, delta: f32) -> Vec3 {
        velocity + self.direction * self.magnitude * delta
    }

    /// Limit the speed along the gravity direction to `max_fall_speed`
    pub fn clamp_fall(&self, velocity: Vec3, max_fall_speed: f32) -> Vec3 {
        let fall_speed = velocity.dot(self.direction);
        if fall_speed > max_fall_speed {
            velocity - self.direction * (fall_speed - max_fall_speed)
        } else {
            velocity
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_resolve_environment() {
        let gravity = Gravity::resolve(&GravitySettings::environment(), &EnvironmentGravity::default());
        assert_eq!(gravity.direction, Vec3::NEG_Y);
        assert_eq!(gravity.magnitude, 9.8);
        assert_eq!(gravity.up(), Vec3::Y);
    }

    #[test]
    fn test_resolve_custom() {
        let settings = GravitySettings::custom(Vec3::X, 20.0);
        let gravity = Gravity::resolve(&settings, &EnvironmentGravity::default());
        assert_eq!(gravity.direction, Vec3::X);
        assert_eq!(gravity.up(), Vec3::NEG_X);
    }

    #[test]
    fn test_integrate() {
        let gravity = Gravity {
            direction: Vec3::NEG_Y,
            magnitude: 30.0,
        };
        let velocity = gravity.integrate(Vec3::new(1.0, 0.0, 0.0), 0.5);
        assert_relative_eq!(velocity.y, -15.0);
        assert_relative_eq!(velocity.x, 1.0);
    }

    #[test]
    fn test_clamp_fall_is_exact() {
        let gravity = Gravity {
            direction: Vec3::NEG_Y,
            magnitude: 30.0,
        };
        let clamped = gravity.clamp_fall(Vec3::new(2.0, -150.0, 0.0), 120.0);
        assert_relative_eq!(clamped.dot(gravity.direction), 120.0);
        assert_relative_eq!(clamped.x, 2.0);

        // Rising is never clamped
        let rising = Vec3::new(0.0, 50.0, 0.0);
        assert_eq!(gravity.clamp_fall(rising, 0.0), rising);
    }

    #[test]
    fn test_degenerate_environment_has_up() {
        let environment = EnvironmentGravity {
            direction: Vec3::ZERO,
            strength: 9.8,
        };
        let gravity = Gravity::resolve(&GravitySettings::environment(), &environment);
        assert_eq!(gravity.integrate(Vec3::ONE, 1.0), Vec3::ONE);
        assert_eq!(gravity.up(), Vec3::Y);
    }
}
