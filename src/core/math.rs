// Math utilities and easing helpers shared by the movement code

use glam::{Mat3, Quat, Vec3};

/// Squared length below which a direction counts as "no input"
pub const DIRECTION_EPSILON: f32 = 0.001;

/// Clamp a value between min and max
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Exponent used by both easing curves: 1 (linear) at intensity 0, 4 (sharp) at 1
fn curve_power(intensity: f32) -> f32 {
    1.0 + clamp(intensity, 0.0, 1.0) * 3.0
}

/// Ease-in curve: `t^(1 + 3 * intensity)`
///
/// Starts slow and finishes fast. Used while accelerating so the character
/// builds up speed instead of snapping to the target velocity.
pub fn ease_in(t: f32, intensity: f32) -> f32 {
    clamp(t, 0.0, 1.0).powf(curve_power(intensity))
}

/// Ease-out curve: `1 - (1 - t)^(1 + 3 * intensity)`
///
/// Starts fast and settles slowly. Used while decelerating.
pub fn ease_out(t: f32, intensity: f32) -> f32 {
    1.0 - (1.0 - clamp(t, 0.0, 1.0)).powf(curve_power(intensity))
}

/// Remove the component of `v` along the unit vector `axis`
pub fn project_on_plane(v: Vec3, axis: Vec3) -> Vec3 {
    v - axis * v.dot(axis)
}

/// Rotation whose +Z axis points along `forward` with `up` as the vertical
///
/// Returns `None` when `forward` is degenerate or parallel to `up`.
pub fn facing_rotation(forward: Vec3, up: Vec3) -> Option<Quat> {
    let z = forward.try_normalize()?;
    let x = up.cross(z).try_normalize()?;
    let y = z.cross(x);
    Some(Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize())
}
