//! Facing-angle helpers.
//!
//! Angles are in degrees. With +Y up, yaw 0 faces +X and yaw 90 faces +Z:
//!
//! - `forward(yaw) = (cos yaw, sin yaw)`
//! - `right(yaw)   = (-sin yaw, cos yaw)`, i.e. `forward x +Y` on the XZ plane
//!
//! Strafe-left is `-right`. Flipping the sign of `right` reverses strafing,
//! so every consumer goes through these functions.

use glam::Vec2;

pub fn forward(yaw_degrees: f32) -> Vec2 {
    let (sin, cos) = yaw_degrees.to_radians().sin_cos();
    Vec2::new(cos, sin)
}

pub fn right(yaw_degrees: f32) -> Vec2 {
    let (sin, cos) = yaw_degrees.to_radians().sin_cos();
    Vec2::new(-sin, cos)
}

/// Wrap an angle into [0, 360).
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
