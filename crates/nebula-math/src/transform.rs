//! Affine transform builders.

use glam::{Mat4, Vec3};

/// The identity transform.
pub fn identity() -> Mat4 {
    Mat4::IDENTITY
}

/// Translation by `t`.
pub fn translation(t: Vec3) -> Mat4 {
    Mat4::from_translation(t)
}

/// Non-uniform scale by `s` along each axis.
pub fn scale(s: Vec3) -> Mat4 {
    Mat4::from_scale(s)
}

/// Euler rotation in radians, composed as `rot_z * rot_y * rot_x`.
///
/// The X rotation is applied to a vector first, then Y, then Z.
pub fn rotation_xyz(r: Vec3) -> Mat4 {
    Mat4::from_rotation_z(r.z) * Mat4::from_rotation_y(r.y) * Mat4::from_rotation_x(r.x)
}
