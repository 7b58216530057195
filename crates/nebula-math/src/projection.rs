//! Perspective projection.
//!
//! Targets the wgpu clip-space depth range: after the perspective divide the
//! near plane lands on depth 0.0 and the far plane on depth 1.0. Eye space is
//! right-handed with the camera looking down -Z.

use std::f32::consts::PI;

use glam::Mat4;

/// Build a symmetric right-handed perspective projection.
///
/// # Panics
///
/// Panics if `fov_y` is outside `(0, pi)`, `aspect` is not positive, or the
/// clip planes do not satisfy `0 < near < far`. These are caller bugs; a
/// degenerate projection is never produced silently.
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    assert!(
        fov_y.is_finite() && fov_y > 0.0 && fov_y < PI,
        "fov_y must be in (0, pi), got {fov_y}"
    );
    assert!(
        aspect.is_finite() && aspect > 0.0,
        "aspect must be positive, got {aspect}"
    );
    assert!(
        near.is_finite() && far.is_finite() && near > 0.0 && near < far,
        "clip planes must satisfy 0 < near < far, got near={near} far={far}"
    );

    let y_scale = 1.0 / (fov_y * 0.5).tan();
    let x_scale = y_scale / aspect;
    let z_range = far / (near - far);

    Mat4::from_cols_array(&[
        x_scale, 0.0, 0.0, 0.0, //
        0.0, y_scale, 0.0, 0.0, //
        0.0, 0.0, z_range, -1.0, //
        0.0, 0.0, z_range * near, 0.0,
    ])
}

/// Aspect ratio of a surface, with both dimensions clamped to at least 1.
///
/// A zero-height surface (minimized window) therefore never divides by zero
/// and the result is always positive.
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}
