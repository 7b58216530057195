//! Look-at view matrices.

use glam::{Mat4, Vec3, Vec4};

use crate::MathError;

/// Squared length below which a vector is treated as zero.
const DEGENERATE_EPSILON: f32 = 1e-10;

/// Build a right-handed view matrix looking from `eye` towards `center`.
///
/// The result is the inverse of the camera's world transform: the basis
/// `(right, up, -forward)` as rows, composed with a translation by `-eye`.
///
/// If `up` is zero or parallel to the view direction the world axis least
/// aligned with the view direction is used in its place, so the returned basis
/// is always orthonormal. Use [`try_look_at`] to reject that input instead.
///
/// # Panics
///
/// Panics if `eye` and `center` coincide.
pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Mat4 {
    let to_center = center - eye;
    assert!(
        to_center.length_squared() > DEGENERATE_EPSILON,
        "look_at: eye and center coincide at {eye:?}"
    );
    let forward = to_center.normalize();

    let right = match right_vector(forward, up) {
        Some(right) => right,
        None => right_vector(forward, fallback_up(forward))
            .unwrap_or_else(|| forward.any_orthonormal_vector()),
    };

    view_from_basis(eye, forward, right)
}

/// Checked variant of [`look_at`] that refuses degenerate input.
pub fn try_look_at(eye: Vec3, center: Vec3, up: Vec3) -> Result<Mat4, MathError> {
    let to_center = center - eye;
    if to_center.length_squared() <= DEGENERATE_EPSILON {
        return Err(MathError::CoincidentEyeAndCenter);
    }
    let forward = to_center.normalize();
    let right = right_vector(forward, up).ok_or(MathError::ParallelUpVector)?;
    Ok(view_from_basis(eye, forward, right))
}

/// `normalize(cross(forward, up))`, or `None` when the cross product vanishes.
fn right_vector(forward: Vec3, up: Vec3) -> Option<Vec3> {
    let up = up.normalize_or_zero();
    let right = forward.cross(up);
    (right.length_squared() > DEGENERATE_EPSILON).then(|| right.normalize())
}

/// The world axis with the smallest component along `forward`.
fn fallback_up(forward: Vec3) -> Vec3 {
    let a = forward.abs();
    if a.x <= a.y && a.x <= a.z {
        Vec3::X
    } else if a.y <= a.z {
        Vec3::Y
    } else {
        Vec3::Z
    }
}

fn view_from_basis(eye: Vec3, forward: Vec3, right: Vec3) -> Mat4 {
    let up = right.cross(forward);
    Mat4::from_cols(
        Vec4::new(right.x, up.x, -forward.x, 0.0),
        Vec4::new(right.y, up.y, -forward.y, 0.0),
        Vec4::new(right.z, up.z, -forward.z, 0.0),
        Vec4::new(-right.dot(eye), -up.dot(eye), forward.dot(eye), 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_orthonormal(view: Mat4) {
        let rows = [
            view.row(0).truncate(),
            view.row(1).truncate(),
            view.row(2).truncate(),
        ];
        for (i, a) in rows.iter().enumerate() {
            assert!((a.length() - 1.0).abs() < 1e-5, "row {i} not unit: {a:?}");
            for b in rows.iter().skip(i + 1) {
                assert!(a.dot(*b).abs() < 1e-5, "rows not perpendicular");
            }
        }
    }

    #[test]
    fn test_eye_maps_to_origin() {
        let cases = [
            (Vec3::new(0.0, 14.4, 26.3), Vec3::ZERO),
            (Vec3::new(-5.0, 3.0, 2.0), Vec3::new(64.0, 0.0, 64.0)),
            (Vec3::new(1.0, 1.0, 1.0), Vec3::new(1.0, 1.0, -9.0)),
        ];
        for (eye, center) in cases {
            let view = look_at(eye, center, Vec3::Y);
            assert!(view.transform_point3(eye).length() < 1e-4);
            assert_orthonormal(view);
        }
    }

    #[test]
    fn test_center_lies_on_negative_z() {
        let eye = Vec3::new(3.0, 4.0, 5.0);
        let center = Vec3::new(-1.0, 0.5, 2.0);
        let p = look_at(eye, center, Vec3::Y).transform_point3(center);
        assert!(p.x.abs() < 1e-4 && p.y.abs() < 1e-4);
        assert!((p.z + (center - eye).length()).abs() < 1e-4);
    }

    #[test]
    fn test_matches_glam_look_at_rh() {
        let eye = Vec3::new(10.0, 20.0, 30.0);
        let center = Vec3::new(1.0, -2.0, 0.5);
        let ours = look_at(eye, center, Vec3::Y);
        let glam = Mat4::look_at_rh(eye, center, Vec3::Y);
        assert!(ours.abs_diff_eq(glam, 1e-5));
    }

    #[test]
    fn test_parallel_up_falls_back_to_orthonormal_basis() {
        let view = look_at(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO, Vec3::Y);
        assert!(view.is_finite());
        assert_orthonormal(view);
        assert!(view.transform_point3(Vec3::new(0.0, 10.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_zero_up_falls_back() {
        let view = look_at(Vec3::Z, Vec3::ZERO, Vec3::ZERO);
        assert!(view.is_finite());
        assert_orthonormal(view);
    }

    #[test]
    fn test_try_look_at_rejects_parallel_up() {
        let result = try_look_at(Vec3::new(0.0, -3.0, 0.0), Vec3::ZERO, Vec3::Y);
        assert_eq!(result, Err(MathError::ParallelUpVector));
    }

    #[test]
    fn test_try_look_at_rejects_coincident_points() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(
            try_look_at(p, p, Vec3::Y),
            Err(MathError::CoincidentEyeAndCenter)
        );
    }

    #[test]
    fn test_try_look_at_agrees_with_look_at() {
        let eye = Vec3::new(0.0, 5.0, 8.0);
        let checked = try_look_at(eye, Vec3::ZERO, Vec3::Y).unwrap();
        assert_eq!(checked, look_at(eye, Vec3::ZERO, Vec3::Y));
    }

    #[test]
    #[should_panic(expected = "eye and center coincide")]
    fn test_look_at_panics_on_coincident_points() {
        look_at(Vec3::ONE, Vec3::ONE, Vec3::Y);
    }
}
