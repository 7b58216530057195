//! Perspective camera producing view and projection matrices.

use std::f32::consts::PI;

use glam::{Mat4, Vec3};
use nebula_math::{aspect_ratio, look_at, perspective};

/// Invalid projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum CameraError {
    #[error("vertical field of view must be in (0, pi), got {0}")]
    InvalidFov(f32),

    #[error("aspect ratio must be positive, got {0}")]
    InvalidAspect(f32),

    #[error("clip planes must satisfy 0 < near < far, got near={near} far={far}")]
    InvalidClipPlanes { near: f32, far: f32 },
}

/// A look-at camera with a symmetric perspective projection.
///
/// Position, target and up are free to change every frame. The projection
/// parameters are only reachable through validated setters, so
/// [`projection_matrix`](Self::projection_matrix) never sees a degenerate
/// frustum.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye position in world space.
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Approximate up direction; re-orthogonalized when building the view.
    pub up: Vec3,
    fov_y: f32,
    aspect: f32,
    near: f32,
    far: f32,
}

impl Camera {
    /// Create a camera at `(0, 0, 5)` looking at the origin with the given
    /// projection parameters.
    pub fn new(fov_y: f32, aspect: f32, near: f32, far: f32) -> Result<Self, CameraError> {
        validate_fov(fov_y)?;
        validate_aspect(aspect)?;
        validate_clip_planes(near, far)?;
        Ok(Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y,
            aspect,
            near,
            far,
        })
    }

    /// World-to-view transform.
    pub fn view_matrix(&self) -> Mat4 {
        look_at(self.position, self.target, self.up)
    }

    /// View-to-clip transform (wgpu depth range, near -> 0, far -> 1).
    pub fn projection_matrix(&self) -> Mat4 {
        perspective(self.fov_y, self.aspect, self.near, self.far)
    }

    /// `projection * view`.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update the aspect ratio from a surface size in pixels.
    ///
    /// Both dimensions are clamped to at least 1, so a minimized window keeps
    /// the camera valid.
    pub fn set_aspect_from_size(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio(width, height);
    }

    pub fn set_aspect(&mut self, aspect: f32) -> Result<(), CameraError> {
        validate_aspect(aspect)?;
        self.aspect = aspect;
        Ok(())
    }

    pub fn set_fov_y(&mut self, fov_y: f32) -> Result<(), CameraError> {
        validate_fov(fov_y)?;
        self.fov_y = fov_y;
        Ok(())
    }

    pub fn set_clip_planes(&mut self, near: f32, far: f32) -> Result<(), CameraError> {
        validate_clip_planes(near, far)?;
        self.near = near;
        self.far = far;
        Ok(())
    }

    /// Vertical field of view in radians.
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Width / height.
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: 60.0_f32.to_radians(),
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

fn validate_fov(fov_y: f32) -> Result<(), CameraError> {
    if fov_y.is_finite() && fov_y > 0.0 && fov_y < PI {
        Ok(())
    } else {
        Err(CameraError::InvalidFov(fov_y))
    }
}

fn validate_aspect(aspect: f32) -> Result<(), CameraError> {
    if aspect.is_finite() && aspect > 0.0 {
        Ok(())
    } else {
        Err(CameraError::InvalidAspect(aspect))
    }
}

fn validate_clip_planes(near: f32, far: f32) -> Result<(), CameraError> {
    if near.is_finite() && far.is_finite() && near > 0.0 && near < far {
        Ok(())
    } else {
        Err(CameraError::InvalidClipPlanes { near, far })
    }
}
