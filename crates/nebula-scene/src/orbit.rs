//! Orbit controller: spherical coordinates around a look target.

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use crate::Camera;

/// Distance kept between the elevation limit and the poles, in radians.
///
/// At exactly +/- pi/2 the view direction is parallel to the camera up vector.
pub const ELEVATION_MARGIN: f32 = 0.01;

/// Lowest allowed elevation.
const MIN_ELEVATION: f32 = -FRAC_PI_2 + ELEVATION_MARGIN;
/// Highest allowed elevation.
const MAX_ELEVATION: f32 = FRAC_PI_2 - ELEVATION_MARGIN;

/// Invalid orbit configuration.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum OrbitError {
    #[error("radius bounds must satisfy 0 < min <= max, got min={min} max={max}")]
    InvalidRadiusBounds { min: f32, max: f32 },

    #[error("zoom step must be finite and positive, got {0}")]
    InvalidZoomStep(f32),

    #[error("drag sensitivity must be finite, got {0}")]
    InvalidDragSensitivity(f32),
}

/// Orbits a camera around `target` at `radius`, `azimuth` and `elevation`.
///
/// Azimuth 0 with elevation 0 places the eye on the +Z side of the target.
/// Positive elevation raises the eye above the target.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitController {
    radius: f32,
    azimuth: f32,
    elevation: f32,
    min_radius: f32,
    max_radius: f32,
    /// Point the camera orbits around and looks at.
    pub target: Vec3,
}

impl OrbitController {
    pub const DEFAULT_RADIUS: f32 = 30.0;
    pub const DEFAULT_ELEVATION: f32 = 0.5;
    pub const DEFAULT_MIN_RADIUS: f32 = 5.0;
    pub const DEFAULT_MAX_RADIUS: f32 = 200.0;

    /// Create a controller with the default pose and custom radius bounds.
    ///
    /// The default radius is clamped into the new bounds.
    pub fn with_bounds(min_radius: f32, max_radius: f32) -> Result<Self, OrbitError> {
        if !(min_radius.is_finite() && max_radius.is_finite())
            || min_radius <= 0.0
            || min_radius > max_radius
        {
            return Err(OrbitError::InvalidRadiusBounds {
                min: min_radius,
                max: max_radius,
            });
        }
        Ok(Self {
            radius: Self::DEFAULT_RADIUS.clamp(min_radius, max_radius),
            min_radius,
            max_radius,
            ..Self::default()
        })
    }

    /// Set the full pose at once. Radius and elevation are clamped like the
    /// incremental mutators. Non-finite components leave that part of the
    /// pose unchanged.
    pub fn with_pose(mut self, radius: f32, azimuth: f32, elevation: f32) -> Self {
        if radius.is_finite() {
            self.radius = radius.clamp(self.min_radius, self.max_radius);
        }
        if azimuth.is_finite() {
            self.azimuth = azimuth;
        }
        if elevation.is_finite() {
            self.elevation = elevation.clamp(MIN_ELEVATION, MAX_ELEVATION);
        }
        self
    }

    /// Eye position for the current pose.
    pub fn eye_position(&self) -> Vec3 {
        let (sin_el, cos_el) = self.elevation.sin_cos();
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        self.target + self.radius * Vec3::new(cos_el * sin_az, sin_el, cos_el * cos_az)
    }

    /// Copy the orbit pose into `camera`.
    ///
    /// This is the only place orbit state reaches the camera. Call it after
    /// [`rotate`](Self::rotate) or [`zoom`](Self::zoom) and before reading
    /// the camera's matrices.
    pub fn update_camera(&self, camera: &mut Camera) {
        camera.position = self.eye_position();
        camera.target = self.target;
    }

    /// Add to azimuth and elevation. Azimuth is left unbounded since only its
    /// sine and cosine are ever used; elevation stops short of the poles.
    ///
    /// Non-finite deltas are ignored.
    pub fn rotate(&mut self, delta_azimuth: f32, delta_elevation: f32) {
        if delta_azimuth.is_finite() {
            self.azimuth += delta_azimuth;
        }
        if delta_elevation.is_finite() {
            self.elevation =
                (self.elevation + delta_elevation).clamp(MIN_ELEVATION, MAX_ELEVATION);
        }
    }

    /// Scale the radius by `factor`, clamped to the configured bounds.
    ///
    /// Multiplicative so zooming in and back out by reciprocal factors
    /// returns to the same radius. Factors that are non-finite or not
    /// positive are ignored.
    pub fn zoom(&mut self, factor: f32) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        self.radius = (self.radius * factor).clamp(self.min_radius, self.max_radius);
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn elevation(&self) -> f32 {
        self.elevation
    }

    /// `(min, max)` radius bounds.
    pub fn radius_bounds(&self) -> (f32, f32) {
        (self.min_radius, self.max_radius)
    }
}

impl Default for OrbitController {
    fn default() -> Self {
        Self {
            radius: Self::DEFAULT_RADIUS,
            azimuth: 0.0,
            elevation: Self::DEFAULT_ELEVATION,
            min_radius: Self::DEFAULT_MIN_RADIUS,
            max_radius: Self::DEFAULT_MAX_RADIUS,
            target: Vec3::ZERO,
        }
    }
}
