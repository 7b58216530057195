//! Camera and orbit state behind the terrain uniforms.
//!
//! Nothing here touches the GPU, so the resize and input paths can be tested
//! without a device.

use glam::{Mat4, Vec3};
use nebula_math::identity;
use nebula_scene::{Camera, OrbitController};

use crate::pipeline::TerrainUniforms;

/// The transforms a terrain frame is drawn with.
///
/// Orbit input never reaches the camera implicitly: every mutator here
/// re-syncs the camera from the orbit and recomputes the cached view matrix.
#[derive(Debug, Clone)]
pub struct TerrainView {
    camera: Camera,
    orbit: OrbitController,
    view: Mat4,
    projection: Mat4,
    size: (u32, u32),
}

impl TerrainView {
    pub fn new(camera: Camera, orbit: OrbitController) -> Self {
        let mut view = Self {
            view: Mat4::IDENTITY,
            projection: camera.projection_matrix(),
            size: (0, 0),
            camera,
            orbit,
        };
        view.sync_camera();
        view
    }

    /// Track a new drawable size. Zero dimensions count as 1.
    ///
    /// Repeating the same size yields identical matrices.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.camera.set_aspect_from_size(width, height);
        self.projection = self.camera.projection_matrix();
        self.sync_camera();
    }

    /// Rotate around the target by the given azimuth and elevation deltas
    /// (radians).
    pub fn orbit(&mut self, delta_azimuth: f32, delta_elevation: f32) {
        self.orbit.rotate(delta_azimuth, delta_elevation);
        self.sync_camera();
    }

    /// Scale the orbit radius; `factor < 1` moves closer.
    pub fn zoom(&mut self, factor: f32) {
        self.orbit.zoom(factor);
        self.sync_camera();
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.orbit.set_target(target);
        self.sync_camera();
    }

    /// Uniforms for the next frame. The model transform is always identity.
    pub fn prepare_frame(&self) -> TerrainUniforms {
        TerrainUniforms::new(identity(), self.view, self.projection)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn orbit_controller(&self) -> &OrbitController {
        &self.orbit
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// Last size passed to [`on_resize`](Self::on_resize), `(0, 0)` before
    /// the first call.
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    fn sync_camera(&mut self) {
        self.orbit.update_camera(&mut self.camera);
        self.view = self.camera.view_matrix();
    }
}

impl Default for TerrainView {
    fn default() -> Self {
        Self::new(Camera::default(), OrbitController::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_view_follows_orbit() {
        let view = TerrainView::default();
        let eye = view.orbit_controller().eye_position();
        assert!((view.camera().position - eye).length() < 1e-5);
        assert_eq!(view.view_matrix(), view.camera().view_matrix());
    }

    #[test]
    fn test_resize_twice_is_idempotent() {
        let mut view = TerrainView::default();
        view.on_resize(1280, 720);
        let first = view.prepare_frame();
        view.on_resize(1280, 720);
        let second = view.prepare_frame();
        assert_eq!(first, second);
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut view = TerrainView::default();
        view.on_resize(800, 400);
        assert!((view.camera().aspect() - 2.0).abs() < 1e-6);
        assert_eq!(view.size(), (800, 400));
    }

    #[test]
    fn test_zero_height_resize_is_finite() {
        let mut view = TerrainView::default();
        view.on_resize(640, 0);
        assert!((view.camera().aspect() - 640.0).abs() < 1e-3);
        assert!(view.projection_matrix().is_finite());
    }

    #[test]
    fn test_orbit_moves_camera_and_view() {
        let mut view = TerrainView::default();
        let before = view.view_matrix();
        view.orbit(0.5, 0.1);
        assert_ne!(before, view.view_matrix());
        let eye = view.orbit_controller().eye_position();
        assert!((view.camera().position - eye).length() < 1e-5);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut view = TerrainView::default();
        view.zoom(10.0);
        assert_eq!(view.orbit_controller().radius(), OrbitController::DEFAULT_MAX_RADIUS);
        view.zoom(0.0001);
        assert_eq!(view.orbit_controller().radius(), OrbitController::DEFAULT_MIN_RADIUS);
    }

    #[test]
    fn test_non_finite_input_keeps_view_valid() {
        let mut view = TerrainView::default();
        let before = view.view_matrix();
        view.zoom(f32::NAN);
        view.orbit(0.0, f32::NAN);
        view.zoom(-0.5);
        assert_eq!(view.view_matrix(), before);
        assert!(view.camera().position.is_finite());
    }

    #[test]
    fn test_prepare_frame_uses_identity_model() {
        let mut view = TerrainView::default();
        view.set_target(Vec3::new(10.0, 0.0, 10.0));
        let uniforms = view.prepare_frame();
        assert_eq!(uniforms.model, Mat4::IDENTITY.to_cols_array_2d());
        assert_eq!(uniforms.view, view.view_matrix().to_cols_array_2d());
        assert_eq!(view.camera().target, Vec3::new(10.0, 0.0, 10.0));
    }
}
