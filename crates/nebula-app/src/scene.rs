//! Builds the terrain mesh and initial view from configuration.

use glam::Vec3;
use nebula_config::{Config, TerrainConfig, TerrainSourceConfig};
use nebula_render::TerrainView;
use nebula_scene::{Camera, CameraError, OrbitController, OrbitError};
use nebula_terrain::{HeightSource, HeightfieldError, HeightmapParams, TerrainMesh};
use tracing::info;

/// Configuration that does not describe a renderable scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("invalid camera settings: {0}")]
    Camera(#[from] CameraError),

    #[error("invalid orbit settings: {0}")]
    Orbit(#[from] OrbitError),

    #[error("invalid terrain settings: {0}")]
    Terrain(#[from] HeightfieldError),
}

/// Map the config's height source onto the generator's.
pub fn height_source(source: &TerrainSourceConfig) -> HeightSource {
    match *source {
        TerrainSourceConfig::Waves {
            amplitude,
            frequency,
        } => HeightSource::Waves {
            amplitude,
            frequency,
        },
        TerrainSourceConfig::Fbm {
            seed,
            octaves,
            lacunarity,
            persistence,
            base_frequency,
            amplitude,
        } => HeightSource::Fbm(HeightmapParams {
            seed,
            octaves,
            lacunarity,
            persistence,
            base_frequency,
            amplitude,
        }),
    }
}

/// Sample the configured height source and triangulate it.
pub fn build_terrain(config: &TerrainConfig) -> Result<TerrainMesh, SceneError> {
    let grid = height_source(&config.source).generate(config.width, config.depth)?;
    let (sx, sy, sz) = config.scale;
    let mesh = TerrainMesh::from_heightfield(&grid, Vec3::new(sx, sy, sz));

    let (low, high) = grid.height_range();
    info!(
        "Terrain: {}x{} samples, heights {:.2}..{:.2}, {} triangles",
        config.width,
        config.depth,
        low,
        high,
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Camera and orbit from config. With `center_on_terrain`, the orbit target
/// is `terrain_center`.
pub fn build_view(config: &Config, terrain_center: Vec3) -> Result<TerrainView, SceneError> {
    let camera = Camera::new(
        config.camera.fov_y_degrees.to_radians(),
        1.0,
        config.camera.near,
        config.camera.far,
    )?;

    let orbit_config = &config.orbit;
    if !orbit_config.zoom_step.is_finite() || orbit_config.zoom_step <= 0.0 {
        return Err(OrbitError::InvalidZoomStep(orbit_config.zoom_step).into());
    }
    if !orbit_config.drag_sensitivity.is_finite() {
        return Err(OrbitError::InvalidDragSensitivity(orbit_config.drag_sensitivity).into());
    }
    let mut orbit = OrbitController::with_bounds(orbit_config.min_radius, orbit_config.max_radius)?
        .with_pose(orbit_config.radius, orbit_config.azimuth, orbit_config.elevation);
    if orbit_config.center_on_terrain {
        orbit.set_target(terrain_center);
    }

    let mut view = TerrainView::new(camera, orbit);
    view.on_resize(config.window.width, config.window.height);
    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_terrain_matches_grid_size() {
        let config = TerrainConfig::default();
        let mesh = build_terrain(&config).unwrap();
        assert_eq!(mesh.vertices().len(), config.width * config.depth);
        assert_eq!(
            mesh.indices().len(),
            (config.width - 1) * (config.depth - 1) * 6
        );
    }

    #[test]
    fn test_scale_is_applied() {
        let config = TerrainConfig {
            width: 3,
            depth: 2,
            scale: (2.0, 1.0, 4.0),
            ..Default::default()
        };
        let mesh = build_terrain(&config).unwrap();
        let (min, max) = mesh.bounds();
        assert_eq!(min.x, 0.0);
        assert_eq!(max.x, 4.0);
        assert_eq!(max.z, 4.0);
    }

    #[test]
    fn test_degenerate_grid_is_rejected() {
        let config = TerrainConfig {
            width: 1,
            ..Default::default()
        };
        assert!(matches!(
            build_terrain(&config),
            Err(SceneError::Terrain(HeightfieldError::GridTooSmall { .. }))
        ));
    }

    #[test]
    fn test_fbm_source_maps_every_parameter() {
        let source = TerrainSourceConfig::Fbm {
            seed: 9,
            octaves: 3,
            lacunarity: 2.5,
            persistence: 0.4,
            base_frequency: 0.05,
            amplitude: 8.0,
        };
        let HeightSource::Fbm(params) = height_source(&source) else {
            panic!("expected fbm source");
        };
        assert_eq!(params.seed, 9);
        assert_eq!(params.octaves, 3);
        assert_eq!(params.lacunarity, 2.5);
        assert_eq!(params.persistence, 0.4);
        assert_eq!(params.base_frequency, 0.05);
        assert_eq!(params.amplitude, 8.0);
    }

    #[test]
    fn test_view_orbits_terrain_center() {
        let config = Config::default();
        let center = Vec3::new(49.5, 0.0, 49.5);
        let view = build_view(&config, center).unwrap();
        assert_eq!(view.camera().target, center);
        assert_eq!(view.size(), (1280, 720));
        assert!((view.camera().aspect() - 1280.0 / 720.0).abs() < 1e-5);
    }

    #[test]
    fn test_view_can_orbit_origin() {
        let mut config = Config::default();
        config.orbit.center_on_terrain = false;
        let view = build_view(&config, Vec3::new(10.0, 0.0, 10.0)).unwrap();
        assert_eq!(view.camera().target, Vec3::ZERO);
    }

    #[test]
    fn test_invalid_clip_planes_are_rejected() {
        let mut config = Config::default();
        config.camera.near = 10.0;
        config.camera.far = 1.0;
        assert!(matches!(
            build_view(&config, Vec3::ZERO),
            Err(SceneError::Camera(CameraError::InvalidClipPlanes { .. }))
        ));
    }

    #[test]
    fn test_invalid_radius_bounds_are_rejected() {
        let mut config = Config::default();
        config.orbit.min_radius = 50.0;
        config.orbit.max_radius = 10.0;
        assert!(matches!(
            build_view(&config, Vec3::ZERO),
            Err(SceneError::Orbit(_))
        ));
    }

    #[test]
    fn test_non_positive_zoom_step_is_rejected() {
        for step in [-0.9, 0.0, f32::NAN] {
            let mut config = Config::default();
            config.orbit.zoom_step = step;
            assert!(matches!(
                build_view(&config, Vec3::ZERO),
                Err(SceneError::Orbit(OrbitError::InvalidZoomStep(_)))
            ));
        }
    }

    #[test]
    fn test_non_finite_drag_sensitivity_is_rejected() {
        let mut config = Config::default();
        config.orbit.drag_sensitivity = f32::INFINITY;
        assert!(matches!(
            build_view(&config, Vec3::ZERO),
            Err(SceneError::Orbit(OrbitError::InvalidDragSensitivity(_)))
        ));
    }
}
