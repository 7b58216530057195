//! Configuration sections with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub orbit: OrbitConfig,
    pub terrain: TerrainConfig,
    pub render: RenderConfig,
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    pub title: String,
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
}

/// Projection parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

/// Initial orbit pose and zoom limits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrbitConfig {
    pub radius: f32,
    /// Radians around +Y, 0 = looking from +Z.
    pub azimuth: f32,
    /// Radians above the horizon.
    pub elevation: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Orbit the middle of the terrain instead of the world origin.
    pub center_on_terrain: bool,
    /// Radians of rotation per pixel of mouse drag.
    pub drag_sensitivity: f32,
    /// Radius multiplier per scroll line; scrolling toward the user zooms in.
    pub zoom_step: f32,
}

/// Terrain grid shape and height source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Samples along X.
    pub width: usize,
    /// Samples along Z.
    pub depth: usize,
    /// World units per sample step on (x, y, z); y scales heights.
    pub scale: (f32, f32, f32),
    pub source: TerrainSourceConfig,
}

/// How height samples are produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum TerrainSourceConfig {
    /// Closed-form sine/cosine ripples.
    Waves { amplitude: f32, frequency: f32 },
    /// Seeded multi-octave simplex noise.
    Fbm {
        seed: u32,
        octaves: u32,
        lacunarity: f64,
        persistence: f64,
        base_frequency: f64,
        amplitude: f64,
    },
}

/// Rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Linear RGBA clear color.
    pub clear_color: [f64; 4],
    /// Directory holding `terrain.wgsl` to use instead of the built-in
    /// shader.
    pub shader_dir: Option<PathBuf>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log filter directive (e.g., "debug", "info,wgpu=warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Terrain Explorer".to_string(),
            vsync: true,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            radius: 30.0,
            azimuth: 0.0,
            elevation: 0.5,
            min_radius: 5.0,
            max_radius: 200.0,
            center_on_terrain: true,
            drag_sensitivity: 0.005,
            zoom_step: 0.9,
        }
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 100,
            depth: 100,
            scale: (1.0, 1.0, 1.0),
            source: TerrainSourceConfig::default(),
        }
    }
}

impl Default for TerrainSourceConfig {
    fn default() -> Self {
        Self::Waves {
            amplitude: 5.0,
            frequency: 4.0,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.529, 0.808, 0.922, 1.0],
            shader_dir: None,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load `config.ron` from `config_dir`, writing the defaults there first
    /// if the file does not exist yet.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Write this config to `config_dir/config.ron`, creating the directory.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let write_error = |source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        };
        std::fs::create_dir_all(config_dir).map_err(write_error)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path,
            source,
        })
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
