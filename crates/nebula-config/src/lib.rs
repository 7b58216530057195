//! Configuration for the terrain explorer.
//!
//! Settings persist to disk as a RON file in the platform config directory.
//! CLI flags (clap) override the loaded values for a single run, and unknown
//! or missing fields fall back to defaults so older files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, CameraConfig, Config, DebugConfig, OrbitConfig, RenderConfig,
    TerrainConfig, TerrainSourceConfig, WindowConfig,
};
pub use error::ConfigError;
