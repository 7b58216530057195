//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Terrain explorer command-line arguments.
///
/// CLI values override settings loaded from `config.ron` for this run only;
/// they are never written back.
#[derive(Parser, Debug, Default)]
#[command(name = "terrain-explorer", about = "Orbit a procedurally generated terrain")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Terrain samples per side (sets both width and depth, minimum 2).
    #[arg(long, value_parser = clap::value_parser!(u32).range(2..))]
    pub grid_size: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory to load `terrain.wgsl` from instead of the built-in shader.
    #[arg(long)]
    pub shader_dir: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(size) = args.grid_size {
            self.terrain.width = size as usize;
            self.terrain.depth = size as usize;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(ref dir) = args.shader_dir {
            self.render.shader_dir = Some(dir.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            width: Some(1920),
            grid_size: Some(64),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.terrain.width, 64);
        assert_eq!(config.terrain.depth, 64);
        // Non-overridden fields retain defaults
        assert_eq!(config.window.height, 720);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::try_parse_from([
            "terrain-explorer",
            "--width",
            "800",
            "--grid-size",
            "33",
            "--log-level",
            "debug",
            "--config",
            "/tmp/terrain",
            "--shader-dir",
            "/tmp/shaders",
        ])
        .unwrap();
        assert_eq!(args.width, Some(800));
        assert_eq!(args.height, None);
        assert_eq!(args.grid_size, Some(33));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.config, Some(PathBuf::from("/tmp/terrain")));
        assert_eq!(args.shader_dir, Some(PathBuf::from("/tmp/shaders")));
    }

    #[test]
    fn test_shader_dir_override() {
        let mut config = Config::default();
        let args = CliArgs {
            shader_dir: Some(PathBuf::from("shaders")),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.render.shader_dir, Some(PathBuf::from("shaders")));
    }

    #[test]
    fn test_grid_size_below_two_is_rejected() {
        let result = CliArgs::try_parse_from(["terrain-explorer", "--grid-size", "1"]);
        assert!(result.is_err());
    }
}
