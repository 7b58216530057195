//! `terrain-explorer`: orbit a procedurally generated terrain.
//!
//! Run with: `cargo run -p nebula-app -- --grid-size 128`

use clap::Parser;
use nebula_app::platform::PlatformDirs;
use nebula_config::{CliArgs, Config};
use tracing::{info, warn};

fn main() {
    let args = CliArgs::parse();

    let dirs = match PlatformDirs::resolve_and_create(args.config.as_deref()) {
        Ok(dirs) => dirs,
        Err(e) => {
            eprintln!("Failed to initialize platform directories: {e}");
            std::process::exit(1);
        }
    };

    // Logging is not up yet, so a config failure is reported after init.
    let loaded = Config::load_or_create(&dirs.config_dir);
    let mut config = loaded.as_ref().cloned().unwrap_or_default();
    config.apply_cli_overrides(&args);

    let log_file =
        nebula_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    if let Err(e) = loaded {
        warn!("Failed to load config: {e}, using defaults");
    }
    info!("Config directory: {}", dirs.config_dir.display());
    if let Some(log_file) = log_file {
        info!("Writing JSON log to {}", log_file.display());
    }
    info!(
        "Window: {}x{} | Terrain: {}x{} samples",
        config.window.width, config.window.height, config.terrain.width, config.terrain.depth
    );

    nebula_app::window::run_with_config(config);
}
