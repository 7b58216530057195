//! Tracing subscriber setup for the terrain explorer.
//!
//! Console output with uptime timestamps and module paths, plus a JSON log
//! file in debug builds. Library crates log through the `log` facade; those
//! records reach the subscriber through its `tracing-log` bridge.

use nebula_config::Config;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_FILTER: &str = "info,wgpu=warn,naga=warn";

/// Name of the JSON log file written in debug builds.
pub const LOG_FILE_NAME: &str = "terrain-explorer.log";

/// Filter directive derived from `config.debug.log_level`.
///
/// A bare level such as `"debug"` keeps the GPU crates at `warn`; directives
/// that already mention `wgpu` or `naga` are used verbatim.
pub fn filter_directive(config: Option<&Config>) -> String {
    let level = config
        .map(|config| config.debug.log_level.trim())
        .filter(|level| !level.is_empty());

    match level {
        None => DEFAULT_FILTER.to_string(),
        Some(level) if level.contains("wgpu") || level.contains("naga") => level.to_string(),
        Some(level) => format!("{level},wgpu=warn,naga=warn"),
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the config's log level. In debug builds
/// with a `log_dir`, a JSON file layer is added; failure to create the file
/// only disables that layer.
///
/// Returns the path of the JSON log file when one is being written.
///
/// ```no_run
/// use nebula_config::Config;
/// use nebula_log::init_logging;
///
/// let config = Config::default();
/// init_logging(Some(std::path::Path::new("./logs")), cfg!(debug_assertions), Some(&config));
/// ```
pub fn init_logging(
    log_dir: Option<&Path>,
    debug_build: bool,
    config: Option<&Config>,
) -> Option<PathBuf> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE_NAME))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return Some(log_dir.join(LOG_FILE_NAME));
    }

    subscriber.init();
    None
}
