//! Per-user directories for configuration and logs.

use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur while resolving or creating platform directories.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The OS did not provide a configuration directory.
    #[error("could not determine OS configuration directory")]
    NoConfigDir,

    #[error("platform I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Where the explorer keeps its files.
///
/// Follows OS conventions through `dirs` (XDG on Linux, Known Folders on
/// Windows, Library on macOS) unless a config directory is given explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    /// JSON log files (debug builds).
    pub log_dir: PathBuf,
}

const APP_NAME: &str = "terrain-explorer";

impl PlatformDirs {
    /// Resolve directories without creating them.
    ///
    /// An explicit `config_override` replaces the platform config directory
    /// and hosts the log directory too.
    pub fn resolve(config_override: Option<&Path>) -> Result<Self, PlatformError> {
        if let Some(root) = config_override {
            return Ok(Self::resolve_with_root(root));
        }

        let config_dir = dirs::config_dir()
            .ok_or(PlatformError::NoConfigDir)?
            .join(APP_NAME);
        let log_dir = dirs::data_local_dir()
            .map(|dir| dir.join(APP_NAME).join("logs"))
            .unwrap_or_else(|| config_dir.join("logs"));

        Ok(Self {
            config_dir,
            log_dir,
        })
    }

    /// Directories rooted under `root`, for overrides and tests.
    pub fn resolve_with_root(root: &Path) -> Self {
        Self {
            config_dir: root.to_path_buf(),
            log_dir: root.join("logs"),
        }
    }

    /// Create all directories on disk.
    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }

    /// [`resolve`](Self::resolve) followed by [`create_dirs`](Self::create_dirs).
    pub fn resolve_and_create(config_override: Option<&Path>) -> Result<Self, PlatformError> {
        let dirs = Self::resolve(config_override)?;
        dirs.create_dirs()?;
        Ok(dirs)
    }
}
