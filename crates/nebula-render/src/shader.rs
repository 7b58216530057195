//! Shader module loading and caching.

use log::{debug, info};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};
use thiserror::Error;
use wgpu::{ShaderModuleDescriptor, ShaderSource};

/// Library key of the terrain shader.
pub const TERRAIN_SHADER_NAME: &str = "terrain";

/// WGSL source of the terrain shader (`vertex_main` / `fragment_main`).
pub const TERRAIN_SHADER_SOURCE: &str = include_str!("../shaders/terrain.wgsl");

/// Error types for shader loading operations.
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("shader file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read shader file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("no shader directory configured for file-based loading")]
    NoShaderDir,
}

/// Named cache of compiled shader modules.
///
/// Modules come either from embedded WGSL or, when a shader directory is
/// configured, from `<dir>/<name>.wgsl` on disk so they can be edited
/// without rebuilding.
pub struct ShaderLibrary {
    modules: HashMap<String, Arc<wgpu::ShaderModule>>,
    shader_dir: Option<PathBuf>,
}

impl ShaderLibrary {
    pub fn new() -> Self {
        Self {
            modules: HashMap::new(),
            shader_dir: None,
        }
    }

    /// Set the directory to load .wgsl files from.
    pub fn with_shader_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.shader_dir = Some(dir.into());
        self
    }

    pub fn shader_dir(&self) -> Option<&Path> {
        self.shader_dir.as_deref()
    }

    /// Compile WGSL source and cache it under `name`, replacing any previous
    /// module with that name.
    ///
    /// Invalid WGSL is reported by the device's uncaptured error handler.
    pub fn load_from_source(
        &mut self,
        device: &wgpu::Device,
        name: &str,
        source: &str,
    ) -> Arc<wgpu::ShaderModule> {
        debug!("Compiling shader '{}' ({} bytes)", name, source.len());

        let module = Arc::new(device.create_shader_module(ShaderModuleDescriptor {
            label: Some(name),
            source: ShaderSource::Wgsl(source.into()),
        }));

        if self
            .modules
            .insert(name.to_string(), Arc::clone(&module))
            .is_some()
        {
            info!("Replaced shader '{}'", name);
        } else {
            info!("Loaded shader '{}'", name);
        }
        module
    }

    /// Load `<shader_dir>/<filename>` and cache it under `name`.
    pub fn load_from_file(
        &mut self,
        device: &wgpu::Device,
        name: &str,
        filename: &str,
    ) -> Result<Arc<wgpu::ShaderModule>, ShaderError> {
        let shader_dir = self.shader_dir.as_ref().ok_or(ShaderError::NoShaderDir)?;
        let path = shader_dir.join(filename);

        debug!("Loading shader '{}' from file: {:?}", name, path);

        if !path.exists() {
            return Err(ShaderError::FileNotFound { path });
        }

        let source = std::fs::read_to_string(&path)?;
        Ok(self.load_from_source(device, name, &source))
    }

    /// Cache the terrain shader.
    ///
    /// Prefers `terrain.wgsl` from the shader directory when one is set and
    /// the file exists, otherwise compiles the embedded source.
    pub fn load_terrain(
        &mut self,
        device: &wgpu::Device,
    ) -> Result<Arc<wgpu::ShaderModule>, ShaderError> {
        let filename = format!("{TERRAIN_SHADER_NAME}.wgsl");
        match self.load_from_file(device, TERRAIN_SHADER_NAME, &filename) {
            Ok(module) => Ok(module),
            Err(ShaderError::NoShaderDir | ShaderError::FileNotFound { .. }) => {
                Ok(self.load_from_source(device, TERRAIN_SHADER_NAME, TERRAIN_SHADER_SOURCE))
            }
            Err(e) => Err(e),
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<wgpu::ShaderModule>> {
        self.modules.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl Default for ShaderLibrary {
    fn default() -> Self {
        Self::new()
    }
}
