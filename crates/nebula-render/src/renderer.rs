//! Per-frame terrain rendering driven by the host's redraw and resize events.

use log::{debug, info, trace};
use nebula_terrain::TerrainMesh;
use thiserror::Error;

use crate::buffer::{BufferAllocator, MeshBuffer};
use crate::depth::{DepthBuffer, DepthState};
use crate::pass::{FrameEncoder, RenderPassBuilder, SKY_BLUE};
use crate::pipeline::{TerrainPipeline, TerrainUniforms, draw_terrain};
use crate::shader::{ShaderError, ShaderLibrary, TERRAIN_SHADER_NAME};
use crate::view::TerrainView;

/// Lifecycle of a [`FrameRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererState {
    /// No GPU resources yet.
    Uninitialized,
    /// Idle between frames.
    Ready,
    /// Encoding and submitting a frame.
    Rendering,
    /// Applying a new drawable size.
    Resizing,
}

/// What happened to a frame handed to [`FrameRenderer::on_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Commands were submitted (and presented, for surface targets).
    Submitted,
    /// No frame target was available; nothing was drawn.
    Skipped,
}

#[derive(Debug, Error)]
pub enum RendererError {
    #[error("renderer used before initialize()")]
    NotInitialized,

    #[error("renderer is already initialized")]
    AlreadyInitialized,

    #[error("failed to upload terrain mesh ({vertices} vertices, {indices} indices)")]
    MeshUpload { vertices: usize, indices: usize },

    #[error(transparent)]
    Shader(#[from] ShaderError),

    #[error("GPU rejected renderer resources: {0}")]
    Validation(String),
}

/// GPU objects created once by [`FrameRenderer::initialize`].
struct GpuResources {
    pipeline: TerrainPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    mesh: MeshBuffer,
    depth: DepthBuffer,
}

/// Draws the terrain mesh once per frame tick.
///
/// Owns every GPU handle it creates for the rest of the session. Frames are
/// fire-and-forget: [`on_frame`](Self::on_frame) submits and returns without
/// waiting for the GPU.
pub struct FrameRenderer {
    view: TerrainView,
    state: RendererState,
    clear_color: wgpu::Color,
    gpu: Option<GpuResources>,
}

impl FrameRenderer {
    pub fn new(view: TerrainView) -> Self {
        Self {
            view,
            state: RendererState::Uninitialized,
            clear_color: SKY_BLUE,
            gpu: None,
        }
    }

    pub fn with_clear_color(mut self, color: wgpu::Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Build the pipeline, depth buffer and uniform binding, and upload the
    /// mesh. Failures are fatal; there is no retry.
    ///
    /// Creation runs inside a validation error scope, so a rejected shader or
    /// pipeline comes back as [`RendererError::Validation`].
    pub fn initialize(
        &mut self,
        device: &wgpu::Device,
        shaders: &mut ShaderLibrary,
        color_format: wgpu::TextureFormat,
        mesh: &TerrainMesh,
        width: u32,
        height: u32,
    ) -> Result<(), RendererError> {
        if self.gpu.is_some() {
            return Err(RendererError::AlreadyInitialized);
        }

        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let resources = self.create_resources(device, shaders, color_format, mesh, width, height);
        if let Some(err) = pollster::block_on(scope.pop()) {
            return Err(RendererError::Validation(err.to_string()));
        }
        let resources = resources?;

        info!(
            "Terrain renderer ready: {} triangles, {}x{} target, {:?}",
            mesh.triangle_count(),
            resources.depth.width(),
            resources.depth.height(),
            color_format,
        );

        self.gpu = Some(resources);
        self.state = RendererState::Ready;
        Ok(())
    }

    fn create_resources(
        &mut self,
        device: &wgpu::Device,
        shaders: &mut ShaderLibrary,
        color_format: wgpu::TextureFormat,
        mesh: &TerrainMesh,
        width: u32,
        height: u32,
    ) -> Result<GpuResources, RendererError> {
        let shader = match shaders.get(TERRAIN_SHADER_NAME) {
            Some(module) => module,
            None => shaders.load_terrain(device)?,
        };
        let pipeline = TerrainPipeline::new(device, &shader, color_format, DepthState::OPAQUE);

        let allocator = BufferAllocator::new(device);
        let gpu_mesh =
            allocator
                .upload_terrain("terrain", mesh)
                .ok_or(RendererError::MeshUpload {
                    vertices: mesh.vertices().len(),
                    indices: mesh.indices().len(),
                })?;

        self.view.on_resize(width, height);
        let uniform_buffer = allocator.create_uniform_buffer(
            "terrain-uniforms",
            bytemuck::bytes_of(&self.view.prepare_frame()),
        );
        let uniform_bind_group = pipeline.create_uniform_bind_group(device, &uniform_buffer);
        let depth = DepthBuffer::new(device, width, height);

        Ok(GpuResources {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            mesh: gpu_mesh,
            depth,
        })
    }

    /// Apply a new drawable size to the camera and depth buffer.
    ///
    /// Before initialization only the camera is updated.
    pub fn on_resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        let Some(gpu) = self.gpu.as_mut() else {
            self.view.on_resize(width, height);
            return;
        };

        self.state = RendererState::Resizing;
        self.view.on_resize(width, height);
        if gpu.depth.resize(device, width, height) {
            debug!("Depth buffer resized to {}x{}", gpu.depth.width(), gpu.depth.height());
        }
        self.state = RendererState::Ready;
    }

    /// Encode, submit and present one frame.
    ///
    /// `None` means the host had no drawable this tick; the frame is skipped
    /// silently and not retried.
    pub fn on_frame(&mut self, frame: Option<FrameEncoder>) -> Result<FrameOutcome, RendererError> {
        let Some(gpu) = self.gpu.as_ref() else {
            return Err(RendererError::NotInitialized);
        };
        let Some(mut frame) = frame else {
            return Ok(FrameOutcome::Skipped);
        };

        self.state = RendererState::Rendering;

        let uniforms: TerrainUniforms = self.view.prepare_frame();
        frame
            .queue()
            .write_buffer(&gpu.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let builder = RenderPassBuilder::new()
            .clear_color(self.clear_color)
            .depth(gpu.depth.view.clone(), DepthBuffer::CLEAR_VALUE)
            .label("terrain-pass");
        {
            let mut pass = frame.begin_render_pass(&builder);
            draw_terrain(&mut pass, &gpu.pipeline, &gpu.uniform_bind_group, &gpu.mesh);
        }
        if frame.submit() {
            trace!("Frame presented");
        }

        self.state = RendererState::Ready;
        Ok(FrameOutcome::Submitted)
    }

    pub fn state(&self) -> RendererState {
        self.state
    }

    pub fn view(&self) -> &TerrainView {
        &self.view
    }

    /// Mutable access for orbit and zoom input between frames.
    pub fn view_mut(&mut self) -> &mut TerrainView {
        &mut self.view
    }

    /// Size of the depth buffer, if initialized.
    pub fn depth_size(&self) -> Option<(u32, u32)> {
        self.gpu
            .as_ref()
            .map(|gpu| (gpu.depth.width(), gpu.depth.height()))
    }

    /// Number of indices drawn per frame, if initialized.
    pub fn index_count(&self) -> Option<u32> {
        self.gpu.as_ref().map(|gpu| gpu.mesh.index_count)
    }
}
