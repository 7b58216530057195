//! wgpu terrain renderer: device and surface setup, mesh upload, the unlit
//! terrain pipeline, and the per-frame state machine that drives it.

pub mod buffer;
pub mod depth;
pub mod gpu;
pub mod pass;
pub mod pipeline;
pub mod renderer;
pub mod shader;
pub mod view;

pub use buffer::{BufferAllocator, MeshBuffer, TERRAIN_VERTEX_LAYOUT};
pub use depth::{DepthBuffer, DepthState};
pub use gpu::{
    RenderContext, RenderContextError, SurfaceError, init_render_context_blocking,
    request_headless_device,
};
pub use pass::{FrameEncoder, FrameTarget, RenderPassBuilder, SKY_BLUE};
pub use pipeline::{TerrainPipeline, TerrainUniforms, draw_terrain};
pub use renderer::{FrameOutcome, FrameRenderer, RendererError, RendererState};
pub use shader::{ShaderError, ShaderLibrary, TERRAIN_SHADER_NAME, TERRAIN_SHADER_SOURCE};
pub use view::TerrainView;
