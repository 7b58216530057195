//! Depth buffer and depth-test state.
//!
//! Depth uses the conventional mapping produced by
//! [`nebula_math::perspective`]: the near plane is 0.0 and the far plane 1.0,
//! so the buffer clears to 1.0 and closer fragments win with `Less`.

/// Depth comparison and write settings applied to a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthState {
    pub compare: wgpu::CompareFunction,
    pub write_enabled: bool,
}

impl DepthState {
    /// Standard opaque geometry: nearer fragments replace farther ones.
    pub const OPAQUE: Self = Self {
        compare: wgpu::CompareFunction::Less,
        write_enabled: true,
    };

    /// Pipeline depth-stencil state for a depth attachment of `format`.
    pub fn to_wgpu(self, format: wgpu::TextureFormat) -> wgpu::DepthStencilState {
        wgpu::DepthStencilState {
            format,
            depth_write_enabled: self.write_enabled,
            depth_compare: self.compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }
    }
}

impl Default for DepthState {
    fn default() -> Self {
        Self::OPAQUE
    }
}

/// Depth texture sized to the render target.
pub struct DepthBuffer {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl DepthBuffer {
    /// 32-bit float depth.
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Clear value: the far plane.
    pub const CLEAR_VALUE: f32 = 1.0;

    /// Create a depth buffer; zero dimensions are clamped to 1.
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth-buffer"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            width,
            height,
        }
    }

    /// Resize to new dimensions. Returns `false` (and keeps the texture) when
    /// the clamped size is unchanged.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) -> bool {
        if self.width == width.max(1) && self.height == height.max(1) {
            return false;
        }
        *self = Self::new(device, width, height);
        true
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}
