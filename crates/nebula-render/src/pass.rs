//! Render pass configuration and per-frame command encoding.
//!
//! [`RenderPassBuilder`] describes the attachments of a pass declaratively and
//! [`FrameEncoder`] owns one frame's command encoder and color target until it
//! is submitted.

/// Clear color behind the terrain.
pub const SKY_BLUE: wgpu::Color = wgpu::Color {
    r: 0.529,
    g: 0.808,
    b: 0.922,
    a: 1.0,
};

/// Configuration for depth stencil attachment.
#[derive(Debug)]
pub struct DepthAttachmentConfig {
    pub view: wgpu::TextureView,
    pub clear_value: f32,
}

/// Builder for configuring render pass descriptors with a fluent API.
#[derive(Debug)]
pub struct RenderPassBuilder {
    clear_color: wgpu::Color,
    depth_attachment: Option<DepthAttachmentConfig>,
    label: Option<&'static str>,
}

impl Default for RenderPassBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderPassBuilder {
    /// Create a new render pass builder with sky blue clear color.
    pub fn new() -> Self {
        Self {
            clear_color: SKY_BLUE,
            depth_attachment: None,
            label: None,
        }
    }

    pub fn clear_color(mut self, color: wgpu::Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Attach a depth buffer, cleared to `clear_value` at the start of the pass.
    pub fn depth(mut self, view: wgpu::TextureView, clear_value: f32) -> Self {
        self.depth_attachment = Some(DepthAttachmentConfig { view, clear_value });
        self
    }

    pub fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    fn create_render_pass<'encoder>(
        &self,
        encoder: &'encoder mut wgpu::CommandEncoder,
        color_view: &'encoder wgpu::TextureView,
    ) -> wgpu::RenderPass<'encoder> {
        let color_attachment = wgpu::RenderPassColorAttachment {
            view: color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(self.clear_color),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        };

        let depth_stencil_attachment =
            self.depth_attachment
                .as_ref()
                .map(|depth| wgpu::RenderPassDepthStencilAttachment {
                    view: &depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(depth.clear_value),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                });

        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: self.label,
            color_attachments: &[Some(color_attachment)],
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }
}

/// What a frame draws into.
pub enum FrameTarget {
    /// A swapchain image, presented after submission.
    Surface(wgpu::SurfaceTexture),
    /// An offscreen color view; nothing is presented.
    Offscreen(wgpu::TextureView),
}

/// One frame's command encoder and color target.
///
/// Nothing reaches the GPU until [`submit`](Self::submit); a frame dropped
/// before that is discarded whole.
pub struct FrameEncoder {
    encoder: wgpu::CommandEncoder,
    queue: wgpu::Queue,
    surface_texture: Option<wgpu::SurfaceTexture>,
    view: wgpu::TextureView,
}

impl FrameEncoder {
    pub fn new(device: &wgpu::Device, queue: wgpu::Queue, target: FrameTarget) -> Self {
        let encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame-encoder"),
        });

        let (surface_texture, view) = match target {
            FrameTarget::Surface(texture) => {
                let view = texture
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());
                (Some(texture), view)
            }
            FrameTarget::Offscreen(view) => (None, view),
        };

        Self {
            encoder,
            queue,
            surface_texture,
            view,
        }
    }

    /// Begin a render pass into this frame's color target.
    pub fn begin_render_pass<'a>(
        &'a mut self,
        builder: &'a RenderPassBuilder,
    ) -> wgpu::RenderPass<'a> {
        builder.create_render_pass(&mut self.encoder, &self.view)
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Finish encoding, submit the command buffer, and present the surface
    /// texture if there is one. Does not wait for the GPU.
    ///
    /// Returns whether a surface texture was presented.
    pub fn submit(self) -> bool {
        let Self {
            encoder,
            queue,
            surface_texture,
            ..
        } = self;
        queue.submit([encoder.finish()]);
        match surface_texture {
            Some(texture) => {
                texture.present();
                true
            }
            None => false,
        }
    }
}
