//! Unlit terrain pipeline and its uniform block.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use static_assertions::const_assert_eq;
use std::num::NonZeroU64;

use crate::buffer::{MeshBuffer, TERRAIN_VERTEX_LAYOUT};
use crate::depth::{DepthBuffer, DepthState};

/// Per-frame transforms, laid out as three consecutive `mat4x4<f32>`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct TerrainUniforms {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

const_assert_eq!(std::mem::size_of::<TerrainUniforms>(), 192);

impl TerrainUniforms {
    /// Size of the uniform block in bytes.
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;

    pub fn new(model: Mat4, view: Mat4, projection: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
        }
    }
}

impl Default for TerrainUniforms {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY)
    }
}

/// Render pipeline for the terrain mesh.
pub struct TerrainPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub uniform_bind_group_layout: wgpu::BindGroupLayout,
}

impl TerrainPipeline {
    pub fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        color_format: wgpu::TextureFormat,
        depth: DepthState,
    ) -> Self {
        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("terrain-uniform-bind-group-layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(TerrainUniforms::SIZE),
                    },
                    count: None,
                }],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("terrain-pipeline-layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("terrain-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vertex_main"),
                buffers: &[TERRAIN_VERTEX_LAYOUT],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(depth.to_wgpu(DepthBuffer::FORMAT)),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fragment_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: None, // opaque
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            uniform_bind_group_layout,
        }
    }

    /// Bind group exposing `uniform_buffer` at binding 0.
    pub fn create_uniform_bind_group(
        &self,
        device: &wgpu::Device,
        uniform_buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("terrain-uniform-bind-group"),
            layout: &self.uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        })
    }
}

/// Record the single indexed draw of the terrain.
pub fn draw_terrain<'a>(
    render_pass: &mut wgpu::RenderPass<'a>,
    pipeline: &TerrainPipeline,
    uniform_bind_group: &'a wgpu::BindGroup,
    mesh: &'a MeshBuffer,
) {
    render_pass.set_pipeline(&pipeline.pipeline);
    render_pass.set_bind_group(0, uniform_bind_group, &[]);
    mesh.bind(render_pass);
    mesh.draw(render_pass);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::BufferAllocator;
    use crate::gpu::request_headless_device;
    use crate::shader::TERRAIN_SHADER_SOURCE;

    fn create_terrain_shader(device: &wgpu::Device) -> wgpu::ShaderModule {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("test-terrain-shader"),
            source: wgpu::ShaderSource::Wgsl(TERRAIN_SHADER_SOURCE.into()),
        })
    }

    #[test]
    fn test_uniform_block_is_three_matrices() {
        assert_eq!(TerrainUniforms::SIZE, 192);
        let uniforms = TerrainUniforms::default();
        let bytes = bytemuck::bytes_of(&uniforms);
        assert_eq!(bytes.len(), 192);
    }

    #[test]
    fn test_uniforms_store_columns_in_order() {
        let model = Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
        let uniforms = TerrainUniforms::new(model, Mat4::IDENTITY, Mat4::IDENTITY);
        assert_eq!(uniforms.model[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(uniforms.view, Mat4::IDENTITY.to_cols_array_2d());
    }

    #[test]
    fn test_pipeline_creation_succeeds() {
        let Some((device, _queue)) = request_headless_device() else {
            return;
        };
        let shader = create_terrain_shader(&device);
        let _pipeline = TerrainPipeline::new(
            &device,
            &shader,
            wgpu::TextureFormat::Bgra8UnormSrgb,
            DepthState::OPAQUE,
        );
    }

    #[test]
    fn test_bind_group_accepts_uniform_buffer() {
        let Some((device, _queue)) = request_headless_device() else {
            return;
        };
        let shader = create_terrain_shader(&device);
        let pipeline = TerrainPipeline::new(
            &device,
            &shader,
            wgpu::TextureFormat::Rgba8UnormSrgb,
            DepthState::default(),
        );
        let buffer = BufferAllocator::new(&device).create_uniform_buffer(
            "test-uniforms",
            bytemuck::bytes_of(&TerrainUniforms::default()),
        );
        let _bind_group = pipeline.create_uniform_bind_group(&device, &buffer);
    }
}
