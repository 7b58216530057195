//! Vertex, index and uniform buffer creation for the terrain mesh.

use std::mem;

use nebula_terrain::{TerrainMesh, TerrainVertex};
use wgpu::util::DeviceExt;
use wgpu::{VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

/// Vertex attributes of [`TerrainVertex`]: position, normal, texcoord.
pub const TERRAIN_VERTEX_ATTRIBUTES: [VertexAttribute; 3] = [
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 0,
        shader_location: 0,
    },
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 12,
        shader_location: 1,
    },
    VertexAttribute {
        format: VertexFormat::Float32x2,
        offset: 24,
        shader_location: 2,
    },
];

/// Vertex buffer layout shared by every pipeline that draws terrain.
pub const TERRAIN_VERTEX_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: mem::size_of::<TerrainVertex>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &TERRAIN_VERTEX_ATTRIBUTES,
};

/// Static vertex and index buffers ready for indexed drawing.
pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub index_format: wgpu::IndexFormat,
}

impl MeshBuffer {
    /// Bind vertex and index buffers to a render pass.
    pub fn bind(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), self.index_format);
    }

    /// Draw every index as a triangle list.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Creates GPU buffers on a device.
pub struct BufferAllocator<'a> {
    device: &'a wgpu::Device,
}

impl<'a> BufferAllocator<'a> {
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self { device }
    }

    /// Upload a terrain mesh, or `None` if its payload cannot be allocated.
    pub fn upload_terrain(&self, label: &str, mesh: &TerrainMesh) -> Option<MeshBuffer> {
        self.try_create_mesh(label, mesh.vertex_bytes(), mesh.indices())
    }

    /// Create vertex and index buffers, returning `None` when either payload
    /// is empty or larger than the device's `max_buffer_size`.
    pub fn try_create_mesh(
        &self,
        label: &str,
        vertices: &[u8],
        indices: &[u32],
    ) -> Option<MeshBuffer> {
        let max = self.device.limits().max_buffer_size;
        let index_bytes = mem::size_of_val(indices) as u64;
        let vertex_bytes = vertices.len() as u64;

        if vertex_bytes == 0 || index_bytes == 0 {
            log::warn!("Mesh '{label}' has no geometry; nothing to upload");
            return None;
        }
        if vertex_bytes > max || index_bytes > max {
            log::warn!(
                "Mesh '{label}' exceeds max buffer size {max} (vertices {vertex_bytes} B, indices {index_bytes} B)"
            );
            return None;
        }

        Some(self.create_mesh(label, vertices, indices))
    }

    /// Create vertex and index buffers without size checks.
    pub fn create_mesh(&self, label: &str, vertices: &[u8], indices: &[u32]) -> MeshBuffer {
        MeshBuffer {
            vertex_buffer: self.create_vertex_buffer(&format!("{label}-vertices"), vertices),
            index_buffer: self.create_index_buffer(&format!("{label}-indices"), indices),
            index_count: indices.len() as u32,
            index_format: wgpu::IndexFormat::Uint32,
        }
    }

    /// Create a vertex buffer from raw byte data.
    pub fn create_vertex_buffer(&self, label: &str, data: &[u8]) -> wgpu::Buffer {
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: data,
                usage: wgpu::BufferUsages::VERTEX,
            })
    }

    /// Create a u32 index buffer.
    pub fn create_index_buffer(&self, label: &str, data: &[u32]) -> wgpu::Buffer {
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(data),
                usage: wgpu::BufferUsages::INDEX,
            })
    }

    /// Create a uniform buffer initialized with `contents`, writable each frame.
    pub fn create_uniform_buffer(&self, label: &str, contents: &[u8]) -> wgpu::Buffer {
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::request_headless_device;
    use glam::Vec3;
    use nebula_terrain::HeightGrid;

    fn terrain(width: usize, height: usize) -> TerrainMesh {
        let grid = HeightGrid::flat(width, height).unwrap();
        TerrainMesh::from_heightfield(&grid, Vec3::ONE)
    }

    #[test]
    fn test_terrain_vertex_layout() {
        assert_eq!(TERRAIN_VERTEX_LAYOUT.array_stride, 32);
        assert_eq!(TERRAIN_VERTEX_LAYOUT.attributes.len(), 3);
        assert_eq!(
            TERRAIN_VERTEX_ATTRIBUTES.map(|a| a.shader_location),
            [0, 1, 2]
        );
    }

    #[test]
    fn test_attribute_offsets_match_vertex_fields() {
        let v = TerrainVertex {
            position: [0.0; 3],
            normal: [0.0; 3],
            texcoord: [0.0; 2],
        };
        let base = &v as *const _ as usize;
        assert_eq!(&v.normal as *const _ as usize - base, 12);
        assert_eq!(&v.texcoord as *const _ as usize - base, 24);
    }

    #[test]
    fn test_upload_terrain_counts() {
        let Some((device, _queue)) = request_headless_device() else {
            return;
        };
        let allocator = BufferAllocator::new(&device);
        let mesh = terrain(4, 3);

        let buffer = allocator.upload_terrain("terrain", &mesh).unwrap();

        assert_eq!(buffer.index_count, 36);
        assert_eq!(buffer.index_format, wgpu::IndexFormat::Uint32);
        assert_eq!(buffer.vertex_buffer.size(), 12 * 32);
        assert_eq!(buffer.index_buffer.size(), 36 * 4);
    }

    #[test]
    fn test_empty_payload_is_absent() {
        let Some((device, _queue)) = request_headless_device() else {
            return;
        };
        let allocator = BufferAllocator::new(&device);
        assert!(allocator.try_create_mesh("empty", &[], &[0, 1, 2]).is_none());
        assert!(allocator.try_create_mesh("empty", &[0u8; 32], &[]).is_none());
    }

    #[test]
    fn test_uniform_buffer_usage() {
        let Some((device, _queue)) = request_headless_device() else {
            return;
        };
        let allocator = BufferAllocator::new(&device);
        let buffer = allocator.create_uniform_buffer("uniforms", &[0u8; 192]);
        assert!(buffer.usage().contains(wgpu::BufferUsages::UNIFORM));
        assert!(buffer.usage().contains(wgpu::BufferUsages::COPY_DST));
        assert_eq!(buffer.size(), 192);
    }
}
