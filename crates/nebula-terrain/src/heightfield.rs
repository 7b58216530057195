//! Triangulation of a height grid into an indexed triangle list.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use static_assertions::const_assert_eq;

use crate::HeightGrid;

/// Normal assigned to every terrain vertex.
///
/// Terrain is not lit, so slope-derived normals are not computed.
pub const UP_NORMAL: [f32; 3] = [0.0, 1.0, 0.0];

/// One terrain vertex as laid out in the GPU vertex buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub texcoord: [f32; 2],
}

const_assert_eq!(std::mem::size_of::<TerrainVertex>(), 32);

/// CPU-side terrain geometry: one vertex per grid sample and two triangles
/// per grid cell.
///
/// Invariants: every index is below `vertices.len()`, the index count is a
/// multiple of three, and `vertices.len() == width * height` of the source
/// grid.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainMesh {
    vertices: Vec<TerrainVertex>,
    indices: Vec<u32>,
}

impl TerrainMesh {
    /// Triangulate `grid`, spacing samples by `scale.x` along +X and
    /// `scale.z` along +Z and multiplying heights by `scale.y`.
    ///
    /// Each cell `(x, y)` with corners `i0 = y*W + x`, `i1 = i0 + 1`,
    /// `i2 = i0 + W`, `i3 = i2 + 1` emits `(i0, i2, i1)` then `(i1, i2, i3)`,
    /// which is counter-clockwise seen from +Y.
    pub fn from_heightfield(grid: &HeightGrid, scale: Vec3) -> Self {
        let w = grid.width();
        let h = grid.height();
        let u_step = 1.0 / (w - 1) as f32;
        let v_step = 1.0 / (h - 1) as f32;

        let mut vertices = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                vertices.push(TerrainVertex {
                    position: [
                        x as f32 * scale.x,
                        grid.sample(x, y) * scale.y,
                        y as f32 * scale.z,
                    ],
                    normal: UP_NORMAL,
                    texcoord: [x as f32 * u_step, y as f32 * v_step],
                });
            }
        }

        // HeightGrid guarantees w * h fits in u32.
        let stride = w as u32;
        let mut indices = Vec::with_capacity((w - 1) * (h - 1) * 6);
        for y in 0..(h as u32 - 1) {
            for x in 0..(stride - 1) {
                let i0 = y * stride + x;
                let i1 = i0 + 1;
                let i2 = i0 + stride;
                let i3 = i2 + 1;
                indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
            }
        }

        Self { vertices, indices }
    }

    pub fn vertices(&self) -> &[TerrainVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of indices to draw.
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Axis-aligned bounds of all vertex positions as `(min, max)`.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        self.vertices.iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(lo, hi), v| {
                let p = Vec3::from_array(v.position);
                (lo.min(p), hi.max(p))
            },
        )
    }

    /// Centre of [`bounds`](Self::bounds).
    pub fn center(&self) -> Vec3 {
        let (lo, hi) = self.bounds();
        (lo + hi) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mesh(width: usize, height: usize, scale: Vec3) -> TerrainMesh {
        let grid = HeightGrid::from_fn(width, height, |x, y| (x + y) as f32 * 0.25).unwrap();
        TerrainMesh::from_heightfield(&grid, scale)
    }

    #[test]
    fn test_two_by_two_flat_grid() {
        let grid = HeightGrid::new(2, 2, vec![0.0; 4]).unwrap();
        let mesh = TerrainMesh::from_heightfield(&grid, Vec3::ONE);

        let positions: Vec<[f32; 3]> = mesh.vertices().iter().map(|v| v.position).collect();
        assert_eq!(
            positions,
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0],
                [1.0, 0.0, 1.0],
            ]
        );
        assert_eq!(mesh.indices(), &[0, 2, 1, 1, 2, 3]);
        assert_eq!(mesh.index_count(), 6);
    }

    #[test]
    fn test_vertex_and_index_counts() {
        for &(w, h) in &[(2, 2), (3, 5), (16, 9), (128, 128)] {
            let m = mesh(w, h, Vec3::ONE);
            assert_eq!(m.vertices().len(), w * h);
            assert_eq!(m.indices().len(), (w - 1) * (h - 1) * 6);
            assert_eq!(m.indices().len() % 3, 0);
            assert!(m.indices().iter().all(|&i| (i as usize) < w * h));
        }
    }

    #[test]
    fn test_triangles_face_up() {
        let m = mesh(6, 4, Vec3::new(1.0, 0.0, 1.0));
        for tri in m.indices().chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]]
                .map(|i| Vec3::from_array(m.vertices()[i as usize].position));
            let normal = (b - a).cross(c - a);
            assert!(normal.y > 0.0, "triangle {tri:?} winds clockwise from +Y");
        }
    }

    #[test]
    fn test_positions_apply_scale() {
        let grid = HeightGrid::new(2, 2, vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        let m = TerrainMesh::from_heightfield(&grid, Vec3::new(2.0, 10.0, 0.5));
        assert_eq!(m.vertices()[1].position, [2.0, 10.0, 0.0]);
        assert_eq!(m.vertices()[2].position, [0.0, 20.0, 0.5]);
        assert_eq!(m.vertices()[3].position, [2.0, 30.0, 0.5]);
    }

    #[test]
    fn test_texcoords_span_unit_square() {
        let m = mesh(5, 3, Vec3::ONE);
        assert_eq!(m.vertices()[0].texcoord, [0.0, 0.0]);
        assert_eq!(m.vertices()[4].texcoord, [1.0, 0.0]);
        assert_eq!(m.vertices()[14].texcoord, [1.0, 1.0]);
        assert_eq!(m.vertices()[7].texcoord, [0.5, 0.5]);
    }

    #[test]
    fn test_normals_point_up() {
        let m = mesh(4, 4, Vec3::ONE);
        assert!(m.vertices().iter().all(|v| v.normal == UP_NORMAL));
    }

    #[test]
    fn test_byte_payload_sizes() {
        let m = mesh(3, 3, Vec3::ONE);
        assert_eq!(m.vertex_bytes().len(), 9 * 32);
        assert_eq!(m.index_bytes().len(), 24 * 4);
    }

    #[test]
    fn test_bounds_and_center() {
        let grid = HeightGrid::new(3, 2, vec![0.0, -2.0, 0.0, 4.0, 0.0, 0.0]).unwrap();
        let m = TerrainMesh::from_heightfield(&grid, Vec3::ONE);
        let (lo, hi) = m.bounds();
        assert_eq!(lo, Vec3::new(0.0, -2.0, 0.0));
        assert_eq!(hi, Vec3::new(2.0, 4.0, 1.0));
        assert_eq!(m.center(), Vec3::new(1.0, 1.0, 0.5));
    }
}
