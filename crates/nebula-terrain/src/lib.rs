//! Heightfield terrain: height sample grids, procedural height sources, and
//! triangulation of a grid into an indexed triangle-list mesh.

mod grid;
mod heightfield;
mod heightmap;

pub use grid::{HeightGrid, HeightfieldError};
pub use heightfield::{TerrainMesh, TerrainVertex, UP_NORMAL};
pub use heightmap::{HeightSource, HeightmapParams, HeightmapSampler};
