//! CPU meshing crate: turns a voxel occupancy grid into a culled surface mesh.
//!
//! Every occupied cell contributes one quad per side whose neighbor is empty
//! (cells past the grid edge count as empty). Quads never share vertices and
//! are not merged.
#![forbid(unsafe_code)]

mod build;
pub mod constants;
mod emit;
mod face;
mod mesh_build;

pub use build::{BuildStats, MeshBuilder, build_parallel, build_serial};
pub use emit::face_visible;
pub use face::{FACE_TEMPLATES, Face, FaceTemplate};
pub use mesh_build::{MAX_VERTICES, MeshBuffer, MeshInvariantError};

/// Serial build with default settings.
pub fn build_mesh(grid: &voxface_grid::VoxelGrid) -> MeshBuffer {
    MeshBuilder::new().build(grid)
}
