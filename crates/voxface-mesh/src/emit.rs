use voxface_geom::Vec3;
use voxface_grid::{AIR, VoxelGrid, VoxelType};

use crate::face::{FACE_TEMPLATES, Face};
use crate::mesh_build::MeshBuffer;

/// A face of an occupied cell is visible when the neighbor it looks at is
/// empty. Neighbors past the grid edge read as empty.
#[inline]
pub fn face_visible(grid: &VoxelGrid, x: i32, y: i32, z: i32, face: Face) -> bool {
    let (dx, dy, dz) = face.delta();
    grid.get(x + dx, y + dy, z + dz) == AIR
}

/// Emits the visible faces of cell `(x, y, z)` if its type passes `keep`.
/// Occlusion always considers every occupied neighbor, kept or not.
#[inline]
pub(crate) fn emit_cell<F>(
    grid: &VoxelGrid,
    x: usize,
    y: usize,
    z: usize,
    keep: &F,
    out: &mut MeshBuffer,
) -> usize
where
    F: Fn(VoxelType) -> bool,
{
    let (ix, iy, iz) = (x as i32, y as i32, z as i32);
    let kind = grid.get(ix, iy, iz);
    if kind == AIR || !keep(kind) {
        return 0;
    }
    let origin = Vec3::from_cell(x, y, z);
    let mut emitted = 0;
    for template in &FACE_TEMPLATES {
        if face_visible(grid, ix, iy, iz, template.face) {
            out.push_face(template, origin);
            emitted += 1;
        }
    }
    emitted
}

/// Emits every visible face in the horizontal layer `y`, z-major then x.
pub(crate) fn emit_layer<F>(grid: &VoxelGrid, y: usize, keep: &F, out: &mut MeshBuffer) -> usize
where
    F: Fn(VoxelType) -> bool,
{
    let mut faces = 0;
    for z in 0..grid.depth() {
        for x in 0..grid.width() {
            faces += emit_cell(grid, x, y, z, keep, out);
        }
    }
    faces
}

/// Counts the faces `emit_layer` would emit, without touching a buffer.
pub(crate) fn count_layer<F>(grid: &VoxelGrid, y: usize, keep: &F) -> usize
where
    F: Fn(VoxelType) -> bool,
{
    let iy = y as i32;
    let mut faces = 0;
    for z in 0..grid.depth() as i32 {
        for x in 0..grid.width() as i32 {
            let kind = grid.get(x, iy, z);
            if kind == AIR || !keep(kind) {
                continue;
            }
            faces += Face::ALL
                .iter()
                .filter(|&&f| face_visible(grid, x, iy, z, f))
                .count();
        }
    }
    faces
}
