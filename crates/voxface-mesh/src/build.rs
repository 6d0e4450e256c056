use std::time::Instant;

use rayon::prelude::*;
use voxface_grid::{VoxelGrid, VoxelType};

use crate::emit::{count_layer, emit_layer};
use crate::mesh_build::MeshBuffer;

/// Culled-face mesher. Stateless: every call produces a fresh buffer and two
/// calls on an unchanged grid produce identical output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeshBuilder {
    parallel: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub faces: usize,
    pub vertices: usize,
    pub indices: usize,
    pub ms: u32,
}

#[inline]
fn any_kind(_: VoxelType) -> bool {
    true
}

impl MeshBuilder {
    pub const fn new() -> Self {
        Self { parallel: false }
    }

    /// Mesh horizontal layers on the rayon pool. Output is identical to the
    /// serial build.
    pub const fn parallel(mut self, on: bool) -> Self {
        self.parallel = on;
        self
    }

    pub const fn is_parallel(&self) -> bool {
        self.parallel
    }

    pub fn build(&self, grid: &VoxelGrid) -> MeshBuffer {
        self.build_where(grid, any_kind).0
    }

    pub fn build_with_stats(&self, grid: &VoxelGrid) -> (MeshBuffer, BuildStats) {
        self.build_where(grid, any_kind)
    }

    /// Meshes only cells whose type passes `keep`. Neighbors that fail `keep`
    /// still occlude, so the union of disjoint filtered builds has exactly the
    /// faces of the unfiltered build.
    pub fn build_where<F>(&self, grid: &VoxelGrid, keep: F) -> (MeshBuffer, BuildStats)
    where
        F: Fn(VoxelType) -> bool + Sync,
    {
        let t0 = Instant::now();
        let mesh = if self.parallel {
            build_layers_parallel(grid, &keep)
        } else {
            build_layers_serial(grid, &keep)
        };
        let stats = BuildStats {
            faces: mesh.face_count(),
            vertices: mesh.vertex_count(),
            indices: mesh.index_count(),
            ms: t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32,
        };
        let (w, h, d) = grid.dims();
        log::info!(
            target: "perf",
            "ms={} mesh_build mode={} dims=({}, {}, {}) faces={} verts={} indices={}",
            stats.ms,
            if self.parallel { "parallel" } else { "serial" },
            w,
            h,
            d,
            stats.faces,
            stats.vertices,
            stats.indices
        );
        (mesh, stats)
    }

    /// Number of faces `build` would emit for `grid`.
    pub fn count_visible_faces(grid: &VoxelGrid) -> usize {
        (0..grid.height())
            .map(|y| count_layer(grid, y, &any_kind))
            .sum()
    }
}

/// Walks y, then z, then x, emitting the visible faces of each occupied cell.
pub fn build_serial(grid: &VoxelGrid) -> MeshBuffer {
    build_layers_serial(grid, &any_kind)
}

/// Meshes each y layer independently and concatenates the layers in order,
/// offsetting indices by the vertices emitted before each layer.
pub fn build_parallel(grid: &VoxelGrid) -> MeshBuffer {
    build_layers_parallel(grid, &any_kind)
}

fn build_layers_serial<F>(grid: &VoxelGrid, keep: &F) -> MeshBuffer
where
    F: Fn(VoxelType) -> bool,
{
    let faces: usize = (0..grid.height()).map(|y| count_layer(grid, y, keep)).sum();
    let mut out = MeshBuffer::with_face_capacity(faces);
    for y in 0..grid.height() {
        emit_layer(grid, y, keep, &mut out);
    }
    out
}

fn build_layers_parallel<F>(grid: &VoxelGrid, keep: &F) -> MeshBuffer
where
    F: Fn(VoxelType) -> bool + Sync,
{
    let layers: Vec<MeshBuffer> = (0..grid.height())
        .into_par_iter()
        .map(|y| {
            let mut part = MeshBuffer::with_face_capacity(count_layer(grid, y, keep));
            let faces = emit_layer(grid, y, keep, &mut part);
            log::trace!("mesh layer y={} faces={}", y, faces);
            part
        })
        .collect();
    let total: usize = layers.iter().map(MeshBuffer::face_count).sum();
    let mut out = MeshBuffer::with_face_capacity(total);
    for part in &layers {
        out.append(part);
    }
    out
}
