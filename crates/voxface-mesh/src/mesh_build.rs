use thiserror::Error;
use voxface_geom::{Aabb, Vec3};

use crate::constants::{
    FACE_FAN, INDICES_PER_FACE, NORMAL_COMPONENTS, POSITION_COMPONENTS, UV_COMPONENTS,
    VERTS_PER_FACE,
};
use crate::face::FaceTemplate;

/// Flat, renderer-ready vertex and index arrays.
///
/// `positions` and `normals` hold 3 floats per vertex, `uvs` 2 floats per
/// vertex, `indices` 3 entries per triangle. All four arrays are index-aligned.
///
/// Indices are `u32`, so a buffer addresses at most [`MAX_VERTICES`] vertices.
/// `validate` reports buffers past that limit.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct MeshBuffer {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub uvs: Vec<f32>,
    pub indices: Vec<u32>,
}

/// Vertices addressable by a `u32` index.
pub const MAX_VERTICES: usize = u32::MAX as usize + 1;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshInvariantError {
    #[error("{count} vertices exceed the u32 index range")]
    TooManyVertices { count: usize },
    #[error("{array} length {len} is not a multiple of {stride}")]
    Stride {
        array: &'static str,
        len: usize,
        stride: usize,
    },
    #[error("{array} describes {count} vertices, positions describe {expected}")]
    VertexCountMismatch {
        array: &'static str,
        count: usize,
        expected: usize,
    },
    #[error("index {value} at slot {slot} exceeds vertex count {vertex_count}")]
    IndexOutOfBounds {
        slot: usize,
        value: u32,
        vertex_count: usize,
    },
}

impl MeshBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_face_capacity(faces: usize) -> Self {
        let mut mb = Self::default();
        mb.reserve_faces(faces);
        mb
    }

    /// Pre-reserve capacity for `faces` more faces.
    #[inline]
    pub fn reserve_faces(&mut self, faces: usize) {
        let verts = faces * VERTS_PER_FACE;
        self.positions.reserve(verts * POSITION_COMPONENTS);
        self.normals.reserve(verts * NORMAL_COMPONENTS);
        self.uvs.reserve(verts * UV_COMPONENTS);
        self.indices.reserve(faces * INDICES_PER_FACE);
    }

    /// Clears all arrays but retains capacity for reuse across rebuilds.
    #[inline]
    pub fn clear_keep_capacity(&mut self) {
        self.positions.clear();
        self.normals.clear();
        self.uvs.clear();
        self.indices.clear();
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / POSITION_COMPONENTS
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.vertex_count() / VERTS_PER_FACE
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    fn index_base(&self, adding: usize) -> u32 {
        debug_assert!(
            check_vertex_limit(self.vertex_count() + adding).is_ok(),
            "mesh buffer past {MAX_VERTICES} vertices"
        );
        self.vertex_count() as u32
    }

    /// Stamps `template` at `origin`: four fresh vertices and two triangles.
    pub fn push_face(&mut self, template: &FaceTemplate, origin: Vec3) {
        let base = self.index_base(VERTS_PER_FACE);
        let n = template.normal.to_array();
        for (corner, uv) in template.corners.iter().zip(&template.uvs) {
            self.positions
                .extend_from_slice(&(*corner + origin).to_array());
            self.normals.extend_from_slice(&n);
            self.uvs.extend_from_slice(uv);
        }
        self.indices.extend(FACE_FAN.iter().map(|i| base + i));
    }

    /// Appends `other`, shifting its indices past the vertices already here.
    pub fn append(&mut self, other: &MeshBuffer) {
        let base = self.index_base(other.vertex_count());
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.indices.extend(other.indices.iter().map(|i| base + i));
    }

    #[inline]
    pub fn position(&self, vertex: usize) -> Vec3 {
        let p = &self.positions[vertex * 3..vertex * 3 + 3];
        Vec3::new(p[0], p[1], p[2])
    }

    /// Iterates triangles as corner positions.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| {
            [
                self.position(t[0] as usize),
                self.position(t[1] as usize),
                self.position(t[2] as usize),
            ]
        })
    }

    /// Bounding box of all vertex positions; `None` when the mesh is empty.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(
            self.positions
                .chunks_exact(3)
                .map(|p| Vec3::new(p[0], p[1], p[2])),
        )
    }

    /// Checks the layout invariants a renderer relies on.
    pub fn validate(&self) -> Result<(), MeshInvariantError> {
        let check_stride = |array: &'static str, len: usize, stride: usize| {
            if len % stride == 0 {
                Ok(())
            } else {
                Err(MeshInvariantError::Stride { array, len, stride })
            }
        };
        check_stride("positions", self.positions.len(), POSITION_COMPONENTS)?;
        check_stride("normals", self.normals.len(), NORMAL_COMPONENTS)?;
        check_stride("uvs", self.uvs.len(), UV_COMPONENTS)?;
        check_stride("indices", self.indices.len(), 3)?;

        let expected = self.vertex_count();
        check_vertex_limit(expected)?;
        for (array, count) in [
            ("normals", self.normals.len() / NORMAL_COMPONENTS),
            ("uvs", self.uvs.len() / UV_COMPONENTS),
        ] {
            if count != expected {
                return Err(MeshInvariantError::VertexCountMismatch {
                    array,
                    count,
                    expected,
                });
            }
        }
        if let Some((slot, &value)) = self
            .indices
            .iter()
            .enumerate()
            .find(|(_, i)| **i as usize >= expected)
        {
            return Err(MeshInvariantError::IndexOutOfBounds {
                slot,
                value,
                vertex_count: expected,
            });
        }
        Ok(())
    }
}

fn check_vertex_limit(count: usize) -> Result<(), MeshInvariantError> {
    if count > MAX_VERTICES {
        Err(MeshInvariantError::TooManyVertices { count })
    } else {
        Ok(())
    }
}
