//! Buffer layout constants shared by the emitter and the mesh buffer.

pub const VERTS_PER_FACE: usize = 4;
pub const INDICES_PER_FACE: usize = 6; // two triangles
pub const POSITION_COMPONENTS: usize = 3;
pub const NORMAL_COMPONENTS: usize = 3;
pub const UV_COMPONENTS: usize = 2;

/// Fan over the four corners of a face, relative to its first vertex.
pub(crate) const FACE_FAN: [u32; INDICES_PER_FACE] = [0, 1, 2, 0, 2, 3];
