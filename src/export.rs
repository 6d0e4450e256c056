//! Wavefront OBJ export of a meshed scene.

use std::io::{self, Write};

use voxface_materials::MaterialCatalog;

use crate::render_mesh::SceneMesh;

/// Writes every part as an OBJ group with `usemtl <key>`. Indices are
/// rebased to OBJ's global 1-based numbering.
pub fn write_obj<W: Write>(
    out: &mut W,
    scene: &SceneMesh,
    catalog: &MaterialCatalog,
) -> io::Result<()> {
    writeln!(out, "# voxface mesh: {} faces", scene.face_count())?;
    let mut base = 1usize;
    for (i, part) in scene.parts.iter().enumerate() {
        let key = part
            .material
            .and_then(|id| catalog.get(id))
            .map_or("unassigned", |m| m.key.as_str());
        writeln!(out, "g part{}_{}", i, key)?;
        writeln!(out, "usemtl {}", key)?;
        let mesh = &part.mesh;
        for p in mesh.positions.chunks_exact(3) {
            writeln!(out, "v {} {} {}", p[0], p[1], p[2])?;
        }
        for t in mesh.uvs.chunks_exact(2) {
            writeln!(out, "vt {} {}", t[0], t[1])?;
        }
        for n in mesh.normals.chunks_exact(3) {
            writeln!(out, "vn {} {} {}", n[0], n[1], n[2])?;
        }
        for tri in mesh.indices.chunks_exact(3) {
            let a = base + tri[0] as usize;
            let b = base + tri[1] as usize;
            let c = base + tri[2] as usize;
            writeln!(out, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
        }
        base += mesh.vertex_count();
    }
    Ok(())
}
