//! Pairs mesher output with materials for the renderer.

use std::collections::{BTreeMap, BTreeSet};

use voxface_geom::Aabb;
use voxface_grid::{VoxelGrid, VoxelType};
use voxface_materials::{MaterialCatalog, MaterialId};
use voxface_mesh::{MeshBuffer, MeshBuilder};

/// One draw call worth of geometry. `material` is `None` for voxel types the
/// catalog has no material for; the renderer picks a placeholder.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderMesh {
    pub material: Option<MaterialId>,
    pub mesh: MeshBuffer,
}

#[derive(Clone, Debug, Default)]
pub struct SceneMesh {
    pub parts: Vec<RenderMesh>,
}

impl SceneMesh {
    pub fn face_count(&self) -> usize {
        self.parts.iter().map(|p| p.mesh.face_count()).sum()
    }

    pub fn vertex_count(&self) -> usize {
        self.parts.iter().map(|p| p.mesh.vertex_count()).sum()
    }

    pub fn index_count(&self) -> usize {
        self.parts.iter().map(|p| p.mesh.index_count()).sum()
    }

    pub fn bounds(&self) -> Option<Aabb> {
        self.parts
            .iter()
            .filter_map(|p| p.mesh.bounds())
            .reduce(Aabb::union)
    }
}

/// Meshes the whole grid as a single part drawn with `material`.
pub fn create_render_mesh(
    grid: &VoxelGrid,
    builder: &MeshBuilder,
    material: Option<MaterialId>,
) -> RenderMesh {
    RenderMesh {
        material,
        mesh: builder.build(grid),
    }
}

/// Meshes the grid into one part per material, resolving each voxel type
/// through the catalog's bindings. Parts come out in material id order,
/// unresolved types last. Empty parts are dropped.
pub fn build_scene_mesh(
    grid: &VoxelGrid,
    builder: &MeshBuilder,
    catalog: &MaterialCatalog,
) -> SceneMesh {
    let kinds: BTreeSet<VoxelType> = grid.iter_occupied().map(|(_, k)| k).collect();
    let mut by_material: BTreeMap<Option<MaterialId>, Vec<VoxelType>> = BTreeMap::new();
    for kind in kinds {
        let mid = catalog.material_for(kind);
        if mid.is_none() {
            log::warn!("voxel type {} has no material; meshing it unassigned", kind);
        }
        by_material.entry(mid).or_default().push(kind);
    }

    let mut parts = Vec::with_capacity(by_material.len());
    let mut unassigned = None;
    for (material, kinds) in by_material {
        let (mesh, _) = builder.build_where(grid, |k| kinds.contains(&k));
        if mesh.is_empty() {
            continue;
        }
        let part = RenderMesh { material, mesh };
        if material.is_none() {
            unassigned = Some(part);
        } else {
            parts.push(part);
        }
    }
    parts.extend(unassigned);
    SceneMesh { parts }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> MaterialCatalog {
        MaterialCatalog::from_toml_str(
            r#"
            [materials]
            sand = "textures/sand.png"
            dirt = "textures/dirt.png"
            [bindings]
            1 = "sand"
            2 = "dirt"
            3 = "sand"
        "#,
        )
        .unwrap()
    }

    #[test]
    fn parts_group_types_by_material() {
        let c = catalog();
        let mut g = VoxelGrid::new(4, 1, 1).unwrap();
        for (x, k) in [(0, 1), (1, 2), (2, 3), (3, 9)] {
            g.set(x, 0, 0, k).unwrap();
        }
        let scene = build_scene_mesh(&g, &MeshBuilder::new(), &c);
        let mats: Vec<_> = scene.parts.iter().map(|p| p.material).collect();
        // dirt < sand by key order; type 9 is unbound and there is no fallback.
        assert_eq!(mats, [c.get_id("dirt"), c.get_id("sand"), None]);
        assert_eq!(scene.parts[1].mesh.face_count(), 5 + 4);
        assert_eq!(scene.face_count(), 4 * 6 - 2 * 3);
        assert_eq!(scene.face_count(), MeshBuilder::count_visible_faces(&g));
    }

    #[test]
    fn empty_grid_has_no_parts() {
        let g = VoxelGrid::new(2, 2, 2).unwrap();
        let scene = build_scene_mesh(&g, &MeshBuilder::new(), &catalog());
        assert!(scene.parts.is_empty());
        assert_eq!(scene.bounds(), None);
    }

    #[test]
    fn single_part_keeps_material() {
        let c = catalog();
        let mut g = VoxelGrid::new(1, 1, 1).unwrap();
        g.set(0, 0, 0, 2).unwrap();
        let rm = create_render_mesh(&g, &MeshBuilder::new(), c.get_id("sand"));
        assert_eq!(rm.material, c.get_id("sand"));
        assert_eq!(rm.mesh.face_count(), 6);
    }
}
