use proptest::prelude::*;
use voxface_grid::VoxelGrid;
use voxface_mesh::{Face, MeshBuilder, build_parallel, build_serial, face_visible};

fn arb_grid() -> impl Strategy<Value = VoxelGrid> {
    (1usize..=6, 1usize..=6, 1usize..=6).prop_flat_map(|(w, h, d)| {
        prop::collection::vec(prop_oneof![3 => Just(0u8), 2 => 1u8..=4], w * h * d)
            .prop_map(move |cells| VoxelGrid::from_cells(w, h, d, cells).unwrap())
    })
}

/// Reference count: occupied cells times six, minus two per face-adjacent pair.
fn expected_faces(g: &VoxelGrid) -> usize {
    let mut pairs = 0;
    for ((x, y, z), _) in g.iter_occupied() {
        let (x, y, z) = (x as i32, y as i32, z as i32);
        pairs += [(1, 0, 0), (0, 1, 0), (0, 0, 1)]
            .iter()
            .filter(|(dx, dy, dz)| g.is_solid(x + dx, y + dy, z + dz))
            .count();
    }
    g.occupied_count() * 6 - 2 * pairs
}

proptest! {
    // Buffer layout invariants hold for any grid
    #[test]
    fn invariants_hold(g in arb_grid()) {
        let mesh = build_serial(&g);
        prop_assert!(mesh.validate().is_ok());
        prop_assert_eq!(mesh.index_count() % 3, 0);
        prop_assert_eq!(mesh.normals.len(), mesh.positions.len());
        prop_assert_eq!(mesh.uvs.len() / 2, mesh.vertex_count());
        prop_assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    // Face count equals the pairwise adjacency formula
    #[test]
    fn face_count_matches_adjacency(g in arb_grid()) {
        let faces = expected_faces(&g);
        prop_assert_eq!(build_serial(&g).face_count(), faces);
        prop_assert_eq!(MeshBuilder::count_visible_faces(&g), faces);
    }

    // Layered parallel build is identical to the serial walk
    #[test]
    fn parallel_is_identical(g in arb_grid()) {
        prop_assert_eq!(build_parallel(&g), build_serial(&g));
    }

    // Two builds of the same grid agree exactly
    #[test]
    fn idempotent(g in arb_grid()) {
        let b = MeshBuilder::new();
        prop_assert_eq!(b.build(&g), b.build(&g));
    }

    // Cells on the outer shell always show their outward face
    #[test]
    fn outward_boundary_faces_visible(g in arb_grid()) {
        let (w, h, d) = g.dims();
        for ((x, y, z), _) in g.iter_occupied() {
            let (ix, iy, iz) = (x as i32, y as i32, z as i32);
            if x == 0 { prop_assert!(face_visible(&g, ix, iy, iz, Face::NegX)); }
            if x + 1 == w { prop_assert!(face_visible(&g, ix, iy, iz, Face::PosX)); }
            if y == 0 { prop_assert!(face_visible(&g, ix, iy, iz, Face::NegY)); }
            if y + 1 == h { prop_assert!(face_visible(&g, ix, iy, iz, Face::PosY)); }
            if z == 0 { prop_assert!(face_visible(&g, ix, iy, iz, Face::NegZ)); }
            if z + 1 == d { prop_assert!(face_visible(&g, ix, iy, iz, Face::PosZ)); }
        }
    }

    // Every emitted triangle faces the way its vertex normal says
    #[test]
    fn triangles_wind_with_normals(g in arb_grid()) {
        let mesh = build_serial(&g);
        for (t, tri) in mesh.triangles().enumerate() {
            let n = mesh.indices[t * 3] as usize;
            let normal = voxface_geom::Vec3::new(
                mesh.normals[n * 3],
                mesh.normals[n * 3 + 1],
                mesh.normals[n * 3 + 2],
            );
            let geo = (tri[1] - tri[0]).cross(tri[2] - tri[0]);
            prop_assert!(geo.dot(normal) > 0.0);
        }
    }

    // Per-type builds split the full mesh without losing or adding faces
    #[test]
    fn per_type_builds_sum_to_full(g in arb_grid()) {
        let b = MeshBuilder::new();
        let full = b.build(&g).face_count();
        let split: usize = (1u8..=4)
            .map(|kind| b.build_where(&g, |k| k == kind).0.face_count())
            .sum();
        prop_assert_eq!(split, full);
    }
}
