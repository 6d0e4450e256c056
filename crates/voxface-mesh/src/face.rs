use voxface_geom::Vec3;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    PosY = 0,
    NegY = 1,
    PosX = 2,
    NegX = 3,
    PosZ = 4,
    NegZ = 5,
}

impl Face {
    /// All six faces in emission order.
    pub const ALL: [Face; 6] = [
        Face::PosY,
        Face::NegY,
        Face::PosX,
        Face::NegX,
        Face::PosZ,
        Face::NegZ,
    ];

    /// Returns the `[0..6)` index of this face.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Converts a face index `[0..6)` back into a `Face`.
    #[inline]
    pub fn from_index(i: usize) -> Option<Face> {
        Face::ALL.get(i).copied()
    }

    #[inline]
    pub const fn opposite(self) -> Face {
        match self {
            Face::PosY => Face::NegY,
            Face::NegY => Face::PosY,
            Face::PosX => Face::NegX,
            Face::NegX => Face::PosX,
            Face::PosZ => Face::NegZ,
            Face::NegZ => Face::PosZ,
        }
    }

    /// Integer grid delta `(dx, dy, dz)` towards the neighbor this face looks at.
    #[inline]
    pub const fn delta(self) -> (i32, i32, i32) {
        match self {
            Face::PosY => (0, 1, 0),
            Face::NegY => (0, -1, 0),
            Face::PosX => (1, 0, 0),
            Face::NegX => (-1, 0, 0),
            Face::PosZ => (0, 0, 1),
            Face::NegZ => (0, 0, -1),
        }
    }

    #[inline]
    pub fn normal(self) -> Vec3 {
        self.template().normal
    }

    #[inline]
    pub fn template(self) -> &'static FaceTemplate {
        &FACE_TEMPLATES[self.index()]
    }
}

/// Canonical quad for one side of the unit cube at the origin.
///
/// `corners` wind counter-clockwise seen from outside the cube, so
/// `(c1 - c0) x (c2 - c0)` points along `normal`. Triangles are fanned from
/// corner 0: `(0, 1, 2)` and `(0, 2, 3)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceTemplate {
    pub face: Face,
    pub corners: [Vec3; 4],
    pub uvs: [[f32; 2]; 4],
    pub normal: Vec3,
}

// V grows downwards: (0,1) is the bottom-left texel row.
const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

/// Indexed by [`Face::index`].
pub static FACE_TEMPLATES: [FaceTemplate; 6] = [
    FaceTemplate {
        face: Face::PosY,
        corners: [
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ],
        // Corners run opposite to the other faces; UVs follow them so the
        // texture is not mirrored.
        uvs: [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
        normal: Vec3::new(0.0, 1.0, 0.0),
    },
    FaceTemplate {
        face: Face::NegY,
        corners: [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, 1.0),
        ],
        uvs: QUAD_UVS,
        normal: Vec3::new(0.0, -1.0, 0.0),
    },
    FaceTemplate {
        face: Face::PosX,
        corners: [
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
        ],
        uvs: QUAD_UVS,
        normal: Vec3::new(1.0, 0.0, 0.0),
    },
    FaceTemplate {
        face: Face::NegX,
        corners: [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::new(0.0, 1.0, 0.0),
        ],
        uvs: QUAD_UVS,
        normal: Vec3::new(-1.0, 0.0, 0.0),
    },
    FaceTemplate {
        face: Face::PosZ,
        corners: [
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(0.0, 1.0, 1.0),
        ],
        uvs: QUAD_UVS,
        normal: Vec3::new(0.0, 0.0, 1.0),
    },
    FaceTemplate {
        face: Face::NegZ,
        corners: [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ],
        uvs: QUAD_UVS,
        normal: Vec3::new(0.0, 0.0, -1.0),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_face() {
        for f in Face::ALL {
            assert_eq!(f.template().face, f);
            assert_eq!(Face::from_index(f.index()), Some(f));
        }
        assert_eq!(Face::from_index(6), None);
    }

    #[test]
    fn normals_match_deltas() {
        for f in Face::ALL {
            let (dx, dy, dz) = f.delta();
            assert_eq!(f.normal(), Vec3::new(dx as f32, dy as f32, dz as f32));
            assert_eq!(f.opposite().normal(), -f.normal());
        }
    }

    #[test]
    fn corners_wind_ccw_from_outside() {
        for t in &FACE_TEMPLATES {
            let [c0, c1, c2, c3] = t.corners;
            let n1 = (c1 - c0).cross(c2 - c0);
            let n2 = (c2 - c0).cross(c3 - c0);
            assert_eq!(n1, t.normal, "{:?} first triangle", t.face);
            assert_eq!(n2, t.normal, "{:?} second triangle", t.face);
        }
    }

    fn uv_at(t: &FaceTemplate, corner: [f32; 3]) -> [f32; 2] {
        let i = t
            .corners
            .iter()
            .position(|c| c.to_array() == corner)
            .unwrap_or_else(|| panic!("{:?} has no corner {:?}", t.face, corner));
        t.uvs[i]
    }

    #[test]
    fn texture_orientation_per_corner() {
        // (corner, uv) pairs: bottom left (0,1), bottom right (1,1),
        // top right (1,0), top left (0,0) of each side's texture.
        let expected: [(Face, [([f32; 3], [f32; 2]); 4]); 6] = [
            (
                Face::PosZ,
                [
                    ([0.0, 0.0, 1.0], [0.0, 1.0]),
                    ([1.0, 0.0, 1.0], [1.0, 1.0]),
                    ([1.0, 1.0, 1.0], [1.0, 0.0]),
                    ([0.0, 1.0, 1.0], [0.0, 0.0]),
                ],
            ),
            (
                Face::NegZ,
                [
                    ([1.0, 0.0, 0.0], [0.0, 1.0]),
                    ([0.0, 0.0, 0.0], [1.0, 1.0]),
                    ([0.0, 1.0, 0.0], [1.0, 0.0]),
                    ([1.0, 1.0, 0.0], [0.0, 0.0]),
                ],
            ),
            (
                Face::PosY,
                [
                    ([0.0, 1.0, 0.0], [0.0, 1.0]),
                    ([1.0, 1.0, 0.0], [1.0, 1.0]),
                    ([1.0, 1.0, 1.0], [1.0, 0.0]),
                    ([0.0, 1.0, 1.0], [0.0, 0.0]),
                ],
            ),
            (
                Face::NegY,
                [
                    ([0.0, 0.0, 0.0], [0.0, 1.0]),
                    ([1.0, 0.0, 0.0], [1.0, 1.0]),
                    ([1.0, 0.0, 1.0], [1.0, 0.0]),
                    ([0.0, 0.0, 1.0], [0.0, 0.0]),
                ],
            ),
            (
                Face::NegX,
                [
                    ([0.0, 0.0, 0.0], [0.0, 1.0]),
                    ([0.0, 0.0, 1.0], [1.0, 1.0]),
                    ([0.0, 1.0, 1.0], [1.0, 0.0]),
                    ([0.0, 1.0, 0.0], [0.0, 0.0]),
                ],
            ),
            (
                Face::PosX,
                [
                    ([1.0, 0.0, 1.0], [0.0, 1.0]),
                    ([1.0, 0.0, 0.0], [1.0, 1.0]),
                    ([1.0, 1.0, 0.0], [1.0, 0.0]),
                    ([1.0, 1.0, 1.0], [0.0, 0.0]),
                ],
            ),
        ];
        for (face, pairs) in expected {
            let t = face.template();
            for (corner, uv) in pairs {
                assert_eq!(uv_at(t, corner), uv, "{:?} corner {:?}", face, corner);
            }
        }
    }

    #[test]
    fn corners_lie_on_the_face_plane() {
        for t in &FACE_TEMPLATES {
            // Outward faces sit at 1 along their axis, inward ones at 0.
            let plane = if t.normal.dot(Vec3::new(1.0, 1.0, 1.0)) > 0.0 { 1.0 } else { 0.0 };
            for c in t.corners {
                let along = c.dot(t.normal).abs();
                assert_eq!(along, plane, "{:?}", t.face);
            }
        }
    }
}
