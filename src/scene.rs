//! Scene description: grid dimensions plus the voxels to place in it.

use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use voxface_grid::{GridError, VoxelGrid, VoxelType};

#[derive(Clone, Debug, Deserialize)]
pub struct SceneConfig {
    pub grid: GridDims,
    /// Material key applied to the whole scene, overriding per-type bindings.
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub fills: Vec<FillEntry>,
    #[serde(default)]
    pub voxels: Vec<VoxelEntry>,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct GridDims {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct VoxelEntry {
    pub at: [i32; 3],
    pub kind: VoxelType,
}

/// Inclusive box.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct FillEntry {
    pub min: [i32; 3],
    pub max: [i32; 3],
    pub kind: VoxelType,
}

pub struct Scene {
    pub grid: VoxelGrid,
    pub material: Option<String>,
}

impl SceneConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .map_err(|e| format!("reading scene {}: {e}", path.display()))?;
        Self::from_toml_str(&s)
    }

    /// Builds the grid: fills first, in file order, then single voxels.
    pub fn build(&self) -> Result<Scene, GridError> {
        let GridDims {
            width,
            height,
            depth,
        } = self.grid;
        let mut grid = VoxelGrid::new(width, height, depth)?;
        for f in &self.fills {
            grid.fill_box(
                (f.min[0], f.min[1], f.min[2]),
                (f.max[0], f.max[1], f.max[2]),
                f.kind,
            )?;
        }
        for v in &self.voxels {
            grid.set(v.at[0], v.at[1], v.at[2], v.kind)?;
        }
        log::debug!(
            "scene grid {}x{}x{}: {} fills, {} voxels, {} occupied",
            width,
            height,
            depth,
            self.fills.len(),
            self.voxels.len(),
            grid.occupied_count()
        );
        Ok(Scene {
            grid,
            material: self.material.clone(),
        })
    }
}

/// Built-in test pattern: a corner block, one neighbor along x, one stacked
/// on top, and one touching only diagonally, all drawn with `diamond`.
pub fn demo_terrain() -> Result<Scene, GridError> {
    let mut grid = VoxelGrid::new(3, 3, 3)?;
    grid.set(0, 0, 0, 1)?;
    grid.set(1, 0, 0, 1)?;
    grid.set(0, 1, 0, 1)?;
    grid.set(1, 1, 1, 1)?;
    Ok(Scene {
        grid,
        material: Some("diamond".to_string()),
    })
}
