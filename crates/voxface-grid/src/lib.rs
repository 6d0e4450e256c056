//! Dense voxel occupancy grid.
#![forbid(unsafe_code)]

use thiserror::Error;

/// 8-bit voxel type code. `AIR` (0) marks an empty cell.
pub type VoxelType = u8;

pub const AIR: VoxelType = 0;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("invalid grid dimension: {axis} = {value}")]
    InvalidDimension { axis: Axis, value: usize },

    #[error("grid {width}x{height}x{depth} has too many cells")]
    TooLarge {
        width: usize,
        height: usize,
        depth: usize,
    },

    #[error("cell data has {actual} cells, grid needs {expected}")]
    CellCountMismatch { expected: usize, actual: usize },

    #[error("voxel ({x}, {y}, {z}) outside grid {width}x{height}x{depth}")]
    OutOfRange {
        x: i32,
        y: i32,
        z: i32,
        width: usize,
        height: usize,
        depth: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Axis::X => "width",
            Axis::Y => "height",
            Axis::Z => "depth",
        })
    }
}

/// Fixed-size grid of voxel type codes.
///
/// Storage is x-fastest: `index(x, y, z) = x + y*width + z*width*height`.
/// Reads outside the grid return [`AIR`]; writes outside the grid fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelGrid {
    width: usize,
    height: usize,
    depth: usize,
    cells: Vec<VoxelType>,
}

impl VoxelGrid {
    /// Every axis must be in `1..=i32::MAX` (coordinates are `i32`) and the
    /// cell count must fit in `usize`.
    pub fn new(width: usize, height: usize, depth: usize) -> Result<Self, GridError> {
        let n = Self::cell_count(width, height, depth)?;
        Ok(Self {
            width,
            height,
            depth,
            cells: vec![AIR; n],
        })
    }

    /// Wraps existing cell data laid out per [`VoxelGrid::index`]. The data
    /// must hold exactly `width * height * depth` cells.
    pub fn from_cells(
        width: usize,
        height: usize,
        depth: usize,
        cells: Vec<VoxelType>,
    ) -> Result<Self, GridError> {
        let expected = Self::cell_count(width, height, depth)?;
        if cells.len() != expected {
            return Err(GridError::CellCountMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            depth,
            cells,
        })
    }

    fn cell_count(width: usize, height: usize, depth: usize) -> Result<usize, GridError> {
        for (axis, value) in [(Axis::X, width), (Axis::Y, height), (Axis::Z, depth)] {
            if value == 0 || value > i32::MAX as usize {
                return Err(GridError::InvalidDimension { axis, value });
            }
        }
        width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(depth))
            .ok_or(GridError::TooLarge {
                width,
                height,
                depth,
            })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.depth)
    }

    /// Number of cells (occupied or not).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn cells(&self) -> &[VoxelType] {
        &self.cells
    }

    /// Linear index of an in-bounds cell.
    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        x + y * self.width + z * self.width * self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && (x as usize) < self.width
            && (y as usize) < self.height
            && (z as usize) < self.depth
    }

    #[inline]
    fn checked_index(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        if self.in_bounds(x, y, z) {
            Some(self.index(x as usize, y as usize, z as usize))
        } else {
            None
        }
    }

    /// Voxel at `(x, y, z)`; out-of-range coordinates read as [`AIR`].
    #[inline]
    pub fn get(&self, x: i32, y: i32, z: i32) -> VoxelType {
        match self.checked_index(x, y, z) {
            Some(i) => self.cells[i],
            None => AIR,
        }
    }

    #[inline]
    pub fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        self.get(x, y, z) != AIR
    }

    pub fn set(&mut self, x: i32, y: i32, z: i32, kind: VoxelType) -> Result<(), GridError> {
        let i = self.checked_index(x, y, z).ok_or_else(|| self.out_of_range(x, y, z))?;
        self.cells[i] = kind;
        Ok(())
    }

    /// Fills the inclusive box `min..=max`. Both corners must be inside the
    /// grid; nothing is written otherwise.
    pub fn fill_box(
        &mut self,
        min: (i32, i32, i32),
        max: (i32, i32, i32),
        kind: VoxelType,
    ) -> Result<(), GridError> {
        for (x, y, z) in [min, max] {
            if !self.in_bounds(x, y, z) {
                return Err(self.out_of_range(x, y, z));
            }
        }
        let (x0, x1) = (min.0.min(max.0), min.0.max(max.0));
        let (y0, y1) = (min.1.min(max.1), min.1.max(max.1));
        let (z0, z1) = (min.2.min(max.2), min.2.max(max.2));
        for z in z0..=z1 {
            for y in y0..=y1 {
                for x in x0..=x1 {
                    let i = self.index(x as usize, y as usize, z as usize);
                    self.cells[i] = kind;
                }
            }
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.cells.fill(AIR);
    }

    #[inline]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != AIR).count()
    }

    /// True when no cell is occupied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == AIR)
    }

    /// Occupied cells in storage order as `((x, y, z), kind)`.
    pub fn iter_occupied(&self) -> impl Iterator<Item = ((usize, usize, usize), VoxelType)> + '_ {
        let w = self.width;
        let wh = self.width * self.height;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c != AIR)
            .map(move |(i, &c)| ((i % w, (i % wh) / w, i / wh), c))
    }

    fn out_of_range(&self, x: i32, y: i32, z: i32) -> GridError {
        GridError::OutOfRange {
            x,
            y,
            z,
            width: self.width,
            height: self.height,
            depth: self.depth,
        }
    }
}
