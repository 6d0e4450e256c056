//! Material catalog and voxel-type bindings. Data only; no GPU state.
#![forbid(unsafe_code)]

pub mod material;

pub use material::{Material, MaterialCatalog, MaterialId, TextureFilter};
