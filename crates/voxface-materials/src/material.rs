use std::collections::{BTreeMap, HashMap};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use voxface_grid::{AIR, VoxelType};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub u16);

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureFilter {
    #[default]
    Nearest,
    Linear,
}

pub const DEFAULT_JITTER_LEVEL: f32 = 100.0;

/// Render-facing description of a material. The renderer owns the actual
/// texture and shader objects; this only carries what it needs to build them.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub id: MaterialId,
    pub key: String,
    pub texture: PathBuf,
    pub filter: TextureFilter,
    pub mipmaps: bool,
    pub double_sided: bool,
    /// Screen-space vertex snapping resolution for the jitter vertex stage.
    pub jitter_level: f32,
}

#[derive(Default, Clone, Debug)]
pub struct MaterialCatalog {
    pub materials: Vec<Material>,
    pub by_key: HashMap<String, MaterialId>,
    bindings: HashMap<VoxelType, MaterialId>,
    fallback: Option<MaterialId>,
}

impl MaterialCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn get_id(&self, key: &str) -> Option<MaterialId> {
        self.by_key.get(key).copied()
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0 as usize)
    }

    pub fn get_by_key(&self, key: &str) -> Option<&Material> {
        self.get_id(key).and_then(|id| self.get(id))
    }

    /// Adds a material with default sampling settings, or returns the existing
    /// id when `key` is already present.
    pub fn insert(&mut self, key: &str, texture: impl Into<PathBuf>) -> MaterialId {
        if let Some(id) = self.get_id(key) {
            return id;
        }
        let id = MaterialId(self.materials.len() as u16);
        self.by_key.insert(key.to_string(), id);
        self.materials.push(Material {
            id,
            key: key.to_string(),
            texture: texture.into(),
            filter: TextureFilter::Nearest,
            mipmaps: false,
            double_sided: true,
            jitter_level: DEFAULT_JITTER_LEVEL,
        });
        id
    }

    /// Binds a voxel type code to a material. Air cannot be bound.
    pub fn bind(&mut self, kind: VoxelType, id: MaterialId) -> Result<(), Box<dyn Error>> {
        if kind == AIR {
            return Err("voxel type 0 is air and cannot carry a material".into());
        }
        if self.get(id).is_none() {
            return Err(format!("unknown material id {}", id.0).into());
        }
        self.bindings.insert(kind, id);
        Ok(())
    }

    pub fn set_fallback(&mut self, id: Option<MaterialId>) {
        self.fallback = id;
    }

    pub fn fallback(&self) -> Option<MaterialId> {
        self.fallback
    }

    /// Material for a voxel type: its binding, else the fallback. Air has none.
    pub fn material_for(&self, kind: VoxelType) -> Option<MaterialId> {
        if kind == AIR {
            return None;
        }
        self.bindings.get(&kind).copied().or(self.fallback)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: MaterialsConfig = toml::from_str(toml_str)?;
        Self::from_config(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .map_err(|e| format!("reading materials {}: {e}", path.display()))?;
        Self::from_toml_str(&s)
    }

    pub fn from_config(cfg: MaterialsConfig) -> Result<Self, Box<dyn Error>> {
        let mut catalog = MaterialCatalog::new();
        // BTreeMap keeps keys sorted so MaterialId assignment is stable.
        for (key, entry) in cfg.materials {
            let id = catalog.insert(&key, PathBuf::new());
            let m = &mut catalog.materials[id.0 as usize];
            match entry {
                MaterialEntry::Path(p) => m.texture = PathBuf::from(p),
                MaterialEntry::Detail {
                    texture,
                    filter,
                    mipmaps,
                    double_sided,
                    jitter_level,
                } => {
                    m.texture = PathBuf::from(texture);
                    m.filter = filter.unwrap_or_default();
                    m.mipmaps = mipmaps.unwrap_or(false);
                    m.double_sided = double_sided.unwrap_or(true);
                    m.jitter_level = jitter_level.unwrap_or(DEFAULT_JITTER_LEVEL);
                }
            }
        }
        for (kind_str, key) in cfg.bindings {
            let kind: VoxelType = kind_str
                .trim()
                .parse()
                .map_err(|e| format!("binding key {kind_str:?} is not a voxel type: {e}"))?;
            let id = catalog
                .get_id(&key)
                .ok_or_else(|| format!("binding {kind} refers to unknown material {key:?}"))?;
            catalog.bind(kind, id)?;
        }
        if let Some(key) = cfg.fallback {
            let id = catalog
                .get_id(&key)
                .ok_or_else(|| format!("fallback refers to unknown material {key:?}"))?;
            catalog.fallback = Some(id);
        }
        log::debug!(
            "material catalog: {} materials, {} bindings, fallback={:?}",
            catalog.materials.len(),
            catalog.bindings.len(),
            catalog.fallback
        );
        Ok(catalog)
    }
}

// --- Config ---

#[derive(Deserialize, Default)]
pub struct MaterialsConfig {
    #[serde(default)]
    pub fallback: Option<String>,
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialEntry>,
    #[serde(default)]
    pub bindings: BTreeMap<String, String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum MaterialEntry {
    // Simple: sand = "textures/sand.png"
    Path(String),
    // Detailed: sand = { texture = "...", filter = "linear", jitter_level = 50.0 }
    Detail {
        texture: String,
        filter: Option<TextureFilter>,
        mipmaps: Option<bool>,
        double_sided: Option<bool>,
        jitter_level: Option<f32>,
    },
}
