mod export;
mod render_mesh;
mod scene;

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Parser;
use voxface_materials::MaterialCatalog;
use voxface_mesh::MeshBuilder;

use crate::render_mesh::{SceneMesh, build_scene_mesh, create_render_mesh};
use crate::scene::{Scene, SceneConfig, demo_terrain};

const DEFAULT_MATERIALS: &str = include_str!("../assets/materials.toml");

/// Build a culled surface mesh from a voxel scene.
#[derive(Parser, Debug)]
#[command(name = "voxface", version)]
struct Args {
    /// Scene TOML; the built-in test pattern is used when omitted.
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Material catalog TOML; defaults to the bundled catalog.
    #[arg(long)]
    materials: Option<PathBuf>,

    /// Mesh grid layers in parallel.
    #[arg(long)]
    parallel: bool,

    /// Write the mesh as Wavefront OBJ.
    #[arg(long)]
    obj: Option<PathBuf>,
}

fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}

fn main() {
    init_logging();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let catalog = match &args.materials {
        Some(path) => MaterialCatalog::from_path(path)?,
        None => MaterialCatalog::from_toml_str(DEFAULT_MATERIALS)?,
    };
    let scene: Scene = match &args.scene {
        Some(path) => SceneConfig::from_path(path)?.build()?,
        None => demo_terrain()?,
    };
    let (w, h, d) = scene.grid.dims();
    log::info!(
        "scene {}x{}x{} occupied={} materials={}",
        w,
        h,
        d,
        scene.grid.occupied_count(),
        catalog.len()
    );

    let builder = MeshBuilder::new().parallel(args.parallel);
    let meshed = match &scene.material {
        Some(key) => {
            let id = catalog
                .get_id(key)
                .ok_or_else(|| format!("scene material {key:?} is not in the catalog"))?;
            SceneMesh {
                parts: vec![create_render_mesh(&scene.grid, &builder, Some(id))],
            }
        }
        None => build_scene_mesh(&scene.grid, &builder, &catalog),
    };
    for part in &meshed.parts {
        part.mesh.validate()?;
    }

    log::info!(
        "mesh parts={} faces={} vertices={} indices={}",
        meshed.parts.len(),
        meshed.face_count(),
        meshed.vertex_count(),
        meshed.index_count()
    );
    if let Some(bb) = meshed.bounds() {
        log::info!("mesh bounds min={:?} max={:?}", bb.min.to_array(), bb.max.to_array());
    }

    if let Some(path) = &args.obj {
        let file = File::create(path)
            .map_err(|e| format!("creating {}: {e}", path.display()))?;
        let mut out = BufWriter::new(file);
        export::write_obj(&mut out, &meshed, &catalog)?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}
