//! Terrain generator binary — writes preview images and a manifest to disk.
//!
//! Usage: cargo run --release --bin generate_terrain -- [OPTIONS]
//!
//! Options:
//!   --config <FILE>     JSON terrain config (flags below override it)
//!   --seed <SEED>       Noise seed (default: 0)
//!   --segments <N>      Grid cells per side (default: 128)
//!   --amplitude <A>     Vertical scale (default: 30.0)
//!   --size <METERS>     Terrain width and depth (default: 500)
//!   --out <DIR>         Output directory (default: "terrain_out")
//!
//! Output structure:
//!   <DIR>/
//!     heightmap.png     # 16-bit grayscale, normalized height
//!     colors.png        # RGB vertex colors
//!     manifest.json     # config + height range

use std::path::{Path, PathBuf};
use std::time::Instant;

use image::{ImageBuffer, Luma, Rgb};
use serde_json::json;

use terraplan::core::Result;
use terraplan::terrain::palette::normalize_height;
use terraplan::terrain::{generate, TerrainConfig, TerrainMesh};

fn main() {
    terraplan::core::logging::init();

    if let Err(e) = run() {
        log::error!("terrain generation failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let mut config = match parse_str_arg(&args, "--config") {
        Some(path) => TerrainConfig::load(path)?,
        None => TerrainConfig::default(),
    };
    if let Some(seed) = parse_u32_arg(&args, "--seed") {
        config.seed = seed;
    }
    if let Some(segments) = parse_u32_arg(&args, "--segments") {
        config.segments_x = segments;
        config.segments_z = segments;
    }
    if let Some(amplitude) = parse_f32_arg(&args, "--amplitude") {
        config.amplitude = amplitude;
    }
    if let Some(size) = parse_f32_arg(&args, "--size") {
        config.width = size;
        config.depth = size;
    }
    let output_dir = PathBuf::from(parse_str_arg(&args, "--out").unwrap_or_else(|| "terrain_out".to_string()));

    log::info!(
        "Generating {}x{} terrain, {}m x {}m, amplitude {}, seed {}",
        config.segments_x, config.segments_z, config.width, config.depth, config.amplitude, config.seed
    );

    let start = Instant::now();
    let mesh = generate(&config)?;
    log::info!("Generated {} vertices in {:.1}ms", mesh.vertices.len(), start.elapsed().as_secs_f64() * 1000.0);

    std::fs::create_dir_all(&output_dir)?;
    write_heightmap(&mesh, &output_dir.join("heightmap.png"))?;
    write_colors(&mesh, &output_dir.join("colors.png"))?;

    let (min_h, max_h) = mesh.heights.min_max();
    let manifest = json!({
        "config": config,
        "vertices": mesh.vertices.len(),
        "triangles": mesh.indices.len() / 3,
        "height_min": min_h,
        "height_max": max_h,
    });
    std::fs::write(output_dir.join("manifest.json"), serde_json::to_string_pretty(&manifest)?)?;

    log::info!("Wrote {}", output_dir.display());
    Ok(())
}

fn write_heightmap(mesh: &TerrainMesh, path: &Path) -> Result<()> {
    let grid = &mesh.heights;
    let amplitude = mesh.config.amplitude;
    let image = ImageBuffer::from_fn(grid.columns() as u32, grid.rows() as u32, |x, z| {
        let h = grid.height_or_zero(x as usize, z as usize);
        let n = normalize_height(h, amplitude).clamp(0.0, 1.0);
        Luma([(n * u16::MAX as f32) as u16])
    });
    image.save(path)?;
    Ok(())
}

fn write_colors(mesh: &TerrainMesh, path: &Path) -> Result<()> {
    let columns = mesh.heights.columns() as u32;
    let rows = mesh.heights.rows() as u32;
    let image = ImageBuffer::from_fn(columns, rows, |x, z| {
        let c = mesh.colors[mesh.vertex_index(x as usize, z as usize)];
        Rgb(c.map(|v| (v * 255.0).round() as u8))
    });
    image.save(path)?;
    Ok(())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_u32_arg(args: &[String], flag: &str) -> Option<u32> {
    parse_str_arg(args, flag).and_then(|s| s.parse().ok())
}

fn parse_f32_arg(args: &[String], flag: &str) -> Option<f32> {
    parse_str_arg(args, flag).and_then(|s| s.parse().ok())
}
