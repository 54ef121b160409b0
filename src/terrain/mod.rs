//! Procedural terrain generation

pub mod config;
pub use config::TerrainConfig;

pub mod generator;
pub use generator::{generate, TerrainGenerator, TerrainMesh, TerrainVertex};

pub mod height_grid;
pub use height_grid::HeightGrid;

pub mod noise;
pub mod palette;
pub use palette::SurfacePalette;
