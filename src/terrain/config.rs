//! Terrain configuration.
//!
//! A [`TerrainConfig`] fully determines a generated terrain: the same config
//! (seed included) always yields the same heights, colors and roughness.
//! Any change means a full regeneration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Parameters for one terrain generation call
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainConfig {
    /// Extent along X in world units
    pub width: f32,
    /// Extent along Z in world units
    #[serde(alias = "height")]
    pub depth: f32,
    /// Grid cells along X (vertices = segments_x + 1)
    #[serde(alias = "segmentsX")]
    pub segments_x: u32,
    /// Grid cells along Z (vertices = segments_z + 1)
    #[serde(alias = "segmentsZ")]
    pub segments_z: u32,
    /// Vertical scale; heights mostly fall in [-amplitude, amplitude]
    pub amplitude: f32,
    /// Noise seed. Sub-signals use seed, seed+1, seed+2, seed+3.
    pub seed: u32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 500.0,
            depth: 500.0,
            segments_x: 128,
            segments_z: 128,
            amplitude: 30.0,
            seed: 0,
        }
    }
}

impl TerrainConfig {
    /// Square terrain of `size` world units with `segments` cells per side
    pub fn square(size: f32, segments: u32, amplitude: f32, seed: u32) -> Self {
        Self {
            width: size,
            depth: size,
            segments_x: segments,
            segments_z: segments,
            amplitude,
            seed,
        }
    }

    /// Vertices along X
    pub fn columns(&self) -> usize {
        self.segments_x as usize + 1
    }

    /// Vertices along Z
    pub fn rows(&self) -> usize {
        self.segments_z as usize + 1
    }

    /// Total vertex count
    pub fn vertex_count(&self) -> usize {
        self.columns() * self.rows()
    }

    /// Reject configs that cannot produce a grid
    pub fn validate(&self) -> Result<()> {
        if self.segments_x == 0 || self.segments_z == 0 {
            return Err(Error::InvalidConfig(format!(
                "segments must be at least 1, got {}x{}",
                self.segments_x, self.segments_z
            )));
        }
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(Error::InvalidConfig(format!("width must be positive, got {}", self.width)));
        }
        if !(self.depth.is_finite() && self.depth > 0.0) {
            return Err(Error::InvalidConfig(format!("depth must be positive, got {}", self.depth)));
        }
        if !(self.amplitude.is_finite() && self.amplitude >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "amplitude must be finite and non-negative, got {}",
                self.amplitude
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
