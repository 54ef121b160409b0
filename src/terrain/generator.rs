//! Noise-based procedural terrain generation
//!
//! Generation runs in two passes over a pre-sized grid. The first pass fills
//! the height grid from layered simplex noise. The second pass needs every
//! neighbour height, so it runs afterwards and derives slope, color and
//! roughness per vertex. Normals are rebuilt from the final positions.

use std::time::Instant;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use super::config::TerrainConfig;
use super::height_grid::HeightGrid;
use super::noise::SurfaceNoise;
use super::palette::{normalize_height, SurfacePalette};
use crate::core::Result;

/// Extra roughness per unit of slope
const SLOPE_ROUGHNESS: f32 = 0.3;

/// GPU-ready terrain vertex
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
    pub roughness: f32,
}

/// Output of one generation call
#[derive(Clone, Debug)]
pub struct TerrainMesh {
    pub config: TerrainConfig,
    pub heights: HeightGrid,
    /// Per-vertex slope in [0, 1], vertex-buffer order
    pub slopes: Vec<f32>,
    /// Per-vertex RGB in [0, 1], vertex-buffer order
    pub colors: Vec<[f32; 3]>,
    /// Per-vertex roughness in [0, 1], vertex-buffer order
    pub roughness: Vec<f32>,
    pub vertices: Vec<TerrainVertex>,
    pub indices: Vec<u32>,
}

/// Procedural terrain generator using seeded multi-octave simplex noise
pub struct TerrainGenerator {
    palette: SurfacePalette,
}

impl Default for TerrainGenerator {
    fn default() -> Self {
        Self::new(SurfacePalette::default())
    }
}

/// Generate terrain with the default palette
pub fn generate(config: &TerrainConfig) -> Result<TerrainMesh> {
    TerrainGenerator::default().generate(config)
}

impl TerrainGenerator {
    /// Create a generator that shades with `palette`
    pub fn new(palette: SurfacePalette) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> &SurfacePalette {
        &self.palette
    }

    /// Build heights, surface attributes and a renderable mesh for `config`
    pub fn generate(&self, config: &TerrainConfig) -> Result<TerrainMesh> {
        config.validate()?;
        let start = Instant::now();

        let noise = SurfaceNoise::new(config.seed);
        let columns = config.columns();
        let rows = config.rows();
        let seg_x = config.segments_x as f64;
        let seg_z = config.segments_z as f64;

        // Pass 1: heights
        let mut heights = HeightGrid::new(columns, rows, config.width, config.depth);
        for z in 0..rows {
            for x in 0..columns {
                let h = noise.height(x as f64 / seg_x, z as f64 / seg_z, config.amplitude);
                heights.set(x, z, h);
            }
        }

        // Pass 2: slope, color, roughness
        let count = config.vertex_count();
        let mut slopes = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);
        let mut roughness = Vec::with_capacity(count);
        let mut vertices = Vec::with_capacity(count);

        let cell_w = config.width / config.segments_x as f32;
        let cell_d = config.depth / config.segments_z as f32;
        let half_w = config.width * 0.5;
        let half_d = config.depth * 0.5;

        for z in 0..rows {
            for x in 0..columns {
                let nx = x as f64 / seg_x;
                let nz = z as f64 / seg_z;
                let height = heights.height_or_zero(x, z);

                let slope = heights.slope_at(x, z, config.amplitude);
                let moisture = noise.moisture(nx, nz);
                let rough = (noise.base_roughness(nx, nz) + slope * SLOPE_ROUGHNESS).clamp(0.0, 1.0);
                let normalized = normalize_height(height, config.amplitude);
                let color = self.palette.shade(normalized, slope, moisture, noise.jitter(nx, nz));

                slopes.push(slope);
                colors.push(color);
                roughness.push(rough);
                vertices.push(TerrainVertex {
                    position: [x as f32 * cell_w - half_w, height, z as f32 * cell_d - half_d],
                    normal: [0.0, 1.0, 0.0],
                    color,
                    roughness: rough,
                });
            }
        }

        let indices = grid_indices(columns, rows);
        let mut mesh = TerrainMesh {
            config: config.clone(),
            heights,
            slopes,
            colors,
            roughness,
            vertices,
            indices,
        };
        mesh.recompute_normals();

        log::debug!(
            "Generated terrain {}x{} segments (seed {}) in {:.2}ms",
            config.segments_x,
            config.segments_z,
            config.seed,
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(mesh)
    }
}

/// Two counter-clockwise (seen from +Y) triangles per grid cell
fn grid_indices(columns: usize, rows: usize) -> Vec<u32> {
    let mut indices = Vec::with_capacity((columns - 1) * (rows - 1) * 6);
    for z in 0..rows - 1 {
        for x in 0..columns - 1 {
            let a = (z * columns + x) as u32;
            let b = ((z + 1) * columns + x) as u32;
            let c = ((z + 1) * columns + x + 1) as u32;
            let d = (z * columns + x + 1) as u32;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    indices
}

impl TerrainMesh {
    /// Vertex-buffer index of grid vertex `(x, z)`
    pub fn vertex_index(&self, x: usize, z: usize) -> usize {
        z * self.config.columns() + x
    }

    /// Recalculate vertex normals from positions (e.g. after height edits).
    ///
    /// Face normals are accumulated unnormalized, so larger triangles weigh more.
    pub fn recompute_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.vertices.len()];

        for tri in self.indices.chunks_exact(3) {
            let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let v0 = Vec3::from(self.vertices[i0].position);
            let v1 = Vec3::from(self.vertices[i1].position);
            let v2 = Vec3::from(self.vertices[i2].position);
            let face = (v1 - v0).cross(v2 - v0);
            normals[i0] += face;
            normals[i1] += face;
            normals[i2] += face;
        }

        for (vertex, n) in self.vertices.iter_mut().zip(normals) {
            let n = n.try_normalize().unwrap_or(Vec3::Y);
            vertex.normal = n.to_array();
        }
    }

    /// Bilinear surface height at a world position, 0 off the terrain
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        self.heights.sample(x, z)
    }

    /// World point on the surface lifted by `clearance`
    pub fn surface_point(&self, x: f32, z: f32, clearance: f32) -> Vec3 {
        Vec3::new(x, self.height_at(x, z) + clearance, z)
    }

    /// Vertex buffer as raw bytes for upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer as raw bytes for upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
