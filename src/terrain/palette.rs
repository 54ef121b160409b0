//! Height/slope/moisture driven surface coloring.
//!
//! Base color comes from normalized-height bands (sand, grass, rock, snow)
//! with linear transitions between neighbouring bands. Steep slopes are then
//! pulled toward rock and wet, gentle, below-snow areas toward grass. A small
//! noise jitter is added last to break up banding.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Lerp trait
// ---------------------------------------------------------------------------

/// Trait for types that can be linearly interpolated.
pub trait Lerp: Clone {
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Lerp for [f32; 3] {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        [
            self[0] + (other[0] - self[0]) * t,
            self[1] + (other[1] - self[1]) * t,
            self[2] + (other[2] - self[2]) * t,
        ]
    }
}

// ---------------------------------------------------------------------------
// SurfacePalette
// ---------------------------------------------------------------------------

/// Colors and thresholds for terrain vertex shading
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfacePalette {
    pub sand: [f32; 3],
    pub grass: [f32; 3],
    pub rock: [f32; 3],
    pub snow: [f32; 3],
    /// Normalized height where sand starts turning into grass
    pub grass_line: f32,
    /// Normalized height where grass starts turning into rock
    pub rock_line: f32,
    /// Normalized height where rock starts turning into snow
    pub snow_line: f32,
    /// Slope above which rock bleeds in
    pub steep_slope: f32,
    /// Slope below which moisture can green the surface
    pub moist_max_slope: f32,
    /// Strength of per-vertex color jitter
    pub jitter_strength: f32,
}

impl Default for SurfacePalette {
    fn default() -> Self {
        Self {
            sand: [0.9, 0.8, 0.6],
            grass: [0.3, 0.5, 0.2],
            rock: [0.5, 0.5, 0.5],
            snow: [0.9, 0.9, 0.9],
            grass_line: 0.25,
            rock_line: 0.5,
            snow_line: 0.75,
            steep_slope: 0.3,
            moist_max_slope: 0.5,
            jitter_strength: 0.05,
        }
    }
}

impl SurfacePalette {
    /// Banded base color for a normalized height. Input is clamped to [0, 1].
    pub fn base_color(&self, normalized_height: f32) -> [f32; 3] {
        let h = normalized_height.clamp(0.0, 1.0);
        if h > self.snow_line {
            let t = (h - self.snow_line) / (1.0 - self.snow_line);
            self.rock.lerp(&self.snow, t)
        } else if h > self.rock_line {
            let t = (h - self.rock_line) / (self.snow_line - self.rock_line);
            self.grass.lerp(&self.rock, t)
        } else if h > self.grass_line {
            let t = (h - self.grass_line) / (self.rock_line - self.grass_line);
            self.sand.lerp(&self.grass, t)
        } else {
            self.sand
        }
    }

    /// Full vertex color. `jitter` is a raw noise sample in [-1, 1].
    pub fn shade(&self, normalized_height: f32, slope: f32, moisture: f32, jitter: f32) -> [f32; 3] {
        let h = normalized_height.clamp(0.0, 1.0);
        let mut color = self.base_color(h);

        if slope > self.steep_slope {
            let rock_influence = (slope - self.steep_slope) / (1.0 - self.steep_slope);
            color = color.lerp(&self.rock, rock_influence);
        }

        if h < self.snow_line && moisture > 0.5 && slope < self.moist_max_slope {
            let moisture_influence = (moisture - 0.5) / 0.5 * 0.5;
            color = color.lerp(&self.grass, moisture_influence);
        }

        let variation = jitter * self.jitter_strength;
        color.map(|c| (c + variation).clamp(0.0, 1.0))
    }
}

/// Map a height in `[-amplitude, amplitude]` to [0, 1]. Not clamped.
///
/// Zero amplitude maps everything to 0.5.
pub fn normalize_height(height: f32, amplitude: f32) -> f32 {
    if amplitude <= 0.0 {
        return 0.5;
    }
    (height + amplitude) / (amplitude * 2.0)
}
