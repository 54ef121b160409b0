//! Seeded noise sources for terrain synthesis.

use noise::{NoiseFn, Simplex};

/// Octave frequencies and weights for the height signal.
/// The first two octaves sample `height`, the last two sample `detail`.
pub const HEIGHT_OCTAVES: [(f64, f32); 4] = [(1.5, 1.0), (3.0, 0.5), (6.0, 0.25), (12.0, 0.125)];

const MOISTURE_FREQUENCY: f64 = 3.0;
const ROUGHNESS_FREQUENCY: f64 = 5.0;
const JITTER_FREQUENCY: f64 = 10.0;

/// Four decorrelated simplex generators keyed by `seed + offset`
pub struct SurfaceNoise {
    height: Simplex,
    detail: Simplex,
    moisture: Simplex,
    roughness: Simplex,
}

impl SurfaceNoise {
    pub fn new(seed: u32) -> Self {
        Self {
            height: Simplex::new(seed),
            detail: Simplex::new(seed.wrapping_add(1)),
            moisture: Simplex::new(seed.wrapping_add(2)),
            roughness: Simplex::new(seed.wrapping_add(3)),
        }
    }

    /// Fractal height at normalized grid coordinates, scaled by `amplitude`
    pub fn height(&self, nx: f64, nz: f64, amplitude: f32) -> f32 {
        HEIGHT_OCTAVES
            .iter()
            .enumerate()
            .map(|(octave, &(frequency, weight))| {
                let source = if octave < 2 { &self.height } else { &self.detail };
                source.get([nx * frequency, nz * frequency]) as f32 * amplitude * weight
            })
            .sum()
    }

    /// Moisture in [0, 1]
    pub fn moisture(&self, nx: f64, nz: f64) -> f32 {
        ((self.moisture.get([nx * MOISTURE_FREQUENCY, nz * MOISTURE_FREQUENCY]) + 1.0) * 0.5).clamp(0.0, 1.0) as f32
    }

    /// Base roughness in [0, 1] before the slope term
    pub fn base_roughness(&self, nx: f64, nz: f64) -> f32 {
        ((self.roughness.get([nx * ROUGHNESS_FREQUENCY, nz * ROUGHNESS_FREQUENCY]) + 1.0) * 0.5).clamp(0.0, 1.0) as f32
    }

    /// Raw detail sample used for per-vertex color variation, in [-1, 1]
    pub fn jitter(&self, nx: f64, nz: f64) -> f32 {
        self.detail.get([nx * JITTER_FREQUENCY, nz * JITTER_FREQUENCY]) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_samples() {
        let a = SurfaceNoise::new(9);
        let b = SurfaceNoise::new(9);
        for &(x, z) in &[(0.1, 0.2), (0.5, 0.9), (0.33, 0.71)] {
            assert_eq!(a.height(x, z, 10.0), b.height(x, z, 10.0));
            assert_eq!(a.moisture(x, z), b.moisture(x, z));
            assert_eq!(a.base_roughness(x, z), b.base_roughness(x, z));
            assert_eq!(a.jitter(x, z), b.jitter(x, z));
        }
    }

    #[test]
    fn test_different_seed_different_height() {
        let a = SurfaceNoise::new(1);
        let b = SurfaceNoise::new(2);
        let differs = (1..20).any(|i| {
            let t = i as f64 * 0.037;
            a.height(t, t * 1.3, 10.0) != b.height(t, t * 1.3, 10.0)
        });
        assert!(differs);
    }

    #[test]
    fn test_zero_amplitude_is_flat() {
        let noise = SurfaceNoise::new(3);
        assert_eq!(noise.height(0.37, 0.61, 0.0), 0.0);
    }

    #[test]
    fn test_unit_ranges() {
        let noise = SurfaceNoise::new(1234);
        for i in 0..50 {
            let t = i as f64 / 49.0;
            let m = noise.moisture(t, 1.0 - t);
            let r = noise.base_roughness(t * 0.7, t);
            assert!((0.0..=1.0).contains(&m), "moisture {} out of range", m);
            assert!((0.0..=1.0).contains(&r), "roughness {} out of range", r);
        }
    }
}
