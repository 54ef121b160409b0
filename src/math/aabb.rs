//! Axis-aligned bounding box

use serde::{Deserialize, Serialize};

use crate::core::types::{Quat, Vec3};

/// Axis-aligned bounding box defined by min and max corners
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create AABB from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create AABB from center and half-extents
    pub fn from_center_half_extent(center: Vec3, half_extent: Vec3) -> Self {
        Self {
            min: center - half_extent,
            max: center + half_extent,
        }
    }

    /// Get center point
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get size (max - min)
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Get half-extents
    pub fn half_extent(&self) -> Vec3 {
        self.size() * 0.5
    }

    /// The eight corners, bit 0 = x, bit 1 = y, bit 2 = z picks max
    pub fn corners(&self) -> [Vec3; 8] {
        std::array::from_fn(|i| {
            Vec3::new(
                if i & 1 != 0 { self.max.x } else { self.min.x },
                if i & 2 != 0 { self.max.y } else { self.min.y },
                if i & 4 != 0 { self.max.z } else { self.min.z },
            )
        })
    }

    /// Check if two AABBs intersect. Touching faces count as intersecting.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// Expand AABB to include point
    pub fn expand(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Return this box moved by `offset`
    pub fn translated(&self, offset: Vec3) -> Aabb {
        Aabb {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Return this box with both corners multiplied by `scale`
    pub fn scaled(&self, scale: Vec3) -> Aabb {
        let a = self.min * scale;
        let b = self.max * scale;
        Aabb { min: a.min(b), max: a.max(b) }
    }

    /// Smallest AABB enclosing this box after rotating it about the origin
    pub fn rotated(&self, rotation: Quat) -> Aabb {
        let corners = self.corners();
        let first = rotation * corners[0];
        let mut out = Aabb::new(first, first);
        for &corner in &corners[1..] {
            out.expand(rotation * corner);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_accessors() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert_eq!(aabb.center(), Vec3::splat(0.5));
        assert_eq!(aabb.size(), Vec3::ONE);
    }

    #[test]
    fn test_intersects() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::splat(0.5), Vec3::splat(1.5));
        let c = Aabb::new(Vec3::splat(2.0), Vec3::splat(3.0));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_touching_faces_intersect() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_translated() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE).translated(Vec3::new(2.0, 0.0, -1.0));
        assert_eq!(aabb.min, Vec3::new(2.0, 0.0, -1.0));
        assert_eq!(aabb.max, Vec3::new(3.0, 1.0, 0.0));
    }

    #[test]
    fn test_rotated_quarter_turn_swaps_extents() {
        let aabb = Aabb::from_center_half_extent(Vec3::ZERO, Vec3::new(2.0, 1.0, 0.5));
        let rotated = aabb.rotated(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        let half = rotated.half_extent();
        assert!((half.x - 0.5).abs() < 1e-5);
        assert!((half.y - 1.0).abs() < 1e-5);
        assert!((half.z - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_rotated_eighth_turn_grows() {
        let aabb = Aabb::from_center_half_extent(Vec3::ZERO, Vec3::ONE);
        let rotated = aabb.rotated(Quat::from_rotation_y(std::f32::consts::FRAC_PI_4));
        assert!((rotated.half_extent().x - std::f32::consts::SQRT_2).abs() < 1e-5);
    }
}
