//! Local-space collision extents for placeable objects.

use serde::{Deserialize, Serialize};

use crate::core::types::{Quat, Vec3};
use crate::math::Aabb;

/// Object-local bounding box around the object's origin
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    local: Aabb,
}

impl Footprint {
    /// Footprint from an explicit local box
    pub fn new(local: Aabb) -> Self {
        Self { local }
    }

    /// Box of `size` centred on the origin
    pub fn from_size(size: Vec3) -> Self {
        Self::new(Aabb::from_center_half_extent(Vec3::ZERO, size * 0.5))
    }

    /// Local bounds
    pub fn local(&self) -> Aabb {
        self.local
    }

    /// Uniformly or non-uniformly scaled footprint
    pub fn scaled(&self, scale: Vec3) -> Self {
        Self::new(self.local.scaled(scale))
    }

    /// Footprint enclosing the box after turning it by `yaw` radians about +Y
    pub fn rotated_y(&self, yaw: f32) -> Self {
        Self::new(self.local.rotated(Quat::from_rotation_y(yaw)))
    }

    /// World-space bounds with the origin at `position`
    pub fn bounds_at(&self, position: Vec3) -> Aabb {
        self.local.translated(position)
    }
}

/// Building presets offered by the placement tool
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingKind {
    Small,
    Medium,
    Large,
}

impl BuildingKind {
    /// Box size (width, height, depth)
    pub fn size(&self) -> Vec3 {
        match self {
            BuildingKind::Small => Vec3::new(3.0, 5.0, 3.0),
            BuildingKind::Medium => Vec3::new(5.0, 10.0, 5.0),
            BuildingKind::Large => Vec3::new(8.0, 15.0, 8.0),
        }
    }

    pub fn footprint(&self) -> Footprint {
        Footprint::from_size(self.size())
    }
}
