//! CollisionRegistry - flat occupancy map from object id to world bounds.
//!
//! Every live placed object has exactly one entry. Queries are linear scans;
//! this is meant for tens to low hundreds of objects.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::footprint::Footprint;
use crate::core::types::Vec3;
use crate::math::Aabb;

/// Identity of a placed object
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ObjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for ObjectId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered object: its shape, current position and cached world bounds
#[derive(Clone, Debug, PartialEq)]
pub struct CollisionObject {
    pub id: ObjectId,
    pub footprint: Footprint,
    pub position: Vec3,
    pub bounding_box: Aabb,
}

impl CollisionObject {
    fn new(id: ObjectId, footprint: Footprint, position: Vec3) -> Self {
        Self {
            id,
            footprint,
            position,
            bounding_box: footprint.bounds_at(position),
        }
    }
}

/// Authoritative occupancy for the placement subsystem
#[derive(Clone, Debug, Default)]
pub struct CollisionRegistry {
    objects: Vec<CollisionObject>,
}

impl CollisionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object at `position`. An existing entry with the same id
    /// is replaced and returned.
    pub fn add(
        &mut self,
        id: impl Into<ObjectId>,
        footprint: Footprint,
        position: Vec3,
    ) -> Option<CollisionObject> {
        let object = CollisionObject::new(id.into(), footprint, position);
        log::trace!("collision add {} at {}", object.id, position);
        match self.objects.iter_mut().find(|o| o.id == object.id) {
            Some(existing) => Some(std::mem::replace(existing, object)),
            None => {
                self.objects.push(object);
                None
            }
        }
    }

    /// Unregister an object.
    pub fn remove(&mut self, id: &ObjectId) -> Option<CollisionObject> {
        let index = self.objects.iter().position(|o| &o.id == id)?;
        log::trace!("collision remove {}", id);
        Some(self.objects.remove(index))
    }

    /// Move an object and recompute its bounds. Returns false for unknown ids.
    pub fn update(&mut self, id: &ObjectId, position: Vec3) -> bool {
        match self.objects.iter_mut().find(|o| &o.id == id) {
            Some(object) => {
                object.position = position;
                object.bounding_box = object.footprint.bounds_at(position);
                log::trace!("collision update {} to {}", id, position);
                true
            }
            None => false,
        }
    }

    /// Get an object by id.
    pub fn get(&self, id: &ObjectId) -> Option<&CollisionObject> {
        self.objects.iter().find(|o| &o.id == id)
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.get(id).is_some()
    }

    /// Whether `bounds` is free of every registered box except `exclude`
    pub fn is_valid(&self, bounds: &Aabb, exclude: Option<&ObjectId>) -> bool {
        self.colliders(bounds, exclude).next().is_none()
    }

    /// Registered objects whose boxes intersect `bounds`, skipping `exclude`
    pub fn colliders<'a>(
        &'a self,
        bounds: &'a Aabb,
        exclude: Option<&'a ObjectId>,
    ) -> impl Iterator<Item = &'a CollisionObject> + 'a {
        self.objects
            .iter()
            .filter(move |o| Some(&o.id) != exclude && bounds.intersects(&o.bounding_box))
    }

    /// Iterate objects in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CollisionObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Remove every object.
    pub fn clear(&mut self) {
        log::trace!("collision clear ({} objects)", self.objects.len());
        self.objects.clear();
    }
}
