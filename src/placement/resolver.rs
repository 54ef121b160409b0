//! Collision-free position search around a target point.
//!
//! The target itself is tried first. Failing that, concentric rings of
//! growing radius are sampled in eight directions (45 degree steps, starting
//! at +X and turning toward +Z). The first free candidate wins, so smaller
//! rings always beat larger ones and lower angles beat higher ones on the
//! same ring. When every candidate collides the object stays where it was.

use std::f32::consts::FRAC_PI_4;

use serde::{Deserialize, Serialize};

use super::footprint::Footprint;
use super::registry::{CollisionRegistry, ObjectId};
use crate::core::types::Vec3;

/// Directions sampled per ring
pub const RING_DIRECTIONS: u32 = 8;

/// Ring search limits
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Number of rings tried after the target itself
    pub max_attempts: u32,
    /// Radius of the outermost ring
    pub max_offset: f32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            max_offset: 10.0,
        }
    }
}

/// How a placement request was settled
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// The target was already free
    Unobstructed,
    /// Moved to a ring candidate; `ring` is 1-based, `direction` counts 45 degree steps
    Displaced { ring: u32, direction: u32 },
    /// Nothing free within reach; position is the original one
    Rejected,
}

/// Resolved position plus how it was obtained
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    pub outcome: PlacementOutcome,
}

impl Placement {
    /// False when the request was rejected and the object did not move
    pub fn is_resolved(&self) -> bool {
        self.outcome != PlacementOutcome::Rejected
    }
}

/// Object being placed: its shape and where it currently is
#[derive(Clone, Copy, Debug)]
pub struct PlacementRequest<'a> {
    pub footprint: Footprint,
    /// Position returned when no free spot is found
    pub original_position: Vec3,
    pub target: Vec3,
    /// Registry entry to ignore, normally the object itself
    pub exclude: Option<&'a ObjectId>,
}

/// Candidate position for `ring` (1-based) and `direction` (0..8)
fn ring_candidate(target: Vec3, ring: u32, direction: u32, search: &SearchParams) -> Vec3 {
    let radius = ring as f32 / search.max_attempts as f32 * search.max_offset;
    let angle = direction as f32 * FRAC_PI_4;
    Vec3::new(
        target.x + angle.cos() * radius,
        target.y,
        target.z + angle.sin() * radius,
    )
}

impl CollisionRegistry {
    /// Find the nearest free position for `request` according to `search`
    pub fn find_valid_position(&self, request: &PlacementRequest<'_>, search: &SearchParams) -> Placement {
        let fits = |position: Vec3| self.is_valid(&request.footprint.bounds_at(position), request.exclude);

        if fits(request.target) {
            return Placement {
                position: request.target,
                outcome: PlacementOutcome::Unobstructed,
            };
        }

        for ring in 1..=search.max_attempts {
            for direction in 0..RING_DIRECTIONS {
                let candidate = ring_candidate(request.target, ring, direction, search);
                if fits(candidate) {
                    log::debug!(
                        "placement displaced from {} to {} (ring {}, direction {})",
                        request.target, candidate, ring, direction
                    );
                    return Placement {
                        position: candidate,
                        outcome: PlacementOutcome::Displaced { ring, direction },
                    };
                }
            }
        }

        log::debug!(
            "placement at {} rejected after {} rings, keeping {}",
            request.target, search.max_attempts, request.original_position
        );
        Placement {
            position: request.original_position,
            outcome: PlacementOutcome::Rejected,
        }
    }

    /// Drag a registered object toward `target`, ignoring its own box.
    ///
    /// On success the registry entry moves to the resolved position. Returns
    /// `None` for unknown ids.
    pub fn move_object(&mut self, id: &ObjectId, target: Vec3, search: &SearchParams) -> Option<Placement> {
        let object = self.get(id)?;
        let request = PlacementRequest {
            footprint: object.footprint,
            original_position: object.position,
            target,
            exclude: Some(id),
        };
        let placement = self.find_valid_position(&request, search);
        if placement.is_resolved() {
            self.update(id, placement.position);
        }
        Some(placement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Aabb;

    fn crate_box() -> Footprint {
        Footprint::from_size(Vec3::splat(2.0))
    }

    fn request(target: Vec3) -> PlacementRequest<'static> {
        PlacementRequest {
            footprint: crate_box(),
            original_position: Vec3::new(-100.0, 0.0, -100.0),
            target,
            exclude: None,
        }
    }

    #[test]
    fn test_free_target_unchanged() {
        let mut registry = CollisionRegistry::new();
        registry.add("far", crate_box(), Vec3::new(50.0, 0.0, 50.0));
        let target = Vec3::new(1.25, 3.0, -7.5);
        let placement = registry.find_valid_position(&request(target), &SearchParams::default());
        assert_eq!(placement.position, target);
        assert_eq!(placement.outcome, PlacementOutcome::Unobstructed);
        assert!(placement.is_resolved());
    }

    #[test]
    fn test_smallest_clear_ring_wins() {
        let mut registry = CollisionRegistry::new();
        registry.add("blocker", crate_box(), Vec3::ZERO);
        // ring 1 radius 1: still overlapping; ring 2 radius 2 touches (counts as hit);
        // ring 3 radius 3 at angle 0 is clear
        let placement = registry.find_valid_position(&request(Vec3::ZERO), &SearchParams::default());
        assert_eq!(placement.outcome, PlacementOutcome::Displaced { ring: 3, direction: 0 });
        assert!((placement.position - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_angle_order_tie_break() {
        let mut registry = CollisionRegistry::new();
        registry.add("blocker", crate_box(), Vec3::ZERO);
        // wall along +X so direction 0 fails on every ring
        registry.add("wall", Footprint::new(Aabb::new(Vec3::new(2.5, -5.0, -0.5), Vec3::new(40.0, 5.0, 0.5))), Vec3::ZERO);
        let placement = registry.find_valid_position(&request(Vec3::ZERO), &SearchParams::default());
        assert_eq!(placement.outcome, PlacementOutcome::Displaced { ring: 3, direction: 1 });
        let expected = Vec3::new(FRAC_PI_4.cos() * 3.0, 0.0, FRAC_PI_4.sin() * 3.0);
        assert!((placement.position - expected).length() < 1e-5);
    }

    #[test]
    fn test_exhaustion_returns_original() {
        let mut registry = CollisionRegistry::new();
        registry.add(
            "plaza",
            Footprint::new(Aabb::new(Vec3::splat(-50.0), Vec3::splat(50.0))),
            Vec3::ZERO,
        );
        let req = request(Vec3::new(5.0, 0.0, 5.0));
        let placement = registry.find_valid_position(&req, &SearchParams::default());
        assert_eq!(placement.position, req.original_position);
        assert_ne!(placement.position, req.target);
        assert_eq!(placement.outcome, PlacementOutcome::Rejected);
        assert!(!placement.is_resolved());
    }

    #[test]
    fn test_zero_attempts_only_tries_target() {
        let mut registry = CollisionRegistry::new();
        registry.add("blocker", crate_box(), Vec3::ZERO);
        let search = SearchParams { max_attempts: 0, max_offset: 10.0 };
        let placement = registry.find_valid_position(&request(Vec3::ZERO), &search);
        assert_eq!(placement.outcome, PlacementOutcome::Rejected);
    }

    #[test]
    fn test_y_is_preserved() {
        let mut registry = CollisionRegistry::new();
        registry.add("blocker", crate_box(), Vec3::ZERO);
        let placement = registry.find_valid_position(&request(Vec3::new(0.0, 1.0, 0.0)), &SearchParams::default());
        assert!(placement.is_resolved());
        assert_eq!(placement.position.y, 1.0);
    }

    #[test]
    fn test_move_object_ignores_self() {
        let mut registry = CollisionRegistry::new();
        registry.add("house", crate_box(), Vec3::ZERO);
        let id = ObjectId::from("house");
        let target = Vec3::new(0.5, 0.0, 0.0);
        let placement = registry.move_object(&id, target, &SearchParams::default()).unwrap();
        assert_eq!(placement.outcome, PlacementOutcome::Unobstructed);
        assert_eq!(registry.get(&id).unwrap().position, target);
    }

    #[test]
    fn test_move_object_rejected_keeps_position() {
        let mut registry = CollisionRegistry::new();
        registry.add("house", crate_box(), Vec3::new(100.0, 0.0, 0.0));
        registry.add("plaza", Footprint::new(Aabb::new(Vec3::splat(-50.0), Vec3::splat(50.0))), Vec3::ZERO);
        let id = ObjectId::from("house");
        let placement = registry.move_object(&id, Vec3::ZERO, &SearchParams::default()).unwrap();
        assert_eq!(placement.outcome, PlacementOutcome::Rejected);
        assert_eq!(placement.position, Vec3::new(100.0, 0.0, 0.0));
        assert_eq!(registry.get(&id).unwrap().position, Vec3::new(100.0, 0.0, 0.0));
    }

    #[test]
    fn test_place_buildings_on_terrain() {
        use crate::placement::BuildingKind;
        use crate::terrain::{generate, TerrainConfig};

        let mesh = generate(&TerrainConfig::square(100.0, 16, 10.0, 3)).unwrap();
        let mut registry = CollisionRegistry::new();
        let kind = BuildingKind::Medium;

        let first = mesh.surface_point(0.0, 0.0, 0.5);
        registry.add("b1", kind.footprint(), first);

        let request = PlacementRequest {
            footprint: kind.footprint(),
            original_position: first,
            target: first,
            exclude: None,
        };
        let placement = registry.find_valid_position(&request, &SearchParams::default());
        assert!(matches!(placement.outcome, PlacementOutcome::Displaced { .. }));
        registry.add("b2", kind.footprint(), placement.position);

        let b1 = registry.get(&"b1".into()).unwrap().bounding_box;
        let b2 = registry.get(&"b2".into()).unwrap().bounding_box;
        assert!(!b1.intersects(&b2));
    }

    #[test]
    fn test_move_unknown_object() {
        let mut registry = CollisionRegistry::new();
        assert!(registry.move_object(&"ghost".into(), Vec3::ZERO, &SearchParams::default()).is_none());
    }
}
