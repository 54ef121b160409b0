//! Collision-aware object placement

pub mod footprint;
pub use footprint::{BuildingKind, Footprint};

pub mod registry;
pub use registry::{CollisionObject, CollisionRegistry, ObjectId};

pub mod resolver;
pub use resolver::{Placement, PlacementOutcome, PlacementRequest, SearchParams};
