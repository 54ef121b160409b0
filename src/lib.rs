//! Terraplan - procedural terrain and object placement for a city planner

pub mod core;
pub mod math;
pub mod terrain;
pub mod placement;
