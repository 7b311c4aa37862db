//! Terrain system for STEELFRONT.
//!
//! Read-only battlefield queries: position validity against the map edge
//! and obstacles, and the ground band shells strike.

pub use steelfront_core as core;

pub mod map;
pub mod query;

// Re-export key types for convenience.
pub use map::{Obstacle, ObstacleKind, TerrainMap};
pub use query::TerrainQuery;
