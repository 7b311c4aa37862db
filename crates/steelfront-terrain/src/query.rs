//! The terrain query seam consumed by the simulation.

use steelfront_core::types::Position;

/// Read-only terrain collaborator.
///
/// The simulation only asks two questions of the battlefield, so tests can
/// substitute an open field or a walled box without building a map.
pub trait TerrainQuery {
    /// Whether a vehicle may occupy `position`.
    fn can_move_to(&self, position: &Position) -> bool;

    /// Whether a shell at `position` has struck the ground.
    fn is_ground_impact(&self, position: &Position) -> bool;
}
