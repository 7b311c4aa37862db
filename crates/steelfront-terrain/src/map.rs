//! TerrainMap: bounded battlefield with circular obstacles.

use serde::{Deserialize, Serialize};

use steelfront_core::constants::{GROUND_BAND, MAP_EDGE_MARGIN, OBSTACLE_CLEARANCE};
use steelfront_core::types::Position;

use crate::query::TerrainQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Tree,
    Rock,
    Building,
}

/// A circular obstruction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Obstacle {
    pub position: Position,
    /// Radius (meters).
    pub size: f64,
    pub kind: ObstacleKind,
}

/// Battlefield extent and obstacles, in meters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainMap {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
}

impl TerrainMap {
    /// An open field of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            obstacles: Vec::new(),
        }
    }

    pub fn with_obstacles(mut self, obstacles: Vec<Obstacle>) -> Self {
        self.obstacles = obstacles;
        self
    }

    /// Whether `position` lies inside the map, margin excluded.
    pub fn in_bounds(&self, position: &Position) -> bool {
        position.x >= MAP_EDGE_MARGIN
            && position.x <= self.width - MAP_EDGE_MARGIN
            && position.y >= MAP_EDGE_MARGIN
            && position.y <= self.height - MAP_EDGE_MARGIN
    }

    /// First obstacle whose clearance circle contains `position`.
    pub fn blocking_obstacle(&self, position: &Position) -> Option<&Obstacle> {
        self.obstacles
            .iter()
            .find(|o| o.position.distance_to(position) < o.size + OBSTACLE_CLEARANCE)
    }

    pub fn centre(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }
}

impl TerrainQuery for TerrainMap {
    fn can_move_to(&self, position: &Position) -> bool {
        self.in_bounds(position) && self.blocking_obstacle(position).is_none()
    }

    fn is_ground_impact(&self, position: &Position) -> bool {
        position.y > self.height - GROUND_BAND
    }
}
