//! Scenario definitions: battlefield, starting positions and objectives.
//!
//! The default scenario is the reference battle. Scenarios are plain data
//! and load from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use steelfront_core::catalog::{player_tank_spec, PlayerTankSpec, UnitType};
use steelfront_core::constants::*;
use steelfront_core::error::{Result, SteelfrontError};
use steelfront_core::types::Position;
use steelfront_terrain::{Obstacle, ObstacleKind, TerrainMap, TerrainQuery};

/// Where an AI unit starts. Missing type or heading is rolled at spawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitPlacement {
    pub position: Position,
    #[serde(default)]
    pub unit: Option<UnitType>,
    #[serde(default)]
    pub heading: Option<f64>,
}

impl UnitPlacement {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Position::new(x, y),
            unit: None,
            heading: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub name: String,
    pub map: TerrainMap,
    /// The player vehicle. Defaults to the M1 Abrams.
    pub player: PlayerTankSpec,
    pub player_start: Position,
    pub player_heading: f64,
    pub allies: Vec<UnitPlacement>,
    pub enemies: Vec<UnitPlacement>,
    pub objectives: Vec<Position>,
}

impl Default for Scenario {
    fn default() -> Self {
        reference_battle()
    }
}

/// The reference battle: 4 km square, player at the centre with three allies
/// in formation, twelve enemies on a 6×2 grid, three flags.
pub fn reference_battle() -> Scenario {
    let map = TerrainMap::new(DEFAULT_MAP_SIZE, DEFAULT_MAP_SIZE).with_obstacles(vec![
        obstacle(2600.0, 2600.0, 40.0, ObstacleKind::Rock),
        obstacle(3200.0, 1800.0, 120.0, ObstacleKind::Building),
        obstacle(1200.0, 2800.0, 30.0, ObstacleKind::Tree),
        obstacle(2800.0, 3400.0, 90.0, ObstacleKind::Building),
        obstacle(1000.0, 1100.0, 35.0, ObstacleKind::Rock),
    ]);
    let player_start = map.centre();

    let allies = (0..3)
        .map(|i| {
            UnitPlacement::at(
                player_start.x + (i as f64 - 1.0) * FORMATION_SPACING,
                player_start.y + FORMATION_DEPTH,
            )
        })
        .collect();

    let enemies = (0..12)
        .map(|i| {
            UnitPlacement::at(
                300.0 + (i % 6) as f64 * 600.0,
                300.0 + (i / 6) as f64 * 500.0,
            )
        })
        .collect();

    Scenario {
        name: "Reference Battle".to_string(),
        map,
        player: player_tank_spec(),
        player_start,
        player_heading: 0.0,
        allies,
        enemies,
        objectives: vec![
            Position::new(500.0, 500.0),
            Position::new(1500.0, 800.0),
            Position::new(800.0, 1500.0),
        ],
    }
}

fn obstacle(x: f64, y: f64, size: f64, kind: ObstacleKind) -> Obstacle {
    Obstacle {
        position: Position::new(x, y),
        size,
        kind,
    }
}

impl Scenario {
    /// Parse a scenario from JSON. Omitted fields take the reference values.
    pub fn from_json(json: &str) -> Result<Self> {
        let scenario: Scenario = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Load and validate a scenario file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject scenarios the battle cannot start from. Individual unit or
    /// objective entries off the map are skipped at spawn instead.
    pub fn validate(&self) -> Result<()> {
        self.player.validate()?;
        if !(self.map.width > 2.0 * MAP_EDGE_MARGIN && self.map.height > 2.0 * MAP_EDGE_MARGIN) {
            return Err(SteelfrontError::InvalidScenario(format!(
                "map {}x{} is smaller than its edge margins",
                self.map.width, self.map.height
            )));
        }
        if !self.map.can_move_to(&self.player_start) {
            return Err(SteelfrontError::InvalidScenario(format!(
                "player start ({}, {}) is not passable",
                self.player_start.x, self.player_start.y
            )));
        }
        Ok(())
    }
}
