//! Vehicle catalog: the data every spawned vehicle is built from.

use serde::{Deserialize, Serialize};

use crate::components::*;
use crate::constants::*;
use crate::enums::*;
use crate::error::{Result, SteelfrontError};

/// Catalog identifier for AI-driven units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    T72B,
    Leopard2A4,
    Challenger1,
    T80U,
    M1Abrams,
    M1A1Abrams,
}

/// Unit types enemies are drawn from.
pub const ENEMY_TYPES: [UnitType; 4] = [
    UnitType::T72B,
    UnitType::Leopard2A4,
    UnitType::Challenger1,
    UnitType::T80U,
];

/// Unit types allies are drawn from.
pub const ALLY_TYPES: [UnitType; 2] = [UnitType::M1Abrams, UnitType::M1A1Abrams];

/// Data for an AI unit type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitSpec {
    pub name: String,
    pub nation: String,
    /// Hull armor; AI units carry no turret armor.
    pub armor: ArmorRating,
    pub caliber: f64,
    pub penetration: f64,
    /// Base reload (seconds).
    pub reload: f64,
    /// Road speed (km/h), informational.
    pub speed: f64,
    pub behavior: Behavior,
}

/// Data for the player vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerTankSpec {
    pub name: String,
    pub nation: String,
    pub mobility: Mobility,
    pub armor: Armor,
    pub fuel: Fuel,
    pub caliber: f64,
    pub reload_time: f64,
    pub shells: Vec<ShellStore>,
    pub crew: Vec<CrewRole>,
    pub modules: Vec<Module>,
}

fn armor(front: f64, side: f64, rear: f64) -> ArmorRating {
    ArmorRating {
        front,
        side,
        rear,
        top: 0.0,
    }
}

/// Catalog data for a unit type.
pub fn get_unit_spec(unit: UnitType) -> UnitSpec {
    let (name, nation, armor, caliber, penetration, reload, speed, behavior) = match unit {
        UnitType::T72B => (
            "T-72B",
            "USSR",
            armor(500.0, 80.0, 50.0),
            125.0,
            420.0,
            8.5,
            60.0,
            Behavior::Aggressive,
        ),
        UnitType::Leopard2A4 => (
            "Leopard 2A4",
            "Germany",
            armor(600.0, 100.0, 70.0),
            120.0,
            450.0,
            6.5,
            68.0,
            Behavior::Defensive,
        ),
        UnitType::Challenger1 => (
            "Challenger 1",
            "UK",
            armor(700.0, 120.0, 80.0),
            120.0,
            430.0,
            7.0,
            56.0,
            Behavior::Sniper,
        ),
        UnitType::T80U => (
            "T-80U",
            "USSR",
            armor(550.0, 90.0, 60.0),
            125.0,
            440.0,
            7.8,
            70.0,
            Behavior::Flanker,
        ),
        UnitType::M1Abrams => (
            "M1 Abrams",
            "USA",
            armor(600.0, 200.0, 100.0),
            120.0,
            450.0,
            6.0,
            72.0,
            Behavior::Support,
        ),
        UnitType::M1A1Abrams => (
            "M1A1 Abrams",
            "USA",
            armor(650.0, 220.0, 120.0),
            120.0,
            460.0,
            6.0,
            72.0,
            Behavior::Support,
        ),
    };
    UnitSpec {
        name: name.to_string(),
        nation: nation.to_string(),
        armor,
        caliber,
        penetration,
        reload,
        speed,
        behavior,
    }
}

fn full_module(kind: ModuleKind, blowout_protected: bool) -> Module {
    Module {
        kind,
        health: 100.0,
        max_health: 100.0,
        blowout_protected,
    }
}

/// The player's M1 Abrams.
pub fn player_tank_spec() -> PlayerTankSpec {
    PlayerTankSpec {
        name: "M1 Abrams".to_string(),
        nation: "USA".to_string(),
        mobility: Mobility {
            mass: 61_500.0,
            engine_power: 1500.0,
            max_speed: 72.0,
            reverse_speed: 42.0,
            turn_rate: 45.0 * DEG,
            turret_slew_rate: 3.5 * DEG,
            elevation_slew_rate: 4.0 * DEG,
            elevation_min: -10.0 * DEG,
            elevation_max: 20.0 * DEG,
        },
        armor: Armor {
            hull: ArmorRating {
                front: 600.0,
                side: 200.0,
                rear: 100.0,
                top: 50.0,
            },
            turret: Some(ArmorRating {
                front: 800.0,
                side: 300.0,
                rear: 150.0,
                top: 75.0,
            }),
        },
        fuel: Fuel {
            current: 1907.0,
            capacity: 1907.0,
            consumption: 3.8,
        },
        caliber: 120.0,
        reload_time: 6.0,
        shells: vec![
            ShellStore {
                kind: ShellKind::Apfsds,
                damage: 420.0,
                penetration: 450.0,
                velocity: 1580.0,
                count: 42,
            },
            ShellStore {
                kind: ShellKind::Heat,
                damage: 380.0,
                penetration: 400.0,
                velocity: 1140.0,
                count: 40,
            },
            ShellStore {
                kind: ShellKind::Smoke,
                damage: 0.0,
                penetration: 0.0,
                velocity: 600.0,
                count: 10,
            },
        ],
        crew: vec![
            CrewRole::Commander,
            CrewRole::Gunner,
            CrewRole::Loader,
            CrewRole::Driver,
        ],
        modules: vec![
            full_module(ModuleKind::Engine, false),
            full_module(ModuleKind::Transmission, false),
            full_module(ModuleKind::FuelTank, true),
            full_module(ModuleKind::AmmoRack, true),
            full_module(ModuleKind::Tracks, false),
            full_module(ModuleKind::Optics, false),
            full_module(ModuleKind::FireControl, false),
        ],
    }
}

impl PlayerTankSpec {
    /// Reject specs the integrator or resolver cannot work with.
    pub fn validate(&self) -> Result<()> {
        let m = &self.mobility;
        if m.mass <= 0.0 {
            return Err(SteelfrontError::InvalidCatalog(format!(
                "{}: mass must be positive",
                self.name
            )));
        }
        if m.max_speed < 0.0 || m.reverse_speed < 0.0 {
            return Err(SteelfrontError::InvalidCatalog(format!(
                "{}: speed limits must be non-negative",
                self.name
            )));
        }
        if m.elevation_min > m.elevation_max {
            return Err(SteelfrontError::InvalidCatalog(format!(
                "{}: elevation limits are inverted",
                self.name
            )));
        }
        if self.shells.is_empty() {
            return Err(SteelfrontError::InvalidCatalog(format!(
                "{}: no ammunition types",
                self.name
            )));
        }
        Ok(())
    }
}

/// Enemy gunnery derived from a unit spec.
pub fn enemy_gunnery(spec: &UnitSpec) -> AiGunnery {
    AiGunnery {
        caliber: spec.caliber,
        penetration: spec.penetration,
        damage: ENEMY_SHELL_DAMAGE,
        velocity: ENEMY_SHELL_VELOCITY,
        max_range: ENEMY_SHELL_MAX_RANGE,
        reload_secs: spec.reload,
        shells: ENEMY_SHELLS,
    }
}

/// Ally gunnery derived from a unit spec.
pub fn ally_gunnery(spec: &UnitSpec) -> AiGunnery {
    AiGunnery {
        caliber: spec.caliber,
        penetration: spec.penetration,
        damage: ALLY_SHELL_DAMAGE,
        velocity: ALLY_SHELL_VELOCITY,
        max_range: ALLY_SHELL_MAX_RANGE,
        reload_secs: ALLY_RELOAD_SECS,
        shells: ALLY_SHELLS,
    }
}
