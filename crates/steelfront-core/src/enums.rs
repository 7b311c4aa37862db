//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Which side of the battle a vehicle fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// The single externally-controlled vehicle.
    Player,
    /// AI unit fighting alongside the player.
    Ally,
    /// AI unit fighting against the player.
    Enemy,
}

impl Role {
    /// Whether a shell fired by `self` may hit a vehicle of role `other`.
    pub fn is_hostile_to(self, other: Role) -> bool {
        match self {
            Role::Player | Role::Ally => other == Role::Enemy,
            Role::Enemy => matches!(other, Role::Player | Role::Ally),
        }
    }
}

/// AI movement policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Behavior {
    /// Close distance directly.
    Aggressive,
    /// Approach offset by a perpendicular angle.
    Flanker,
    /// Hold range; retreat inside a long stand-off distance.
    Sniper,
    /// Hold range; retreat inside a short stand-off distance.
    Defensive,
    /// Keep formation on the protected unit and engage nearby hostiles.
    Support,
}

/// AI behavioral state, re-derived every tick from target distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiState {
    #[default]
    Patrol,
    Engage,
}

/// Directional armor zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmorZone {
    Front,
    Side,
    Rear,
    Top,
}

/// Ammunition type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShellKind {
    /// Armor-piercing fin-stabilized discarding sabot.
    Apfsds,
    /// High-explosive anti-tank.
    Heat,
    /// Smoke; no damage, no penetration.
    Smoke,
}

/// Named vehicle subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleKind {
    Engine,
    Transmission,
    FuelTank,
    AmmoRack,
    Tracks,
    Optics,
    FireControl,
}

/// Crew station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrewRole {
    Commander,
    Gunner,
    Loader,
    Driver,
}

/// Result of a projectile hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HitOutcome {
    /// Shell penetrated; `damage` is the health the target lost.
    Penetration { damage: f64 },
    /// Hull-only target shrugged the hit off.
    NoPenetration,
    /// Crewed target deflected the hit.
    Ricochet,
}

impl HitOutcome {
    /// HUD label for a non-penetrating outcome, or the rounded damage.
    pub fn label(&self) -> String {
        match self {
            HitOutcome::Penetration { damage } => format!("{}", damage.round()),
            HitOutcome::NoPenetration => "NO PEN".to_string(),
            HitOutcome::Ricochet => "RICOCHET".to_string(),
        }
    }
}

/// Top-level battle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Active,
    Paused,
    /// All objectives captured.
    Victory,
    /// Player vehicle destroyed.
    Defeat,
}

impl GamePhase {
    /// Whether the battle has ended.
    pub fn is_over(self) -> bool {
        matches!(self, GamePhase::Victory | GamePhase::Defeat)
    }
}
