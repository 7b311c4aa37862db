//! Battle snapshot: the complete visible state published after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{Position, SimTime};

/// Complete battle state published after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BattleSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub vehicles: Vec<VehicleView>,
    pub projectiles: Vec<ProjectileView>,
    pub objectives: Vec<ObjectiveView>,
    pub events: Vec<SimEvent>,
    pub score: ScoreView,
    /// Live enemies within proximity range of the player.
    pub proximity_count: usize,
    /// A live enemy is within close-contact range of the player.
    pub close_contact: bool,
}

impl BattleSnapshot {
    pub fn player(&self) -> Option<&VehicleView> {
        self.vehicles.iter().find(|v| v.role == Role::Player)
    }
}

/// A vehicle on the battlefield.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleView {
    /// ECS entity bits; stable for the vehicle's lifetime.
    pub id: u64,
    pub name: String,
    pub role: Role,
    pub position: Position,
    /// Hull heading (radians).
    pub heading: f64,
    /// Turret facing (radians).
    pub turret_angle: f64,
    pub gun_elevation: f64,
    /// Speed (km/h, signed).
    pub speed: f64,
    /// Health in [0, 100].
    pub health: f64,
    pub is_destroyed: bool,
    pub ai_state: Option<AiState>,
    pub spotted: bool,
    /// Player-only gun and crew state.
    pub gun: Option<GunView>,
    pub crew_alive: Option<usize>,
    /// Fuel fraction in [0, 1] for fueled vehicles.
    pub fuel: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GunView {
    pub selected_shell: usize,
    pub shell_kind: Option<ShellKind>,
    /// Rounds remaining per ammunition slot.
    pub ammo: Vec<u32>,
    pub is_reloading: bool,
    /// Reload completion in [0, 1].
    pub reload_fraction: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Position,
    pub angle: f64,
    pub owner: Role,
    pub shell: ShellKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveView {
    pub id: u32,
    pub position: Position,
    pub captured: bool,
    pub capturing: bool,
    pub contested: bool,
    pub progress: f64,
}

/// Running score for the battle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub enemies_destroyed: u32,
    pub enemies_total: u32,
    pub allies_alive: u32,
    pub objectives_captured: u32,
    pub objectives_total: u32,
    pub silver: u64,
    pub research: u64,
    pub elapsed_secs: f64,
}
