//! ECS components for hecs entities.
//!
//! Components are plain data with a few read-only helpers.
//! Game logic lives in systems, not components.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{KMH_TO_MS, MIN_ARMOR};
use crate::enums::*;
use crate::geometry::heading_vector;
use crate::types::Position;

/// Who the vehicle is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub nation: String,
    pub role: Role,
}

/// Marks the externally-controlled vehicle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerTank;

/// Position, orientation and speed of a vehicle.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Kinematics {
    pub position: Position,
    /// Hull heading (radians).
    pub heading: f64,
    /// Turret facing in world space (radians, (−π, π]).
    pub turret_angle: f64,
    /// Gun elevation (radians).
    pub gun_elevation: f64,
    /// Signed scalar speed along the heading (km/h).
    pub speed: f64,
}

impl Kinematics {
    /// World-space velocity in m/s.
    pub fn velocity(&self) -> DVec2 {
        heading_vector(self.heading) * self.speed * KMH_TO_MS
    }
}

/// Drivetrain and turret limits for a driven vehicle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Mobility {
    /// Mass (kg).
    pub mass: f64,
    /// Engine power (hp).
    pub engine_power: f64,
    /// Max forward speed (km/h).
    pub max_speed: f64,
    /// Max reverse speed (km/h, positive).
    pub reverse_speed: f64,
    /// Hull turn rate (rad/s).
    pub turn_rate: f64,
    /// Turret traverse rate (rad/s).
    pub turret_slew_rate: f64,
    /// Gun elevation rate (rad/s).
    pub elevation_slew_rate: f64,
    /// Gun depression limit (radians, negative).
    pub elevation_min: f64,
    /// Gun elevation limit (radians).
    pub elevation_max: f64,
}

impl Mobility {
    /// Engine-derived acceleration in km/h per second.
    pub fn acceleration(&self) -> f64 {
        if self.mass <= 0.0 {
            return 0.0;
        }
        self.engine_power * crate::constants::HP_TO_WATTS / self.mass
    }
}

/// Four directional protection ratings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArmorRating {
    pub front: f64,
    pub side: f64,
    pub rear: f64,
    pub top: f64,
}

impl ArmorRating {
    /// Rating for a zone, floored so it can be divided by.
    pub fn for_zone(&self, zone: ArmorZone) -> f64 {
        let raw = match zone {
            ArmorZone::Front => self.front,
            ArmorZone::Side => self.side,
            ArmorZone::Rear => self.rear,
            ArmorZone::Top => self.top,
        };
        raw.max(MIN_ARMOR)
    }
}

/// Hull and optional turret armor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Armor {
    pub hull: ArmorRating,
    pub turret: Option<ArmorRating>,
}

/// A magazine slot for one ammunition type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShellStore {
    pub kind: ShellKind,
    pub damage: f64,
    pub penetration: f64,
    /// Muzzle velocity (m/s).
    pub velocity: f64,
    pub count: u32,
}

/// Player main gun with selectable ammunition and a reload cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gun {
    /// Caliber (mm).
    pub caliber: f64,
    /// Base reload duration (seconds), before upgrades.
    pub reload_time: f64,
    /// Seconds into the current reload.
    pub reload_progress: f64,
    pub is_reloading: bool,
    pub shells: Vec<ShellStore>,
    pub selected_shell: usize,
}

impl Gun {
    pub fn selected(&self) -> Option<&ShellStore> {
        self.shells.get(self.selected_shell)
    }

    /// Whether the gun can fire right now.
    pub fn is_ready(&self) -> bool {
        !self.is_reloading && self.selected().is_some_and(|s| s.count > 0)
    }

    /// Effective reload cycle under a reload multiplier.
    pub fn reload_duration(&self, reload_modifier: f64) -> f64 {
        if reload_modifier > 0.0 {
            self.reload_time / reload_modifier
        } else {
            self.reload_time
        }
    }
}

/// One crew member.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CrewMember {
    pub role: CrewRole,
    /// Health in [0, 100].
    pub health: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Crew {
    pub members: Vec<CrewMember>,
}

impl Crew {
    pub fn alive_count(&self) -> usize {
        self.members.iter().filter(|m| m.health > 0.0).count()
    }
}

/// A damageable subsystem.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Module {
    pub kind: ModuleKind,
    pub health: f64,
    pub max_health: f64,
    /// Blowout panels / self-sealing: the module cannot detonate.
    pub blowout_protected: bool,
}

impl Module {
    pub fn health_fraction(&self) -> f64 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        self.health / self.max_health
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Modules {
    pub modules: Vec<Module>,
}

impl Modules {
    pub fn get(&self, kind: ModuleKind) -> Option<&Module> {
        self.modules.iter().find(|m| m.kind == kind)
    }

    pub fn get_mut(&mut self, kind: ModuleKind) -> Option<&mut Module> {
        self.modules.iter_mut().find(|m| m.kind == kind)
    }
}

/// Fuel tank (liters, liters per minute at idle).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Fuel {
    pub current: f64,
    pub capacity: f64,
    pub consumption: f64,
}

impl Fuel {
    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }
}

/// Structural health and destruction latch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hull {
    /// Health in [0, 100].
    pub health: f64,
    /// Latched once health reaches zero; never cleared.
    pub is_destroyed: bool,
    /// Seconds until the wreck is removed (set when destroyed).
    pub removal_in_secs: Option<f64>,
}

impl Default for Hull {
    fn default() -> Self {
        Self {
            health: 100.0,
            is_destroyed: false,
            removal_in_secs: None,
        }
    }
}

/// Latest driver input for the player vehicle.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DriverIntent {
    /// −1 (full reverse) .. 1 (full forward).
    pub throttle: f64,
    /// −1 (left) .. 1 (right).
    pub steering: f64,
    /// World point the turret tracks; `None` holds the current facing.
    pub aim_point: Option<Position>,
    /// Desired gun elevation (radians).
    pub elevation: f64,
    /// Fire latched by a command, consumed by the gun system.
    pub fire: bool,
}

/// AI decision state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiBrain {
    pub behavior: Behavior,
    pub state: AiState,
    /// Current patrol waypoint.
    pub waypoint: Option<Position>,
    /// Where the last target was seen.
    pub last_known_target: Option<Position>,
    /// Bearing the turret is still slewing toward after losing its target.
    pub turret_goal: Option<f64>,
    /// Seconds accumulated toward the next shot.
    pub shot_timer: f64,
    /// Cooldown to exceed before the next shot (re-rolled after each shot).
    pub next_shot_interval: f64,
    /// Formation slot index (support units).
    pub formation_slot: usize,
    /// Seen by the player within proximity range.
    pub spotted: bool,
}

/// Fixed armament of an AI unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AiGunnery {
    pub caliber: f64,
    pub penetration: f64,
    pub damage: f64,
    /// Shell velocity (m/s).
    pub velocity: f64,
    pub max_range: f64,
    /// Base reload (seconds) before jitter.
    pub reload_secs: f64,
    pub shells: u32,
}

/// A shell in flight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub position: Position,
    /// Travel direction (radians).
    pub angle: f64,
    /// Elevation angle; only affects horizontal speed and drop.
    pub elevation: f64,
    /// Scalar velocity (m/s).
    pub velocity: f64,
    pub caliber: f64,
    pub penetration: f64,
    pub damage: f64,
    pub owner: Role,
    pub shell: ShellKind,
    pub distance_traveled: f64,
    pub max_distance: f64,
}

/// A capturable flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Objective {
    pub id: u32,
    pub position: Position,
    pub captured: bool,
    pub capturing: bool,
    /// An enemy is inside the contest radius while the player holds the flag.
    pub contested: bool,
    /// Capture progress in [0, 1].
    pub progress: f64,
}

impl Objective {
    pub fn new(id: u32, position: Position) -> Self {
        Self {
            id,
            position,
            captured: false,
            capturing: false,
            contested: false,
            progress: 0.0,
        }
    }
}
