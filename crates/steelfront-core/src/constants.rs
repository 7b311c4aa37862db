//! Simulation constants and tuning parameters.
//!
//! Values mirror the reference battle, including its odd-looking balance
//! constants; they define observable behavior.

use std::f64::consts::PI;

/// Degrees → radians.
pub const DEG: f64 = PI / 180.0;

/// km/h → m/s.
pub const KMH_TO_MS: f64 = 1000.0 / 3600.0;

/// Mechanical horsepower in watts.
pub const HP_TO_WATTS: f64 = 735.5;

/// Fixed rate the headless driver ticks at (Hz).
pub const TICK_RATE: u32 = 60;

/// Frame rate the per-frame AI step sizes were tuned at. AI movement steps
/// are multiplied by this to obtain per-second rates.
pub const REFERENCE_FRAME_RATE: f64 = 60.0;

// --- World ---

/// Default battlefield width and height (meters).
pub const DEFAULT_MAP_SIZE: f64 = 4000.0;

/// Keep-out margin along the map edge for vehicles.
pub const MAP_EDGE_MARGIN: f64 = 50.0;

/// Clearance added to an obstacle's size when testing vehicle positions.
pub const OBSTACLE_CLEARANCE: f64 = 60.0;

/// Distance from the bottom edge at which shells strike the ground.
pub const GROUND_BAND: f64 = 100.0;

// --- Movement integrator ---

/// Extra gain applied to engine-derived acceleration.
pub const ACCELERATION_GAIN: f64 = 1.5;

/// Speed differences below this (km/h) are treated as settled.
pub const SPEED_DEADBAND: f64 = 0.1;

/// Speed (m/s) at which steering authority falls to zero.
pub const TURN_SPEED_FALLOFF: f64 = 25.0;

/// Speed multiplier applied when the terrain rejects a move.
pub const COLLISION_DAMPING: f64 = 0.5;

/// Per-tick speed decay with an empty fuel tank.
pub const OUT_OF_FUEL_DECAY: f64 = 0.9;

/// Fuel burn growth at full speed (consumption × (1 + load × this)).
pub const FUEL_LOAD_FACTOR: f64 = 2.5;

/// Angular differences below this are not slewed.
pub const SLEW_DEADBAND: f64 = 0.01;

// --- Player gun ---

/// Maximum range for player shells (meters).
pub const PLAYER_SHELL_MAX_RANGE: f64 = 3000.0;

/// Recoil pushback per shot (meters).
pub const RECOIL_DISTANCE: f64 = 0.8;

/// Muzzle flash offset ahead of the hull centre (meters).
pub const MUZZLE_OFFSET: f64 = 60.0;

// --- Ballistics ---

/// Gravity constant used by the drop approximation (m/s²).
pub const GRAVITY: f64 = 9.81;

// --- Collision & damage ---

/// Proximity radius for a projectile to hit a vehicle.
pub const HIT_RADIUS: f64 = 60.0;

/// Angular difference below which the front armor zone is hit.
pub const FRONT_ARC: f64 = PI / 4.0;

/// Angular difference above which the rear armor zone is hit.
pub const REAR_ARC: f64 = 3.0 * PI / 4.0;

/// Penetration probability multiplier against hull-only targets.
pub const HULL_ONLY_PENETRATION_GAIN: f64 = 1.2;

/// Offset added to the penetration ratio for crewed-target damage.
pub const CREWED_DAMAGE_OFFSET: f64 = 0.3;

/// Divisor turning crewed-target damage into health loss.
pub const CREWED_DAMAGE_DIVISOR: f64 = 10.0;

/// Chance that a penetrating hit also damages a module.
pub const MODULE_HIT_CHANCE: f64 = 0.2;

/// Fraction of (undivided) damage a hit module loses.
pub const MODULE_DAMAGE_FRACTION: f64 = 0.3;

/// Chance that a penetrating hit injures a crew member.
pub const CREW_HIT_CHANCE: f64 = 0.1;

/// Minimum crew injury.
pub const CREW_INJURY_MIN: f64 = 20.0;

/// Random crew injury added on top of the minimum, U[0, this).
pub const CREW_INJURY_SPREAD: f64 = 30.0;

/// Ammo rack health fraction under which detonation becomes possible.
pub const AMMO_DETONATION_THRESHOLD: f64 = 0.25;

/// Chance an exposed, damaged ammo rack detonates on a penetrating hit.
pub const AMMO_DETONATION_CHANCE: f64 = 0.5;

/// Armor ratings are floored at this value before dividing.
pub const MIN_ARMOR: f64 = 1.0;

// --- Lifecycle ---

/// Delay between an enemy's destruction and its removal (seconds).
pub const ENEMY_REMOVAL_DELAY: f64 = 1.0;

/// Delay between an ally's destruction and its removal (seconds).
pub const ALLY_REMOVAL_DELAY: f64 = 0.0;

/// Explosion size for a projectile impact.
pub const IMPACT_EXPLOSION_SIZE: f64 = 1.2;

/// Explosion size for a shell striking the ground.
pub const GROUND_EXPLOSION_SIZE: f64 = 0.6;

/// Explosion size for a destroyed enemy.
pub const ENEMY_EXPLOSION_SIZE: f64 = 2.5;

/// Explosion size for a destroyed ally.
pub const ALLY_EXPLOSION_SIZE: f64 = 2.0;

/// Explosion size for the destroyed player.
pub const PLAYER_EXPLOSION_SIZE: f64 = 6.0;

// --- Rewards ---

pub const KILL_SILVER: u64 = 3000;
pub const KILL_RESEARCH: u64 = 750;
pub const FLAG_SILVER: u64 = 5000;
pub const FLAG_RESEARCH: u64 = 1000;
pub const STARTING_SILVER: u64 = 125_000;
pub const STARTING_RESEARCH: u64 = 8500;

// --- Objectives ---

/// Radius within which the player captures a flag.
pub const CAPTURE_RADIUS: f64 = 100.0;

/// Radius within which a live enemy contests a flag.
pub const CONTEST_RADIUS: f64 = 200.0;

/// Seconds of uncontested presence to capture a flag.
pub const CAPTURE_TIME_SECS: f64 = 10.0;

/// Seconds for a contested flag's progress to fall from 1 to 0.
pub const CONTESTED_DECAY_SECS: f64 = 5.0;

/// Seconds for an abandoned flag's progress to fall from 1 to 0.
pub const ABANDONED_DECAY_SECS: f64 = 2.0;

// --- Awareness ---

/// Range at which the player spots enemies.
pub const PROXIMITY_RANGE: f64 = 800.0;

/// Range at which an enemy counts as close contact.
pub const CLOSE_CONTACT_RANGE: f64 = 400.0;

// --- Enemy AI ---

pub const ENEMY_DETECTION_RANGE: f64 = 1000.0;
pub const ENEMY_TURRET_SLEW_RATE: f64 = 2.5 * DEG;
pub const ENEMY_AIM_TOLERANCE: f64 = 0.08;
pub const ENEMY_MIN_FIRE_RANGE: f64 = 150.0;
pub const ENEMY_RELOAD_JITTER: f64 = 2.0;
pub const ENEMY_SHELL_DAMAGE: f64 = 350.0;
pub const ENEMY_SHELL_VELOCITY: f64 = 1500.0;
pub const ENEMY_SHELL_MAX_RANGE: f64 = 2500.0;
pub const ENEMY_SHELLS: u32 = 40;

/// Per-frame movement steps at the reference frame rate.
pub const AGGRESSIVE_STEP: f64 = 2.5;
pub const FLANKER_STEP: f64 = 2.0;
pub const SNIPER_STEP: f64 = 1.5;
pub const DEFENSIVE_STEP: f64 = 1.2;
pub const PATROL_STEP: f64 = 1.2;

/// Aggressive units stop closing inside this distance.
pub const AGGRESSIVE_HOLD_RANGE: f64 = 150.0;

/// Flankers offset their approach by this angle.
pub const FLANK_OFFSET: f64 = PI / 2.0;

/// Snipers retreat when the target is closer than this.
pub const SNIPER_STANDOFF: f64 = 300.0;

/// Defensive units retreat when the target is closer than this.
pub const DEFENSIVE_STANDOFF: f64 = 250.0;

// --- Patrol ---

/// Full width of the square a patrol waypoint is rolled in.
pub const PATROL_SPAN: f64 = 300.0;

/// Waypoint re-roll probability per second.
pub const PATROL_REROLL_RATE: f64 = 0.01;

/// Distance at which a waypoint counts as reached.
pub const WAYPOINT_REACHED: f64 = 15.0;

/// How far a fresh waypoint's roll centre is pulled toward the last known target.
pub const LAST_KNOWN_BIAS: f64 = 150.0;

// --- Ally AI ---

pub const ALLY_ENGAGE_RANGE: f64 = 800.0;
pub const ALLY_TURRET_SLEW_RATE: f64 = 2.0 * DEG;
pub const ALLY_AIM_TOLERANCE: f64 = 0.1;
pub const ALLY_RELOAD_SECS: f64 = 7.0;
pub const ALLY_RELOAD_JITTER: f64 = 3.0;
pub const ALLY_SHELL_DAMAGE: f64 = 400.0;
pub const ALLY_SHELL_VELOCITY: f64 = 1600.0;
pub const ALLY_SHELL_MAX_RANGE: f64 = 3000.0;
pub const ALLY_SHELLS: u32 = 42;
pub const FOLLOW_STEP: f64 = 2.0;

/// Allies stop closing on their formation slot inside this distance.
pub const FORMATION_TOLERANCE: f64 = 50.0;

/// Lateral spacing between formation slots.
pub const FORMATION_SPACING: f64 = 150.0;

/// Distance the formation trails the protected unit.
pub const FORMATION_DEPTH: f64 = 200.0;
