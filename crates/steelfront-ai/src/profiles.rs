//! Behavior-specific profiles.
//!
//! Consolidates per-behavior parameters for the unit FSM.

use steelfront_core::enums::Behavior;

/// How a unit moves while it has a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovementPolicy {
    /// Close straight in, holding once inside `hold_range`.
    Close { hold_range: f64 },
    /// Move along the target bearing rotated by `offset`.
    Flank { offset: f64 },
    /// Back away while the target is inside `standoff`.
    Retreat { standoff: f64 },
    /// Hold a formation slot on the protected unit.
    Formation,
}

/// Behavioral profile for a unit behavior.
pub struct BehaviorProfile {
    /// Range at which a hostile is engaged (m).
    pub detection_range: f64,
    /// Turret traverse rate (rad/s).
    pub turret_slew_rate: f64,
    /// Aim error below which the unit may fire (rad).
    pub aim_tolerance: f64,
    /// Targets closer than this are never fired on (m).
    pub min_fire_range: f64,
    /// Upper bound of the random extra reload, U[0, jitter).
    pub reload_jitter: f64,
    /// Engaged movement speed (m/s).
    pub engage_speed: f64,
    pub movement: MovementPolicy,
    /// Shot cooldown only runs while aimed and beyond `min_fire_range`.
    pub cooldown_requires_aim: bool,
}

/// Get the behavioral profile for a given behavior.
pub fn get_profile(behavior: Behavior) -> BehaviorProfile {
    use steelfront_core::constants::*;

    let enemy = |engage_step: f64, movement: MovementPolicy| BehaviorProfile {
        detection_range: ENEMY_DETECTION_RANGE,
        turret_slew_rate: ENEMY_TURRET_SLEW_RATE,
        aim_tolerance: ENEMY_AIM_TOLERANCE,
        min_fire_range: ENEMY_MIN_FIRE_RANGE,
        reload_jitter: ENEMY_RELOAD_JITTER,
        engage_speed: engage_step * REFERENCE_FRAME_RATE,
        movement,
        cooldown_requires_aim: true,
    };

    match behavior {
        Behavior::Aggressive => enemy(
            AGGRESSIVE_STEP,
            MovementPolicy::Close {
                hold_range: AGGRESSIVE_HOLD_RANGE,
            },
        ),
        Behavior::Flanker => enemy(
            FLANKER_STEP,
            MovementPolicy::Flank {
                offset: FLANK_OFFSET,
            },
        ),
        Behavior::Sniper => enemy(
            SNIPER_STEP,
            MovementPolicy::Retreat {
                standoff: SNIPER_STANDOFF,
            },
        ),
        Behavior::Defensive => enemy(
            DEFENSIVE_STEP,
            MovementPolicy::Retreat {
                standoff: DEFENSIVE_STANDOFF,
            },
        ),
        Behavior::Support => BehaviorProfile {
            detection_range: ALLY_ENGAGE_RANGE,
            turret_slew_rate: ALLY_TURRET_SLEW_RATE,
            aim_tolerance: ALLY_AIM_TOLERANCE,
            min_fire_range: 0.0,
            reload_jitter: ALLY_RELOAD_JITTER,
            engage_speed: FOLLOW_STEP * REFERENCE_FRAME_RATE,
            movement: MovementPolicy::Formation,
            cooldown_requires_aim: false,
        },
    }
}

/// Patrol speed shared by every behavior that patrols (m/s).
pub fn patrol_speed() -> f64 {
    use steelfront_core::constants::{PATROL_STEP, REFERENCE_FRAME_RATE};
    PATROL_STEP * REFERENCE_FRAME_RATE
}
