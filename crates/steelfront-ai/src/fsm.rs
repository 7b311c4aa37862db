//! Unit behavior finite state machine.
//!
//! Pure functions that derive the patrol/engage state, turret slew, fire
//! decisions and desired movement for one AI vehicle from its situation.
//! No ECS dependency; operates on plain data.

use std::f64::consts::PI;

use glam::DVec2;
use rand::Rng;

use steelfront_core::constants::*;
use steelfront_core::enums::{AiState, Behavior};
use steelfront_core::geometry::{angle_difference, lead_bearing, slew_angle};
use steelfront_core::types::Position;

use crate::profiles::{get_profile, patrol_speed, BehaviorProfile, MovementPolicy};

/// The nearest live hostile, at any range.
#[derive(Debug, Clone, Copy)]
pub struct TargetInfo {
    pub position: Position,
    /// World-space velocity (m/s).
    pub velocity: DVec2,
}

/// The unit a support vehicle keeps formation on.
#[derive(Debug, Clone, Copy)]
pub struct FormationAnchor {
    pub position: Position,
    pub slot: usize,
}

/// Input to the unit FSM for a single vehicle.
pub struct AiContext {
    pub behavior: Behavior,
    pub state: AiState,
    pub position: Position,
    pub turret_angle: f64,
    pub turret_goal: Option<f64>,
    pub waypoint: Option<Position>,
    pub last_known_target: Option<Position>,
    pub target: Option<TargetInfo>,
    pub formation: Option<FormationAnchor>,
    pub shot_timer: f64,
    pub next_shot_interval: f64,
    /// Base reload before jitter (seconds).
    pub reload_secs: f64,
    pub shells: u32,
    /// Shell speed used for the lead calculation (m/s).
    pub shell_velocity: f64,
    pub dt: f64,
}

/// A fire decision: launch a shell along `angle`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotOrder {
    pub angle: f64,
}

/// Output from the unit FSM.
#[derive(Debug, Clone)]
pub struct AiUpdate {
    pub state: AiState,
    pub state_changed: bool,
    pub turret_angle: f64,
    pub turret_goal: Option<f64>,
    pub waypoint: Option<Position>,
    pub last_known_target: Option<Position>,
    pub shot_timer: f64,
    pub next_shot_interval: f64,
    /// Where the unit wants to be after this tick; the caller validates it.
    pub desired_position: Option<Position>,
    /// Hull heading matching the desired move.
    pub heading: Option<f64>,
    pub shot: Option<ShotOrder>,
}

impl AiUpdate {
    fn unchanged(ctx: &AiContext) -> Self {
        Self {
            state: ctx.state,
            state_changed: false,
            turret_angle: ctx.turret_angle,
            turret_goal: ctx.turret_goal,
            waypoint: ctx.waypoint,
            last_known_target: ctx.last_known_target,
            shot_timer: ctx.shot_timer,
            next_shot_interval: ctx.next_shot_interval,
            desired_position: None,
            heading: None,
            shot: None,
        }
    }

    fn move_along(&mut self, from: &Position, angle: f64, distance: f64) {
        if distance <= 0.0 {
            return;
        }
        self.desired_position = Some(from.offset(angle, distance));
        self.heading = Some(angle);
    }
}

/// Roll a reload interval: base reload plus U[0, jitter).
pub fn roll_shot_interval(reload_secs: f64, jitter: f64, rng: &mut impl Rng) -> f64 {
    reload_secs + rng.gen::<f64>() * jitter
}

/// Evaluate the FSM for one unit.
pub fn evaluate(ctx: &AiContext, rng: &mut impl Rng) -> AiUpdate {
    let mut update = AiUpdate::unchanged(ctx);
    if ctx.dt <= 0.0 {
        return update;
    }

    let profile = get_profile(ctx.behavior);

    // State is re-derived from range every tick.
    let engaged = ctx
        .target
        .filter(|t| ctx.position.distance_to(&t.position) < profile.detection_range);

    update.state = if engaged.is_some() {
        AiState::Engage
    } else {
        AiState::Patrol
    };
    update.state_changed = update.state != ctx.state;

    match engaged {
        Some(target) => evaluate_engage(ctx, &profile, &target, &mut update, rng),
        None => evaluate_patrol(ctx, &profile, &mut update, rng),
    }

    update
}

fn evaluate_engage(
    ctx: &AiContext,
    profile: &BehaviorProfile,
    target: &TargetInfo,
    update: &mut AiUpdate,
    rng: &mut impl Rng,
) {
    let distance = ctx.position.distance_to(&target.position);
    let bearing = ctx.position.bearing_to(&target.position);

    update.turret_angle = slew_angle(ctx.turret_angle, bearing, profile.turret_slew_rate * ctx.dt);
    update.turret_goal = Some(bearing);
    update.last_known_target = Some(target.position);

    let aimed = angle_difference(update.turret_angle, bearing).abs() < profile.aim_tolerance;
    let clear_of_min_range = distance > profile.min_fire_range;

    if !profile.cooldown_requires_aim || (aimed && clear_of_min_range) {
        update.shot_timer += ctx.dt;
    }

    if aimed
        && clear_of_min_range
        && ctx.shells > 0
        && update.shot_timer > update.next_shot_interval
    {
        update.shot = Some(ShotOrder {
            angle: lead_bearing(
                &ctx.position,
                &target.position,
                target.velocity,
                ctx.shell_velocity,
            ),
        });
        update.shot_timer = 0.0;
        update.next_shot_interval = roll_shot_interval(ctx.reload_secs, profile.reload_jitter, rng);
    }

    let step = profile.engage_speed * ctx.dt;
    match profile.movement {
        MovementPolicy::Close { hold_range } => {
            if distance > hold_range {
                update.move_along(&ctx.position, bearing, step.min(distance - hold_range));
            }
        }
        MovementPolicy::Flank { offset } => {
            update.move_along(&ctx.position, bearing + offset, step);
        }
        MovementPolicy::Retreat { standoff } => {
            if distance < standoff {
                update.move_along(&ctx.position, bearing + PI, step);
            }
        }
        MovementPolicy::Formation => follow_formation(ctx, profile, update),
    }
}

fn evaluate_patrol(
    ctx: &AiContext,
    profile: &BehaviorProfile,
    update: &mut AiUpdate,
    rng: &mut impl Rng,
) {
    // Finish a slew already in progress rather than snapping back.
    if let Some(goal) = ctx.turret_goal {
        let next = slew_angle(ctx.turret_angle, goal, profile.turret_slew_rate * ctx.dt);
        update.turret_angle = next;
        update.turret_goal = if angle_difference(next, goal).abs() <= SLEW_DEADBAND {
            None
        } else {
            Some(goal)
        };
    }

    if profile.movement == MovementPolicy::Formation && ctx.formation.is_some() {
        follow_formation(ctx, profile, update);
        return;
    }

    wander(ctx, update, rng);
}

fn wander(ctx: &AiContext, update: &mut AiUpdate, rng: &mut impl Rng) {
    let reroll = match ctx.waypoint {
        None => true,
        Some(wp) => {
            wp.distance_to(&ctx.position) <= WAYPOINT_REACHED
                || rng.gen::<f64>() < PATROL_REROLL_RATE * ctx.dt
        }
    };

    if reroll {
        let centre = match ctx.last_known_target {
            Some(seen) => ctx.position.offset(
                ctx.position.bearing_to(&seen),
                LAST_KNOWN_BIAS.min(ctx.position.distance_to(&seen)),
            ),
            None => ctx.position,
        };
        let dx = (rng.gen::<f64>() - 0.5) * PATROL_SPAN;
        let dy = (rng.gen::<f64>() - 0.5) * PATROL_SPAN;
        update.waypoint = Some(Position::new(centre.x + dx, centre.y + dy));
    }

    if let Some(wp) = update.waypoint {
        let remaining = ctx.position.distance_to(&wp);
        if remaining > WAYPOINT_REACHED {
            let step = (patrol_speed() * ctx.dt).min(remaining);
            update.move_along(&ctx.position, ctx.position.bearing_to(&wp), step);
        }
    }
}

/// Formation slot relative to the anchor: columns spaced laterally, one rank behind.
pub fn formation_slot_position(anchor: &Position, slot: usize) -> Position {
    Position::new(
        anchor.x + (slot as f64 - 1.0) * FORMATION_SPACING,
        anchor.y + FORMATION_DEPTH,
    )
}

fn follow_formation(ctx: &AiContext, profile: &BehaviorProfile, update: &mut AiUpdate) {
    let Some(anchor) = ctx.formation else {
        return;
    };
    let slot = formation_slot_position(&anchor.position, anchor.slot);
    let distance = ctx.position.distance_to(&slot);
    if distance > FORMATION_TOLERANCE {
        let step = (profile.engage_speed * ctx.dt).min(distance);
        update.move_along(&ctx.position, ctx.position.bearing_to(&slot), step);
    }
}
