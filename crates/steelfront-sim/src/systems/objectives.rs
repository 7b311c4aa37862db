//! Objective capture: the player takes flags by holding them uncontested.

use hecs::World;
use tracing::info;

use steelfront_core::components::{Hull, Identity, Kinematics, Objective, PlayerTank};
use steelfront_core::constants::*;
use steelfront_core::enums::Role;
use steelfront_core::events::SimEvent;
use steelfront_core::types::Position;

use crate::score::ScoreState;

/// Who is near a flag this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Absent,
    Holding,
    Contested,
}

/// Advance one objective's capture progress. Returns true exactly on the
/// tick the flag is captured.
pub fn update_objective(objective: &mut Objective, presence: Presence, dt: f64) -> bool {
    if objective.captured || dt <= 0.0 {
        return false;
    }
    objective.contested = presence == Presence::Contested;
    match presence {
        Presence::Holding => {
            objective.capturing = true;
            objective.progress += dt / CAPTURE_TIME_SECS;
            if objective.progress >= 1.0 {
                objective.progress = 1.0;
                objective.captured = true;
                objective.capturing = false;
                return true;
            }
        }
        Presence::Contested => {
            objective.capturing = true;
            objective.progress = (objective.progress - dt / CONTESTED_DECAY_SECS).max(0.0);
        }
        Presence::Absent => {
            objective.capturing = false;
            objective.progress = (objective.progress - dt / ABANDONED_DECAY_SECS).max(0.0);
        }
    }
    false
}

/// Mark the nearest uncaptured flag within capture radius as in progress.
pub fn begin_capture(world: &mut World, events: &mut Vec<SimEvent>) {
    let Some(player) = live_player_position(world) else {
        return;
    };
    let nearest = world
        .query_mut::<&mut Objective>()
        .into_iter()
        .filter(|(_, o)| !o.captured && o.position.distance_to(&player) < CAPTURE_RADIUS)
        .min_by(|(_, a), (_, b)| {
            a.position
                .distance_to(&player)
                .total_cmp(&b.position.distance_to(&player))
        });
    if let Some((_, objective)) = nearest {
        if !objective.capturing {
            objective.capturing = true;
            events.push(capture_state_event(objective));
        }
    }
}

fn capture_state_event(objective: &Objective) -> SimEvent {
    SimEvent::CaptureStateChanged {
        id: objective.id,
        capturing: objective.capturing,
        contested: objective.contested,
    }
}

fn live_player_position(world: &World) -> Option<Position> {
    world
        .query::<(&PlayerTank, &Kinematics, &Hull)>()
        .iter()
        .find(|(_, (_, _, hull))| !hull.is_destroyed)
        .map(|(_, (_, kin, _))| kin.position)
}

/// Run objective capture for all flags.
pub fn run(world: &mut World, events: &mut Vec<SimEvent>, score: &mut ScoreState, dt: f64) {
    let player = live_player_position(world);
    let enemies: Vec<Position> = world
        .query::<(&Identity, &Kinematics, &Hull)>()
        .iter()
        .filter(|(_, (identity, _, hull))| identity.role == Role::Enemy && !hull.is_destroyed)
        .map(|(_, (_, kin, _))| kin.position)
        .collect();

    for (_entity, objective) in world.query_mut::<&mut Objective>() {
        let present = player.is_some_and(|p| p.distance_to(&objective.position) < CAPTURE_RADIUS);
        let contested = enemies
            .iter()
            .any(|e| e.distance_to(&objective.position) < CONTEST_RADIUS);
        let presence = match (present, contested) {
            (false, _) => Presence::Absent,
            (true, false) => Presence::Holding,
            (true, true) => Presence::Contested,
        };

        let before = (objective.capturing, objective.contested);
        let captured = update_objective(objective, presence, dt);
        if !captured && before != (objective.capturing, objective.contested) {
            events.push(capture_state_event(objective));
        }

        if captured {
            score.objectives_captured += 1;
            score.silver += FLAG_SILVER;
            score.research += FLAG_RESEARCH;
            events.push(SimEvent::ObjectiveCaptured { id: objective.id });
            info!(id = objective.id, "objective captured");
        }
    }
}
