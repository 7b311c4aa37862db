//! Unit AI system: runs the FSM for every AI vehicle each tick.
//!
//! Calls the unit FSM from steelfront-ai, then applies turret, movement and
//! fire decisions to the ECS components.

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;
use tracing::debug;

use steelfront_ai::fsm::{evaluate, AiContext, AiUpdate, FormationAnchor, TargetInfo};
use steelfront_core::components::*;
use steelfront_core::constants::KMH_TO_MS;
use steelfront_core::enums::{Role, ShellKind};
use steelfront_core::events::SimEvent;
use steelfront_core::types::Position;
use steelfront_terrain::TerrainQuery;

use crate::systems::player_gun::muzzle_flash;

/// A live vehicle as seen by the AI this tick.
struct Contact {
    entity: Entity,
    role: Role,
    position: Position,
    velocity: DVec2,
}

fn live_contacts(world: &World) -> Vec<Contact> {
    world
        .query::<(&Identity, &Kinematics, &Hull)>()
        .iter()
        .filter(|(_, (_, _, hull))| !hull.is_destroyed)
        .map(|(entity, (identity, kin, _))| Contact {
            entity,
            role: identity.role,
            position: kin.position,
            velocity: kin.velocity(),
        })
        .collect()
}

/// Nearest live vehicle hostile to `role`, excluding `own`.
fn nearest_hostile(contacts: &[Contact], own: Entity, role: Role, from: &Position) -> Option<TargetInfo> {
    contacts
        .iter()
        .filter(|c| c.entity != own && role.is_hostile_to(c.role))
        .min_by(|a, b| {
            from.distance_to(&a.position)
                .total_cmp(&from.distance_to(&b.position))
        })
        .map(|c| TargetInfo {
            position: c.position,
            velocity: c.velocity,
        })
}

/// Run the unit AI: evaluate the FSM for each live AI vehicle, apply updates.
pub fn run(
    world: &mut World,
    terrain: &impl TerrainQuery,
    rng: &mut impl Rng,
    events: &mut Vec<SimEvent>,
    dt: f64,
) {
    if dt <= 0.0 {
        return;
    }

    let contacts = live_contacts(world);
    let anchor = contacts
        .iter()
        .find(|c| c.role == Role::Player)
        .map(|c| c.position);

    // Collect updates in a buffer to avoid borrow issues with hecs
    let mut updates: Vec<(Entity, AiUpdate)> = Vec::new();
    {
        let mut query = world.query::<(&Identity, &Kinematics, &AiBrain, &AiGunnery, &Hull)>();
        for (entity, (identity, kin, brain, gunnery, hull)) in query.iter() {
            if hull.is_destroyed {
                continue;
            }

            let ctx = AiContext {
                behavior: brain.behavior,
                state: brain.state,
                position: kin.position,
                turret_angle: kin.turret_angle,
                turret_goal: brain.turret_goal,
                waypoint: brain.waypoint,
                last_known_target: brain.last_known_target,
                target: nearest_hostile(&contacts, entity, identity.role, &kin.position),
                formation: anchor.map(|position| FormationAnchor {
                    position,
                    slot: brain.formation_slot,
                }),
                shot_timer: brain.shot_timer,
                next_shot_interval: brain.next_shot_interval,
                reload_secs: gunnery.reload_secs,
                shells: gunnery.shells,
                shell_velocity: gunnery.velocity,
                dt,
            };

            updates.push((entity, evaluate(&ctx, rng)));
        }
    }

    // Apply updates
    let mut shots: Vec<Projectile> = Vec::new();
    for (entity, update) in updates {
        let Ok((identity, kin, brain, gunnery)) =
            world.query_one_mut::<(&Identity, &mut Kinematics, &mut AiBrain, &mut AiGunnery)>(entity)
        else {
            continue;
        };

        if update.state_changed {
            debug!(unit = %identity.name, state = ?update.state, "ai state change");
        }

        brain.state = update.state;
        brain.turret_goal = update.turret_goal;
        brain.waypoint = update.waypoint;
        brain.last_known_target = update.last_known_target;
        brain.shot_timer = update.shot_timer;
        brain.next_shot_interval = update.next_shot_interval;
        kin.turret_angle = update.turret_angle;

        kin.speed = 0.0;
        if let Some(desired) = update.desired_position {
            if terrain.can_move_to(&desired) {
                let travelled = kin.position.distance_to(&desired);
                kin.position = desired;
                kin.speed = travelled / dt / KMH_TO_MS;
            }
            if let Some(heading) = update.heading {
                kin.heading = heading;
            }
        }

        if let Some(shot) = update.shot {
            if gunnery.shells == 0 {
                continue;
            }
            gunnery.shells -= 1;
            debug!(unit = %identity.name, angle = shot.angle, remaining = gunnery.shells, "unit fired");
            events.push(muzzle_flash(&kin.position, shot.angle, identity.role));
            shots.push(Projectile {
                position: kin.position,
                angle: shot.angle,
                elevation: 0.0,
                velocity: gunnery.velocity,
                caliber: gunnery.caliber,
                penetration: gunnery.penetration,
                damage: gunnery.damage,
                owner: identity.role,
                shell: ShellKind::Apfsds,
                distance_traveled: 0.0,
                max_distance: gunnery.max_range,
            });
        }
    }

    for projectile in shots {
        world.spawn((projectile,));
    }
}
