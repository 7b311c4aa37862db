//! Lifecycle: destruction latching and deferred wreck removal.

use hecs::{Entity, World};
use tracing::info;

use steelfront_core::components::{Hull, Identity};
use steelfront_core::constants::*;
use steelfront_core::enums::Role;
use steelfront_core::events::SimEvent;
use steelfront_core::types::Position;

use crate::score::ScoreState;

/// Latch a vehicle as destroyed and emit its destruction events.
///
/// Idempotent: a hull already destroyed is left alone. The player wreck is
/// never scheduled for removal.
pub fn on_destroyed(
    hull: &mut Hull,
    identity: &Identity,
    position: &Position,
    events: &mut Vec<SimEvent>,
    score: &mut ScoreState,
) {
    if hull.is_destroyed {
        return;
    }
    hull.health = 0.0;
    hull.is_destroyed = true;

    let (size, removal) = match identity.role {
        Role::Enemy => (ENEMY_EXPLOSION_SIZE, Some(ENEMY_REMOVAL_DELAY)),
        Role::Ally => (ALLY_EXPLOSION_SIZE, Some(ALLY_REMOVAL_DELAY)),
        Role::Player => (PLAYER_EXPLOSION_SIZE, None),
    };
    hull.removal_in_secs = removal;

    events.push(SimEvent::Explosion {
        position: *position,
        size,
    });
    events.push(SimEvent::EntityDestroyed {
        name: identity.name.clone(),
        role: identity.role,
        position: *position,
    });

    match identity.role {
        Role::Enemy => {
            score.enemies_destroyed += 1;
            score.silver += KILL_SILVER;
            score.research += KILL_RESEARCH;
        }
        Role::Ally => score.allies_lost += 1,
        Role::Player => {
            score.player_destroyed = true;
            events.push(SimEvent::GameOver);
        }
    }

    info!(name = %identity.name, role = ?identity.role, "vehicle destroyed");
}

/// Count down wreck removal timers and despawn wrecks whose time is up.
/// Despawning an entity that is already gone is a no-op.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>, dt: f64) {
    despawn_buffer.clear();

    for (entity, hull) in world.query_mut::<&mut Hull>() {
        if !hull.is_destroyed {
            continue;
        }
        if let Some(remaining) = hull.removal_in_secs.as_mut() {
            *remaining -= dt.max(0.0);
            if *remaining <= 0.0 {
                despawn_buffer.push(entity);
            }
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
