//! Projectile advancement with the flat-earth drop approximation.
//!
//! Elevation bleeds off at gravity/velocity per second, so faster shells
//! drop less. There is no sub-stepping.

use hecs::{Entity, World};

use steelfront_core::components::Projectile;
use steelfront_core::constants::{GRAVITY, GROUND_EXPLOSION_SIZE};
use steelfront_core::events::SimEvent;
use steelfront_terrain::TerrainQuery;

/// Advance one projectile by `dt`.
pub fn advance(projectile: &mut Projectile, dt: f64) {
    if dt <= 0.0 {
        return;
    }
    let speed = projectile.velocity.max(0.0);
    let horizontal = speed * projectile.elevation.cos() * dt;
    projectile.position = projectile.position.offset(projectile.angle, horizontal);
    if speed > 0.0 {
        projectile.elevation -= GRAVITY / speed * dt;
    }
    projectile.distance_traveled += speed * dt;
}

/// Whether the projectile has flown past its maximum range.
pub fn is_expired(projectile: &Projectile) -> bool {
    projectile.distance_traveled > projectile.max_distance
}

/// Advance all projectiles; despawn those past range or into the ground.
pub fn run(
    world: &mut World,
    terrain: &impl TerrainQuery,
    events: &mut Vec<SimEvent>,
    despawn_buffer: &mut Vec<Entity>,
    dt: f64,
) {
    despawn_buffer.clear();

    for (entity, projectile) in world.query_mut::<&mut Projectile>() {
        advance(projectile, dt);

        if is_expired(projectile) {
            despawn_buffer.push(entity);
            continue;
        }
        if terrain.is_ground_impact(&projectile.position) {
            events.push(SimEvent::Explosion {
                position: projectile.position,
                size: GROUND_EXPLOSION_SIZE,
            });
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
