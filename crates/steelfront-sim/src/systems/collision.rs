//! Collision & damage system: projectile hits against live hostile vehicles.
//!
//! Each projectile resolves against at most the first live hostile within
//! the hit radius, then is removed.

use hecs::{Entity, World};
use rand::Rng;
use tracing::debug;

use steelfront_core::components::*;
use steelfront_core::constants::{HIT_RADIUS, IMPACT_EXPLOSION_SIZE};
use steelfront_core::enums::{HitOutcome, Role};
use steelfront_core::events::SimEvent;
use steelfront_core::modifiers::Modifiers;

use crate::damage::{
    apply_secondary_effects, resolve_penetration, select_zone, DamageProfile, ShellHit,
};
use crate::score::ScoreState;
use crate::systems::cleanup::on_destroyed;

/// First live vehicle hostile to the projectile's owner within the hit radius.
fn find_target(world: &World, projectile: &Projectile) -> Option<Entity> {
    world
        .query::<(&Identity, &Kinematics, &Hull)>()
        .iter()
        .find(|(_, (identity, kin, hull))| {
            !hull.is_destroyed
                && projectile.owner.is_hostile_to(identity.role)
                && kin.position.distance_to(&projectile.position) < HIT_RADIUS
        })
        .map(|(entity, _)| entity)
}

/// Resolve projectile hits for this tick.
pub fn run(
    world: &mut World,
    rng: &mut impl Rng,
    modifiers: &Modifiers,
    events: &mut Vec<SimEvent>,
    score: &mut ScoreState,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    let projectiles: Vec<(Entity, Projectile)> = world
        .query::<&Projectile>()
        .iter()
        .map(|(entity, projectile)| (entity, *projectile))
        .collect();

    for (projectile_entity, projectile) in projectiles {
        // Targets destroyed earlier in this loop are already latched.
        let Some(target) = find_target(world, &projectile) else {
            continue;
        };
        resolve_hit(world, target, &projectile, rng, modifiers, events, score);
        despawn_buffer.push(projectile_entity);
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Apply one projectile to one target vehicle.
pub fn resolve_hit(
    world: &mut World,
    target: Entity,
    projectile: &Projectile,
    rng: &mut impl Rng,
    modifiers: &Modifiers,
    events: &mut Vec<SimEvent>,
    score: &mut ScoreState,
) {
    let Ok((identity, kin, armor, hull, modules, crew)) = world.query_one_mut::<(
        &Identity,
        &Kinematics,
        &Armor,
        &mut Hull,
        Option<&mut Modules>,
        Option<&mut Crew>,
    )>(target) else {
        return;
    };
    if hull.is_destroyed {
        return;
    }

    let role = identity.role;
    let profile = DamageProfile::for_role(role);
    let facing = match profile {
        DamageProfile::Crewed => kin.heading,
        DamageProfile::HullOnly => kin.turret_angle,
    };
    let health_modifier = if role == Role::Player {
        modifiers.health
    } else {
        1.0
    };

    let zone = select_zone(&kin.position, &projectile.position, facing);
    let result = resolve_penetration(
        rng,
        profile,
        zone,
        &armor.hull,
        &ShellHit {
            penetration: projectile.penetration,
            damage: projectile.damage,
        },
        health_modifier,
    );

    debug!(
        target = %identity.name,
        owner = ?projectile.owner,
        zone = ?zone,
        outcome = %result.outcome.label(),
        "shell hit"
    );
    events.push(SimEvent::Hit {
        position: projectile.position,
        target: role,
        outcome: result.outcome,
        label: result.outcome.label(),
    });
    events.push(SimEvent::Explosion {
        position: projectile.position,
        size: IMPACT_EXPLOSION_SIZE,
    });

    if !matches!(result.outcome, HitOutcome::Penetration { .. }) {
        return;
    }

    hull.health = (hull.health - result.health_loss).max(0.0);

    if profile == DamageProfile::Crewed {
        let effects = apply_secondary_effects(rng, zone, result.raw_damage, modules, crew);
        if let Some((module, health)) = effects.module {
            events.push(SimEvent::ModuleDamaged {
                target: role,
                module,
                health,
            });
        }
        if let Some((crew, health)) = effects.crew {
            events.push(SimEvent::CrewInjured {
                target: role,
                crew,
                health,
            });
        }
        if effects.detonation {
            hull.health = 0.0;
            events.push(SimEvent::AmmoDetonation {
                position: kin.position,
                target: role,
            });
        }
    }

    if hull.health <= 0.0 {
        on_destroyed(hull, identity, &kin.position, events, score);
    }
}
