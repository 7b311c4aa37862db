//! Player main gun: reload cycle and fire execution.

use std::f64::consts::PI;

use hecs::World;
use tracing::debug;

use steelfront_core::components::*;
use steelfront_core::constants::*;
use steelfront_core::enums::Role;
use steelfront_core::events::SimEvent;
use steelfront_core::modifiers::Modifiers;
use steelfront_core::types::Position;
use steelfront_terrain::TerrainQuery;

/// Advance the reload cycle, then execute a latched fire request.
pub fn run(
    world: &mut World,
    terrain: &impl TerrainQuery,
    modifiers: &Modifiers,
    events: &mut Vec<SimEvent>,
    dt: f64,
) {
    let mut shots: Vec<Projectile> = Vec::new();

    for (_entity, (_player, kin, gun, intent, hull)) in world.query_mut::<(
        &PlayerTank,
        &mut Kinematics,
        &mut Gun,
        &mut DriverIntent,
        &Hull,
    )>() {
        if hull.is_destroyed {
            intent.fire = false;
            continue;
        }

        advance_reload(gun, modifiers.reload, dt);

        if !std::mem::take(&mut intent.fire) {
            continue;
        }
        if let Some(projectile) = fire(kin, gun, terrain, modifiers, events) {
            shots.push(projectile);
        }
    }

    for projectile in shots {
        world.spawn((projectile,));
    }
}

/// Accumulate reload progress; the reload modifier shortens the cycle.
pub fn advance_reload(gun: &mut Gun, reload_modifier: f64, dt: f64) {
    if !gun.is_reloading || dt <= 0.0 {
        return;
    }
    gun.reload_progress += dt;
    if gun.reload_progress >= gun.reload_duration(reload_modifier) {
        gun.is_reloading = false;
        gun.reload_progress = 0.0;
    }
}

/// Begin a reload unless one is already running.
pub fn start_reload(gun: &mut Gun) {
    if !gun.is_reloading {
        gun.is_reloading = true;
        gun.reload_progress = 0.0;
    }
}

/// Fire the selected round. Returns the projectile to spawn, or `None` when
/// the gun is reloading or the slot is empty.
pub fn fire(
    kin: &mut Kinematics,
    gun: &mut Gun,
    terrain: &impl TerrainQuery,
    modifiers: &Modifiers,
    events: &mut Vec<SimEvent>,
) -> Option<Projectile> {
    if !gun.is_ready() {
        return None;
    }
    let caliber = gun.caliber;
    let shell = gun.shells.get_mut(gun.selected_shell)?;
    shell.count -= 1;

    let projectile = Projectile {
        position: kin.position,
        angle: kin.turret_angle,
        elevation: kin.gun_elevation,
        velocity: shell.velocity,
        caliber,
        penetration: shell.penetration,
        damage: shell.damage * modifiers.damage,
        owner: Role::Player,
        shell: shell.kind,
        distance_traveled: 0.0,
        max_distance: PLAYER_SHELL_MAX_RANGE,
    };
    debug!(shell = ?shell.kind, remaining = shell.count, "player fired");

    gun.is_reloading = true;
    gun.reload_progress = 0.0;

    let recoiled = kin.position.offset(kin.turret_angle + PI, RECOIL_DISTANCE);
    if terrain.can_move_to(&recoiled) {
        kin.position = recoiled;
    }

    events.push(muzzle_flash(&projectile.position, projectile.angle, Role::Player));
    Some(projectile)
}

/// Muzzle flash event ahead of the firing vehicle along the gun line.
pub fn muzzle_flash(origin: &Position, angle: f64, owner: Role) -> SimEvent {
    SimEvent::MuzzleFlash {
        position: origin.offset(angle, MUZZLE_OFFSET),
        angle,
        owner,
    }
}
