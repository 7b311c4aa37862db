//! Builds the per-tick BattleSnapshot. Read-only over the world.

use hecs::World;

use steelfront_core::components::*;
use steelfront_core::enums::*;
use steelfront_core::events::SimEvent;
use steelfront_core::modifiers::Modifiers;
use steelfront_core::state::*;
use steelfront_core::types::SimTime;

use crate::score::ScoreState;
use crate::systems::awareness::Proximity;

/// Build a complete BattleSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    events: Vec<SimEvent>,
    score: &ScoreState,
    modifiers: &Modifiers,
    proximity: Proximity,
) -> BattleSnapshot {
    BattleSnapshot {
        time: *time,
        phase,
        vehicles: build_vehicles(world, modifiers),
        projectiles: build_projectiles(world),
        objectives: build_objectives(world),
        events,
        score: ScoreView {
            enemies_destroyed: score.enemies_destroyed,
            enemies_total: score.enemies_total,
            allies_alive: score.allies_alive(),
            objectives_captured: score.objectives_captured,
            objectives_total: score.objectives_total,
            silver: score.silver,
            research: score.research,
            elapsed_secs: time.elapsed_secs,
        },
        proximity_count: proximity.count,
        close_contact: proximity.close_contact,
    }
}

fn build_vehicles(world: &World, modifiers: &Modifiers) -> Vec<VehicleView> {
    let mut vehicles: Vec<VehicleView> = world
        .query::<(
            &Identity,
            &Kinematics,
            &Hull,
            Option<&AiBrain>,
            Option<&Gun>,
            Option<&Crew>,
            Option<&Fuel>,
        )>()
        .iter()
        .map(|(entity, (identity, kin, hull, brain, gun, crew, fuel))| VehicleView {
            id: entity.to_bits().get(),
            name: identity.name.clone(),
            role: identity.role,
            position: kin.position,
            heading: kin.heading,
            turret_angle: kin.turret_angle,
            gun_elevation: kin.gun_elevation,
            speed: kin.speed,
            health: hull.health,
            is_destroyed: hull.is_destroyed,
            ai_state: brain.map(|b| b.state),
            spotted: brain.is_some_and(|b| b.spotted),
            gun: gun.map(|g| build_gun(g, modifiers.reload)),
            crew_alive: crew.map(Crew::alive_count),
            fuel: fuel.map(|f| {
                if f.capacity > 0.0 {
                    f.current / f.capacity
                } else {
                    0.0
                }
            }),
        })
        .collect();

    // Sort for deterministic output
    vehicles.sort_by_key(|v| v.id);
    vehicles
}

fn build_gun(gun: &Gun, reload_modifier: f64) -> GunView {
    let duration = gun.reload_duration(reload_modifier);
    let reload_fraction = if gun.is_reloading && duration > 0.0 {
        (gun.reload_progress / duration).min(1.0)
    } else {
        0.0
    };
    GunView {
        selected_shell: gun.selected_shell,
        shell_kind: gun.selected().map(|s| s.kind),
        ammo: gun.shells.iter().map(|s| s.count).collect(),
        is_reloading: gun.is_reloading,
        reload_fraction,
    }
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<&Projectile>()
        .iter()
        .map(|(_, p)| ProjectileView {
            position: p.position,
            angle: p.angle,
            owner: p.owner,
            shell: p.shell,
        })
        .collect()
}

fn build_objectives(world: &World) -> Vec<ObjectiveView> {
    let mut objectives: Vec<ObjectiveView> = world
        .query::<&Objective>()
        .iter()
        .map(|(_, o)| ObjectiveView {
            id: o.id,
            position: o.position,
            captured: o.captured,
            capturing: o.capturing,
            contested: o.contested,
            progress: o.progress,
        })
        .collect();
    objectives.sort_by_key(|o| o.id);
    objectives
}
