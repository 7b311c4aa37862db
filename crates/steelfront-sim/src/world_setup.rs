//! Entity spawn factories for setting up the battle world.
//!
//! Creates the player tank, allied and enemy units, and objective flags
//! with appropriate component bundles.

use std::f64::consts::PI;

use hecs::World;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, warn};

use steelfront_ai::fsm::roll_shot_interval;
use steelfront_ai::profiles::get_profile;
use steelfront_core::catalog::*;
use steelfront_core::components::*;
use steelfront_core::enums::*;
use steelfront_core::error::{Result, SteelfrontError};
use steelfront_core::types::Position;
use steelfront_terrain::TerrainMap;

use crate::scenario::{Scenario, UnitPlacement};
use crate::score::ScoreState;

/// Populate the world from a scenario. Returns the score state with the
/// spawned totals filled in.
pub fn setup_battle(world: &mut World, scenario: &Scenario, rng: &mut impl Rng) -> Result<ScoreState> {
    let mut score = ScoreState::default();

    spawn_player(world, &scenario.player, scenario.player_start, scenario.player_heading);

    for (slot, placement) in scenario.allies.iter().enumerate() {
        if !on_map(&scenario.map, placement, Role::Ally) {
            continue;
        }
        let unit = pick_unit(placement, &ALLY_TYPES, Role::Ally, rng)?;
        spawn_ally(world, unit, placement, slot, rng);
        score.allies_total += 1;
    }

    for placement in &scenario.enemies {
        if !on_map(&scenario.map, placement, Role::Enemy) {
            continue;
        }
        let unit = pick_unit(placement, &ENEMY_TYPES, Role::Enemy, rng)?;
        spawn_enemy(world, unit, placement, rng);
        score.enemies_total += 1;
    }

    let mut next_id = 1;
    for position in &scenario.objectives {
        if !scenario.map.in_bounds(position) {
            warn!(x = position.x, y = position.y, "objective outside the map, skipped");
            continue;
        }
        world.spawn((Objective::new(next_id, *position),));
        next_id += 1;
        score.objectives_total += 1;
    }

    info!(
        scenario = %scenario.name,
        allies = score.allies_total,
        enemies = score.enemies_total,
        objectives = score.objectives_total,
        "battle set up"
    );
    Ok(score)
}

fn on_map(map: &TerrainMap, placement: &UnitPlacement, role: Role) -> bool {
    let inside = map.in_bounds(&placement.position);
    if !inside {
        warn!(
            role = ?role,
            x = placement.position.x,
            y = placement.position.y,
            "unit placement outside the map, skipped"
        );
    }
    inside
}

/// Resolve the placement's unit type, rolling one from `pool` when absent.
fn pick_unit(
    placement: &UnitPlacement,
    pool: &[UnitType],
    role: Role,
    rng: &mut impl Rng,
) -> Result<UnitType> {
    match placement.unit {
        Some(unit) if pool.contains(&unit) => Ok(unit),
        Some(unit) => {
            warn!(unit = ?unit, role = ?role, "unit type not fielded by this side");
            Err(SteelfrontError::UnknownVehicle(unit))
        }
        None => pool
            .choose(rng)
            .copied()
            .ok_or_else(|| SteelfrontError::InvalidScenario(format!("no unit types for {role:?}"))),
    }
}

/// Spawn the player tank with full loadout, crew and modules.
pub fn spawn_player(world: &mut World, spec: &PlayerTankSpec, position: Position, heading: f64) -> hecs::Entity {
    let kinematics = Kinematics {
        position,
        heading,
        turret_angle: heading,
        gun_elevation: 0.0,
        speed: 0.0,
    };
    let gun = Gun {
        caliber: spec.caliber,
        reload_time: spec.reload_time,
        reload_progress: 0.0,
        is_reloading: false,
        shells: spec.shells.clone(),
        selected_shell: 0,
    };

    world.spawn((
        PlayerTank,
        Identity {
            name: spec.name.clone(),
            nation: spec.nation.clone(),
            role: Role::Player,
        },
        kinematics,
        spec.mobility,
        DriverIntent::default(),
        Hull::default(),
        spec.armor,
        gun,
        full_crew(&spec.crew),
        Modules {
            modules: spec.modules.clone(),
        },
        spec.fuel,
    ))
}

/// Spawn an allied support unit holding formation slot `slot`.
pub fn spawn_ally(
    world: &mut World,
    unit: UnitType,
    placement: &UnitPlacement,
    slot: usize,
    rng: &mut impl Rng,
) -> hecs::Entity {
    let spec = get_unit_spec(unit);
    let gunnery = ally_gunnery(&spec);
    let heading = placement.heading.unwrap_or(0.0);
    let brain = new_brain(&spec, &gunnery, slot, rng);

    world.spawn((
        Identity {
            name: spec.name.clone(),
            nation: spec.nation.clone(),
            role: Role::Ally,
        },
        Kinematics {
            position: placement.position,
            heading,
            turret_angle: heading,
            ..Default::default()
        },
        Hull::default(),
        Armor {
            hull: spec.armor,
            turret: None,
        },
        full_crew(&[
            CrewRole::Commander,
            CrewRole::Gunner,
            CrewRole::Loader,
            CrewRole::Driver,
        ]),
        brain,
        gunnery,
    ))
}

/// Spawn an enemy unit with a rolled heading and turret facing.
pub fn spawn_enemy(world: &mut World, unit: UnitType, placement: &UnitPlacement, rng: &mut impl Rng) -> hecs::Entity {
    let spec = get_unit_spec(unit);
    let gunnery = enemy_gunnery(&spec);
    let heading = placement.heading.unwrap_or_else(|| rng.gen_range(-PI..PI));
    let turret_angle = rng.gen_range(-PI..PI);
    let brain = new_brain(&spec, &gunnery, 0, rng);

    world.spawn((
        Identity {
            name: spec.name.clone(),
            nation: spec.nation.clone(),
            role: Role::Enemy,
        },
        Kinematics {
            position: placement.position,
            heading,
            turret_angle,
            ..Default::default()
        },
        Hull::default(),
        Armor {
            hull: spec.armor,
            turret: None,
        },
        brain,
        gunnery,
    ))
}

fn new_brain(spec: &UnitSpec, gunnery: &AiGunnery, slot: usize, rng: &mut impl Rng) -> AiBrain {
    let profile = get_profile(spec.behavior);
    AiBrain {
        behavior: spec.behavior,
        state: AiState::Patrol,
        waypoint: None,
        last_known_target: None,
        turret_goal: None,
        shot_timer: 0.0,
        next_shot_interval: roll_shot_interval(gunnery.reload_secs, profile.reload_jitter, rng),
        formation_slot: slot,
        spotted: false,
    }
}

fn full_crew(roles: &[CrewRole]) -> Crew {
    Crew {
        members: roles
            .iter()
            .map(|&role| CrewMember { role, health: 100.0 })
            .collect(),
    }
}
