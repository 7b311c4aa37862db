//! Drivetrain and turret integration for intent-driven vehicles.
//!
//! Speed approaches the throttle target at an engine-derived rate, the
//! hull turns with speed-dependent authority, and the turret and gun slew
//! toward their targets. Moves the terrain rejects are discarded.

use hecs::World;

use steelfront_core::components::{DriverIntent, Fuel, Hull, Kinematics, Mobility};
use steelfront_core::constants::*;
use steelfront_core::geometry::{normalize_angle, slew_angle, slew_linear};
use steelfront_core::modifiers::Modifiers;
use steelfront_terrain::TerrainQuery;

/// Integrate every live vehicle that carries driver intent.
pub fn run(world: &mut World, terrain: &impl TerrainQuery, modifiers: &Modifiers, dt: f64) {
    if dt <= 0.0 {
        return;
    }
    for (_entity, (kin, mobility, intent, hull, fuel)) in world.query_mut::<(
        &mut Kinematics,
        &Mobility,
        &DriverIntent,
        &Hull,
        Option<&mut Fuel>,
    )>() {
        if hull.is_destroyed {
            continue;
        }
        integrate(kin, mobility, intent, fuel, terrain, modifiers.speed, dt);
    }
}

/// Advance one vehicle by `dt`. Non-positive `dt` leaves it untouched.
pub fn integrate(
    kin: &mut Kinematics,
    mobility: &Mobility,
    intent: &DriverIntent,
    fuel: Option<&mut Fuel>,
    terrain: &impl TerrainQuery,
    speed_scale: f64,
    dt: f64,
) {
    if dt <= 0.0 {
        return;
    }

    let max_forward = mobility.max_speed * speed_scale;
    let max_reverse = mobility.reverse_speed * speed_scale;
    let throttle = intent.throttle.clamp(-1.0, 1.0);
    let steering = intent.steering.clamp(-1.0, 1.0);

    let target_speed = if throttle >= 0.0 {
        throttle * max_forward
    } else {
        throttle * max_reverse
    };

    let out_of_fuel = fuel.as_deref().is_some_and(Fuel::is_empty);
    if out_of_fuel {
        kin.speed *= OUT_OF_FUEL_DECAY;
    } else {
        let diff = target_speed - kin.speed;
        if diff.abs() > SPEED_DEADBAND {
            let step = mobility.acceleration() * ACCELERATION_GAIN * dt;
            kin.speed += diff.signum() * diff.abs().min(step);
        }
    }
    kin.speed = kin.speed.clamp(-max_reverse, max_forward);

    // Tracked vehicles lose steering authority as speed rises.
    let speed_ms = kin.speed * KMH_TO_MS;
    let authority = (1.0 - speed_ms.abs() / TURN_SPEED_FALLOFF).max(0.0);
    kin.heading = normalize_angle(kin.heading + steering * mobility.turn_rate * authority * dt);

    let candidate = kin.position.offset(kin.heading, speed_ms * dt);
    if terrain.can_move_to(&candidate) {
        kin.position = candidate;
    } else {
        kin.speed *= COLLISION_DAMPING;
    }

    if let Some(aim) = intent.aim_point {
        let bearing = kin.position.bearing_to(&aim);
        kin.turret_angle = slew_angle(kin.turret_angle, bearing, mobility.turret_slew_rate * dt);
    }

    let elevation_target = intent
        .elevation
        .clamp(mobility.elevation_min, mobility.elevation_max);
    kin.gun_elevation = slew_linear(
        kin.gun_elevation,
        elevation_target,
        mobility.elevation_slew_rate * dt,
    )
    .clamp(mobility.elevation_min, mobility.elevation_max);

    if let Some(fuel) = fuel {
        burn_fuel(fuel, kin.speed, max_forward, dt);
    }
}

/// Consume fuel for `dt` seconds at `speed`; burn rises with load.
pub fn burn_fuel(fuel: &mut Fuel, speed: f64, max_speed: f64, dt: f64) {
    let load = if max_speed > 0.0 {
        speed.abs() / max_speed
    } else {
        0.0
    };
    let burn = fuel.consumption * (1.0 + FUEL_LOAD_FACTOR * load) * dt / 60.0;
    fuel.current = (fuel.current - burn).max(0.0);
}
