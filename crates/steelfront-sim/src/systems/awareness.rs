//! Proximity awareness around the player vehicle.

use hecs::World;

use steelfront_core::components::{AiBrain, Hull, Identity, Kinematics, PlayerTank};
use steelfront_core::constants::{CLOSE_CONTACT_RANGE, PROXIMITY_RANGE};
use steelfront_core::enums::Role;

/// Enemies near the player this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Proximity {
    pub count: usize,
    pub close_contact: bool,
}

/// Mark enemies within proximity range as spotted (latched) and count them.
pub fn run(world: &mut World) -> Proximity {
    let player = world
        .query::<(&PlayerTank, &Kinematics, &Hull)>()
        .iter()
        .find(|(_, (_, _, hull))| !hull.is_destroyed)
        .map(|(_, (_, kin, _))| kin.position);
    let Some(player) = player else {
        return Proximity::default();
    };

    let mut proximity = Proximity::default();
    for (_entity, (identity, kin, hull, brain)) in
        world.query_mut::<(&Identity, &Kinematics, &Hull, &mut AiBrain)>()
    {
        if identity.role != Role::Enemy || hull.is_destroyed {
            continue;
        }
        let distance = kin.position.distance_to(&player);
        if distance < PROXIMITY_RANGE {
            proximity.count += 1;
            brain.spotted = true;
            if distance < CLOSE_CONTACT_RANGE {
                proximity.close_contact = true;
            }
        }
    }
    proximity
}
