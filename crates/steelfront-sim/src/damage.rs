//! Armor-penetration damage model.
//!
//! Pure functions over plain data; the collision system feeds them the
//! projectile and target state and applies the results to the world.

use rand::Rng;

use steelfront_core::components::{ArmorRating, Crew, CrewMember, Modules};
use steelfront_core::constants::*;
use steelfront_core::enums::{ArmorZone, CrewRole, HitOutcome, ModuleKind, Role};
use steelfront_core::geometry::angle_difference;
use steelfront_core::types::Position;

/// How a target converts a shell hit into damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageProfile {
    /// Player and allies: hull-facing zones, crew and module effects.
    Crewed,
    /// Enemies: turret-facing zones, health loss only.
    HullOnly,
}

impl DamageProfile {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Player | Role::Ally => DamageProfile::Crewed,
            Role::Enemy => DamageProfile::HullOnly,
        }
    }

    fn penetration_gain(self) -> f64 {
        match self {
            DamageProfile::Crewed => 1.0,
            DamageProfile::HullOnly => HULL_ONLY_PENETRATION_GAIN,
        }
    }

    fn failure(self) -> HitOutcome {
        match self {
            DamageProfile::Crewed => HitOutcome::Ricochet,
            DamageProfile::HullOnly => HitOutcome::NoPenetration,
        }
    }
}

/// The shell properties that matter to the resolver.
#[derive(Debug, Clone, Copy)]
pub struct ShellHit {
    pub penetration: f64,
    pub damage: f64,
}

/// Result of the penetration roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    pub zone: ArmorZone,
    pub outcome: HitOutcome,
    /// Health the target loses.
    pub health_loss: f64,
    /// Undivided damage, the basis for module damage.
    pub raw_damage: f64,
}

/// Pick the armor zone struck by a shell arriving at `impact`.
///
/// Zones are symmetric about `facing`: front under 45°, side up to 135°,
/// rear beyond.
pub fn select_zone(target: &Position, impact: &Position, facing: f64) -> ArmorZone {
    let bearing = target.bearing_to(impact);
    let diff = angle_difference(facing, bearing).abs();
    if diff < FRONT_ARC {
        ArmorZone::Front
    } else if diff <= REAR_ARC {
        ArmorZone::Side
    } else {
        ArmorZone::Rear
    }
}

/// Roll penetration against the armor of `zone`.
///
/// The ratio penetration/armor is used directly as a probability and is not
/// capped: at a ratio of 1 or more every draw in [0, 1) penetrates.
pub fn resolve_penetration(
    rng: &mut impl Rng,
    profile: DamageProfile,
    zone: ArmorZone,
    armor: &ArmorRating,
    shell: &ShellHit,
    health_modifier: f64,
) -> Penetration {
    let ratio = shell.penetration / armor.for_zone(zone);
    let probability = ratio * profile.penetration_gain();

    if rng.gen::<f64>() >= probability {
        return Penetration {
            zone,
            outcome: profile.failure(),
            health_loss: 0.0,
            raw_damage: 0.0,
        };
    }

    let (health_loss, raw_damage) = match profile {
        DamageProfile::Crewed => {
            let damage = shell.damage * (ratio + CREWED_DAMAGE_OFFSET);
            let modifier = if health_modifier > 0.0 {
                health_modifier
            } else {
                1.0
            };
            (damage / CREWED_DAMAGE_DIVISOR / modifier, damage)
        }
        DamageProfile::HullOnly => {
            let damage = shell.damage * ratio;
            (damage, damage)
        }
    };

    Penetration {
        zone,
        outcome: HitOutcome::Penetration {
            damage: health_loss,
        },
        health_loss,
        raw_damage,
    }
}

/// Module struck behind a penetrated zone. `roll` is a uniform draw in [0, 1).
pub fn module_for_zone(zone: ArmorZone, roll: f64) -> ModuleKind {
    match zone {
        ArmorZone::Front => {
            if roll > 0.8 {
                ModuleKind::Transmission
            } else {
                ModuleKind::Engine
            }
        }
        ArmorZone::Side => {
            if roll > 0.6 {
                ModuleKind::FuelTank
            } else {
                ModuleKind::AmmoRack
            }
        }
        ArmorZone::Rear | ArmorZone::Top => ModuleKind::Engine,
    }
}

/// Module and crew consequences of a penetrating hit on a crewed target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecondaryEffects {
    /// Module hit and its remaining health.
    pub module: Option<(ModuleKind, f64)>,
    /// Crew member hit and their remaining health.
    pub crew: Option<(CrewRole, f64)>,
    /// The ammunition rack cooked off.
    pub detonation: bool,
}

/// Roll module damage, crew injury and ammunition detonation.
///
/// Six draws are taken in a fixed order on every call, whatever the target
/// carries, so the random stream depends only on the number of hits.
pub fn apply_secondary_effects(
    rng: &mut impl Rng,
    zone: ArmorZone,
    raw_damage: f64,
    modules: Option<&mut Modules>,
    crew: Option<&mut Crew>,
) -> SecondaryEffects {
    let module_hit = rng.gen::<f64>() < MODULE_HIT_CHANCE;
    let module_roll = rng.gen::<f64>();
    let crew_hit = rng.gen::<f64>() < CREW_HIT_CHANCE;
    let crew_pick = rng.gen::<f64>();
    let injury = CREW_INJURY_MIN + rng.gen::<f64>() * CREW_INJURY_SPREAD;
    let detonation_roll = rng.gen::<f64>();

    let mut effects = SecondaryEffects::default();

    let mut modules = modules;
    if module_hit {
        let kind = module_for_zone(zone, module_roll);
        if let Some(module) = modules.as_deref_mut().and_then(|m| m.get_mut(kind)) {
            module.health = (module.health - raw_damage * MODULE_DAMAGE_FRACTION).max(0.0);
            effects.module = Some((kind, module.health));
        }
    }

    if crew_hit {
        if let Some(member) = crew.and_then(|c| pick_crew_member(c, crew_pick)) {
            member.health = (member.health - injury).max(0.0);
            effects.crew = Some((member.role, member.health));
        }
    }

    if let Some(rack) = modules.as_deref().and_then(|m| m.get(ModuleKind::AmmoRack)) {
        if rack.health_fraction() < AMMO_DETONATION_THRESHOLD
            && !rack.blowout_protected
            && detonation_roll < AMMO_DETONATION_CHANCE
        {
            effects.detonation = true;
        }
    }

    effects
}

/// Map a unit draw onto a crew index.
fn pick_crew_member(crew: &mut Crew, roll: f64) -> Option<&mut CrewMember> {
    let len = crew.members.len();
    if len == 0 {
        return None;
    }
    let index = ((roll * len as f64) as usize).min(len - 1);
    crew.members.get_mut(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use steelfront_core::components::Module;

    fn armor(front: f64, side: f64, rear: f64) -> ArmorRating {
        ArmorRating {
            front,
            side,
            rear,
            top: 0.0,
        }
    }

    /// Every `gen::<f64>()` returns 0.0.
    fn low_rng() -> StepRng {
        StepRng::new(0, 0)
    }

    /// Every `gen::<f64>()` returns just under 1.0.
    fn high_rng() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    fn modules(blowout_protected: bool, rack_health: f64) -> Modules {
        Modules {
            modules: vec![
                Module {
                    kind: ModuleKind::Engine,
                    health: 100.0,
                    max_health: 100.0,
                    blowout_protected: false,
                },
                Module {
                    kind: ModuleKind::AmmoRack,
                    health: rack_health,
                    max_health: 100.0,
                    blowout_protected,
                },
            ],
        }
    }

    #[test]
    fn test_zone_selection() {
        let target = Position::new(0.0, 0.0);
        assert_eq!(select_zone(&target, &Position::new(10.0, 1.0), 0.0), ArmorZone::Front);
        assert_eq!(select_zone(&target, &Position::new(0.0, 10.0), 0.0), ArmorZone::Side);
        assert_eq!(select_zone(&target, &Position::new(0.0, -10.0), 0.0), ArmorZone::Side);
        assert_eq!(select_zone(&target, &Position::new(-10.0, 1.0), 0.0), ArmorZone::Rear);
    }

    #[test]
    fn test_zone_wraps_across_seam() {
        // Facing just under +π, impact just past −π: a frontal hit.
        let target = Position::new(0.0, 0.0);
        let impact = Position::new(-10.0, -0.5);
        assert_eq!(select_zone(&target, &impact, 3.1), ArmorZone::Front);
    }

    #[test]
    fn test_ratio_above_one_always_penetrates() {
        let shell = ShellHit {
            penetration: 150.0,
            damage: 100.0,
        };
        let a = armor(100.0, 100.0, 100.0);
        for profile in [DamageProfile::Crewed, DamageProfile::HullOnly] {
            let result =
                resolve_penetration(&mut high_rng(), profile, ArmorZone::Front, &a, &shell, 1.0);
            assert!(matches!(result.outcome, HitOutcome::Penetration { .. }));
            assert!(result.health_loss > 0.0);
        }
    }

    #[test]
    fn test_crewed_damage_formula() {
        let shell = ShellHit {
            penetration: 150.0,
            damage: 100.0,
        };
        let a = armor(100.0, 100.0, 100.0);
        let result = resolve_penetration(
            &mut low_rng(),
            DamageProfile::Crewed,
            ArmorZone::Front,
            &a,
            &shell,
            1.0,
        );
        // 100 × (1.5 + 0.3) = 180 raw, ÷ 10 = 18 health.
        assert!((result.raw_damage - 180.0).abs() < 1e-9);
        assert!((result.health_loss - 18.0).abs() < 1e-9);

        let hardened = resolve_penetration(
            &mut low_rng(),
            DamageProfile::Crewed,
            ArmorZone::Front,
            &a,
            &shell,
            1.5,
        );
        assert!((hardened.health_loss - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_hull_only_damage_formula() {
        let shell = ShellHit {
            penetration: 450.0,
            damage: 420.0,
        };
        let a = armor(500.0, 80.0, 50.0);
        let result = resolve_penetration(
            &mut low_rng(),
            DamageProfile::HullOnly,
            ArmorZone::Front,
            &a,
            &shell,
            1.0,
        );
        assert!((result.health_loss - 420.0 * 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_failure_labels_by_profile() {
        let shell = ShellHit {
            penetration: 10.0,
            damage: 100.0,
        };
        let a = armor(800.0, 800.0, 800.0);
        let crewed =
            resolve_penetration(&mut high_rng(), DamageProfile::Crewed, ArmorZone::Side, &a, &shell, 1.0);
        assert_eq!(crewed.outcome, HitOutcome::Ricochet);
        assert_eq!(crewed.health_loss, 0.0);
        let hull = resolve_penetration(
            &mut high_rng(),
            DamageProfile::HullOnly,
            ArmorZone::Side,
            &a,
            &shell,
            1.0,
        );
        assert_eq!(hull.outcome, HitOutcome::NoPenetration);
    }

    #[test]
    fn test_hull_only_gain_lifts_marginal_shot() {
        // Ratio 0.9: crewed fails a 0.95 draw, hull-only (×1.2 = 1.08) succeeds.
        let shell = ShellHit {
            penetration: 90.0,
            damage: 100.0,
        };
        let a = armor(100.0, 100.0, 100.0);
        let draw = (0.95 * (1u64 << 53) as f64) as u64;
        let mut rng = StepRng::new(draw << 11, 0);
        let crewed =
            resolve_penetration(&mut rng, DamageProfile::Crewed, ArmorZone::Front, &a, &shell, 1.0);
        assert_eq!(crewed.outcome, HitOutcome::Ricochet);
        let hull =
            resolve_penetration(&mut rng, DamageProfile::HullOnly, ArmorZone::Front, &a, &shell, 1.0);
        assert!(matches!(hull.outcome, HitOutcome::Penetration { .. }));
    }

    #[test]
    fn test_zero_armor_is_floored() {
        let shell = ShellHit {
            penetration: 0.5,
            damage: 10.0,
        };
        let a = armor(0.0, 0.0, 0.0);
        let result = resolve_penetration(
            &mut low_rng(),
            DamageProfile::HullOnly,
            ArmorZone::Front,
            &a,
            &shell,
            1.0,
        );
        assert!(result.health_loss.is_finite());
        assert!((result.health_loss - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_module_for_zone() {
        assert_eq!(module_for_zone(ArmorZone::Front, 0.5), ModuleKind::Engine);
        assert_eq!(module_for_zone(ArmorZone::Front, 0.9), ModuleKind::Transmission);
        assert_eq!(module_for_zone(ArmorZone::Side, 0.5), ModuleKind::AmmoRack);
        assert_eq!(module_for_zone(ArmorZone::Side, 0.7), ModuleKind::FuelTank);
        assert_eq!(module_for_zone(ArmorZone::Rear, 0.99), ModuleKind::Engine);
    }

    #[test]
    fn test_secondary_effects_with_low_draws() {
        let mut m = modules(true, 100.0);
        let mut crew = Crew {
            members: vec![
                CrewMember {
                    role: CrewRole::Commander,
                    health: 100.0,
                },
                CrewMember {
                    role: CrewRole::Gunner,
                    health: 100.0,
                },
            ],
        };
        let effects =
            apply_secondary_effects(&mut low_rng(), ArmorZone::Front, 200.0, Some(&mut m), Some(&mut crew));
        assert_eq!(effects.module, Some((ModuleKind::Engine, 40.0)));
        assert_eq!(effects.crew, Some((CrewRole::Commander, 80.0)));
        assert!(!effects.detonation);
        assert_eq!(m.get(ModuleKind::Engine).unwrap().health, 40.0);
    }

    #[test]
    fn test_no_effects_with_high_draws() {
        let mut m = modules(false, 10.0);
        let effects =
            apply_secondary_effects(&mut high_rng(), ArmorZone::Side, 500.0, Some(&mut m), None);
        assert_eq!(effects, SecondaryEffects::default());
    }

    #[test]
    fn test_exposed_damaged_rack_detonates() {
        let mut m = modules(false, 100.0);
        // Side hit on the rack: 300 × 0.3 = 90 damage leaves 10%.
        let effects = apply_secondary_effects(&mut low_rng(), ArmorZone::Side, 300.0, Some(&mut m), None);
        assert_eq!(effects.module, Some((ModuleKind::AmmoRack, 10.0)));
        assert!(effects.detonation);
    }

    #[test]
    fn test_draw_count_independent_of_loadout() {
        use rand::{RngCore, SeedableRng};
        use rand_chacha::ChaCha8Rng;

        let mut equipped_rng = ChaCha8Rng::seed_from_u64(99);
        let mut bare_rng = ChaCha8Rng::seed_from_u64(99);
        let mut m = modules(false, 100.0);
        let mut crew = Crew {
            members: vec![CrewMember {
                role: CrewRole::Loader,
                health: 100.0,
            }],
        };
        for _ in 0..20 {
            apply_secondary_effects(&mut equipped_rng, ArmorZone::Side, 300.0, Some(&mut m), Some(&mut crew));
            apply_secondary_effects(&mut bare_rng, ArmorZone::Side, 300.0, None, None);
        }
        assert_eq!(equipped_rng.next_u64(), bare_rng.next_u64());
    }

    #[test]
    fn test_blowout_panels_prevent_detonation() {
        let mut m = modules(true, 5.0);
        let effects = apply_secondary_effects(&mut low_rng(), ArmorZone::Side, 300.0, Some(&mut m), None);
        assert!(!effects.detonation);
        assert_eq!(m.get(ModuleKind::AmmoRack).unwrap().health, 0.0);
    }
}
