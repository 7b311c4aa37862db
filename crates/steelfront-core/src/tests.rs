#[cfg(test)]
mod tests {
    use crate::catalog::*;
    use crate::commands::PlayerCommand;
    use crate::components::*;
    use crate::constants::*;
    use crate::enums::*;
    use crate::events::SimEvent;
    use crate::modifiers::Modifiers;
    use crate::state::BattleSnapshot;
    use crate::types::{Position, SimTime};

    #[test]
    fn test_commands_are_tagged_json() {
        let json = serde_json::to_string(&PlayerCommand::AimAt { x: 10.0, y: 20.0 }).unwrap();
        assert!(json.contains("\"type\":\"AimAt\""));

        let parsed: PlayerCommand =
            serde_json::from_str(r#"{"type":"SelectShell","index":2}"#).unwrap();
        assert_eq!(parsed, PlayerCommand::SelectShell { index: 2 });

        let fire: PlayerCommand = serde_json::from_str(r#"{"type":"Fire"}"#).unwrap();
        assert_eq!(fire, PlayerCommand::Fire);
    }

    #[test]
    fn test_hit_event_serde() {
        let event = SimEvent::Hit {
            position: Position::new(5.0, 6.0),
            target: Role::Enemy,
            outcome: HitOutcome::Penetration { damage: 37.4 },
            label: "37".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: SimEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn test_snapshot_default_serializes() {
        let snap = BattleSnapshot::default();
        let json = serde_json::to_string(&snap).unwrap();
        let back: BattleSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.phase, GamePhase::Active);
        assert!(back.vehicles.is_empty());
        assert!(back.player().is_none());
    }

    #[test]
    fn test_hit_labels() {
        assert_eq!(HitOutcome::Ricochet.label(), "RICOCHET");
        assert_eq!(HitOutcome::NoPenetration.label(), "NO PEN");
        assert_eq!(HitOutcome::Penetration { damage: 41.6 }.label(), "42");
    }

    #[test]
    fn test_hostility() {
        assert!(Role::Player.is_hostile_to(Role::Enemy));
        assert!(Role::Ally.is_hostile_to(Role::Enemy));
        assert!(Role::Enemy.is_hostile_to(Role::Player));
        assert!(Role::Enemy.is_hostile_to(Role::Ally));
        assert!(!Role::Player.is_hostile_to(Role::Ally));
        assert!(!Role::Enemy.is_hostile_to(Role::Enemy));
    }

    #[test]
    fn test_phase_is_over() {
        assert!(!GamePhase::Active.is_over());
        assert!(!GamePhase::Paused.is_over());
        assert!(GamePhase::Victory.is_over());
        assert!(GamePhase::Defeat.is_over());
    }

    #[test]
    fn test_player_spec_is_valid() {
        let spec = player_tank_spec();
        spec.validate().unwrap();
        assert_eq!(spec.shells.len(), 3);
        assert_eq!(spec.crew.len(), 4);
        assert!(spec.armor.turret.is_some());

        let rack = spec
            .modules
            .iter()
            .find(|m| m.kind == ModuleKind::AmmoRack)
            .unwrap();
        assert!(rack.blowout_protected);
    }

    #[test]
    fn test_validate_rejects_bad_mass() {
        let mut spec = player_tank_spec();
        spec.mobility.mass = 0.0;
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_elevation() {
        let mut spec = player_tank_spec();
        spec.mobility.elevation_min = 0.5;
        spec.mobility.elevation_max = -0.5;
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_unit_behaviors() {
        assert_eq!(get_unit_spec(UnitType::T72B).behavior, Behavior::Aggressive);
        assert_eq!(get_unit_spec(UnitType::Leopard2A4).behavior, Behavior::Defensive);
        assert_eq!(get_unit_spec(UnitType::Challenger1).behavior, Behavior::Sniper);
        assert_eq!(get_unit_spec(UnitType::T80U).behavior, Behavior::Flanker);
        for unit in ALLY_TYPES {
            assert_eq!(get_unit_spec(unit).behavior, Behavior::Support);
        }
    }

    #[test]
    fn test_gunnery_profiles() {
        let enemy = enemy_gunnery(&get_unit_spec(UnitType::T72B));
        assert_eq!(enemy.reload_secs, 8.5);
        assert_eq!(enemy.damage, ENEMY_SHELL_DAMAGE);
        assert_eq!(enemy.shells, ENEMY_SHELLS);

        let ally = ally_gunnery(&get_unit_spec(UnitType::M1A1Abrams));
        assert_eq!(ally.penetration, 460.0);
        assert_eq!(ally.reload_secs, ALLY_RELOAD_SECS);
        assert_eq!(ally.max_range, ALLY_SHELL_MAX_RANGE);
    }

    #[test]
    fn test_abrams_acceleration() {
        let m = player_tank_spec().mobility;
        let expected = 1500.0 * HP_TO_WATTS / 61_500.0;
        assert!((m.acceleration() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_armor_is_floored() {
        let rating = ArmorRating {
            front: 0.0,
            side: 50.0,
            rear: -3.0,
            top: 0.0,
        };
        assert_eq!(rating.for_zone(ArmorZone::Front), MIN_ARMOR);
        assert_eq!(rating.for_zone(ArmorZone::Rear), MIN_ARMOR);
        assert_eq!(rating.for_zone(ArmorZone::Side), 50.0);
    }

    #[test]
    fn test_gun_ready_requires_ammo() {
        let spec = player_tank_spec();
        let mut gun = Gun {
            caliber: spec.caliber,
            reload_time: spec.reload_time,
            reload_progress: 0.0,
            is_reloading: false,
            shells: spec.shells,
            selected_shell: 0,
        };
        assert!(gun.is_ready());
        gun.shells[0].count = 0;
        assert!(!gun.is_ready());
        gun.selected_shell = 1;
        assert!(gun.is_ready());
        gun.is_reloading = true;
        assert!(!gun.is_ready());
        gun.selected_shell = 9;
        gun.is_reloading = false;
        assert!(!gun.is_ready());
    }

    #[test]
    fn test_velocity_follows_heading() {
        let k = Kinematics {
            heading: std::f64::consts::FRAC_PI_2,
            speed: 36.0,
            ..Default::default()
        };
        let v = k.velocity();
        assert!(v.x.abs() < 1e-9);
        assert!((v.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_research_modifiers_stack() {
        let m = Modifiers::from_research(&["damage1", "damage2", "armor1", "bogus"]);
        assert!((m.damage - 1.15 * 1.30).abs() < 1e-12);
        assert!((m.health - 1.25).abs() < 1e-12);
        assert_eq!(m.speed, 1.0);
        assert_eq!(m.reload, 1.0);

        let none: [&str; 0] = [];
        assert_eq!(Modifiers::from_research(&none), Modifiers::default());
    }

    #[test]
    fn test_modifiers_default_missing_fields() {
        let m: Modifiers = serde_json::from_str(r#"{"speed":1.2}"#).unwrap();
        assert_eq!(m.speed, 1.2);
        assert_eq!(m.damage, 1.0);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut t = SimTime::default();
        t.advance(0.5);
        t.advance(0.25);
        assert_eq!(t.tick, 2);
        assert!((t.elapsed_secs - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_position_offset_and_bearing() {
        let a = Position::new(0.0, 0.0);
        let b = a.offset(std::f64::consts::FRAC_PI_2, 100.0);
        assert!((b.y - 100.0).abs() < 1e-9);
        assert!((a.bearing_to(&b) - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
        assert!((a.distance_to(&b) - 100.0).abs() < 1e-9);
    }
}
