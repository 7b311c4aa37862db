#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use glam::DVec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use steelfront_core::constants::*;
    use steelfront_core::enums::{AiState, Behavior};
    use steelfront_core::geometry::angle_difference;
    use steelfront_core::types::Position;

    use crate::fsm::*;
    use crate::profiles::get_profile;

    const DT: f64 = 1.0 / 60.0;

    fn make_context(behavior: Behavior, target: Option<Position>) -> AiContext {
        AiContext {
            behavior,
            state: AiState::Patrol,
            position: Position::new(2000.0, 2000.0),
            turret_angle: 0.0,
            turret_goal: None,
            waypoint: None,
            last_known_target: None,
            target: target.map(|position| TargetInfo {
                position,
                velocity: DVec2::ZERO,
            }),
            formation: None,
            shot_timer: 0.0,
            next_shot_interval: 8.5,
            reload_secs: 8.5,
            shells: 40,
            shell_velocity: ENEMY_SHELL_VELOCITY,
            dt: DT,
        }
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    /// Feed an update back into the context, moving the unit as requested.
    fn apply(ctx: &mut AiContext, update: &AiUpdate) {
        ctx.state = update.state;
        ctx.turret_angle = update.turret_angle;
        ctx.turret_goal = update.turret_goal;
        ctx.waypoint = update.waypoint;
        ctx.last_known_target = update.last_known_target;
        ctx.shot_timer = update.shot_timer;
        ctx.next_shot_interval = update.next_shot_interval;
        if let Some(pos) = update.desired_position {
            ctx.position = pos;
        }
        if update.shot.is_some() {
            ctx.shells -= 1;
        }
    }

    #[test]
    fn test_patrol_without_hostiles_never_engages_or_fires() {
        let mut ctx = make_context(Behavior::Aggressive, None);
        let mut rng = rng();
        for _ in 0..5000 {
            let update = evaluate(&ctx, &mut rng);
            assert_eq!(update.state, AiState::Patrol);
            assert!(update.shot.is_none());
            apply(&mut ctx, &update);
        }
        assert_eq!(ctx.shells, 40);
    }

    #[test]
    fn test_hostile_outside_detection_stays_patrol() {
        let target = Position::new(2000.0 + ENEMY_DETECTION_RANGE + 1.0, 2000.0);
        let ctx = make_context(Behavior::Aggressive, Some(target));
        let update = evaluate(&ctx, &mut rng());
        assert_eq!(update.state, AiState::Patrol);
        assert!(!update.state_changed);
        assert!(update.waypoint.is_some(), "patrol rolls a waypoint");
    }

    #[test]
    fn test_hostile_inside_detection_engages() {
        let target = Position::new(2500.0, 2000.0);
        let ctx = make_context(Behavior::Aggressive, Some(target));
        let update = evaluate(&ctx, &mut rng());
        assert_eq!(update.state, AiState::Engage);
        assert!(update.state_changed);
        assert_eq!(update.last_known_target, Some(target));
        assert_eq!(update.turret_goal, Some(0.0));
    }

    #[test]
    fn test_fires_when_aimed_and_cooled_down() {
        let mut ctx = make_context(Behavior::Aggressive, Some(Position::new(2500.0, 2000.0)));
        ctx.shot_timer = 8.5;
        let update = evaluate(&ctx, &mut rng());
        let shot = update.shot.expect("aimed, cooled and in range");
        assert!(shot.angle.abs() < 1e-9);
        assert_eq!(update.shot_timer, 0.0);
        assert!(update.next_shot_interval >= 8.5);
        assert!(update.next_shot_interval < 8.5 + ENEMY_RELOAD_JITTER);
    }

    #[test]
    fn test_zero_ammo_never_fires_but_still_moves() {
        let mut ctx = make_context(Behavior::Aggressive, Some(Position::new(2600.0, 2000.0)));
        ctx.shells = 0;
        ctx.shot_timer = 100.0;
        let update = evaluate(&ctx, &mut rng());
        assert!(update.shot.is_none());
        let moved = update.desired_position.expect("aggressive closes in");
        assert!(moved.x > ctx.position.x);
    }

    #[test]
    fn test_no_fire_inside_minimum_range() {
        let mut ctx = make_context(Behavior::Defensive, Some(Position::new(2100.0, 2000.0)));
        ctx.shot_timer = 100.0;
        let update = evaluate(&ctx, &mut rng());
        assert_eq!(update.state, AiState::Engage);
        assert!(update.shot.is_none());
    }

    #[test]
    fn test_enemy_cooldown_waits_for_aim() {
        // Target directly behind: turret far from aligned.
        let ctx = make_context(Behavior::Sniper, Some(Position::new(1500.0, 2000.0)));
        let update = evaluate(&ctx, &mut rng());
        assert_eq!(update.shot_timer, 0.0);
    }

    #[test]
    fn test_support_cooldown_runs_unaimed() {
        let mut ctx = make_context(Behavior::Support, Some(Position::new(1500.0, 2000.0)));
        ctx.reload_secs = ALLY_RELOAD_SECS;
        let update = evaluate(&ctx, &mut rng());
        assert!((update.shot_timer - DT).abs() < 1e-12);
        assert!(update.shot.is_none());
    }

    #[test]
    fn test_flanker_moves_perpendicular() {
        let ctx = make_context(Behavior::Flanker, Some(Position::new(2500.0, 2000.0)));
        let update = evaluate(&ctx, &mut rng());
        let heading = update.heading.expect("flanker always moves");
        assert!((angle_difference(0.0, heading) - FRAC_PI_2).abs() < 1e-9);
        let moved = update.desired_position.unwrap();
        let expected = get_profile(Behavior::Flanker).engage_speed * DT;
        assert!((ctx.position.distance_to(&moved) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_sniper_retreats_inside_standoff() {
        let ctx = make_context(Behavior::Sniper, Some(Position::new(2200.0, 2000.0)));
        let update = evaluate(&ctx, &mut rng());
        let moved = update.desired_position.expect("too close, retreat");
        assert!(moved.x < ctx.position.x);
        assert!((angle_difference(update.heading.unwrap(), PI)).abs() < 1e-9);
    }

    #[test]
    fn test_sniper_holds_outside_standoff() {
        let ctx = make_context(Behavior::Sniper, Some(Position::new(2400.0, 2000.0)));
        let update = evaluate(&ctx, &mut rng());
        assert!(update.desired_position.is_none());
    }

    #[test]
    fn test_aggressive_holds_at_close_range() {
        let ctx = make_context(Behavior::Aggressive, Some(Position::new(2140.0, 2000.0)));
        let update = evaluate(&ctx, &mut rng());
        assert!(update.desired_position.is_none());
    }

    #[test]
    fn test_lost_target_continues_slew() {
        let mut ctx = make_context(Behavior::Aggressive, Some(Position::new(2000.0, 2500.0)));
        let engaged = evaluate(&ctx, &mut rng());
        apply(&mut ctx, &engaged);
        let after_engage = ctx.turret_angle;
        assert!(after_engage > 0.0);

        // Target vanishes; the turret keeps turning toward the old bearing.
        ctx.target = None;
        let lost = evaluate(&ctx, &mut rng());
        assert_eq!(lost.state, AiState::Patrol);
        assert!(lost.turret_angle > after_engage);
        assert_eq!(lost.turret_goal, Some(FRAC_PI_2));
    }

    #[test]
    fn test_slew_goal_cleared_once_reached() {
        let mut ctx = make_context(Behavior::Aggressive, None);
        ctx.turret_goal = Some(0.005);
        let update = evaluate(&ctx, &mut rng());
        assert_eq!(update.turret_goal, None);
    }

    #[test]
    fn test_turret_slew_is_rate_limited() {
        let ctx = make_context(Behavior::Aggressive, Some(Position::new(2000.0, 2500.0)));
        let update = evaluate(&ctx, &mut rng());
        assert!((update.turret_angle - ENEMY_TURRET_SLEW_RATE * DT).abs() < 1e-12);
    }

    #[test]
    fn test_lead_applied_to_moving_target() {
        let mut ctx = make_context(Behavior::Sniper, Some(Position::new(2900.0, 2000.0)));
        ctx.target = Some(TargetInfo {
            position: Position::new(2900.0, 2000.0),
            velocity: DVec2::new(0.0, 15.0),
        });
        ctx.shot_timer = 100.0;
        let update = evaluate(&ctx, &mut rng());
        let shot = update.shot.expect("aimed at plain bearing, cooled");
        // 900 m at 1500 m/s: 0.6 s of flight, 9 m of lead.
        assert!((shot.angle - (9.0f64).atan2(900.0)).abs() < 1e-9);
    }

    #[test]
    fn test_target_at_detection_range_is_not_engaged() {
        let ctx = make_context(Behavior::Sniper, Some(Position::new(2000.0 + ENEMY_DETECTION_RANGE, 2000.0)));
        let update = evaluate(&ctx, &mut rng());
        assert_eq!(update.state, AiState::Patrol);
        assert!(update.shot.is_none());
    }

    #[test]
    fn test_support_follows_formation_slot() {
        let mut ctx = make_context(Behavior::Support, None);
        ctx.formation = Some(FormationAnchor {
            position: Position::new(2000.0, 1000.0),
            slot: 2,
        });
        let slot = formation_slot_position(&Position::new(2000.0, 1000.0), 2);
        assert_eq!(slot, Position::new(2150.0, 1200.0));

        let update = evaluate(&ctx, &mut rng());
        assert_eq!(update.state, AiState::Patrol);
        let moved = update.desired_position.expect("far from slot");
        assert!(moved.distance_to(&slot) < ctx.position.distance_to(&slot));
        assert!(update.waypoint.is_none(), "formation units do not wander");
    }

    #[test]
    fn test_support_engage_range() {
        let near = make_context(Behavior::Support, Some(Position::new(2790.0, 2000.0)));
        assert_eq!(evaluate(&near, &mut rng()).state, AiState::Engage);
        let far = make_context(Behavior::Support, Some(Position::new(2900.0, 2000.0)));
        assert_eq!(evaluate(&far, &mut rng()).state, AiState::Patrol);
    }

    #[test]
    fn test_waypoint_rerolled_when_reached() {
        let mut ctx = make_context(Behavior::Defensive, None);
        ctx.waypoint = Some(Position::new(2005.0, 2000.0));
        let update = evaluate(&ctx, &mut rng());
        assert_ne!(update.waypoint, ctx.waypoint);
    }

    #[test]
    fn test_waypoint_biased_toward_last_known() {
        let mut ctx = make_context(Behavior::Defensive, None);
        ctx.last_known_target = Some(Position::new(3000.0, 2000.0));
        let update = evaluate(&ctx, &mut rng());
        let wp = update.waypoint.unwrap();
        // Roll centre is 150 m toward the last sighting, rolled within ±150.
        assert!(wp.x >= 2000.0 && wp.x <= 2300.0);
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut ctx = make_context(Behavior::Flanker, Some(Position::new(2500.0, 2000.0)));
        ctx.dt = 0.0;
        let update = evaluate(&ctx, &mut rng());
        assert_eq!(update.state, AiState::Patrol);
        assert!(update.desired_position.is_none());
        assert!(update.shot.is_none());
        assert_eq!(update.turret_angle, 0.0);
    }

    proptest! {
        #[test]
        fn prop_patrol_never_fires(seed in any::<u64>(), ticks in 1usize..400) {
            let mut ctx = make_context(Behavior::Flanker, None);
            ctx.shot_timer = 1000.0;
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for _ in 0..ticks {
                let update = evaluate(&ctx, &mut rng);
                prop_assert!(update.shot.is_none());
                apply(&mut ctx, &update);
            }
        }
    }
}
