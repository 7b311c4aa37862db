//! Angle and vector helpers shared by the integrator, AI and resolver.

use std::f64::consts::{PI, TAU};

use glam::DVec2;

use crate::constants::SLEW_DEADBAND;
use crate::types::Position;

/// Wrap an angle into (−π, π].
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Shortest signed rotation from `from` to `to`, in (−π, π].
pub fn angle_difference(from: f64, to: f64) -> f64 {
    normalize_angle(to - from)
}

/// Rotate `current` toward `target` along the shortest path by at most `max_step`.
///
/// Differences inside the dead band are left alone so a settled turret does not
/// jitter. The result is normalized and never overshoots the target.
pub fn slew_angle(current: f64, target: f64, max_step: f64) -> f64 {
    let diff = angle_difference(current, target);
    if diff.abs() <= SLEW_DEADBAND || max_step <= 0.0 {
        return normalize_angle(current);
    }
    normalize_angle(current + diff.signum() * diff.abs().min(max_step))
}

/// Move a scalar toward `target` by at most `max_step` (no wrapping).
/// Used for gun elevation.
pub fn slew_linear(current: f64, target: f64, max_step: f64) -> f64 {
    let diff = target - current;
    if diff.abs() <= SLEW_DEADBAND || max_step <= 0.0 {
        return current;
    }
    current + diff.signum() * diff.abs().min(max_step)
}

/// Unit vector for a heading angle.
pub fn heading_vector(angle: f64) -> DVec2 {
    DVec2::from_angle(angle)
}

/// Linear lead: bearing from `shooter` to where `target` will be after the
/// shell's time of flight, assuming constant target velocity.
pub fn lead_bearing(
    shooter: &Position,
    target: &Position,
    target_velocity: DVec2,
    shell_speed: f64,
) -> f64 {
    let distance = shooter.distance_to(target);
    if shell_speed <= 0.0 {
        return shooter.bearing_to(target);
    }
    let time_to_target = distance / shell_speed;
    let predicted = target.to_vec() + target_velocity * time_to_target;
    shooter.bearing_to(&Position::from_vec(predicted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_keeps_pi_positive() {
        assert!((normalize_angle(PI) - PI).abs() < 1e-12);
        assert!((normalize_angle(-PI) - PI).abs() < 1e-12);
        assert!((normalize_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_slew_takes_short_way_across_seam() {
        // From just below +π to just above −π is a small positive rotation.
        let current = PI - 0.05;
        let target = -PI + 0.05;
        let next = slew_angle(current, target, 0.02);
        assert!((angle_difference(current, next) - 0.02).abs() < 1e-9);
    }

    #[test]
    fn test_slew_does_not_overshoot() {
        let next = slew_angle(0.0, 0.1, 1.0);
        assert!((next - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_lead_with_stationary_target_is_plain_bearing() {
        let shooter = Position::new(0.0, 0.0);
        let target = Position::new(100.0, 100.0);
        let lead = lead_bearing(&shooter, &target, DVec2::ZERO, 1500.0);
        assert!((lead - shooter.bearing_to(&target)).abs() < 1e-12);
    }

    #[test]
    fn test_lead_lands_ahead_of_crossing_target() {
        let shooter = Position::new(0.0, 0.0);
        let target = Position::new(1500.0, 0.0);
        // Crossing downward at 20 m/s, 1 s time of flight ⇒ aim 20 m below.
        let lead = lead_bearing(&shooter, &target, DVec2::new(0.0, 20.0), 1500.0);
        assert!((lead - (20.0f64).atan2(1500.0)).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_normalize_range(angle in -100.0f64..100.0) {
            let a = normalize_angle(angle);
            prop_assert!(a > -PI && a <= PI);
        }

        #[test]
        fn prop_slew_bounded_by_step(
            current in -PI..PI,
            target in -10.0f64..10.0,
            step in 0.0f64..0.5,
        ) {
            let next = slew_angle(current, target, step);
            prop_assert!(angle_difference(current, next).abs() <= step + 1e-9);
            prop_assert!(next > -PI && next <= PI);
        }
    }
}
