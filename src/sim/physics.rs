//! Vertical physics for the avatar
//!
//! Semi-implicit Euler: gravity goes into velocity first, the clamped
//! velocity then moves the avatar.

use super::state::Avatar;
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct PhysicsIntegrator {
    tuning: Tuning,
}

impl Default for PhysicsIntegrator {
    fn default() -> Self {
        Self::new(&Tuning::default())
    }
}

impl PhysicsIntegrator {
    pub fn new(tuning: &Tuning) -> Self {
        Self { tuning: *tuning }
    }

    /// Advance the avatar by `dt` seconds. Zero (or negative, or NaN) `dt`
    /// returns the avatar untouched.
    pub fn advance(&self, avatar: &Avatar, dt: f32) -> Avatar {
        if !dt.is_finite() || dt <= 0.0 {
            return *avatar;
        }
        let t = &self.tuning;
        avatar
            .apply_gravity(t.gravity, dt, t.terminal_velocity)
            .update_rotation(t.terminal_velocity, t.max_rotation_down, t.rotation_lerp_factor)
    }

    pub fn impulse(&self, avatar: &Avatar) -> Avatar {
        avatar.flap(self.tuning.flap_impulse, self.tuning.max_rotation_up)
    }

    /// Seconds to fall `distance` from rest, ignoring the terminal cap
    pub fn fall_time(&self, distance: f32) -> f32 {
        (2.0 * distance / self.tuning.gravity).sqrt()
    }

    /// Distance fallen from rest in `time` seconds, ignoring the terminal cap
    pub fn fall_distance(&self, time: f32) -> f32 {
        0.5 * self.tuning.gravity * time * time
    }

    /// Height gained by one impulse before gravity stops the climb
    pub fn impulse_apex_height(&self) -> f32 {
        let v = self.tuning.flap_impulse.abs();
        v * v / (2.0 * self.tuning.gravity)
    }

    /// Seconds from an impulse to the top of the climb
    pub fn impulse_apex_time(&self) -> f32 {
        self.tuning.flap_impulse.abs() / self.tuning.gravity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;

    fn avatar() -> Avatar {
        Avatar::fallback()
    }

    #[test]
    fn test_gravity_pulls_down() {
        let physics = PhysicsIntegrator::default();
        let next = physics.advance(&avatar(), 0.016);
        assert!(next.velocity > 0.0);
        assert!(next.y > avatar().y);
        assert_eq!(next.x, avatar().x);
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let physics = PhysicsIntegrator::default();
        let tilted = Avatar {
            velocity: 120.0,
            rotation: -15.0,
            ..avatar()
        };
        assert_eq!(physics.advance(&tilted, 0.0), tilted);
        assert_eq!(physics.advance(&tilted, -0.5), tilted);
        assert_eq!(physics.advance(&tilted, f32::NAN), tilted);
    }

    #[test]
    fn test_velocity_capped_at_terminal() {
        let physics = PhysicsIntegrator::default();
        let mut current = Avatar {
            velocity: TERMINAL_VELOCITY - 10.0,
            ..avatar()
        };
        for _ in 0..100 {
            current = physics.advance(&current, 0.016);
            assert!(current.velocity <= TERMINAL_VELOCITY);
        }
        assert_eq!(current.velocity, TERMINAL_VELOCITY);
    }

    #[test]
    fn test_impulse_is_exact() {
        let physics = PhysicsIntegrator::default();
        let falling = Avatar {
            velocity: 333.0,
            ..avatar()
        };
        let flapped = physics.impulse(&falling);
        assert_eq!(flapped.velocity, FLAP_IMPULSE);
        assert_eq!(flapped.rotation, MAX_ROTATION_UP);
    }

    #[test]
    fn test_falling_tilts_down() {
        let physics = PhysicsIntegrator::default();
        let mut current = avatar();
        for _ in 0..30 {
            current = physics.advance(&current, 0.016);
        }
        assert!(current.rotation > 0.0);
        assert!(current.rotation <= MAX_ROTATION_DOWN);
    }

    #[test]
    fn test_ballistic_helpers_agree() {
        let physics = PhysicsIntegrator::default();
        let t = physics.fall_time(200.0);
        assert!((physics.fall_distance(t) - 200.0).abs() < 1e-2);
        // v² / 2g = 520² / 900
        assert!((physics.impulse_apex_height() - 300.444).abs() < 1e-2);
        let apex_t = physics.impulse_apex_time();
        let climb = FLAP_IMPULSE.abs() * apex_t - physics.fall_distance(apex_t);
        assert!((climb - physics.impulse_apex_height()).abs() < 1e-2);
    }

    proptest! {
        #[test]
        fn prop_never_exceeds_terminal(
            start_v in -600.0f32..350.0,
            dt in 0.0f32..0.05,
            steps in 1usize..200,
        ) {
            let physics = PhysicsIntegrator::default();
            let mut current = Avatar { velocity: start_v, ..Avatar::fallback() };
            for _ in 0..steps {
                current = physics.advance(&current, dt);
                prop_assert!(current.velocity <= TERMINAL_VELOCITY);
            }
        }

        #[test]
        fn prop_impulse_ignores_prior_velocity(v in -1000.0f32..1000.0) {
            let physics = PhysicsIntegrator::default();
            let flapped = physics.impulse(&Avatar { velocity: v, ..Avatar::fallback() });
            prop_assert_eq!(flapped.velocity, FLAP_IMPULSE);
        }
    }
}
