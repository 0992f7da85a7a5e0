//! Data-driven game balance
//!
//! Every kinematic and pacing constant the simulation uses, gathered in one
//! serializable value so a driver can load overrides from JSON.

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::error::{Error, Result};

/// Balance knobs for one engine instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    /// Gravity acceleration (units/s²)
    pub gravity: f32,
    /// Fall speed ceiling (units/s)
    pub terminal_velocity: f32,
    /// Velocity set by a correct answer; must be negative (upward)
    pub flap_impulse: f32,

    // === Obstacles ===
    pub gap_multiplier: f32,
    pub obstacle_width_ratio: f32,
    pub obstacle_spacing: f32,
    pub min_obstacle_height_ratio: f32,
    pub first_spawn_distance_ratio: f32,
    pub initial_distance_ratio: f32,

    // === Scroll speed ===
    pub initial_scroll_speed: f32,
    pub max_scroll_speed: f32,
    pub speed_increment_per_score: f32,

    // === Avatar ===
    pub avatar_x_ratio: f32,
    pub avatar_size_ratio: f32,
    pub avatar_aspect_ratio: f32,

    // === Timing ===
    pub max_delta_time: f32,

    // === Rotation (degrees) ===
    pub max_rotation_down: f32,
    pub max_rotation_up: f32,
    pub rotation_lerp_factor: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: consts::GRAVITY,
            terminal_velocity: consts::TERMINAL_VELOCITY,
            flap_impulse: consts::FLAP_IMPULSE,

            gap_multiplier: consts::GAP_MULTIPLIER,
            obstacle_width_ratio: consts::OBSTACLE_WIDTH_RATIO,
            obstacle_spacing: consts::OBSTACLE_SPACING,
            min_obstacle_height_ratio: consts::MIN_OBSTACLE_HEIGHT_RATIO,
            first_spawn_distance_ratio: consts::FIRST_SPAWN_DISTANCE_RATIO,
            initial_distance_ratio: consts::INITIAL_DISTANCE_RATIO,

            initial_scroll_speed: consts::INITIAL_SCROLL_SPEED,
            max_scroll_speed: consts::MAX_SCROLL_SPEED,
            speed_increment_per_score: consts::SPEED_INCREMENT_PER_SCORE,

            avatar_x_ratio: consts::AVATAR_X_RATIO,
            avatar_size_ratio: consts::AVATAR_SIZE_RATIO,
            avatar_aspect_ratio: consts::AVATAR_ASPECT_RATIO,

            max_delta_time: consts::MAX_DELTA_TIME,

            max_rotation_down: consts::MAX_ROTATION_DOWN,
            max_rotation_up: consts::MAX_ROTATION_UP,
            rotation_lerp_factor: consts::ROTATION_LERP_FACTOR,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("gravity", self.gravity),
            ("terminal_velocity", self.terminal_velocity),
            ("flap_impulse", self.flap_impulse),
            ("gap_multiplier", self.gap_multiplier),
            ("obstacle_width_ratio", self.obstacle_width_ratio),
            ("obstacle_spacing", self.obstacle_spacing),
            ("min_obstacle_height_ratio", self.min_obstacle_height_ratio),
            ("first_spawn_distance_ratio", self.first_spawn_distance_ratio),
            ("initial_distance_ratio", self.initial_distance_ratio),
            ("initial_scroll_speed", self.initial_scroll_speed),
            ("max_scroll_speed", self.max_scroll_speed),
            ("speed_increment_per_score", self.speed_increment_per_score),
            ("avatar_x_ratio", self.avatar_x_ratio),
            ("avatar_size_ratio", self.avatar_size_ratio),
            ("avatar_aspect_ratio", self.avatar_aspect_ratio),
            ("max_delta_time", self.max_delta_time),
            ("max_rotation_down", self.max_rotation_down),
            ("max_rotation_up", self.max_rotation_up),
            ("rotation_lerp_factor", self.rotation_lerp_factor),
        ];
        if let Some(&(field, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(field, "must be finite"));
        }

        let positive = [
            ("gravity", self.gravity),
            ("terminal_velocity", self.terminal_velocity),
            ("gap_multiplier", self.gap_multiplier),
            ("obstacle_width_ratio", self.obstacle_width_ratio),
            ("obstacle_spacing", self.obstacle_spacing),
            ("initial_scroll_speed", self.initial_scroll_speed),
            ("avatar_size_ratio", self.avatar_size_ratio),
            ("avatar_aspect_ratio", self.avatar_aspect_ratio),
            ("max_delta_time", self.max_delta_time),
        ];
        if let Some(&(field, _)) = positive.iter().find(|(_, v)| *v <= 0.0) {
            return Err(invalid(field, "must be positive"));
        }

        let non_negative = [
            ("min_obstacle_height_ratio", self.min_obstacle_height_ratio),
            ("first_spawn_distance_ratio", self.first_spawn_distance_ratio),
            ("initial_distance_ratio", self.initial_distance_ratio),
            ("speed_increment_per_score", self.speed_increment_per_score),
            ("avatar_x_ratio", self.avatar_x_ratio),
        ];
        if let Some(&(field, _)) = non_negative.iter().find(|(_, v)| *v < 0.0) {
            return Err(invalid(field, "must not be negative"));
        }

        if self.flap_impulse >= 0.0 {
            return Err(invalid("flap_impulse", "must be negative (upward)"));
        }
        if self.max_scroll_speed < self.initial_scroll_speed {
            return Err(invalid(
                "max_scroll_speed",
                "must be at least initial_scroll_speed",
            ));
        }
        if self.min_obstacle_height_ratio >= 0.5 {
            return Err(invalid("min_obstacle_height_ratio", "must be below 0.5"));
        }
        if self.rotation_lerp_factor <= 0.0 || self.rotation_lerp_factor > 1.0 {
            return Err(invalid("rotation_lerp_factor", "must be in (0, 1]"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &'static str) -> Error {
    Error::InvalidTuning { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 600.0, "max_scroll_speed": 300.0 }"#)
            .unwrap();
        assert_eq!(tuning.gravity, 600.0);
        assert_eq!(tuning.max_scroll_speed, 300.0);
        assert_eq!(tuning.flap_impulse, consts::FLAP_IMPULSE);
        assert_eq!(tuning.obstacle_spacing, consts::OBSTACLE_SPACING);
    }

    #[test]
    fn test_json_round_trip() {
        let mut tuning = Tuning::default();
        tuning.gap_multiplier = 4.5;
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_rejects_upward_gravity() {
        let tuning = Tuning {
            gravity: -10.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(Error::InvalidTuning { field: "gravity", .. })
        ));
    }

    #[test]
    fn test_rejects_downward_flap() {
        let tuning = Tuning {
            flap_impulse: 100.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(Error::InvalidTuning { field: "flap_impulse", .. })
        ));
    }

    #[test]
    fn test_rejects_speed_cap_below_start() {
        let tuning = Tuning {
            max_scroll_speed: 50.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_nan() {
        let tuning = Tuning {
            max_delta_time: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(Error::InvalidTuning { reason: "must be finite", .. })
        ));
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        assert!(matches!(Tuning::from_json("{ gravity"), Err(Error::Json(_))));
    }
}
