//! Sum Glider - a side-scroller where every flap costs a correct answer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, obstacles, engine)
//! - `math`: Arithmetic problems, difficulty tiers, problem generation
//! - `tuning`: Data-driven game balance
//! - `error`: Crate error type

pub mod error;
pub mod math;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use math::{DifficultyTier, MathProblem, Operator, ProblemGenerator};
pub use sim::{RunState, SimulationEngine, Snapshot};
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    // Physics - forgiving, leaves time to solve problems
    /// Gravity acceleration (units/s²)
    pub const GRAVITY: f32 = 450.0;
    /// Maximum fall speed
    pub const TERMINAL_VELOCITY: f32 = 350.0;
    /// Upward velocity set by a correct answer (negative = up)
    pub const FLAP_IMPULSE: f32 = -520.0;

    // Obstacles
    /// Gap height = avatar height × this
    pub const GAP_MULTIPLIER: f32 = 6.0;
    /// Obstacle width = viewport width × this
    pub const OBSTACLE_WIDTH_RATIO: f32 = 0.15;
    /// Distance from the right edge the newest obstacle must scroll before the next spawns
    pub const OBSTACLE_SPACING: f32 = 550.0;
    /// Minimum height of each blocking segment as a ratio of the area height
    pub const MIN_OBSTACLE_HEIGHT_RATIO: f32 = 0.1;
    /// Scrolled distance (× viewport width) before the first obstacle on an empty field
    pub const FIRST_SPAWN_DISTANCE_RATIO: f32 = 0.5;
    /// Accumulator seed (× viewport width) on reset, so the first obstacle comes quickly
    pub const INITIAL_DISTANCE_RATIO: f32 = 0.45;

    // Scroll speed
    pub const INITIAL_SCROLL_SPEED: f32 = 100.0;
    pub const MAX_SCROLL_SPEED: f32 = 250.0;
    /// Speed gained per obstacle passed
    pub const SPEED_INCREMENT_PER_SCORE: f32 = 1.5;

    // Avatar
    /// Avatar x = viewport width × this
    pub const AVATAR_X_RATIO: f32 = 0.2;
    /// Avatar width = viewport width × this
    pub const AVATAR_SIZE_RATIO: f32 = 0.08;
    /// Avatar height / width
    pub const AVATAR_ASPECT_RATIO: f32 = 1.0;

    // Timing
    /// Largest step the engine will integrate in one call (seconds)
    pub const MAX_DELTA_TIME: f32 = 0.05;

    // Rotation (degrees)
    pub const MAX_ROTATION_DOWN: f32 = 45.0;
    pub const MAX_ROTATION_UP: f32 = -20.0;
    pub const ROTATION_LERP_FACTOR: f32 = 0.1;

    /// Share of the screen height given to the play area (rest is the keypad)
    pub const GAME_AREA_RATIO: f32 = 0.6;
}

/// Play-area height for a full screen height
#[inline]
pub fn game_area_height(screen_height: f32) -> f32 {
    screen_height * consts::GAME_AREA_RATIO
}

/// Linear interpolation from `start` toward `end` by `t`
#[inline]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(2.0, 10.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 10.0, 1.0), 10.0);
        assert!((lerp(0.0, 45.0, 0.1) - 4.5).abs() < 1e-5);
    }

    #[test]
    fn test_game_area_height() {
        assert!((game_area_height(1000.0) - 600.0).abs() < 1e-3);
    }
}
