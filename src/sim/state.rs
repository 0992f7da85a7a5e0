//! Simulation state and entity value types
//!
//! Avatar and Obstacle are plain values: every transition returns a new
//! instance and the engine swaps it in wholesale.

use std::fmt;

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::lerp;
use crate::math::MathProblem;
use crate::tuning::Tuning;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Initial / post-reset, waiting for `start`
    Ready,
    /// Active gameplay
    Running,
    /// Collision ended the run; only `reset` leaves this state
    Ended,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RunState::Ready => "ready",
            RunState::Running => "running",
            RunState::Ended => "ended",
        })
    }
}

/// Play-area dimensions supplied by the driver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Used whenever the driver hasn't supplied usable geometry
    pub const FALLBACK: Viewport = Viewport {
        width: 400.0,
        height: 600.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// The player-controlled entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    /// Horizontal center, fixed for the whole run
    pub x: f32,
    /// Vertical center (y grows downward)
    pub y: f32,
    /// Vertical velocity (negative = up)
    pub velocity: f32,
    /// Visual tilt in degrees (negative = nose up)
    pub rotation: f32,
    pub width: f32,
    pub height: f32,
}

impl Avatar {
    /// Placement for a run against `viewport`: a fixed fraction in from the
    /// left edge, vertically centered, sized from the viewport width
    pub fn at_start(viewport: Viewport, tuning: &Tuning) -> Self {
        let width = viewport.width * tuning.avatar_size_ratio;
        Self {
            x: viewport.width * tuning.avatar_x_ratio,
            y: viewport.height / 2.0,
            velocity: 0.0,
            rotation: 0.0,
            width,
            height: width * tuning.avatar_aspect_ratio,
        }
    }

    /// Placement used before any geometry is known
    pub fn fallback() -> Self {
        Self {
            x: 100.0,
            y: 300.0,
            velocity: 0.0,
            rotation: 0.0,
            width: 50.0,
            height: 50.0,
        }
    }

    /// Gravity into velocity (capped), then velocity into position
    pub fn apply_gravity(&self, gravity: f32, dt: f32, terminal_velocity: f32) -> Self {
        let velocity = (self.velocity + gravity * dt).min(terminal_velocity);
        Self {
            y: self.y + velocity * dt,
            velocity,
            ..*self
        }
    }

    /// Instant upward kick; overrides any rotation smoothing in progress
    pub fn flap(&self, impulse: f32, rotation_up: f32) -> Self {
        Self {
            velocity: impulse,
            rotation: rotation_up,
            ..*self
        }
    }

    /// Ease the tilt toward one proportional to the current fall speed
    pub fn update_rotation(&self, terminal_velocity: f32, max_rotation_down: f32, factor: f32) -> Self {
        let target = (self.velocity / terminal_velocity) * max_rotation_down;
        Self {
            rotation: lerp(self.rotation, target, factor),
            ..*self
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Hitbox, centered on the avatar position
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.center(), Vec2::new(self.width, self.height))
    }

    /// Strictly between ceiling and floor
    pub fn is_within_bounds(&self, area_height: f32) -> bool {
        let bounds = self.bounds();
        bounds.top() > 0.0 && bounds.bottom() < area_height
    }
}

/// Cosmetic tag alternated between consecutive obstacles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObstacleTint {
    #[default]
    Red,
    Blue,
}

impl ObstacleTint {
    pub fn toggled(&self) -> Self {
        match self {
            ObstacleTint::Red => ObstacleTint::Blue,
            ObstacleTint::Blue => ObstacleTint::Red,
        }
    }
}

/// A barrier pair with a gap the avatar must fly through
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    pub gap_center: f32,
    pub gap_height: f32,
    pub width: f32,
    /// Already counted toward the score
    pub scored: bool,
    pub tint: ObstacleTint,
}

impl Obstacle {
    pub fn new(x: f32, gap_center: f32, gap_height: f32, width: f32) -> Self {
        Self {
            x,
            gap_center,
            gap_height,
            width,
            scored: false,
            tint: ObstacleTint::default(),
        }
    }

    pub fn with_tint(self, tint: ObstacleTint) -> Self {
        Self { tint, ..self }
    }

    pub fn gap_top(&self) -> f32 {
        self.gap_center - self.gap_height / 2.0
    }

    pub fn gap_bottom(&self) -> f32 {
        self.gap_center + self.gap_height / 2.0
    }

    pub fn right_edge(&self) -> f32 {
        self.x + self.width
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Blocking region above the gap
    pub fn upper_bounds(&self) -> Rect {
        Rect::new(self.x, 0.0, self.right_edge(), self.gap_top())
    }

    /// Blocking region below the gap
    pub fn lower_bounds(&self, area_height: f32) -> Rect {
        Rect::new(self.x, self.gap_bottom(), self.right_edge(), area_height)
    }

    pub fn moved(&self, scroll_speed: f32, dt: f32) -> Self {
        Self {
            x: self.x - scroll_speed * dt,
            ..*self
        }
    }

    /// Fully past the left edge of the viewport
    pub fn is_off_screen(&self) -> bool {
        self.right_edge() < 0.0
    }

    /// `x` is strictly past the obstacle's horizontal center
    pub fn has_been_passed(&self, x: f32) -> bool {
        x > self.center_x()
    }

    pub fn marked_scored(&self) -> Self {
        Self {
            scored: true,
            ..*self
        }
    }
}

/// Run seed, split into independent PCG streams per consumer
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    const SPAWNER_STREAM: u64 = 1;
    const GENERATOR_STREAM: u64 = 2;

    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn spawner_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, Self::SPAWNER_STREAM)
    }

    pub fn generator_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, Self::GENERATOR_STREAM)
    }
}

/// All mutable state of a run, owned by the engine
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub avatar: Avatar,
    /// Spawn order (oldest first)
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub problem: MathProblem,
    pub scroll_speed: f32,
    pub run_state: RunState,
}

impl SimulationState {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            avatar: self.avatar,
            obstacles: self.obstacles.clone(),
            score: self.score,
            problem: self.problem,
            run_state: self.run_state,
            scroll_speed: self.scroll_speed,
        }
    }
}

/// Read-only view of one frame, handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub avatar: Avatar,
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub problem: MathProblem,
    pub run_state: RunState,
    pub scroll_speed: f32,
}
